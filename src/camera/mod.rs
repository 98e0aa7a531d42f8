pub mod controller;
pub mod error;
pub mod input;
pub mod probe;
pub mod settings;
pub mod systems;
#[cfg(test)]
mod test_support;

pub use controller::*;
pub use error::*;
pub use input::{CameraPaused, LookInput};
pub use probe::*;
pub use settings::*;
pub use systems::TargetLost;

use bevy::prelude::*;
use bevy::transform::TransformSystems;

/// Plugin for the third-person orbit camera with obstacle avoidance.
///
/// Obstacle queries go through avian3d's `SpatialQuery`, so the app also
/// needs avian's `PhysicsPlugins`.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OrbitCollisionCamera>()
            .register_type::<OrbitCameraSettings>()
            .register_type::<OrbitCameraTarget>()
            .register_type::<TargetLost>()
            .register_type::<CameraPaused>()
            .init_resource::<LookInput>()
            .init_resource::<CameraPaused>();

        app.add_observer(systems::initialize_orbit_camera);
        app.add_systems(Update, input::handle_mouse_look);
        // After the target's movement has been written back, before the
        // transform hierarchy is propagated for rendering
        app.add_systems(
            PostUpdate,
            systems::update_orbit_camera.before(TransformSystems::Propagate),
        );
    }
}
