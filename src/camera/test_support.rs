use std::time::Duration;

use avian3d::collision::CollisionDiagnostics;
use avian3d::dynamics::solver::SolverDiagnostics;
use avian3d::prelude::*;
use avian3d::spatial_query::SpatialQueryDiagnostics;
use bevy::gizmos::GizmoPlugin;
use bevy::input::InputPlugin;
use bevy::mesh::MeshPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::time::TimeUpdateStrategy;

use super::OrbitCameraPlugin;

pub const TIMESTEP: f32 = 1.0 / 60.0;

/// Headless app with avian physics and the orbit camera plugin, stepping
/// `TIMESTEP` per update.
pub fn camera_app() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        AssetPlugin::default(),
        MeshPlugin,
        ScenePlugin,
        InputPlugin,
        GizmoPlugin,
        PhysicsPlugins::default(),
        OrbitCameraPlugin,
    ));

    // only registered by the diagnostics plugin, but read by the physics systems
    app.init_resource::<CollisionDiagnostics>()
        .init_resource::<SpatialQueryDiagnostics>()
        .init_resource::<SolverDiagnostics>();

    app.insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f32(
        TIMESTEP,
    )));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        TIMESTEP,
    )));

    app.finish();
    app.cleanup();
    app
}

/// Static slab centred at `center`, facing Z, on `layers`.
pub fn spawn_wall(app: &mut App, center: Vec3, layers: LayerMask) -> Entity {
    app.world_mut()
        .spawn((
            RigidBody::Static,
            Collider::cuboid(4.0, 4.0, 0.2),
            CollisionLayers::new(layers, LayerMask::ALL),
            Transform::from_translation(center),
        ))
        .id()
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
