use avian3d::prelude::*;
use bevy::prelude::*;

use super::controller::{CameraPose, FrameInput, OrbitCameraTarget, OrbitCollisionCamera};
use super::input::{CameraPaused, LookInput};
use super::probe::NoDebugDraw;
use super::settings::OrbitCameraSettings;

/// Resets a camera's state when the behavior is added to an entity.
pub fn initialize_orbit_camera(
    on: On<Add, OrbitCollisionCamera>,
    mut cameras: Query<(&mut OrbitCollisionCamera, &OrbitCameraSettings)>,
) {
    let entity = on.event_target();
    let Ok((mut camera, settings)) = cameras.get_mut(entity) else {
        return;
    };

    if let Err(err) = settings.validate() {
        warn!("orbit camera {entity}: {err}");
    }

    camera.initialize(settings);
    debug!(
        "orbit camera {entity} initialized at distance {}",
        camera.current_distance()
    );
}

/// World position of the camera's target, if it still exists.
pub fn target_position(
    target: Option<&OrbitCameraTarget>,
    targets: &Query<&Transform, Without<OrbitCollisionCamera>>,
) -> Option<Vec3> {
    let target = target?;
    targets
        .get(target.0)
        .ok()
        .map(|transform| transform.translation)
}

/// Marks a camera whose target is missing. Its frames are skipped until a
/// live target is set again.
#[derive(Component, Reflect, Debug, Default, Clone, Copy)]
#[reflect(Component)]
pub struct TargetLost;

/// Steps every orbit camera once. Runs after movement and physics so the
/// target position is the one rendered this frame.
#[allow(clippy::type_complexity)]
pub fn update_orbit_camera(
    mut commands: Commands,
    mut cameras: Query<(
        Entity,
        &mut Transform,
        &mut OrbitCollisionCamera,
        &OrbitCameraSettings,
        Option<&OrbitCameraTarget>,
        Has<TargetLost>,
    )>,
    targets: Query<&Transform, Without<OrbitCollisionCamera>>,
    look: Res<LookInput>,
    paused: Res<CameraPaused>,
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut gizmos: Gizmos,
) {
    let frame = FrameInput {
        look: look.0,
        delta_time: time.delta_secs(),
        paused: paused.0,
    };

    for (entity, mut transform, mut camera, settings, target, lost) in cameras.iter_mut() {
        let target = target_position(target, &targets);
        let current = CameraPose::from_view(&transform);

        let result = if settings.debugging {
            camera.step(settings, target, frame, current, &spatial_query, &mut gizmos)
        } else {
            camera.step(
                settings,
                target,
                frame,
                current,
                &spatial_query,
                &mut NoDebugDraw,
            )
        };

        match result {
            Ok(pose) => {
                if pose != current {
                    pose.apply_to_view(&mut transform);
                }
                if lost {
                    info!("orbit camera {entity} has a target again");
                    commands.entity(entity).remove::<TargetLost>();
                }
            }
            Err(err) => {
                if !lost {
                    warn!("orbit camera {entity}: {err}, skipping its frames");
                    commands.entity(entity).insert(TargetLost);
                }
            }
        }
    }
}
