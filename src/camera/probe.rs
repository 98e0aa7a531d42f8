use avian3d::prelude::*;
use bevy::color::palettes::css::YELLOW;
use bevy::prelude::*;

/// Ray query used to find obstacles between the target and the camera.
pub trait ObstacleProbe {
    /// Distance to the nearest hit within `max_distance` on the given layers.
    fn cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<f32>;
}

impl ObstacleProbe for SpatialQuery<'_, '_> {
    fn cast(
        &self,
        origin: Vec3,
        direction: Dir3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<f32> {
        self.cast_ray(
            origin,
            direction,
            max_distance,
            true,
            &SpatialQueryFilter::from_mask(layers),
        )
        .map(|hit| hit.distance)
    }
}

/// Sink for the camera's debug visualization.
pub trait DebugDraw {
    fn segment(&mut self, start: Vec3, end: Vec3);
}

/// Discards debug output.
pub struct NoDebugDraw;

impl DebugDraw for NoDebugDraw {
    fn segment(&mut self, _start: Vec3, _end: Vec3) {}
}

impl DebugDraw for Gizmos<'_, '_> {
    fn segment(&mut self, start: Vec3, end: Vec3) {
        self.line(start, end, YELLOW);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use bevy::ecs::system::RunSystemOnce;

    use super::*;
    use crate::camera::test_support::{camera_app, run_frames, spawn_wall};

    const OBSTACLES: LayerMask = LayerMask(0b100);

    fn cast_back(app: &mut App, origin: Vec3, max_distance: f32, layers: LayerMask) -> Option<f32> {
        app.world_mut()
            .run_system_once(move |spatial_query: SpatialQuery| {
                spatial_query.cast(origin, Dir3::NEG_Z, max_distance, layers)
            })
            .expect("system runs")
    }

    fn app_with_wall() -> App {
        let mut app = camera_app();
        // front face at z = -1.9
        spawn_wall(&mut app, Vec3::new(0.0, 0.0, -2.0), OBSTACLES);
        run_frames(&mut app, 5);
        app
    }

    #[test]
    fn hits_wall_on_requested_layer() {
        let mut app = app_with_wall();

        let hit = cast_back(&mut app, Vec3::new(0.0, 0.25, -0.2), 3.5, OBSTACLES);

        assert_abs_diff_eq!(hit.expect("wall is in range"), 1.7, epsilon = 1e-4);
    }

    #[test]
    fn ignores_wall_on_other_layers() {
        let mut app = app_with_wall();

        let hit = cast_back(&mut app, Vec3::new(0.0, 0.25, -0.2), 3.5, LayerMask(0b010));

        assert_eq!(hit, None);
    }

    #[test]
    fn ignores_wall_beyond_max_distance() {
        let mut app = app_with_wall();

        let hit = cast_back(&mut app, Vec3::new(0.0, 0.25, -0.2), 1.0, OBSTACLES);

        assert_eq!(hit, None);
    }

    #[test]
    fn ray_starting_inside_obstacle_hits_at_zero() {
        let mut app = app_with_wall();

        let hit = cast_back(&mut app, Vec3::new(0.0, 0.25, -2.0), 3.5, OBSTACLES);

        assert_eq!(hit, Some(0.0));
    }
}
