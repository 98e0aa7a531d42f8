use bevy::prelude::*;

use super::error::CameraError;
use super::probe::{DebugDraw, ObstacleProbe};
use super::settings::OrbitCameraSettings;

/// Half turn about local Y. Maps between the orbit frame, where the camera
/// looks along local +Z, and Bevy's -Z forward view transforms.
const VIEW_FLIP: Quat = Quat::from_xyzw(0.0, 1.0, 0.0, 0.0);

/// Orbit camera state that persists across frames.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
#[require(Transform, OrbitCameraSettings)]
pub struct OrbitCollisionCamera {
    /// Accumulated pitch in degrees, always within the configured angle range
    vertical_angle: f32,
    /// Smoothed distance from the target, shortened by obstacles
    current_distance: f32,
}

/// Entity the camera orbits around.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct OrbitCameraTarget(pub Entity);

/// Per-frame inputs of [`OrbitCollisionCamera::step`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer motion in input units; x turns, y pitches
    pub look: Vec2,
    pub delta_time: f32,
    pub paused: bool,
}

/// Camera rotation and position in the orbit frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub rotation: Quat,
    pub position: Vec3,
}

impl CameraPose {
    pub fn from_view(transform: &Transform) -> Self {
        Self {
            rotation: transform.rotation * VIEW_FLIP,
            position: transform.translation,
        }
    }

    pub fn apply_to_view(self, transform: &mut Transform) {
        transform.rotation = self.rotation * VIEW_FLIP;
        transform.translation = self.position;
    }
}

impl Default for OrbitCollisionCamera {
    fn default() -> Self {
        Self::new(&OrbitCameraSettings::default())
    }
}

impl OrbitCollisionCamera {
    pub fn new(settings: &OrbitCameraSettings) -> Self {
        let mut camera = Self {
            vertical_angle: 0.0,
            current_distance: 0.0,
        };
        camera.initialize(settings);
        camera
    }

    pub fn initialize(&mut self, settings: &OrbitCameraSettings) {
        self.vertical_angle = 0.0;
        self.current_distance = settings.distance.far;
    }

    pub fn vertical_angle(&self) -> f32 {
        self.vertical_angle
    }

    pub fn current_distance(&self) -> f32 {
        self.current_distance
    }

    /// Advances the camera by one frame and returns its new pose.
    ///
    /// `current` is the pose the camera had after the previous frame; its yaw
    /// is the base for this frame's horizontal turn. A missing target fails
    /// with [`CameraError::InvalidState`] without touching any state, and a
    /// paused frame returns `current` unchanged.
    pub fn step<P, D>(
        &mut self,
        settings: &OrbitCameraSettings,
        target: Option<Vec3>,
        frame: FrameInput,
        current: CameraPose,
        probe: &P,
        debug: &mut D,
    ) -> Result<CameraPose, CameraError>
    where
        P: ObstacleProbe + ?Sized,
        D: DebugDraw + ?Sized,
    {
        let target = target.ok_or(CameraError::InvalidState)?;
        if frame.paused {
            return Ok(current);
        }

        let (yaw, _, _) = current.rotation.to_euler(EulerRot::YXZ);
        let horizontal_angle = yaw.to_degrees() + frame.look.x * settings.sensitivity;

        // max/min instead of clamp, which panics on an inverted range
        self.vertical_angle = (self.vertical_angle + frame.look.y * settings.sensitivity)
            .max(settings.angle.min)
            .min(settings.angle.max);

        let orientation = Quat::from_euler(
            EulerRot::YXZ,
            horizontal_angle.to_radians(),
            self.vertical_angle.to_radians(),
            0.0,
        );

        let anchor_height = settings.height * 0.5;
        let near_anchor =
            target + orientation * Vec3::new(0.0, anchor_height, -settings.distance.near);
        let far_anchor =
            target + orientation * Vec3::new(0.0, anchor_height, -settings.distance.far);
        let ideal_distance = target.distance(far_anchor);

        // Unclamped on purpose: a large damping * delta_time overshoots
        self.current_distance = self
            .current_distance
            .lerp(ideal_distance, settings.distance_damping * frame.delta_time);

        if let Ok(direction) = Dir3::new(far_anchor - near_anchor) {
            if let Some(hit_distance) = probe.cast(
                near_anchor,
                direction,
                self.current_distance,
                settings.obstacle_layers,
            ) {
                self.current_distance = hit_distance;
            }
        }

        debug.segment(near_anchor, far_anchor);

        Ok(CameraPose {
            rotation: orientation,
            position: target
                + orientation * Vec3::new(0.0, settings.height, -self.current_distance),
        })
    }
}
