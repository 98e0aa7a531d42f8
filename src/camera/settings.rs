use std::ops::RangeInclusive;
use std::path::Path;

use avian3d::prelude::LayerMask;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::SettingsError;

/// Allowed camera height above the target, in world units.
pub const HEIGHT_RANGE: RangeInclusive<f32> = 0.1..=3.0;
/// Allowed distance smoothing rate.
pub const DISTANCE_DAMPING_RANGE: RangeInclusive<f32> = 1.0..=60.0;

/// Vertical look angle limits in degrees.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

/// Camera distance limits in world units.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    /// Distance of the anchor the obstacle ray starts from
    pub near: f32,
    /// Unobstructed camera distance
    pub far: f32,
}

/// Author-provided configuration of an orbit camera. Not modified at runtime.
#[derive(Component, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct OrbitCameraSettings {
    /// Draw the obstacle probe segment with gizmos
    pub debugging: bool,
    /// Degrees of rotation per input unit
    pub sensitivity: f32,
    /// Vertical angle range (pitch), positive looks down
    pub angle: AngleRange,
    /// Camera height above the target
    pub height: f32,
    pub distance: DistanceRange,
    /// How fast the camera distance recovers after an obstacle clears
    pub distance_damping: f32,
    /// Physics layers that block the view
    pub obstacle_layers: LayerMask,
}

impl Default for OrbitCameraSettings {
    fn default() -> Self {
        Self {
            debugging: false,
            sensitivity: 2.0,
            angle: AngleRange {
                min: -60.0,
                max: 30.0,
            },
            height: 0.5,
            distance: DistanceRange {
                near: 0.2,
                far: 3.5,
            },
            distance_damping: 5.0,
            obstacle_layers: LayerMask::ALL,
        }
    }
}

impl OrbitCameraSettings {
    /// Parses settings from TOML. Missing keys take their default value.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks the authoring constraints. The camera itself never calls this
    /// per frame; malformed settings are an authoring defect.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(invalid(format!(
                "sensitivity must be positive, got {}",
                self.sensitivity
            )));
        }
        if !(self.angle.min <= self.angle.max) {
            return Err(invalid(format!(
                "angle range is inverted ({} > {})",
                self.angle.min, self.angle.max
            )));
        }
        if !HEIGHT_RANGE.contains(&self.height) {
            return Err(invalid(format!(
                "height {} is outside {:?}",
                self.height, HEIGHT_RANGE
            )));
        }
        if !(self.distance.near > 0.0 && self.distance.near <= self.distance.far) {
            return Err(invalid(format!(
                "distance range must satisfy 0 < near <= far, got near={} far={}",
                self.distance.near, self.distance.far
            )));
        }
        if !DISTANCE_DAMPING_RANGE.contains(&self.distance_damping) {
            return Err(invalid(format!(
                "distance_damping {} is outside {:?}",
                self.distance_damping, DISTANCE_DAMPING_RANGE
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> SettingsError {
    SettingsError::Invalid(message)
}
