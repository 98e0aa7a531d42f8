use thiserror::Error;

/// Failure of a single camera step.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraError {
    /// The followed target is absent or has been despawned.
    #[error("orbit camera has no live target to follow")]
    InvalidState,
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read camera settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse camera settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid camera settings: {0}")]
    Invalid(String),
}
