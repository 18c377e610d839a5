use thiserror::Error;

/// Raised when a constructor is handed geometry or tuning it cannot build from.
///
/// These are programming errors, so construction aborts instead of limping on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("wheel inset {inset} does not fit a chassis of length {length}")]
    WheelInsetTooLarge { inset: f32, length: f32 },

    #[error("inner island ({inner}) must be smaller than the outer size ({outer}) minus two lanes")]
    IslandTooLarge { inner: f32, outer: f32 },

    #[error("total laps must be at least 1")]
    ZeroLaps,

    #[error("camera lerp factor must lie in (0, 1], got {0}")]
    LerpOutOfRange(f32),

    #[error("max sub-steps must be at least 1")]
    ZeroSubSteps,

    #[error("a race car needs exactly {expected} wheels, got {got}")]
    WheelCount { expected: usize, got: usize },
}

pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
