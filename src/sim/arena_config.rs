use crate::{
    ConfigError, consts,
    error::ensure_positive,
};
use glam::Vec3A;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaConfig {
    /// Length of one physics sub-step, in seconds
    pub fixed_time_step: f32,
    /// Sub-steps allowed per frame; frame time beyond this is dropped
    pub max_sub_steps: u32,
    pub gravity: Vec3A,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ArenaConfig {
    pub const DEFAULT: Self = Self {
        fixed_time_step: consts::FIXED_TIME_STEP,
        max_sub_steps: consts::MAX_SUB_STEPS,
        gravity: consts::GRAVITY,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("fixed time step", self.fixed_time_step)?;

        if self.max_sub_steps == 0 {
            return Err(ConfigError::ZeroSubSteps);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert_eq!(ArenaConfig::default().validate(), Ok(()));

        let mut config = ArenaConfig::DEFAULT;
        config.max_sub_steps = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroSubSteps));

        let mut config = ArenaConfig::DEFAULT;
        config.fixed_time_step = -1.0 / 60.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "fixed time step", .. })
        ));
    }
}
