use crate::{ConfigError, consts};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceConfig {
    pub total_laps: u32,
    /// Contacts with the same trigger kind closer together than this are dropped
    pub trigger_cooldown: Duration,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl RaceConfig {
    pub const DEFAULT: Self = Self {
        total_laps: consts::TOTAL_LAPS,
        trigger_cooldown: consts::TRIGGER_COOLDOWN,
    };

    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.total_laps == 0 {
            return Err(ConfigError::ZeroLaps);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_laps_rejected() {
        assert_eq!(RaceConfig::DEFAULT.validate(), Ok(()));

        let config = RaceConfig {
            total_laps: 0,
            ..RaceConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLaps));
    }
}
