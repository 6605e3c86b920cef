//! Simulation configuration and its validation errors.

use std::error::Error;
use std::fmt;

/// Configuration for a [`Simulation`](crate::Simulation).
///
/// Validated at construction; the same checks guard
/// [`set_time_step`](crate::Simulation::set_time_step) at runtime.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Fixed time-step in seconds by which every tick advances the
    /// clock. Default: 0.01.
    pub time_step: f64,
    /// Cadence of the timer-paced runner, in ticks per second.
    /// Irrelevant for hosts that drive `poll()` themselves. Default: 60.
    pub tick_rate_hz: f64,
    /// Capacity of the pending-command queue. Default: 1024.
    pub max_pending_commands: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            tick_rate_hz: 60.0,
            max_pending_commands: 1024,
        }
    }
}

impl SimConfig {
    /// Check all structural invariants.
    ///
    /// # Errors
    ///
    /// The first violated invariant, as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_time_step(self.time_step)?;
        if !self.tick_rate_hz.is_finite() || self.tick_rate_hz <= 0.0 {
            return Err(ConfigError::InvalidTickRate {
                value: self.tick_rate_hz,
            });
        }
        if self.max_pending_commands == 0 {
            return Err(ConfigError::CommandQueueZero);
        }
        Ok(())
    }
}

/// Check a time-step value: must be finite and positive.
pub(crate) fn validate_time_step(value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidTimeStep { value });
    }
    Ok(())
}

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// time_step is NaN, infinite, zero, or negative.
    InvalidTimeStep {
        /// The invalid value.
        value: f64,
    },
    /// tick_rate_hz is NaN, infinite, zero, or negative.
    InvalidTickRate {
        /// The invalid value.
        value: f64,
    },
    /// max_pending_commands is zero.
    CommandQueueZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeStep { value } => {
                write!(f, "time_step must be finite and positive, got {value}")
            }
            Self::InvalidTickRate { value } => {
                write!(f, "tick_rate_hz must be finite and positive, got {value}")
            }
            Self::CommandQueueZero => write!(f, "max_pending_commands must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn bad_time_steps_rejected() {
        for value in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                time_step: value,
                ..SimConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidTimeStep { .. })),
                "time_step {value}"
            );
        }
    }

    #[test]
    fn bad_tick_rate_rejected() {
        let config = SimConfig {
            tick_rate_hz: 0.0,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTickRate { value: 0.0 })
        );
    }

    #[test]
    fn zero_queue_rejected() {
        let config = SimConfig {
            max_pending_commands: 0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::CommandQueueZero));
    }
}
