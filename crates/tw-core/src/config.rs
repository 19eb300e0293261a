//! Tracker configuration domain model

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tracker configuration
///
/// Owned by the host application and handed to the tracker at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Upper bound on a single pump tick, in seconds.
    pub pump_timeout_secs: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            pump_timeout_secs: 1.0,
        }
    }
}

impl TrackerConfig {
    /// Pump tick bound as a `Duration`. Negative or non-finite values are
    /// clamped to zero.
    pub fn pump_timeout(&self) -> Duration {
        if self.pump_timeout_secs.is_finite() && self.pump_timeout_secs > 0.0 {
            Duration::from_secs_f64(self.pump_timeout_secs)
        } else {
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pump_timeout_is_one_second() {
        let config = TrackerConfig::default();
        assert_eq!(config.pump_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn invalid_timeouts_clamp_to_zero() {
        let negative = TrackerConfig {
            pump_timeout_secs: -2.0,
        };
        assert_eq!(negative.pump_timeout(), Duration::ZERO);

        let nan = TrackerConfig {
            pump_timeout_secs: f64::NAN,
        };
        assert_eq!(nan.pump_timeout(), Duration::ZERO);
    }

    #[test]
    fn roundtrips_through_serde() {
        let config = TrackerConfig {
            pump_timeout_secs: 0.25,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: TrackerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pump_timeout_secs, 0.25);
    }
}
