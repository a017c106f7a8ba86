use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a traffic signal controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ControllerConfig {
    /// Unique identifier of the controller within the process.
    pub id: u64,
    /// Cycle timing bounds for the phase toggle.
    #[serde(default)]
    pub cycle: CycleConfig,
}

/// Timing bounds for a single signal phase.
///
/// The cycle worker holds each phase for a duration drawn uniformly from
/// `[min_duration_ms, max_duration_ms]`, redrawn independently after every
/// toggle.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CycleConfig {
    /// Minimum duration, in milliseconds, a phase is held before the signal toggles.
    pub min_duration_ms: u64,
    /// Maximum duration, in milliseconds, a phase is held before the signal toggles.
    pub max_duration_ms: u64,
}

impl CycleConfig {
    /// Returns the minimum phase duration as a [`Duration`].
    pub fn min_duration(&self) -> Duration {
        Duration::from_millis(self.min_duration_ms)
    }

    /// Returns the maximum phase duration as a [`Duration`].
    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }

    /// Returns `true` if the bounds describe a valid non-empty interval.
    ///
    /// The minimum must be non-zero and must not exceed the maximum.
    pub fn is_valid(&self) -> bool {
        self.min_duration_ms > 0 && self.min_duration_ms <= self.max_duration_ms
    }
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 4000,
            max_duration_ms: 6000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cycle_bounds() {
        let cycle = CycleConfig::default();
        assert_eq!(cycle.min_duration_ms, 4000);
        assert_eq!(cycle.max_duration_ms, 6000);
        assert!(cycle.is_valid());
    }

    #[test]
    fn test_cycle_validity() {
        let cycle = CycleConfig {
            min_duration_ms: 0,
            max_duration_ms: 100,
        };
        assert!(!cycle.is_valid());

        let cycle = CycleConfig {
            min_duration_ms: 200,
            max_duration_ms: 100,
        };
        assert!(!cycle.is_valid());

        let cycle = CycleConfig {
            min_duration_ms: 100,
            max_duration_ms: 100,
        };
        assert!(cycle.is_valid());
    }
}
