use std::time::Duration;

use trafficlight::controller::ControllerId;
use trafficlight_config::shared::{ControllerConfig, CycleConfig};

/// Minimum phase duration used by timing tests.
///
/// Fast enough to keep the suite quick, long enough that assertions made
/// right after a toggle are not racy against the next one.
pub const FAST_MIN_MS: u64 = 50;

/// Maximum phase duration used by timing tests.
pub const FAST_MAX_MS: u64 = 150;

/// Upper tolerance added to timing assertions so they hold on loaded CI
/// machines.
pub const SCHEDULING_SLACK: Duration = Duration::from_millis(500);

/// Creates a controller configuration with fast cycle bounds for tests.
pub fn fast_config(id: ControllerId) -> ControllerConfig {
    ControllerConfig {
        id,
        cycle: CycleConfig {
            min_duration_ms: FAST_MIN_MS,
            max_duration_ms: FAST_MAX_MS,
        },
    }
}
