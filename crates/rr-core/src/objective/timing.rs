use std::time::Duration;

use crate::config::AppConfig;

pub const DEFAULT_REVEAL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_CELEBRATION_DELAY_MS: u64 = 3_000;
pub const DEFAULT_CELEBRATION_DURATION_MS: u64 = 4_000;
pub const DEFAULT_COMPLETION_DWELL_MS: u64 = 7_000;
pub const DEFAULT_MAX_VISIBLE: usize = 3;

/// Pacing of the home-screen objective effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveTimings {
    pub reveal_interval: Duration,
    /// From completion to banner fade-in.
    pub celebration_delay: Duration,
    /// How long the banner stays up.
    pub celebration_duration: Duration,
    /// From completion to automatic removal.
    pub completion_dwell: Duration,
    pub max_visible: usize,
}

impl Default for ObjectiveTimings {
    fn default() -> Self {
        Self {
            reveal_interval: Duration::from_millis(DEFAULT_REVEAL_INTERVAL_MS),
            celebration_delay: Duration::from_millis(DEFAULT_CELEBRATION_DELAY_MS),
            celebration_duration: Duration::from_millis(DEFAULT_CELEBRATION_DURATION_MS),
            completion_dwell: Duration::from_millis(DEFAULT_COMPLETION_DWELL_MS),
            max_visible: DEFAULT_MAX_VISIBLE,
        }
    }
}

impl ObjectiveTimings {
    /// Builds timings from config. Zero values mean "not configured".
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = Self::default();
        let pick = |ms: u64, fallback: Duration| {
            if ms == 0 {
                fallback
            } else {
                Duration::from_millis(ms)
            }
        };
        Self {
            reveal_interval: pick(config.reveal_interval_ms, defaults.reveal_interval),
            celebration_delay: pick(config.celebration_delay_ms, defaults.celebration_delay),
            celebration_duration: pick(
                config.celebration_duration_ms,
                defaults.celebration_duration,
            ),
            completion_dwell: pick(config.completion_dwell_ms, defaults.completion_dwell),
            max_visible: if config.max_visible == 0 {
                defaults.max_visible
            } else {
                config.max_visible as usize
            },
        }
    }
}
