//! # Live Feed Settings
//!
//! Timer periods and thresholds for the simulated feed. The settings are a
//! section of the application's `bistro.toml`; this crate only defines
//! and validates them.
//!
//! ```toml
//! [live]
//! enabled = true
//! weather_interval_secs = 60
//! tables_interval_secs = 15
//! low_availability_threshold = 3
//! # seed = 42   # fixed seed makes the walk reproducible
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{LiveError, LiveResult};

/// Settings for [`LiveFeed`](crate::LiveFeed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSettings {
    /// Whether the runner starts the feed at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between weather changes.
    #[serde(default = "default_weather_interval")]
    pub weather_interval_secs: u64,

    /// Seconds between table availability changes.
    #[serde(default = "default_tables_interval")]
    pub tables_interval_secs: u64,

    /// Free-table count at or below which a warning toast is shown.
    #[serde(default = "default_low_availability")]
    pub low_availability_threshold: u32,

    /// RNG seed. `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

fn default_weather_interval() -> u64 {
    60
}

fn default_tables_interval() -> u64 {
    15
}

fn default_low_availability() -> u32 {
    3
}

impl Default for LiveSettings {
    fn default() -> Self {
        LiveSettings {
            enabled: true,
            weather_interval_secs: default_weather_interval(),
            tables_interval_secs: default_tables_interval(),
            low_availability_threshold: default_low_availability(),
            seed: None,
        }
    }
}

impl LiveSettings {
    pub fn validate(&self) -> LiveResult<()> {
        if self.weather_interval_secs == 0 {
            return Err(LiveError::InvalidConfig(
                "weather_interval_secs must be greater than 0".into(),
            ));
        }
        if self.tables_interval_secs == 0 {
            return Err(LiveError::InvalidConfig(
                "tables_interval_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    pub fn weather_interval(&self) -> Duration {
        Duration::from_secs(self.weather_interval_secs)
    }

    pub fn tables_interval(&self) -> Duration {
        Duration::from_secs(self.tables_interval_secs)
    }
}
