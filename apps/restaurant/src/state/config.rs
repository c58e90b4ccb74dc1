//! # Configuration State
//!
//! Restaurant settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BISTRO_DB_PATH=./data/bistro.db                                    │
//! │     BISTRO_TAX_RATE=8.25                                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $BISTRO_CONFIG, or                                                 │
//! │     ~/.config/bistro/bistro.toml (Linux)                               │
//! │     ~/Library/Application Support/com.bistro.bistro/bistro.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [restaurant]
//! name = "Bistro Lumière"
//! currency_symbol = "$"
//! tax_rate_bps = 800       # 8.00%
//! total_tables = 20
//! utc_offset_minutes = 600 # UTC+10:00, the clock reservations are checked against
//!
//! [storage]
//! db_path = "/var/lib/bistro/bistro.db"   # omit for the platform data dir
//!
//! [live]
//! weather_interval_secs = 60
//! tables_interval_secs = 15
//! low_availability_threshold = 3
//! ```
//!
//! Read-only after startup, so no mutex.

use std::path::{Path, PathBuf};

use bistro_core::validation::{validate_tax_rate_bps, validate_utc_offset_minutes};
use bistro_core::{Money, TaxRate, DEFAULT_TAX_RATE_BPS, DEFAULT_TOTAL_TABLES};
use bistro_live::{LiveError, LiveSettings};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BISTRO_CONFIG";

const CONFIG_FILE_NAME: &str = "bistro.toml";
const DB_FILE_NAME: &str = "bistro.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Live(#[from] LiveError),

    #[error("Could not determine the platform config directory")]
    NoProjectDirs,
}

// =============================================================================
// Sections
// =============================================================================

/// What the website shows about the restaurant and how it prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantSettings {
    #[serde(default = "default_name")]
    pub name: String,

    /// Currency code (ISO 4217)
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of decimal places for currency
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,

    /// Sales tax in basis points, e.g. 825 = 8.25%
    #[serde(default = "default_tax_rate")]
    pub tax_rate_bps: u32,

    /// Tables on the floor; the live feed never reports more free.
    #[serde(default = "default_total_tables")]
    pub total_tables: u32,

    /// Local time as an offset from UTC in minutes. Booking slots and
    /// "today" follow this clock.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_name() -> String {
    "Bistro".to_string()
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

fn default_tax_rate() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

fn default_total_tables() -> u32 {
    DEFAULT_TOTAL_TABLES
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        RestaurantSettings {
            name: default_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
            tax_rate_bps: default_tax_rate(),
            total_tables: default_total_tables(),
            utc_offset_minutes: 0,
        }
    }
}

/// Where the store snapshot lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. `None` uses the platform data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

// =============================================================================
// ConfigState
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigState {
    #[serde(default)]
    pub restaurant: RestaurantSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub live: LiveSettings,
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`path`, `$BISTRO_CONFIG`, or the platform config dir)
    /// 3. Environment variables
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        let path = path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoProjectDirs)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(self)?)?;

        info!(?path, "Config saved");
        Ok(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.restaurant.name.trim().is_empty() {
            return Err(ConfigError::Invalid("restaurant name is required".into()));
        }
        validate_tax_rate_bps(self.restaurant.tax_rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.restaurant.total_tables == 0 {
            return Err(ConfigError::Invalid(
                "total_tables must be greater than 0".into(),
            ));
        }
        validate_utc_offset_minutes(self.restaurant.utc_offset_minutes)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.restaurant.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "currency_decimals must be at most 4".into(),
            ));
        }
        self.live.validate()?;
        Ok(())
    }

    /// Applies `BISTRO_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    ///
    /// ## Keys
    /// - `BISTRO_DB_PATH`: database file
    /// - `BISTRO_RESTAURANT_NAME`: display name
    /// - `BISTRO_TAX_RATE`: percentage, e.g. "8.25"
    /// - `BISTRO_TOTAL_TABLES`: floor size
    /// - `BISTRO_UTC_OFFSET_MINUTES`: local clock, e.g. "600" for UTC+10
    /// - `BISTRO_WEATHER_INTERVAL_SECS`, `BISTRO_TABLES_INTERVAL_SECS`: feed timers
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("BISTRO_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.db_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("BISTRO_RESTAURANT_NAME") {
            self.restaurant.name = name;
        }

        if let Some(rate) = lookup("BISTRO_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    self.restaurant.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring unparseable BISTRO_TAX_RATE"),
            }
        }

        if let Some(tables) = lookup("BISTRO_TOTAL_TABLES") {
            match tables.parse::<u32>() {
                Ok(n) => self.restaurant.total_tables = n,
                Err(_) => warn!(tables = %tables, "Ignoring unparseable BISTRO_TOTAL_TABLES"),
            }
        }

        if let Some(offset) = lookup("BISTRO_UTC_OFFSET_MINUTES") {
            match offset.parse::<i32>() {
                Ok(minutes) => self.restaurant.utc_offset_minutes = minutes,
                Err(_) => {
                    warn!(offset = %offset, "Ignoring unparseable BISTRO_UTC_OFFSET_MINUTES")
                }
            }
        }

        if let Some(secs) = lookup("BISTRO_WEATHER_INTERVAL_SECS").and_then(|s| s.parse().ok()) {
            self.live.weather_interval_secs = secs;
        }

        if let Some(secs) = lookup("BISTRO_TABLES_INTERVAL_SECS").and_then(|s| s.parse().ok()) {
            self.live.tables_interval_secs = secs;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "bistro", "bistro")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Database file to open, creating the platform data directory when it
    /// is the one used.
    ///
    /// ## Platform-Specific Paths
    /// - **macOS**: `~/Library/Application Support/com.bistro.bistro/bistro.db`
    /// - **Windows**: `%APPDATA%\bistro\bistro\data\bistro.db`
    /// - **Linux**: `~/.local/share/bistro/bistro.db`
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.storage.db_path {
            return Ok(path.clone());
        }

        let dirs = Self::project_dirs().ok_or(ConfigError::NoProjectDirs)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;
        Ok(data_dir.join(DB_FILE_NAME))
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.restaurant.tax_rate_bps)
    }

    /// Formats an amount with the configured symbol and decimals.
    ///
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(u32::from(self.restaurant.currency_decimals));
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.restaurant.currency_symbol,
            if self.restaurant.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = usize::from(self.restaurant.currency_decimals)
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigState::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tax_rate().bps(), DEFAULT_TAX_RATE_BPS);
        assert_eq!(config.restaurant.total_tables, DEFAULT_TOTAL_TABLES);
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
        assert_eq!(config.format_currency(Money::from_cents(5)), "$0.05");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-$12.34");

        let mut yen = ConfigState::default();
        yen.restaurant.currency_symbol = "¥".into();
        yen.restaurant.currency_decimals = 0;
        assert_eq!(yen.format_currency(Money::from_cents(1500)), "¥1500");
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigState::default();
        config.apply_overrides(overrides(&[
            ("BISTRO_DB_PATH", "/tmp/b.db"),
            ("BISTRO_RESTAURANT_NAME", "Chez Ada"),
            ("BISTRO_TAX_RATE", "8.25"),
            ("BISTRO_TOTAL_TABLES", "12"),
            ("BISTRO_UTC_OFFSET_MINUTES", "-300"),
            ("BISTRO_TABLES_INTERVAL_SECS", "3"),
        ]));

        assert_eq!(config.storage.db_path, Some(PathBuf::from("/tmp/b.db")));
        assert_eq!(config.restaurant.name, "Chez Ada");
        assert_eq!(config.restaurant.tax_rate_bps, 825);
        assert_eq!(config.restaurant.total_tables, 12);
        assert_eq!(config.restaurant.utc_offset_minutes, -300);
        assert_eq!(config.live.tables_interval_secs, 3);
        assert_eq!(config.live.weather_interval_secs, 60);
    }

    #[test]
    fn test_bad_override_is_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(overrides(&[
            ("BISTRO_TAX_RATE", "lots"),
            ("BISTRO_TOTAL_TABLES", "-1"),
            ("BISTRO_UTC_OFFSET_MINUTES", "+10:00"),
        ]));
        assert_eq!(config, ConfigState::default());
    }

    #[test]
    fn test_validation() {
        let mut config = ConfigState::default();
        config.restaurant.total_tables = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ConfigState::default();
        config.restaurant.utc_offset_minutes = 15 * 60;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = ConfigState::default();
        config.live.weather_interval_secs = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Live(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bistro.toml");

        let mut config = ConfigState::default();
        config.restaurant.name = "Trattoria".into();
        config.live.seed = Some(5);
        config.save(Some(path.clone())).unwrap();

        let loaded = ConfigState::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ConfigState = toml::from_str("[restaurant]\nname = \"Osteria\"\n").unwrap();
        assert_eq!(config.restaurant.name, "Osteria");
        assert_eq!(config.restaurant.currency_symbol, "$");
        assert!(config.live.enabled);
        assert!(config.storage.db_path.is_none());
    }
}
