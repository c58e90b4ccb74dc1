//! # Live Feed Error Types
//!
//! The feed itself never fails at runtime: a bad tick is logged and the
//! next one tries again. Errors only come from settings and from talking
//! to a feed that already stopped.

use thiserror::Error;

/// Result type alias for live feed operations.
pub type LiveResult<T> = Result<T, LiveError>;

#[derive(Debug, Error)]
pub enum LiveError {
    /// Settings rejected by [`LiveSettings::validate`](crate::LiveSettings::validate).
    #[error("Invalid live feed settings: {0}")]
    InvalidConfig(String),

    /// The feed task is no longer running.
    #[error("Live feed is not running")]
    FeedStopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = LiveError::InvalidConfig("weather_interval_secs must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "Invalid live feed settings: weather_interval_secs must be greater than 0"
        );
        assert_eq!(LiveError::FeedStopped.to_string(), "Live feed is not running");
    }
}
