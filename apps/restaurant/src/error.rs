//! # API Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Bistro                                 │
//! │                                                                         │
//! │  Web UI / CMS                 Rust                                      │
//! │  ────────────                 ────                                      │
//! │                                                                         │
//! │  submit reservation form                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Store action fails? ─── CoreError::ReservationNotFound ──┐     │  │
//! │  │         │                                                 │     │  │
//! │  │         ▼                                                 ▼     │  │
//! │  │  Form invalid? ───────── ValidationError::TooShort ──── ApiError│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "VALIDATION_ERROR",                                         │
//! │    "message": "customer name must be at least 2 characters" }          │
//! │       └─► shown as an error toast next to the form                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bistro_core::{CoreError, ValidationError};
use bistro_db::DbError;
use bistro_live::LiveError;
use serde::Serialize;

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Reservation not found: 1739871234567-0421"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ```typescript
/// try {
///   await placeOrder(details);
/// } catch (e) {
///   switch (e.code) {
///     case 'CART_ERROR':
///       toast.error('Your cart is empty');
///       break;
///     case 'VALIDATION_ERROR':
///       showFieldError(e.message);
///       break;
///     default:
///       toast.error('Something went wrong');
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found (404)
    NotFound,

    /// Form input rejected (400)
    ValidationError,

    /// Request conflicts with the record's state (422)
    BusinessLogic,

    /// Local storage failed (500)
    StorageError,

    /// Cart operation failed
    CartError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts store action errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CartItemNotFound(_) | CoreError::EmptyCart => ApiError::cart(err.to_string()),
            CoreError::Validation(e) => e.into(),
            e if e.is_not_found() => ApiError::new(ErrorCode::NotFound, e.to_string()),
            e @ (CoreError::MenuItemUnavailable { .. }
            | CoreError::InvalidStatusTransition { .. }
            | CoreError::EventFull { .. }
            | CoreError::EmptyOrder) => ApiError::new(ErrorCode::BusinessLogic, e.to_string()),
            e => ApiError::internal(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::KeyNotFound(key) => ApiError::not_found("Stored value", &key),
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::StorageError, "Storage migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage query failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::StorageError, "Storage pool exhausted")
            }
            DbError::Serialization(e) => {
                tracing::error!("Snapshot serialization failed: {}", e);
                ApiError::new(ErrorCode::StorageError, "Could not save the store")
            }
            DbError::PersisterStopped => {
                ApiError::new(ErrorCode::StorageError, "Storage writer is not running")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal storage error: {}", e);
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<LiveError> for ApiError {
    fn from(err: LiveError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Errors that stop the app from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("storage: {0}")]
    Storage(#[from] DbError),

    #[error("live feed: {0}")]
    Live(#[from] LiveError),

    #[error("signal handler: {0}")]
    Signal(#[from] std::io::Error),
}
