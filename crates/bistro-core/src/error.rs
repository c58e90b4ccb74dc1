//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── CoreError        - Store action failures                          │
//! │  └── ValidationError  - Form field failures                            │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  └── DbError          - Local storage failures                         │
//! │                                                                         │
//! │  App errors (apps/restaurant)                                          │
//! │  └── ApiError         - What the web UI sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → toast in the UI        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Store action errors.
///
/// Every lookup by id reports which collection missed, so the CMS can
/// show "Reservation not found: 1718..." instead of a generic failure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Menu item id is not in the menu.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// Menu item exists but is switched off (sold out, seasonal).
    #[error("Menu item is not available: {name}")]
    MenuItemUnavailable { id: String, name: String },

    /// Cart has no line for this menu item.
    #[error("Menu item {0} is not in the cart")]
    CartItemNotFound(String),

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Reservation not found: {0}")]
    ReservationNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Member not found: {0}")]
    MemberNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Review not found: {0}")]
    ReviewNotFound(String),

    #[error("Social post not found: {0}")]
    SocialPostNotFound(String),

    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    /// Record is in a state that does not allow the requested change.
    ///
    /// ## When This Occurs
    /// - Confirming a reservation that was already cancelled
    /// - Moving a completed order back to "preparing"
    /// - Registering for a cancelled event
    #[error("{entity} {id} is {current}, cannot change to {requested}")]
    InvalidStatusTransition {
        entity: &'static str,
        id: String,
        current: String,
        requested: String,
    },

    /// Event has fewer open seats than requested.
    #[error("Event {title} has {remaining} seats left, requested {requested}")]
    EventFull {
        title: String,
        remaining: u32,
        requested: u32,
    },

    /// Order has no items.
    #[error("Order must contain at least one item")]
    EmptyOrder,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for the "no record with this id" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::MenuItemNotFound(_)
                | CoreError::CartItemNotFound(_)
                | CoreError::ReservationNotFound(_)
                | CoreError::OrderNotFound(_)
                | CoreError::MemberNotFound(_)
                | CoreError::EventNotFound(_)
                | CoreError::ReviewNotFound(_)
                | CoreError::SocialPostNotFound(_)
                | CoreError::NotificationNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form field validation errors.
///
/// The message is what the booking/ordering/membership forms show in a toast.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (email, phone, ...).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Requested slot is outside what the restaurant accepts.
    #[error("{field} is not bookable: {reason}")]
    Unavailable { field: String, reason: String },

    /// Duplicate value (e.g., a member email that is already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::EventFull {
            title: "Wine Tasting".to_string(),
            remaining: 2,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Event Wine Tasting has 2 seats left, requested 4"
        );

        let err = CoreError::InvalidStatusTransition {
            entity: "Order",
            id: "42".to_string(),
            current: "completed".to_string(),
            requested: "preparing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Order 42 is completed, cannot change to preparing"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::OutOfRange {
            field: "party size".to_string(),
            min: 1,
            max: 20,
        };
        assert_eq!(err.to_string(), "party size must be between 1 and 20");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert!(!core_err.is_not_found());
    }

    #[test]
    fn test_not_found_family() {
        assert!(CoreError::OrderNotFound("1".into()).is_not_found());
        assert!(CoreError::CartItemNotFound("1".into()).is_not_found());
        assert!(!CoreError::EmptyCart.is_not_found());
    }
}
