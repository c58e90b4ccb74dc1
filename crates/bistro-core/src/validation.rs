//! # Validation Module
//!
//! Field rules for the booking, ordering, membership and CMS forms.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Web form                                                     │
//! │  └── Required markers, input types, immediate feedback                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Command (apps/restaurant)                                    │
//! │  └── Deserialization into NewX / XUpdate payloads                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store action (bistro-core)                                   │
//! │  └── THIS MODULE: every action re-checks its input                     │
//! │                                                                         │
//! │  There is no database layer below: the snapshot is a JSON blob.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::{validate_email, validate_party_size};
//!
//! assert!(validate_email("chef@bistro.example").is_ok());
//! assert!(validate_party_size(0).is_err());
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::SocialPlatform;
use crate::{MAX_ITEM_QUANTITY, MAX_PARTY_SIZE, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// First bookable time of day (11:00).
pub const OPENING_MINUTE_OF_DAY: u32 = 11 * 60;

/// Last seating (22:00).
pub const LAST_SEATING_MINUTE_OF_DAY: u32 = 22 * 60;

const MAX_NAME_LEN: usize = 100;
const MAX_EMAIL_LEN: usize = 254;
const MAX_TEXT_LEN: usize = 2000;

// =============================================================================
// Text Validators
// =============================================================================

/// Rejects empty or whitespace-only text; returns the trimmed value.
pub fn validate_required<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }
    Ok(value)
}

/// Validates a guest or member name.
///
/// ## Rules
/// - Must not be empty
/// - 2 to 100 characters after trimming
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = validate_required("name", name)?;
    let len = name.chars().count();

    if len < 2 {
        return Err(ValidationError::TooShort {
            field: "name".to_string(),
            min: 2,
        });
    }
    if len > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// Only the shape is checked: one `@`, a non-empty local part and a dotted
/// domain, no whitespace.
///
/// ```rust
/// use bistro_core::validation::validate_email;
///
/// assert!(validate_email("ada@example.com").is_ok());
/// assert!(validate_email("ada@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = validate_required("email", email)?;

    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain.tld"));
    }

    let dotted: Vec<&str> = domain.split('.').collect();
    if dotted.len() < 2 || dotted.iter().any(|part| part.is_empty()) {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Digits plus `+ - ( ) .` and spaces
/// - 7 to 15 digits in total
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = validate_required("phone", phone)?;

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "may only contain digits, spaces and + - ( ) .".to_string(),
        });
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(7..=15).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must have between 7 and 15 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a social post caption against the platform's limit.
pub fn validate_post_content(platform: SocialPlatform, content: &str) -> ValidationResult<()> {
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::Required {
            field: "content".to_string(),
        });
    }

    let max = platform.max_length();
    if content.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: "content".to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a party size (1 to 20 guests).
pub fn validate_party_size(party_size: u32) -> ValidationResult<()> {
    if party_size == 0 || party_size > MAX_PARTY_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "party size".to_string(),
            min: 1,
            max: i64::from(MAX_PARTY_SIZE),
        });
    }
    Ok(())
}

/// Validates a cart or order line quantity.
///
/// ```text
///   add_to_cart(item, 3)
///        │
///        ▼
///   validate_quantity(existing + 3)
///        ├── 0      → "quantity must be positive"
///        ├── > 99   → "quantity must be between 1 and 99"
///        └── OK     → line updated
/// ```
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a price. Zero is allowed (complimentary dishes, free events);
/// anything above [`MAX_PRICE_CENTS`] is rejected.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&price.cents()) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

/// Validates a star rating (1 to 5).
pub fn validate_rating(rating: u8) -> ValidationResult<()> {
    if !(1..=5).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 1,
            max: 5,
        });
    }
    Ok(())
}

/// Validates an event capacity; it may not drop below seats already sold.
pub fn validate_event_capacity(capacity: u32, registered: u32) -> ValidationResult<()> {
    if capacity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "capacity".to_string(),
        });
    }
    if capacity < registered {
        return Err(ValidationError::OutOfRange {
            field: "capacity".to_string(),
            min: i64::from(registered),
            max: i64::from(u32::MAX),
        });
    }
    Ok(())
}

/// Validates a tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

/// Validates the restaurant's UTC offset (UTC-12:00 to UTC+14:00).
pub fn validate_utc_offset_minutes(minutes: i32) -> ValidationResult<()> {
    if !(-12 * 60..=14 * 60).contains(&minutes) {
        return Err(ValidationError::OutOfRange {
            field: "utc offset minutes".to_string(),
            min: -12 * 60,
            max: 14 * 60,
        });
    }
    Ok(())
}

// =============================================================================
// Booking Slot
// =============================================================================

/// Validates a reservation slot against the clock and opening hours.
///
/// ## Rules
/// - The slot must not be in the past (`now` is the restaurant's clock)
/// - The time must be between opening (11:00) and last seating (22:00)
///
/// ```rust
/// use bistro_core::validation::validate_reservation_slot;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let now = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
///
/// assert!(validate_reservation_slot(date, NaiveTime::from_hms_opt(19, 0, 0).unwrap(), now).is_ok());
/// assert!(validate_reservation_slot(date, NaiveTime::from_hms_opt(23, 0, 0).unwrap(), now).is_err());
/// ```
pub fn validate_reservation_slot(
    date: NaiveDate,
    time: NaiveTime,
    now: NaiveDateTime,
) -> ValidationResult<()> {
    if date.and_time(time) < now {
        return Err(ValidationError::Unavailable {
            field: "reservation time".to_string(),
            reason: "the requested slot is in the past".to_string(),
        });
    }

    let minute_of_day = time.hour() * 60 + time.minute();
    if !(OPENING_MINUTE_OF_DAY..=LAST_SEATING_MINUTE_OF_DAY).contains(&minute_of_day) {
        return Err(ValidationError::Unavailable {
            field: "reservation time".to_string(),
            reason: "we seat guests between 11:00 and 22:00".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Ada Lovelace").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name("A").is_err());
        assert!(validate_customer_name(&"A".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("  ada@example.co.uk ").is_ok());

        assert!(validate_email("ada.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("ada@example..com").is_err());
        assert!(validate_email("ada lovelace@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+44 20 7946 0958").is_ok());
        assert!(validate_phone("(555) 010-4477").is_ok());

        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_party_size() {
        assert!(validate_party_size(1).is_ok());
        assert!(validate_party_size(20).is_ok());
        assert!(validate_party_size(0).is_err());
        assert!(validate_party_size(21).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_price_and_rating() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)).is_err());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_event_capacity() {
        assert!(validate_event_capacity(40, 10).is_ok());
        assert!(validate_event_capacity(0, 0).is_err());
        assert!(validate_event_capacity(5, 10).is_err());
    }

    #[test]
    fn test_post_length_depends_on_platform() {
        let long = "x".repeat(300);
        assert!(validate_post_content(SocialPlatform::Twitter, &long).is_err());
        assert!(validate_post_content(SocialPlatform::Instagram, &long).is_ok());
        assert!(validate_post_content(SocialPlatform::Facebook, "   ").is_err());
    }

    #[test]
    fn test_reservation_slot() {
        let day = NaiveDate::from_ymd_opt(2026, 6, 12).unwrap();
        let now = day.and_time(at(15, 0));

        assert!(validate_reservation_slot(day, at(19, 30), now).is_ok());
        assert!(validate_reservation_slot(day, at(22, 0), now).is_ok());
        // Earlier today
        assert!(validate_reservation_slot(day, at(12, 0), now).is_err());
        // Before opening tomorrow
        let tomorrow = day.succ_opt().unwrap();
        assert!(validate_reservation_slot(tomorrow, at(10, 59), now).is_err());
        assert!(validate_reservation_slot(tomorrow, at(11, 0), now).is_ok());
        assert!(validate_reservation_slot(tomorrow, at(22, 1), now).is_err());
    }

    #[test]
    fn test_validate_tax_rate_bps() {
        assert!(validate_tax_rate_bps(825).is_ok());
        assert!(validate_tax_rate_bps(10001).is_err());
    }

    #[test]
    fn test_validate_utc_offset_minutes() {
        assert!(validate_utc_offset_minutes(600).is_ok());
        assert!(validate_utc_offset_minutes(-330).is_ok());
        assert!(validate_utc_offset_minutes(14 * 60 + 1).is_err());
        assert!(validate_utc_offset_minutes(-13 * 60).is_err());
    }
}
