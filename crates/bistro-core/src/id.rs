//! Timestamp-based record identifiers.
//!
//! Every record the store creates gets a string id made from the current
//! millisecond timestamp with 12 random bits appended:
//!
//! ```text
//!   id = (unix_millis << 12) | random(0..4096)    rendered in decimal
//! ```
//!
//! Ids sort by creation time. Two records created in the same millisecond
//! collide only if they also draw the same 12 random bits; uniqueness is
//! likely, not guaranteed, and nothing downstream enforces it.

use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;

const RANDOM_BITS: u32 = 12;

/// Generates an id for a record created now.
pub fn generate_id() -> String {
    generate_id_at(Utc::now())
}

/// Generates an id for a record created at `at`.
pub fn generate_id_at(at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().max(0);
    let suffix: i64 = rand::thread_rng().gen_range(0..(1 << RANDOM_BITS));
    ((millis << RANDOM_BITS) | suffix).to_string()
}

/// Recovers the creation time encoded in an id.
///
/// Returns `None` for ids that were not produced by [`generate_id`]
/// (hand-written seed ids, ids from an older web build).
pub fn timestamp_of(id: &str) -> Option<DateTime<Utc>> {
    let raw: i64 = id.parse().ok()?;
    Utc.timestamp_millis_opt(raw >> RANDOM_BITS).single()
}
