//! # bistro-core: Restaurant Domain & Store Logic
//!
//! This crate is the **heart** of Bistro. It holds the domain records the
//! website and the CMS share, and the store that mutates them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Bistro Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Web UI (website pages + CMS screens)                │   │
//! │  │    Booking ──► Ordering ──► Membership ──► CMS management       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               StoreState (apps/restaurant)                      │   │
//! │  │    dispatch ──► publish store events ──► persist snapshot       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   state   │  │   money   │  │ validation│  │   │
//! │  │   │ MenuItem  │  │Restaurant │  │   Money   │  │   rules   │  │   │
//! │  │   │ Order ... │  │  State    │  │  TaxRate  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO STORAGE                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │        ┌───────────────────────┴────────────────────┐                  │
//! │        ▼                                            ▼                   │
//! │  bistro-db (snapshot in local storage)   bistro-live (timers, toasts)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (MenuItem, Reservation, Order, ...)
//! - [`state`] - The store: `RestaurantState` and its actions
//! - [`analytics`] - Aggregate figures for the CMS dashboard
//! - [`money`] - Money and tax rate with integer arithmetic
//! - [`id`] - Timestamp-based identifiers
//! - [`validation`] - Form field rules
//! - [`seed`] - Demo data for a fresh install
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::{NewReservation, NotificationType, RestaurantState};
//! use chrono::{Duration, NaiveTime, Utc};
//!
//! let mut store = RestaurantState::default();
//! let tomorrow = (Utc::now() + Duration::days(1)).date_naive();
//!
//! store
//!     .add_reservation(NewReservation {
//!         customer_name: "Ada Lovelace".into(),
//!         email: "ada@example.com".into(),
//!         phone: "+44 20 7946 0958".into(),
//!         date: tomorrow,
//!         time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
//!         party_size: 4,
//!         table_preference: None,
//!         occasion: None,
//!         special_requests: None,
//!         member_id: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(store.reservations.len(), 1);
//! assert_eq!(store.notifications[0].kind, NotificationType::Reservation);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod error;
pub mod id;
pub mod money;
pub mod seed;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use state::{CartTotals, RestaurantState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Local-storage key the full store snapshot is written under.
///
/// The web UI reads the same key, so changing it orphans existing data.
pub const STORAGE_KEY: &str = "restaurant-storage";

/// Default number of dining tables on the floor.
pub const DEFAULT_TOTAL_TABLES: u32 = 20;

/// Default sales tax in basis points (8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Most notifications kept in the store; older ones are dropped.
pub const MAX_NOTIFICATIONS: usize = 100;

/// Maximum quantity of a single menu item in the cart or an order.
pub const MAX_ITEM_QUANTITY: u32 = 99;

/// Highest price a dish or event ticket may carry ($1,000,000.00).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Largest party the booking form accepts.
pub const MAX_PARTY_SIZE: u32 = 20;
