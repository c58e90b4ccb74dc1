//! # bistro-db: Local Storage for Bistro
//!
//! This crate keeps the store alive across restarts. It uses one SQLite
//! table as a key/value "local storage" and writes the whole store into it
//! as a single JSON document.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Persistence Flow                          │
//! │                                                                         │
//! │  StoreState::dispatch (apps/restaurant)                                │
//! │       │  serialize RestaurantState → JSON                               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    bistro-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   │   │
//! │  │   │ PersistHandle │──►│   Persister   │──►│ LocalStorage  │   │   │
//! │  │   │ (persist.rs)  │   │  (task loop)  │   │  Repository   │   │   │
//! │  │   │ save / flush  │   │ newest wins   │   │ set_item()    │   │   │
//! │  │   └───────────────┘   └───────────────┘   └───────┬───────┘   │   │
//! │  │                                                   │           │   │
//! │  │   snapshot.rs: save_state / load_state ───────────┘           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: local_storage(key, value, updated_at)                  │   │
//! │  │  key = "restaurant-storage" → the whole store                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The local-storage key/value repository
//! - [`snapshot`] - Whole-store save and load
//! - [`persist`] - Background snapshot writer
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_db::{snapshot, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bistro.db")).await?;
//! let state = snapshot::load_state(&db.local_storage()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod persist;
pub mod pool;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use persist::{PersistHandle, Persister};
pub use pool::{Database, DbConfig};
pub use repository::local_storage::LocalStorageRepository;
