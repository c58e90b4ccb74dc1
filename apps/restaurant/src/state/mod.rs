//! # State Module
//!
//! Two focused state types instead of one `AppState`: commands ask for
//! the one they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │         StoreState           │   │         ConfigState          │   │
//! │  │                              │   │                              │   │
//! │  │  Arc<Mutex<RestaurantState>> │   │  restaurant name, currency   │   │
//! │  │  broadcast<StoreEvent>       │   │  tax rate, table count       │   │
//! │  │  Option<PersistHandle>       │   │  storage path, live settings │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: one Mutex; cloning shares the same store                │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::{ConfigError, ConfigState, RestaurantSettings, StorageSettings, CONFIG_PATH_ENV};
pub use store::{StoreState, EVENT_CHANNEL_CAPACITY};
