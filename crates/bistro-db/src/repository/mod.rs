//! # Repository Module
//!
//! Database access behind typed methods, one repository per table.
//!
//! ```text
//!   snapshot::save_state(repo, &state)
//!        │
//!        ▼
//!   LocalStorageRepository
//!   ├── get_item(key)
//!   ├── set_item(key, value)      overwrite-on-write
//!   ├── remove_item(key)
//!   ├── keys()
//!   └── clear()
//!        │  SQL
//!        ▼
//!   local_storage table
//! ```
//!
//! ## Available Repositories
//!
//! - [`local_storage::LocalStorageRepository`] - key/value local storage

pub mod local_storage;
