//! # Bistro Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           bistro (binary)                               │
//! │                                                                         │
//! │  main.rs ────► tokio runtime, hands over to lib.rs                     │
//! │  lib.rs ─────► logging, config, database, store, persister, live feed  │
//! │  commands/ ──► booking, ordering, membership, cms                      │
//! │  state/ ─────► StoreState, ConfigState                                 │
//! │                                                                         │
//! │                   ┌──────────────────────────────┐                      │
//! │                   │  SQLite: bistro.db           │                      │
//! │                   │  local_storage               │                      │
//! │                   │    "restaurant-storage" → {} │                      │
//! │                   └──────────────────────────────┘                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() {
    // The actual setup is in lib.rs for better testability
    if let Err(e) = bistro_restaurant::run().await {
        eprintln!("bistro: {}", e);
        std::process::exit(1);
    }
}
