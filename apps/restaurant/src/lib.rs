//! # Bistro Library
//!
//! The restaurant app: shared store, persistence, live feed and the
//! command functions the website and the CMS call.
//!
//! ## Module Organization
//! ```text
//! bistro_restaurant/
//! ├── lib.rs          ◄─── You are here (startup, App, shutdown)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── StoreState: the shared store handle
//! │   └── config.rs   ◄─── ConfigState: TOML + env configuration
//! ├── commands/
//! │   ├── booking.rs  ◄─── Reservations, events, live widgets, toasts
//! │   ├── ordering.rs ◄─── Menu, cart, checkout, order tracking
//! │   ├── membership.rs ◄─ Loyalty club, reviews
//! │   └── cms.rs      ◄─── Admin dashboard
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Runtime Wiring
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   commands ──dispatch──► StoreState ──snapshot──► Persister ──► SQLite │
//! │                              │  ▲                  (one task)          │
//! │                    StoreEvent│  │weather, tables                       │
//! │                              ▼  │                                      │
//! │                           LiveFeed ──toasts──► ToastLog ──► UI         │
//! │                           (one task)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use bistro_core::TableAvailability;
use bistro_db::{snapshot, Database, DbConfig, PersistHandle, Persister};
use bistro_live::{LiveFeed, LiveFeedHandle, ToastLog};
use tokio::task::JoinHandle;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use error::StartupError;
use state::{ConfigState, StoreState};

/// Runs the app until Ctrl-C.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • bistro.toml, then BISTRO_* environment overrides                  │
/// │                                                                         │
/// │  3. Open Database ────────────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, migrations applied                          │
/// │                                                                         │
/// │  4. Hydrate Store ────────────────────────────────────────────────────► │
/// │     • "restaurant-storage" snapshot, or demo data                       │
/// │                                                                         │
/// │  5. Start Background Tasks ───────────────────────────────────────────► │
/// │     • Persister: writes snapshots in order                              │
/// │     • Live feed: weather, tables, toasts (if enabled)                   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> Result<(), StartupError> {
    init_tracing();

    info!("Starting Bistro");

    let config = ConfigState::load(None)?;
    let app = App::start(config).await?;

    info!(
        restaurant = %app.config().restaurant.name,
        "Bistro is running, press Ctrl-C to stop"
    );
    tokio::signal::ctrl_c().await?;

    app.shutdown().await;
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bistro=trace` - Show trace for bistro crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

// =============================================================================
// App
// =============================================================================

/// A running app: the store plus its background tasks.
pub struct App {
    config: ConfigState,
    db: Database,
    store: StoreState,
    toasts: Arc<ToastLog>,
    persist: PersistHandle,
    persist_task: JoinHandle<()>,
    live: Option<(LiveFeedHandle, JoinHandle<()>)>,
}

impl App {
    /// Opens the configured database and starts the app on it.
    pub async fn start(config: ConfigState) -> Result<Self, StartupError> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        Self::start_with_db(config, db).await
    }

    /// Starts the app on an already open database.
    pub async fn start_with_db(config: ConfigState, db: Database) -> Result<Self, StartupError> {
        let mut state = snapshot::hydrate(&db.local_storage()).await?;
        state.tax_rate = config.tax_rate();
        state.tables = TableAvailability::new(config.restaurant.total_tables);
        state.utc_offset_minutes = config.restaurant.utc_offset_minutes;

        let (persister, persist) = Persister::new(db.local_storage());
        let store = StoreState::new(state).with_persistence(persist.clone());
        let persist_task = persister.on_error(store.persistence_error_hook()).spawn();

        // First write fixes the demo data in place on a fresh install.
        store.persist_now();

        let toasts = Arc::new(ToastLog::default());
        let live = if config.live.enabled {
            let (feed, handle) = LiveFeed::new(
                config.live.clone(),
                Arc::new(store.clone()),
                store.subscribe(),
                toasts.clone(),
            )?;
            Some((handle, feed.spawn()))
        } else {
            info!("Live feed disabled");
            None
        };

        info!("State initialized");
        Ok(App {
            config,
            db,
            store,
            toasts,
            persist,
            persist_task,
            live,
        })
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    pub fn toasts(&self) -> &ToastLog {
        &self.toasts
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Waits until every change made so far is on disk.
    pub async fn flush(&self) -> Result<(), bistro_db::DbError> {
        self.persist.flush().await
    }

    /// Stops the live feed, writes the final snapshot and closes the
    /// database.
    pub async fn shutdown(self) {
        info!("Shutting down");

        if let Some((handle, task)) = self.live {
            if let Err(e) = handle.shutdown().await {
                warn!(error = %e, "Live feed already stopped");
            }
            if let Err(e) = task.await {
                warn!(error = %e, "Live feed task failed");
            }
        }

        self.store.persist_now();
        if let Err(e) = self.persist.shutdown().await {
            warn!(error = %e, "Persister already stopped");
        }
        if let Err(e) = self.persist_task.await {
            warn!(error = %e, "Persister task failed");
        }

        self.db.close().await;
        info!("Shutdown complete");
    }
}
