//! # Store State
//!
//! The one shared handle to the restaurant store. Every command goes
//! through it; so do the persister's error hook and the live feed.
//!
//! ## Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.dispatch(|s| s.add_reservation(input))                          │
//! │                                                                         │
//! │   lock ──► action(&mut RestaurantState)                                │
//! │              │                                                          │
//! │              ├─ Err ─► unlock, return the error (nothing persisted)    │
//! │              │                                                          │
//! │              └─ Ok ──► take_events()                                   │
//! │                        serialize snapshot ──► PersistHandle::save      │
//! │                        unlock                                           │
//! │                        broadcast events ──► LiveFeed (toasts)          │
//! │                                                                         │
//! │  The lock is never held across an await.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Weather and table counts written by the live feed skip persistence;
//! those fields are not part of the snapshot.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bistro_core::{RestaurantState, StoreEvent, TableAvailability, Weather};
use bistro_db::{snapshot, DbError, PersistHandle};
use bistro_live::LiveStateSink;
use tokio::sync::broadcast;
use tracing::{debug, error};

/// Store events buffered per subscriber before it starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Shared, cloneable handle to the store.
#[derive(Debug, Clone)]
pub struct StoreState {
    inner: Arc<Mutex<RestaurantState>>,
    events: broadcast::Sender<StoreEvent>,
    persist: Option<PersistHandle>,
}

impl StoreState {
    /// Wraps a store without persistence (tests, previews).
    pub fn new(state: RestaurantState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        StoreState {
            inner: Arc::new(Mutex::new(state)),
            events,
            persist: None,
        }
    }

    /// Sends a snapshot to `handle` after every successful dispatch.
    pub fn with_persistence(mut self, handle: PersistHandle) -> Self {
        self.persist = Some(handle);
        self
    }

    fn lock(&self) -> MutexGuard<'_, RestaurantState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads the store.
    ///
    /// ```rust,ignore
    /// let count = store.with_store(|s| s.cart.len());
    /// ```
    pub fn with_store<R>(&self, f: impl FnOnce(&RestaurantState) -> R) -> R {
        f(&*self.lock())
    }

    /// Runs a store action. On success the snapshot is queued for saving
    /// and the action's events are broadcast.
    pub fn dispatch<T, E>(
        &self,
        action: impl FnOnce(&mut RestaurantState) -> Result<T, E>,
    ) -> Result<T, E> {
        let (result, events) = {
            let mut state = self.lock();
            let result = action(&mut *state);
            let events = state.take_events();
            if result.is_ok() {
                self.persist_locked(&mut state);
            }
            (result, events)
        };

        self.publish(events);
        result
    }

    /// Runs an action that cannot fail.
    pub fn update<R>(&self, action: impl FnOnce(&mut RestaurantState) -> R) -> R {
        match self.dispatch(|state| Ok::<R, std::convert::Infallible>(action(state))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Receives every store event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Queues the current snapshot, e.g. right after hydration.
    pub fn persist_now(&self) {
        let mut state = self.lock();
        self.persist_locked(&mut state);
    }

    /// Clone of the whole store.
    pub fn snapshot(&self) -> RestaurantState {
        self.lock().clone()
    }

    /// Callback for the persister: a failed write becomes the store's
    /// error string.
    pub fn persistence_error_hook(&self) -> impl Fn(&DbError) + Send + Sync + 'static {
        let inner = Arc::clone(&self.inner);
        move |err: &DbError| {
            inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .set_error(format!("Could not save changes: {}", err));
        }
    }

    fn persist_locked(&self, state: &mut RestaurantState) {
        let Some(handle) = &self.persist else {
            return;
        };
        match snapshot::serialize_state(state) {
            Ok(json) => handle.save(json),
            Err(e) => {
                error!(error = %e, "Failed to serialize store snapshot");
                state.set_error(format!("Could not save changes: {}", e));
            }
        }
    }

    fn publish(&self, events: Vec<StoreEvent>) {
        for event in events {
            // No subscribers is fine; the feed may be disabled.
            if self.events.send(event).is_err() {
                debug!("Store event published with no subscribers");
            }
        }
    }
}

impl LiveStateSink for StoreState {
    fn weather(&self) -> Weather {
        self.lock().weather.clone()
    }

    fn tables(&self) -> TableAvailability {
        self.lock().tables.clone()
    }

    fn apply_weather(&self, weather: Weather) {
        self.lock().set_weather(weather);
    }

    fn apply_available_tables(&self, available: u32) -> u32 {
        self.lock().set_available_tables(available)
    }
}
