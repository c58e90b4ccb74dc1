//! # Live Feed
//!
//! Background task that keeps the booking page feeling live: it nudges the
//! weather and the free-table count on two timers and announces store
//! events as toasts.
//!
//! ## Task Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          LiveFeed::run                                  │
//! │                                                                         │
//! │  loop select! {                                                        │
//! │    weather interval ──► sink.weather() → Simulator → apply_weather     │
//! │    tables interval  ──► sink.tables()  → Simulator → apply_available   │
//! │                          └─ crossing the threshold → Warning toast     │
//! │    store event      ──► toast_for_event → ToastEmitter                 │
//! │                          (Lagged: log and keep going)                  │
//! │    shutdown         ──► break                                          │
//! │  }                                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The first perturbation happens one full period after start, so a freshly
//! loaded page shows the stored values.

use std::sync::Arc;

use bistro_core::{StoreEvent, TableAvailability, Weather};
use chrono::Utc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::LiveSettings;
use crate::error::{LiveError, LiveResult};
use crate::simulator::Simulator;
use crate::toast::{low_availability_toast, toast_for_event, ToastEmitter};

// =============================================================================
// State Sink
// =============================================================================

/// Where the feed reads and writes the live records.
///
/// Implemented by the application's store handle. Calls are short and
/// synchronous; the feed never holds anything across them.
pub trait LiveStateSink: Send + Sync {
    fn weather(&self) -> Weather;

    fn tables(&self) -> TableAvailability;

    fn apply_weather(&self, weather: Weather);

    /// Stores the new free-table count and returns the value kept, which
    /// may be clamped.
    fn apply_available_tables(&self, available: u32) -> u32;
}

// =============================================================================
// Feed
// =============================================================================

pub struct LiveFeed {
    settings: LiveSettings,
    sink: Arc<dyn LiveStateSink>,
    emitter: Arc<dyn ToastEmitter>,
    simulator: Simulator,
    events: broadcast::Receiver<StoreEvent>,
    shutdown_rx: mpsc::Receiver<()>,

    /// Set while free tables sit at or below the threshold, so the warning
    /// fires once per dip.
    low_warned: bool,
}

/// Handle for stopping a running [`LiveFeed`].
#[derive(Debug, Clone)]
pub struct LiveFeedHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl LiveFeed {
    /// Creates a feed and its handle. Fails on invalid settings.
    pub fn new(
        settings: LiveSettings,
        sink: Arc<dyn LiveStateSink>,
        events: broadcast::Receiver<StoreEvent>,
        emitter: Arc<dyn ToastEmitter>,
    ) -> LiveResult<(Self, LiveFeedHandle)> {
        settings.validate()?;

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let feed = LiveFeed {
            simulator: Simulator::from_settings(&settings),
            settings,
            sink,
            emitter,
            events,
            shutdown_rx,
            low_warned: false,
        };

        Ok((feed, LiveFeedHandle { shutdown_tx }))
    }

    /// Replaces the simulator, e.g. with a seeded one.
    pub fn with_simulator(mut self, simulator: Simulator) -> Self {
        self.simulator = simulator;
        self
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs until shutdown is requested or every handle is dropped.
    pub async fn run(mut self) {
        info!(
            weather_secs = self.settings.weather_interval_secs,
            tables_secs = self.settings.tables_interval_secs,
            "Live feed starting"
        );

        let weather_period = self.settings.weather_interval();
        let tables_period = self.settings.tables_interval();
        let mut weather_tick = interval_at(Instant::now() + weather_period, weather_period);
        let mut tables_tick = interval_at(Instant::now() + tables_period, tables_period);
        weather_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tables_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut events_open = true;

        loop {
            tokio::select! {
                _ = weather_tick.tick() => self.tick_weather(),

                _ = tables_tick.tick() => self.tick_tables(),

                received = self.events.recv(), if events_open => match received {
                    Ok(event) => self.on_event(&event),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Live feed fell behind the store, events skipped");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Store event channel closed");
                        events_open = false;
                    }
                },

                _ = self.shutdown_rx.recv() => {
                    info!("Live feed shutting down");
                    break;
                }
            }
        }

        info!("Live feed stopped");
    }

    fn tick_weather(&mut self) {
        let current = self.sink.weather();
        let next = self.simulator.next_weather(&current, Utc::now());
        debug!(
            condition = ?next.condition,
            temperature_c = next.temperature_c,
            humidity = next.humidity,
            "Weather updated"
        );
        self.sink.apply_weather(next);
    }

    fn tick_tables(&mut self) {
        let current = self.sink.tables();
        let next = self.simulator.next_available_tables(&current);
        let available = self.sink.apply_available_tables(next);
        debug!(available, total = current.total, "Table availability updated");

        let threshold = self.settings.low_availability_threshold;
        if available <= threshold {
            if !self.low_warned {
                self.low_warned = true;
                let tables = TableAvailability {
                    available,
                    ..current
                };
                self.emitter.emit_toast(&low_availability_toast(&tables));
            }
        } else {
            self.low_warned = false;
        }
    }

    fn on_event(&self, event: &StoreEvent) {
        if let Some(toast) = toast_for_event(event) {
            self.emitter.emit_toast(&toast);
        }
    }
}

impl LiveFeedHandle {
    /// Asks the feed to stop. Returns once the request is queued.
    pub async fn shutdown(&self) -> LiveResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| LiveError::FeedStopped)
    }

    pub fn is_running(&self) -> bool {
        !self.shutdown_tx.is_closed()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::{ToastLevel, ToastLog};
    use bistro_core::Money;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Mutex;
    use std::time::Duration;

    struct MemorySink {
        weather: Mutex<Weather>,
        tables: Mutex<TableAvailability>,
    }

    impl MemorySink {
        fn new(total: u32, available: u32) -> Arc<Self> {
            let mut tables = TableAvailability::new(total);
            tables.available = available;
            Arc::new(MemorySink {
                weather: Mutex::new(Weather::default()),
                tables: Mutex::new(tables),
            })
        }
    }

    impl LiveStateSink for MemorySink {
        fn weather(&self) -> Weather {
            self.weather.lock().unwrap().clone()
        }

        fn tables(&self) -> TableAvailability {
            self.tables.lock().unwrap().clone()
        }

        fn apply_weather(&self, weather: Weather) {
            *self.weather.lock().unwrap() = weather;
        }

        fn apply_available_tables(&self, available: u32) -> u32 {
            let mut tables = self.tables.lock().unwrap();
            tables.available = available.min(tables.total);
            tables.available
        }
    }

    fn settings(threshold: u32) -> LiveSettings {
        LiveSettings {
            weather_interval_secs: 5,
            tables_interval_secs: 1,
            low_availability_threshold: threshold,
            seed: Some(11),
            ..LiveSettings::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_perturb_sink_within_bounds() {
        let sink = MemorySink::new(20, 10);
        let (_tx, rx) = broadcast::channel(16);
        let (feed, handle) =
            LiveFeed::new(settings(0), sink.clone(), rx, Arc::new(ToastLog::default())).unwrap();
        let task = feed.spawn();

        for _ in 0..120 {
            tokio::time::sleep(Duration::from_secs(1)).await;
            let tables = sink.tables();
            assert!(tables.available <= tables.total);
        }
        assert!(sink.weather().updated_at.is_some());

        handle.shutdown().await.unwrap();
        task.await.unwrap();
        assert!(!handle.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_events_become_toasts() {
        let sink = MemorySink::new(20, 20);
        let (tx, rx) = broadcast::channel(16);
        let toasts = Arc::new(ToastLog::default());
        let (feed, handle) = LiveFeed::new(settings(0), sink, rx, toasts.clone()).unwrap();
        let task = feed.spawn();

        tx.send(StoreEvent::OrderCreated {
            order_id: "1".into(),
            customer_name: "Grace".into(),
            total: Money::from_cents(1800),
            item_count: 2,
        })
        .unwrap();
        tx.send(StoreEvent::OrderStatusChanged {
            order_id: "1".into(),
            status: bistro_core::OrderStatus::Preparing,
        })
        .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let recent = toasts.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].level, ToastLevel::Success);
        assert_eq!(recent[0].title, "New order");

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_low_availability_warns_once_per_dip() {
        // Every reachable count is at or below the threshold.
        let sink = MemorySink::new(3, 1);
        let (_tx, rx) = broadcast::channel(16);
        let toasts = Arc::new(ToastLog::default());
        let (feed, handle) = LiveFeed::new(settings(3), sink, rx, toasts.clone()).unwrap();
        let task = feed.spawn();

        tokio::time::sleep(Duration::from_secs(30)).await;

        let warnings: Vec<_> = toasts
            .recent()
            .into_iter()
            .filter(|t| t.level == ToastLevel::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_event_channel_keeps_timers_running() {
        let sink = MemorySink::new(20, 10);
        let (tx, rx) = broadcast::channel(16);
        let (feed, handle) =
            LiveFeed::new(settings(0), sink.clone(), rx, Arc::new(ToastLog::default())).unwrap();
        let task = feed.spawn();
        drop(tx);

        tokio::time::sleep(Duration::from_secs(11)).await;
        assert!(sink.weather().updated_at.is_some());

        handle.shutdown().await.unwrap();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_rng_replays_same_walk() {
        // 5s and 7s periods never tick together within 30s, so both feeds
        // draw from their rngs in the same order.
        let unseeded = LiveSettings {
            seed: None,
            weather_interval_secs: 5,
            tables_interval_secs: 7,
            ..settings(0)
        };
        let mut sinks = Vec::new();
        let mut running = Vec::new();
        for _ in 0..2 {
            let sink = MemorySink::new(20, 10);
            let (events_tx, rx) = broadcast::channel(16);
            let (feed, handle) = LiveFeed::new(
                unseeded.clone(),
                sink.clone(),
                rx,
                Arc::new(ToastLog::default()),
            )
            .unwrap();
            let feed = feed.with_simulator(Simulator::with_rng(StdRng::seed_from_u64(3)));
            running.push((handle, feed.spawn(), events_tx));
            sinks.push(sink);
        }

        tokio::time::sleep(Duration::from_millis(30_500)).await;

        let (a, b) = (sinks[0].weather(), sinks[1].weather());
        assert!(a.updated_at.is_some());
        assert_eq!(
            (a.condition, a.temperature_c, a.humidity),
            (b.condition, b.temperature_c, b.humidity)
        );
        assert_eq!(sinks[0].tables().available, sinks[1].tables().available);

        for (handle, task, _events) in running {
            handle.shutdown().await.unwrap();
            task.await.unwrap();
        }
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let (_tx, rx) = broadcast::channel(1);
        let mut bad = settings(0);
        bad.weather_interval_secs = 0;
        let result = LiveFeed::new(bad, MemorySink::new(1, 1), rx, Arc::new(ToastLog::default()));
        assert!(matches!(result, Err(LiveError::InvalidConfig(_))));
    }
}
