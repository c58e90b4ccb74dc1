//! # bistro-live: Simulated Real-Time Feed
//!
//! Timers and random numbers that stand in for a live data source: the
//! weather widget and the free-table counter drift on their own, and every
//! reservation or order raises a toast.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Live Feed Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                     LiveFeed (tokio task)                        │  │
//! │  │                                                                  │  │
//! │  │  weather interval   tables interval   StoreEvent broadcast       │  │
//! │  └──────┬──────────────────┬────────────────────┬───────────────────┘  │
//! │         ▼                  ▼                    ▼                      │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐   │
//! │  │   Simulator    │  │ LiveStateSink  │  │    ToastEmitter        │   │
//! │  │                │  │                │  │                        │   │
//! │  │ random walks,  │  │ store handle   │  │ TracingEmitter         │   │
//! │  │ seedable       │  │ writes weather │  │ ToastLog (UI pulls)    │   │
//! │  │                │  │ and tables     │  │ NoOpEmitter            │   │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Intervals, threshold, seed
//! - [`error`] - Live feed error types
//! - [`feed`] - The task loop and its handle
//! - [`simulator`] - Weather and table random walks
//! - [`toast`] - Toast records, event mapping, emitters

pub mod config;
pub mod error;
pub mod feed;
pub mod simulator;
pub mod toast;

pub use config::LiveSettings;
pub use error::{LiveError, LiveResult};
pub use feed::{LiveFeed, LiveFeedHandle, LiveStateSink};
pub use simulator::Simulator;
pub use toast::{
    low_availability_toast, toast_for_event, NoOpEmitter, Toast, ToastEmitter, ToastLevel,
    ToastLog, TracingEmitter,
};
