//! # Toasts
//!
//! Short-lived banners the website shows when something happens in the
//! store. The feed turns store events into [`Toast`]s and hands them to a
//! [`ToastEmitter`]; what "showing" means is up to the emitter.
//!
//! ```text
//!   StoreEvent::ReservationCreated ──► Success "New reservation"
//!   StoreEvent::OrderCreated       ──► Success "New order"
//!   StoreEvent::MemberJoined       ──► Info    "New member"
//!   StoreEvent::ReviewSubmitted    ──► Info    "New review"
//!   StoreEvent::EventRegistration  ──► Info    "Event registration"
//!   status changes                 ──► (no toast)
//!   free tables <= threshold       ──► Warning "Tables filling up"
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use bistro_core::{StoreEvent, TableAvailability};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: String,
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn new(level: ToastLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Toast {
            id: Uuid::new_v4().to_string(),
            level,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
        }
    }
}

/// The toast for a store event, if that event is announced at all.
pub fn toast_for_event(event: &StoreEvent) -> Option<Toast> {
    let toast = match event {
        StoreEvent::ReservationCreated {
            customer_name,
            party_size,
            date,
            time,
            ..
        } => Toast::new(
            ToastLevel::Success,
            "New reservation",
            format!(
                "{}, party of {} on {} at {}",
                customer_name,
                party_size,
                date,
                time.format("%H:%M")
            ),
        ),
        StoreEvent::OrderCreated {
            customer_name,
            total,
            item_count,
            ..
        } => Toast::new(
            ToastLevel::Success,
            "New order",
            format!(
                "{} ordered {} item{} ({})",
                customer_name,
                item_count,
                if *item_count == 1 { "" } else { "s" },
                total
            ),
        ),
        StoreEvent::MemberJoined { name, .. } => Toast::new(
            ToastLevel::Info,
            "New member",
            format!("{} joined the loyalty club", name),
        ),
        StoreEvent::ReviewSubmitted {
            customer_name,
            rating,
            ..
        } => Toast::new(
            ToastLevel::Info,
            "New review",
            format!("{} left a {}-star review", customer_name, rating),
        ),
        StoreEvent::EventRegistration { title, seats, .. } => Toast::new(
            ToastLevel::Info,
            "Event registration",
            format!("{} seat(s) booked for {}", seats, title),
        ),
        StoreEvent::ReservationStatusChanged { .. } | StoreEvent::OrderStatusChanged { .. } => {
            return None
        }
    };
    Some(toast)
}

/// Warning shown when the dining room is nearly full.
pub fn low_availability_toast(tables: &TableAvailability) -> Toast {
    let message = match tables.available {
        0 => "No tables free right now".to_string(),
        1 => "Only 1 table left".to_string(),
        n => format!("Only {} tables left", n),
    };
    Toast::new(ToastLevel::Warning, "Tables filling up", message)
}

// =============================================================================
// Emitters
// =============================================================================

/// Receives every toast the feed produces.
pub trait ToastEmitter: Send + Sync {
    fn emit_toast(&self, toast: &Toast);
}

/// Writes toasts to the log.
pub struct TracingEmitter;

impl ToastEmitter for TracingEmitter {
    fn emit_toast(&self, toast: &Toast) {
        match toast.level {
            ToastLevel::Warning | ToastLevel::Error => {
                warn!(title = %toast.title, message = %toast.message, "Toast")
            }
            ToastLevel::Info | ToastLevel::Success => {
                info!(title = %toast.title, message = %toast.message, "Toast")
            }
        }
    }
}

/// No-op emitter for testing.
pub struct NoOpEmitter;

impl ToastEmitter for NoOpEmitter {
    fn emit_toast(&self, _toast: &Toast) {}
}

/// Keeps the most recent toasts until the UI collects them, and logs each
/// one like [`TracingEmitter`].
#[derive(Debug)]
pub struct ToastLog {
    capacity: usize,
    toasts: Mutex<VecDeque<Toast>>,
}

impl ToastLog {
    pub const DEFAULT_CAPACITY: usize = 20;

    pub fn new(capacity: usize) -> Self {
        ToastLog {
            capacity: capacity.max(1),
            toasts: Mutex::new(VecDeque::new()),
        }
    }

    /// Oldest first.
    pub fn recent(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Removes one toast. Returns whether it was pending.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    pub fn len(&self) -> usize {
        self.toasts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ToastLog {
    fn default() -> Self {
        ToastLog::new(Self::DEFAULT_CAPACITY)
    }
}

impl ToastEmitter for ToastLog {
    fn emit_toast(&self, toast: &Toast) {
        TracingEmitter.emit_toast(toast);

        let mut toasts = self.toasts.lock().unwrap_or_else(PoisonError::into_inner);
        toasts.push_back(toast.clone());
        while toasts.len() > self.capacity {
            toasts.pop_front();
        }
    }
}
