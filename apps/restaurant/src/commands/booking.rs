//! # Booking Commands
//!
//! The reservations page, the events page and the live widgets beside
//! them.
//!
//! ## Reservation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  create_reservation ──► Pending ──► Confirmed ──► Seated ──► Completed │
//! │                            │            │                               │
//! │                            └────────────┴──► Cancelled / NoShow        │
//! │                                                                         │
//! │  Guests can only cancel; the rest is driven from the CMS.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use bistro_core::{
    Event, NewReservation, Reservation, ReservationStatus, TableAvailability, Weather,
};
use bistro_live::{Toast, ToastLog};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::StoreState;

// =============================================================================
// Reservations
// =============================================================================

/// Books a table from the reservation form.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Guest fills in name, email, phone, date, time, party size             │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  create_reservation(input)                                             │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. Validate fields and slot (11:00–22:00, not in the past)   │    │
/// │  │  2. Append reservation (Pending) + "New reservation" notice   │    │
/// │  │  3. Persist snapshot, broadcast ReservationCreated            │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Live feed shows "New reservation" toast                               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn create_reservation(
    store: &StoreState,
    input: NewReservation,
) -> Result<Reservation, ApiError> {
    debug!(date = %input.date, party_size = input.party_size, "create_reservation command");

    let reservation = store.dispatch(|s| s.add_reservation(input))?;
    info!(reservation_id = %reservation.id, "Reservation created");
    Ok(reservation)
}

pub fn get_reservation(store: &StoreState, id: &str) -> Result<Reservation, ApiError> {
    store
        .with_store(|s| s.reservation(id).cloned())
        .ok_or_else(|| ApiError::not_found("Reservation", id))
}

/// Reservations for one day, or all of them ordered by date and time.
pub fn list_reservations(store: &StoreState, date: Option<NaiveDate>) -> Vec<Reservation> {
    store.with_store(|s| match date {
        Some(day) => s.reservations_on(day).into_iter().cloned().collect(),
        None => {
            let mut all = s.reservations.clone();
            all.sort_by_key(|r| (r.date, r.time));
            all
        }
    })
}

/// Guest-side cancellation.
pub fn cancel_reservation(store: &StoreState, id: &str) -> Result<Reservation, ApiError> {
    debug!(reservation_id = %id, "cancel_reservation command");
    Ok(store.dispatch(|s| s.update_reservation_status(id, ReservationStatus::Cancelled))?)
}

// =============================================================================
// Events
// =============================================================================

pub fn list_upcoming_events(store: &StoreState) -> Vec<Event> {
    store.with_store(|s| s.upcoming_events(s.local_today()).into_iter().cloned().collect())
}

/// Books seats for an event; fails when it would go past capacity.
pub fn register_for_event(
    store: &StoreState,
    event_id: &str,
    seats: Option<u32>,
) -> Result<Event, ApiError> {
    let seats = seats.unwrap_or(1);
    debug!(event_id = %event_id, seats, "register_for_event command");
    Ok(store.dispatch(|s| s.register_for_event(event_id, seats))?)
}

// =============================================================================
// Live Widgets
// =============================================================================

/// Weather widget payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    #[serde(flatten)]
    pub weather: Weather,
    pub terrace_open: bool,
}

pub fn get_weather(store: &StoreState) -> WeatherReport {
    let weather = store.with_store(|s| s.weather.clone());
    WeatherReport {
        terrace_open: weather.condition.terrace_open(),
        weather,
    }
}

pub fn get_table_availability(store: &StoreState) -> TableAvailability {
    store.with_store(|s| s.tables.clone())
}

/// Hands pending toasts to the UI, oldest first. Each toast is returned once.
pub fn take_toasts(toasts: &ToastLog) -> Vec<Toast> {
    toasts.drain()
}

pub fn dismiss_toast(toasts: &ToastLog, id: &str) -> bool {
    toasts.dismiss(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{demo_store, reservation_input};
    use crate::error::ErrorCode;
    use bistro_core::{NotificationType, WeatherCondition};
    use bistro_live::{ToastEmitter, ToastLevel};
    use chrono::{Duration, NaiveTime};

    #[test]
    fn test_create_reservation_adds_one_notification() {
        let store = demo_store();
        let before = store.with_store(|s| (s.reservations.len(), s.notifications.len()));

        let reservation = create_reservation(&store, reservation_input("Ada Lovelace")).unwrap();

        assert_eq!(reservation.status, ReservationStatus::Pending);
        store.with_store(|s| {
            assert_eq!(s.reservations.len(), before.0 + 1);
            assert_eq!(s.notifications.len(), before.1 + 1);
            assert_eq!(s.notifications[0].kind, NotificationType::Reservation);
        });
        assert_eq!(get_reservation(&store, &reservation.id).unwrap(), reservation);
    }

    #[test]
    fn test_invalid_reservation_is_validation_error() {
        let store = demo_store();
        let mut input = reservation_input("A");
        input.party_size = 0;
        let err = create_reservation(&store, input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut late = reservation_input("Ada Lovelace");
        late.time = NaiveTime::from_hms_opt(23, 30, 0).unwrap();
        let err = create_reservation(&store, late).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(store.with_store(|s| s.reservations.is_empty()));
    }

    #[test]
    fn test_list_reservations_by_day() {
        let store = demo_store();
        let first = create_reservation(&store, reservation_input("Ada Lovelace")).unwrap();
        let mut later = reservation_input("Grace Hopper");
        later.date = first.date + Duration::days(1);
        create_reservation(&store, later).unwrap();

        assert_eq!(list_reservations(&store, None).len(), 2);
        let day = list_reservations(&store, Some(first.date));
        assert_eq!(day.len(), 1);
        assert_eq!(day[0].id, first.id);
    }

    #[test]
    fn test_cancel_is_final() {
        let store = demo_store();
        let reservation = create_reservation(&store, reservation_input("Ada Lovelace")).unwrap();

        let cancelled = cancel_reservation(&store, &reservation.id).unwrap();
        assert_eq!(cancelled.status, ReservationStatus::Cancelled);
        assert!(cancelled.updated_at >= reservation.updated_at);

        let err = store
            .dispatch(|s| s.update_reservation_status(&reservation.id, ReservationStatus::Seated))
            .map_err(ApiError::from)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        assert_eq!(
            cancel_reservation(&store, "nope").unwrap_err().code,
            ErrorCode::NotFound
        );
    }

    #[test]
    fn test_event_registration_respects_capacity() {
        let store = demo_store();
        let events = list_upcoming_events(&store);
        assert_eq!(events[0].id, "event-wine-tasting");

        let event = register_for_event(&store, "event-wine-tasting", Some(18)).unwrap();
        assert_eq!(event.remaining_seats(), 0);

        let err = register_for_event(&store, "event-wine-tasting", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_weather_report_flags_terrace() {
        let store = demo_store();
        assert!(get_weather(&store).terrace_open);

        store.update(|s| {
            s.set_weather(Weather {
                condition: WeatherCondition::Stormy,
                ..Weather::default()
            })
        });
        let report = get_weather(&store);
        assert!(!report.terrace_open);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["condition"], "stormy");
        assert_eq!(json["terraceOpen"], false);
    }

    #[test]
    fn test_table_availability_reflects_store() {
        let store = demo_store();
        store.update(|s| {
            s.set_available_tables(4);
        });
        let tables = get_table_availability(&store);
        assert_eq!(tables.available, 4);
        assert_eq!(tables.total, 20);
    }

    #[test]
    fn test_toasts_are_taken_once() {
        let toasts = ToastLog::default();
        toasts.emit_toast(&Toast::new(ToastLevel::Success, "New order", "Grace ordered 1 item"));
        toasts.emit_toast(&Toast::new(ToastLevel::Info, "New member", "Ada joined"));

        let id = toasts.recent()[1].id.clone();
        assert!(dismiss_toast(&toasts, &id));

        let taken = take_toasts(&toasts);
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].title, "New order");
        assert!(take_toasts(&toasts).is_empty());
    }
}
