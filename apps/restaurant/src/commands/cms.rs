//! # CMS Commands
//!
//! Everything behind the admin dashboard: menu editing, the reservation
//! and order boards, members, review moderation, events, the social
//! planner, the notification bell, analytics and the admin session.
//!
//! ## Dashboard Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Bistro CMS                               🔔 3    Restaurant Owner ▾   │
//! ├──────────────┬──────────────────────────────────────────────────────────┤
//! │  Dashboard   │  get_analytics            revenue, orders, rating       │
//! │  Menu        │  list/create/update/delete/toggle menu items           │
//! │  Reservations│  list_all_reservations, update_reservation_status      │
//! │  Orders      │  list_orders, update_order_status                      │
//! │  Members     │  list_members, add_member_points, delete_member        │
//! │  Reviews     │  moderate_review, respond_to_review                    │
//! │  Events      │  create/update/delete events                           │
//! │  Social      │  create/update/publish/delete posts                    │
//! └──────────────┴──────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands here do not check for a signed-in admin; the admin user is
//! store data that the dashboard shows, not an access control.

use bistro_core::{
    AdminRole, AdminUser, Analytics, Event, EventUpdate, Member, MenuItem, MenuItemUpdate,
    NewEvent, NewMenuItem, NewSocialPost, Notification, Order, OrderStatus, Reservation,
    ReservationStatus, Review, ReviewStatus, SocialPost, SocialPostUpdate,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

// =============================================================================
// Menu
// =============================================================================

/// Every dish, including ones switched off.
pub fn list_menu_items(store: &StoreState) -> Vec<MenuItem> {
    store.with_store(|s| s.menu_items.clone())
}

pub fn create_menu_item(store: &StoreState, input: NewMenuItem) -> Result<MenuItem, ApiError> {
    debug!(name = %input.name, "create_menu_item command");
    let item = store.dispatch(|s| s.add_menu_item(input))?;
    info!(menu_item_id = %item.id, "Menu item created");
    Ok(item)
}

pub fn update_menu_item(
    store: &StoreState,
    id: &str,
    update: MenuItemUpdate,
) -> Result<MenuItem, ApiError> {
    debug!(menu_item_id = %id, "update_menu_item command");
    Ok(store.dispatch(|s| s.update_menu_item(id, update))?)
}

/// Removes a dish. Cart lines and past orders keep their own copy of it.
pub fn delete_menu_item(store: &StoreState, id: &str) -> Result<MenuItem, ApiError> {
    debug!(menu_item_id = %id, "delete_menu_item command");
    Ok(store.dispatch(|s| s.delete_menu_item(id))?)
}

/// Sold out / back on.
pub fn toggle_menu_item_availability(store: &StoreState, id: &str) -> Result<MenuItem, ApiError> {
    debug!(menu_item_id = %id, "toggle_menu_item_availability command");
    Ok(store.dispatch(|s| s.toggle_menu_item_availability(id))?)
}

// =============================================================================
// Reservations
// =============================================================================

/// Reservation board, newest booking first, optionally one status only.
pub fn list_all_reservations(
    store: &StoreState,
    status: Option<ReservationStatus>,
) -> Vec<Reservation> {
    store.with_store(|s| {
        let mut reservations: Vec<Reservation> = s
            .reservations
            .iter()
            .filter(|r| status.map_or(true, |st| r.status == st))
            .cloned()
            .collect();
        reservations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reservations
    })
}

/// Confirms, seats, completes or cancels a booking.
///
/// ```text
///   pending ──► confirmed ──► seated ──► completed
///      └────────────┴───────────┴──► cancelled / no_show
///
///   completed, cancelled and no_show are final
/// ```
pub fn update_reservation_status(
    store: &StoreState,
    id: &str,
    status: ReservationStatus,
) -> Result<Reservation, ApiError> {
    debug!(reservation_id = %id, %status, "update_reservation_status command");
    Ok(store.dispatch(|s| s.update_reservation_status(id, status))?)
}

pub fn delete_reservation(store: &StoreState, id: &str) -> Result<Reservation, ApiError> {
    debug!(reservation_id = %id, "delete_reservation command");
    Ok(store.dispatch(|s| s.delete_reservation(id))?)
}

// =============================================================================
// Orders
// =============================================================================

/// Order board, newest first.
pub fn list_orders(store: &StoreState, status: Option<OrderStatus>) -> Vec<Order> {
    store.with_store(|s| {
        let mut orders: Vec<Order> = match status {
            Some(st) => s.orders_by_status(st).into_iter().cloned().collect(),
            None => s.orders.clone(),
        };
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    })
}

/// Moves an order through the kitchen. Completing an order linked to a
/// member credits their points and spend once.
pub fn update_order_status(
    store: &StoreState,
    id: &str,
    status: OrderStatus,
) -> Result<Order, ApiError> {
    debug!(order_id = %id, %status, "update_order_status command");
    Ok(store.dispatch(|s| s.update_order_status(id, status))?)
}

// =============================================================================
// Members
// =============================================================================

pub fn list_members(store: &StoreState) -> Vec<Member> {
    store.with_store(|s| s.members.clone())
}

/// Manual points adjustment (birthday bonus, complaint goodwill).
pub fn add_member_points(store: &StoreState, id: &str, points: u32) -> Result<Member, ApiError> {
    debug!(member_id = %id, points, "add_member_points command");
    Ok(store.dispatch(|s| s.add_member_points(id, points))?)
}

/// Removes a member. Their reservations and orders keep the dangling id.
pub fn delete_member(store: &StoreState, id: &str) -> Result<Member, ApiError> {
    debug!(member_id = %id, "delete_member command");
    Ok(store.dispatch(|s| s.delete_member(id))?)
}

// =============================================================================
// Reviews
// =============================================================================

/// Moderation queue; `None` lists every review.
pub fn list_all_reviews(store: &StoreState, status: Option<ReviewStatus>) -> Vec<Review> {
    store.with_store(|s| {
        let mut reviews: Vec<Review> = s
            .reviews
            .iter()
            .filter(|r| status.map_or(true, |st| r.status == st))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reviews
    })
}

pub fn moderate_review(
    store: &StoreState,
    id: &str,
    status: ReviewStatus,
) -> Result<Review, ApiError> {
    debug!(review_id = %id, ?status, "moderate_review command");
    Ok(store.dispatch(|s| s.update_review_status(id, status))?)
}

pub fn respond_to_review(store: &StoreState, id: &str, response: &str) -> Result<Review, ApiError> {
    debug!(review_id = %id, "respond_to_review command");
    Ok(store.dispatch(|s| s.respond_to_review(id, response))?)
}

pub fn delete_review(store: &StoreState, id: &str) -> Result<Review, ApiError> {
    debug!(review_id = %id, "delete_review command");
    Ok(store.dispatch(|s| s.delete_review(id))?)
}

// =============================================================================
// Events
// =============================================================================

/// All events, soonest first.
pub fn list_events(store: &StoreState) -> Vec<Event> {
    store.with_store(|s| {
        let mut events = s.events.clone();
        events.sort_by_key(|e| (e.date, e.start_time));
        events
    })
}

pub fn create_event(store: &StoreState, input: NewEvent) -> Result<Event, ApiError> {
    debug!(title = %input.title, "create_event command");
    let event = store.dispatch(|s| s.add_event(input))?;
    info!(event_id = %event.id, "Event created");
    Ok(event)
}

/// Capacity can never drop below the seats already registered.
pub fn update_event(store: &StoreState, id: &str, update: EventUpdate) -> Result<Event, ApiError> {
    debug!(event_id = %id, "update_event command");
    Ok(store.dispatch(|s| s.update_event(id, update))?)
}

pub fn delete_event(store: &StoreState, id: &str) -> Result<Event, ApiError> {
    debug!(event_id = %id, "delete_event command");
    Ok(store.dispatch(|s| s.delete_event(id))?)
}

// =============================================================================
// Social Posts
// =============================================================================

pub fn list_social_posts(store: &StoreState) -> Vec<SocialPost> {
    store.with_store(|s| {
        let mut posts = s.social_posts.clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    })
}

pub fn create_social_post(store: &StoreState, input: NewSocialPost) -> Result<SocialPost, ApiError> {
    debug!(platform = ?input.platform, "create_social_post command");
    Ok(store.dispatch(|s| s.add_social_post(input))?)
}

pub fn update_social_post(
    store: &StoreState,
    id: &str,
    update: SocialPostUpdate,
) -> Result<SocialPost, ApiError> {
    debug!(post_id = %id, "update_social_post command");
    Ok(store.dispatch(|s| s.update_social_post(id, update))?)
}

/// Marks a post published. Nothing is sent to the platform itself.
pub fn publish_social_post(store: &StoreState, id: &str) -> Result<SocialPost, ApiError> {
    debug!(post_id = %id, "publish_social_post command");
    Ok(store.dispatch(|s| s.publish_social_post(id))?)
}

pub fn delete_social_post(store: &StoreState, id: &str) -> Result<SocialPost, ApiError> {
    debug!(post_id = %id, "delete_social_post command");
    Ok(store.dispatch(|s| s.delete_social_post(id))?)
}

// =============================================================================
// Notifications
// =============================================================================

/// Notification bell contents, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub unread: usize,
    pub notifications: Vec<Notification>,
}

pub fn list_notifications(store: &StoreState) -> NotificationFeed {
    store.with_store(|s| NotificationFeed {
        unread: s.unread_notification_count(),
        notifications: s.notifications.clone(),
    })
}

pub fn mark_notification_read(store: &StoreState, id: &str) -> Result<(), ApiError> {
    Ok(store.dispatch(|s| s.mark_notification_read(id))?)
}

/// Returns how many were unread.
pub fn mark_all_notifications_read(store: &StoreState) -> usize {
    store.update(|s| s.mark_all_notifications_read())
}

pub fn clear_notifications(store: &StoreState) {
    debug!("clear_notifications command");
    store.update(|s| s.clear_notifications());
}

// =============================================================================
// Dashboard
// =============================================================================

/// Recomputes the dashboard figures and stores them.
pub fn get_analytics(store: &StoreState) -> Analytics {
    debug!("get_analytics command");
    store.update(|s| s.refresh_analytics())
}

/// Banner state for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub unread_notifications: usize,
}

pub fn get_store_status(store: &StoreState) -> StoreStatus {
    store.with_store(|s| StoreStatus {
        is_loading: s.is_loading,
        error: s.error.clone(),
        unread_notifications: s.unread_notification_count(),
    })
}

/// Hides the error banner.
pub fn dismiss_error(store: &StoreState) {
    store.update(|s| s.clear_error());
}

pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

// =============================================================================
// Admin Session
// =============================================================================

pub fn login_admin(
    store: &StoreState,
    name: &str,
    email: &str,
    role: AdminRole,
) -> Result<AdminUser, ApiError> {
    debug!(?role, "login_admin command");
    let admin = store.dispatch(|s| s.login_admin(name, email, role))?;
    info!(admin_id = %admin.id, "Admin signed in");
    Ok(admin)
}

/// Signs the admin out; returns who was signed in, if anyone.
pub fn logout_admin(store: &StoreState) -> Option<AdminUser> {
    let admin = store.update(|s| s.logout_admin());
    if let Some(admin) = &admin {
        info!(admin_id = %admin.id, "Admin signed out");
    }
    admin
}

pub fn current_admin(store: &StoreState) -> Option<AdminUser> {
    store.with_store(|s| s.admin_user.clone())
}
