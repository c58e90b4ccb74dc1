//! # Domain Types
//!
//! The records the website and the CMS share through the store.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐              │
//! │  │   MenuItem   │◄───│  OrderItem   │    │ Reservation  │              │
//! │  │  id          │    │  menuItemId  │    │  id          │              │
//! │  │  price       │    │  unitPrice   │    │  date, time  │              │
//! │  │  category    │    │  (snapshot)  │    │  partySize   │              │
//! │  └──────▲───────┘    └──────▲───────┘    └──────────────┘              │
//! │         │                   │ items[]                                   │
//! │  ┌──────┴───────┐    ┌──────┴───────┐    ┌──────────────┐              │
//! │  │   CartItem   │    │    Order     │───►│    Member    │              │
//! │  │  menuItemId  │    │  status      │    │  tier,points │              │
//! │  └──────────────┘    │  total       │    └──────────────┘              │
//! │                      └──────────────┘                                   │
//! │                                                                         │
//! │  Event • Review • SocialPost • Notification • AdminUser • Analytics    │
//! │  Weather • TableAvailability (live feed, not persisted)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! References between records are plain string ids. Nothing enforces
//! them: deleting a menu item leaves carts and order history pointing at
//! an id that no longer resolves, which is why order lines snapshot the
//! name and unit price.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Menu
// =============================================================================

/// Menu section a dish is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MenuCategory {
    Appetizer,
    Main,
    Dessert,
    Beverage,
    Special,
}

/// Dietary badge shown next to a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    DairyFree,
    Spicy,
    ContainsNuts,
}

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: MenuCategory,
    pub image: Option<String>,
    /// Switched off when sold out; unavailable items cannot be ordered.
    pub available: bool,
    /// Shown on the home page carousel.
    pub featured: bool,
    #[serde(default)]
    pub dietary: Vec<DietaryTag>,
    pub preparation_minutes: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// CMS "add dish" form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: MenuCategory,
    pub image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub dietary: Vec<DietaryTag>,
    pub preparation_minutes: u32,
}

/// CMS "edit dish" form; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<MenuCategory>,
    pub image: Option<String>,
    pub available: Option<bool>,
    pub featured: Option<bool>,
    pub dietary: Option<Vec<DietaryTag>>,
    pub preparation_minutes: Option<u32>,
}

// =============================================================================
// Cart
// =============================================================================

/// A line in the online-ordering cart.
///
/// Name and price are frozen when the dish is added, so the cart keeps
/// rendering even if the dish is edited or deleted in the CMS afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub menu_item_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub special_instructions: Option<String>,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a cart line from a menu item.
    pub fn from_menu_item(item: &MenuItem, quantity: u32) -> Self {
        CartItem {
            menu_item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity,
            special_instructions: None,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Reservations
// =============================================================================

/// Reservation lifecycle.
///
/// ```text
///   pending ──► confirmed ──► seated ──► completed
///      │            │
///      └────────────┴──► cancelled / no_show
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Terminal states never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled | ReservationStatus::NoShow
        )
    }

    /// Still expected to show up.
    pub fn is_upcoming(&self) -> bool {
        matches!(self, ReservationStatus::Pending | ReservationStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub time: NaiveTime,
    pub party_size: u32,
    pub table_preference: Option<String>,
    pub occasion: Option<String>,
    pub special_requests: Option<String>,
    pub status: ReservationStatus,
    pub member_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Booking form submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewReservation {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub time: NaiveTime,
    pub party_size: u32,
    pub table_preference: Option<String>,
    pub occasion: Option<String>,
    pub special_requests: Option<String>,
    pub member_id: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

/// How the order reaches the guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    #[default]
    Takeout,
    Delivery,
}

/// Kitchen lifecycle of an order.
///
/// ```text
///   pending ──► confirmed ──► preparing ──► ready ──► completed
///      └────────────┴─────────────┴───────────┴──► cancelled
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal states never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line in a placed order (snapshot of the dish at order time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub special_instructions: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

impl From<&CartItem> for OrderItem {
    fn from(line: &CartItem) -> Self {
        OrderItem {
            menu_item_id: line.menu_item_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            special_instructions: line.special_instructions.clone(),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub items: Vec<OrderItem>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub table_number: Option<u32>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub member_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Number of dishes across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Who ordered and how it is served; shared by checkout and the CMS form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub order_type: OrderType,
    pub table_number: Option<u32>,
    pub delivery_address: Option<String>,
    pub notes: Option<String>,
    pub member_id: Option<String>,
}

/// One requested line of a new order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    pub menu_item_id: String,
    pub quantity: u32,
    pub special_instructions: Option<String>,
}

/// Order submitted with explicit lines (phone orders entered in the CMS).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    #[serde(flatten)]
    #[ts(flatten)]
    pub details: OrderDetails,
    pub items: Vec<NewOrderItem>,
}

// =============================================================================
// Members
// =============================================================================

/// Loyalty tier, derived from lifetime points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MembershipTier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    /// Tier earned with `points` loyalty points.
    ///
    /// ```text
    ///   0 ─── 500 ─── 1500 ─── 5000 ───►
    ///   bronze silver   gold    platinum
    /// ```
    pub fn for_points(points: u32) -> Self {
        match points {
            0..=499 => MembershipTier::Bronze,
            500..=1499 => MembershipTier::Silver,
            1500..=4999 => MembershipTier::Gold,
            _ => MembershipTier::Platinum,
        }
    }
}

/// A loyalty-club member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub tier: MembershipTier,
    pub points: u32,
    pub total_spent: Money,
    pub visit_count: u32,
    #[ts(as = "Option<String>")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub preferences: Vec<String>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Membership sign-up form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[ts(as = "Option<String>")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Profile edit; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    #[ts(as = "Option<String>")]
    pub birthday: Option<NaiveDate>,
    pub preferences: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticketed evening (tasting menu, live music, cooking class).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub start_time: NaiveTime,
    #[ts(as = "Option<String>")]
    pub end_time: Option<NaiveTime>,
    pub capacity: u32,
    pub registered: u32,
    pub price: Money,
    pub status: EventStatus,
    pub image: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn remaining_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }
}

/// CMS "add event" form.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub start_time: NaiveTime,
    #[ts(as = "Option<String>")]
    pub end_time: Option<NaiveTime>,
    pub capacity: u32,
    pub price: Money,
    pub image: Option<String>,
}

/// CMS "edit event" form; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub start_time: Option<NaiveTime>,
    #[ts(as = "Option<String>")]
    pub end_time: Option<NaiveTime>,
    pub capacity: Option<u32>,
    pub price: Option<Money>,
    pub status: Option<EventStatus>,
    pub image: Option<String>,
}

// =============================================================================
// Reviews
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Where a review was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSource {
    #[default]
    Website,
    Google,
    Yelp,
    TripAdvisor,
}

/// A guest review awaiting or past moderation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub customer_name: String,
    pub email: Option<String>,
    /// 1 to 5 stars.
    pub rating: u8,
    pub comment: String,
    pub source: ReviewSource,
    pub status: ReviewStatus,
    /// Public reply from the restaurant.
    pub response: Option<String>,
    #[ts(as = "Option<String>")]
    pub responded_at: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Review form submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub customer_name: String,
    pub email: Option<String>,
    pub rating: u8,
    pub comment: String,
    #[serde(default)]
    pub source: ReviewSource,
}

// =============================================================================
// Social Posts
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Twitter,
    TikTok,
}

impl SocialPlatform {
    /// Longest caption the platform accepts.
    pub fn max_length(&self) -> usize {
        match self {
            SocialPlatform::Twitter => 280,
            SocialPlatform::Instagram | SocialPlatform::Facebook | SocialPlatform::TikTok => 2200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Draft,
    Scheduled,
    Published,
}

/// A post drafted in the CMS social planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub platform: SocialPlatform,
    pub content: String,
    pub image: Option<String>,
    pub status: PostStatus,
    #[ts(as = "Option<String>")]
    pub scheduled_for: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub published_at: Option<DateTime<Utc>>,
    pub likes: u32,
    pub comments: u32,
    pub shares: u32,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// CMS "new post" form. A `scheduled_for` time makes the post scheduled.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSocialPost {
    pub platform: SocialPlatform,
    pub content: String,
    pub image: Option<String>,
    #[ts(as = "Option<String>")]
    pub scheduled_for: Option<DateTime<Utc>>,
}

/// CMS "edit post" form; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SocialPostUpdate {
    pub content: Option<String>,
    pub image: Option<String>,
    #[ts(as = "Option<String>")]
    pub scheduled_for: Option<DateTime<Utc>>,
    pub likes: Option<u32>,
    pub comments: Option<u32>,
    pub shares: Option<u32>,
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Reservation,
    Order,
    Review,
    Member,
    Event,
    System,
}

/// An entry in the CMS notification bell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Admin User
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    Owner,
    Manager,
    Staff,
}

/// The person signed in to the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub avatar: Option<String>,
    #[ts(as = "Option<String>")]
    pub last_login: Option<DateTime<Utc>>,
}

// =============================================================================
// Analytics
// =============================================================================

/// A dish ranked by how often it was ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PopularItem {
    pub menu_item_id: String,
    pub name: String,
    pub quantity: u32,
    pub revenue: Money,
}

/// Dashboard aggregate, recomputed from the collections on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_revenue: Money,
    pub total_orders: u32,
    pub average_order_value: Money,
    pub total_reservations: u32,
    pub upcoming_reservations: u32,
    pub total_members: u32,
    pub active_members: u32,
    pub average_rating: f64,
    pub review_count: u32,
    pub popular_items: Vec<PopularItem>,
    pub orders_by_status: BTreeMap<String, u32>,
    #[ts(as = "Option<String>")]
    pub generated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Live Feed Records (not persisted)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 5] = [
        WeatherCondition::Sunny,
        WeatherCondition::PartlyCloudy,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Stormy,
    ];

    /// Terrace seating closes when it rains.
    pub fn terrace_open(&self) -> bool {
        !matches!(self, WeatherCondition::Rainy | WeatherCondition::Stormy)
    }
}

/// Weather widget on the booking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Weather {
    pub condition: WeatherCondition,
    pub temperature_c: i32,
    pub humidity: u8,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Weather {
    fn default() -> Self {
        Weather {
            condition: WeatherCondition::Sunny,
            temperature_c: 22,
            humidity: 50,
            updated_at: None,
        }
    }
}

/// Free tables right now, as shown on the booking page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableAvailability {
    pub total: u32,
    pub available: u32,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TableAvailability {
    pub fn new(total: u32) -> Self {
        TableAvailability {
            total,
            available: total,
            updated_at: None,
        }
    }

    /// Share of tables occupied, 0–100.
    pub fn occupancy_percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.total - self.available.min(self.total)) * 100 / self.total
    }
}

impl Default for TableAvailability {
    fn default() -> Self {
        TableAvailability::new(crate::DEFAULT_TOTAL_TABLES)
    }
}

// =============================================================================
// Store Events
// =============================================================================

/// Something a store action did that the live feed may want to announce.
///
/// Produced by actions, drained by the store handle and broadcast to
/// subscribers. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    ReservationCreated {
        reservation_id: String,
        customer_name: String,
        party_size: u32,
        #[ts(as = "String")]
        date: NaiveDate,
        #[ts(as = "String")]
        time: NaiveTime,
    },
    ReservationStatusChanged {
        reservation_id: String,
        status: ReservationStatus,
    },
    OrderCreated {
        order_id: String,
        customer_name: String,
        total: Money,
        item_count: u32,
    },
    OrderStatusChanged {
        order_id: String,
        status: OrderStatus,
    },
    MemberJoined {
        member_id: String,
        name: String,
    },
    ReviewSubmitted {
        review_id: String,
        customer_name: String,
        rating: u8,
    },
    EventRegistration {
        event_id: String,
        title: String,
        seats: u32,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================
