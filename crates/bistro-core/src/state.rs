//! # The Store
//!
//! `RestaurantState` is the single container every page and CMS screen
//! reads from, and its methods are the only way the collections change.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Store Action Flow                                │
//! │                                                                         │
//! │  command ──► action(&mut self, payload)                                 │
//! │                 │                                                       │
//! │                 ├── 1. validate payload (validation.rs)                 │
//! │                 ├── 2. mutate the collection, stamp updatedAt           │
//! │                 ├── 3. push a Notification (creations only)             │
//! │                 ├── 4. queue a StoreEvent for the live feed             │
//! │                 └── 5. return an owned copy of the record               │
//! │                                                                         │
//! │  StoreState (apps/restaurant) then drains the events with              │
//! │  take_events() and persists the snapshot. Nothing here does I/O.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted vs Transient
//! ```text
//!   persisted (serde)              transient (#[serde(skip)])
//!   ─────────────────────────      ───────────────────────────
//!   menuItems  cart  orders        weather   tables
//!   reservations  members          isLoading error
//!   events  reviews  socialPosts   taxRate   utcOffsetMinutes
//!   notifications  adminUser       pending events
//!   analytics
//! ```
//!
//! A failed action leaves the state exactly as it was: every check runs
//! before the first mutation.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::analytics;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::id::generate_id;
use crate::money::{Money, TaxRate};
use crate::types::*;
use crate::validation::{
    validate_customer_name, validate_email, validate_event_capacity, validate_party_size,
    validate_phone, validate_post_content, validate_price, validate_quantity, validate_rating,
    validate_required, validate_reservation_slot,
};
use crate::MAX_NOTIFICATIONS;

// =============================================================================
// Cart Totals
// =============================================================================

/// Checkout summary shown under the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: u32,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartTotals {
    fn from_lines(lines: impl Iterator<Item = (u32, Money)>, rate: TaxRate) -> Self {
        let (item_count, subtotal) = lines.fold((0u32, Money::zero()), |(count, sum), (q, p)| {
            (count.saturating_add(q), sum + p * q)
        });
        let tax = subtotal.calculate_tax(rate);
        CartTotals {
            item_count,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

// =============================================================================
// Restaurant State
// =============================================================================

/// The centralized store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantState {
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub cart: Vec<CartItem>,
    #[serde(default)]
    pub reservations: Vec<Reservation>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub social_posts: Vec<SocialPost>,
    /// Newest first, at most [`MAX_NOTIFICATIONS`].
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub admin_user: Option<AdminUser>,
    #[serde(default)]
    pub analytics: Analytics,

    #[serde(skip)]
    pub weather: Weather,
    #[serde(skip)]
    pub tables: TableAvailability,
    #[serde(skip)]
    pub is_loading: bool,
    #[serde(skip)]
    pub error: Option<String>,
    /// Applied to new orders; comes from config, not from the snapshot.
    #[serde(skip)]
    pub tax_rate: TaxRate,
    /// The restaurant's offset from UTC. Reservation dates and times are
    /// local wall-clock values, so "now" and "today" are taken here.
    #[serde(skip)]
    pub utc_offset_minutes: i32,
    #[serde(skip)]
    pending_events: Vec<StoreEvent>,
}

impl RestaurantState {
    /// Empty store with the given tax rate.
    pub fn with_tax_rate(tax_rate: TaxRate) -> Self {
        RestaurantState {
            tax_rate,
            ..Default::default()
        }
    }

    /// Drains the events queued by actions since the last call.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: StoreEvent) {
        self.pending_events.push(event);
    }

    // =========================================================================
    // Local Clock
    // =========================================================================

    /// The restaurant's offset; out-of-range values fall back to UTC.
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).unwrap_or(Utc.fix())
    }

    /// Wall-clock time at the restaurant for the instant `now`.
    pub fn local_time(&self, now: DateTime<Utc>) -> NaiveDateTime {
        now.with_timezone(&self.local_offset()).naive_local()
    }

    /// Today's date at the restaurant.
    pub fn local_today(&self) -> NaiveDate {
        self.local_time(Utc::now()).date()
    }

    // =========================================================================
    // Menu
    // =========================================================================

    pub fn menu_item(&self, id: &str) -> Option<&MenuItem> {
        self.menu_items.iter().find(|m| m.id == id)
    }

    fn menu_item_mut(&mut self, id: &str) -> CoreResult<&mut MenuItem> {
        self.menu_items
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::MenuItemNotFound(id.to_string()))
    }

    pub fn add_menu_item(&mut self, new: NewMenuItem) -> CoreResult<MenuItem> {
        validate_required("name", &new.name)?;
        validate_price(new.price)?;

        let now = Utc::now();
        let item = MenuItem {
            id: generate_id(),
            name: new.name.trim().to_string(),
            description: new.description.trim().to_string(),
            price: new.price,
            category: new.category,
            image: new.image,
            available: true,
            featured: new.featured,
            dietary: new.dietary,
            preparation_minutes: new.preparation_minutes,
            created_at: now,
            updated_at: now,
        };
        self.menu_items.push(item.clone());
        Ok(item)
    }

    pub fn update_menu_item(&mut self, id: &str, update: MenuItemUpdate) -> CoreResult<MenuItem> {
        if let Some(name) = &update.name {
            validate_required("name", name)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let item = self.menu_item_mut(id)?;
        if let Some(name) = update.name {
            item.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            item.description = description.trim().to_string();
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(image) = update.image {
            item.image = Some(image);
        }
        if let Some(available) = update.available {
            item.available = available;
        }
        if let Some(featured) = update.featured {
            item.featured = featured;
        }
        if let Some(dietary) = update.dietary {
            item.dietary = dietary;
        }
        if let Some(minutes) = update.preparation_minutes {
            item.preparation_minutes = minutes;
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    /// Removes a dish from the menu. Orders and cart lines that reference
    /// it are left alone.
    pub fn delete_menu_item(&mut self, id: &str) -> CoreResult<MenuItem> {
        let pos = self
            .menu_items
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CoreError::MenuItemNotFound(id.to_string()))?;
        Ok(self.menu_items.remove(pos))
    }

    pub fn toggle_menu_item_availability(&mut self, id: &str) -> CoreResult<MenuItem> {
        let item = self.menu_item_mut(id)?;
        item.available = !item.available;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    pub fn menu_by_category(&self, category: MenuCategory) -> Vec<&MenuItem> {
        self.menu_items
            .iter()
            .filter(|m| m.category == category)
            .collect()
    }

    /// Featured dishes that can currently be ordered.
    pub fn featured_menu_items(&self) -> Vec<&MenuItem> {
        self.menu_items
            .iter()
            .filter(|m| m.featured && m.available)
            .collect()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds a dish to the cart, merging with an existing line for the same dish.
    ///
    /// ```text
    ///   cart: [Risotto ×2]
    ///   add_to_cart(risotto, 1)  →  cart: [Risotto ×3]
    ///   add_to_cart(tiramisu, 1) →  cart: [Risotto ×3, Tiramisu ×1]
    /// ```
    pub fn add_to_cart(
        &mut self,
        menu_item_id: &str,
        quantity: u32,
        special_instructions: Option<String>,
    ) -> CoreResult<CartItem> {
        validate_quantity(quantity)?;

        let item = self
            .menu_item(menu_item_id)
            .ok_or_else(|| CoreError::MenuItemNotFound(menu_item_id.to_string()))?;
        if !item.available {
            return Err(CoreError::MenuItemUnavailable {
                id: item.id.clone(),
                name: item.name.clone(),
            });
        }
        let fresh = CartItem::from_menu_item(item, quantity);

        if let Some(line) = self
            .cart
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
        {
            let merged = line.quantity.saturating_add(quantity);
            validate_quantity(merged)?;
            line.quantity = merged;
            if special_instructions.is_some() {
                line.special_instructions = special_instructions;
            }
            return Ok(line.clone());
        }

        let line = CartItem {
            special_instructions,
            ..fresh
        };
        self.cart.push(line.clone());
        Ok(line)
    }

    /// Sets a line's quantity; zero removes the line and returns `None`.
    pub fn update_cart_quantity(
        &mut self,
        menu_item_id: &str,
        quantity: u32,
    ) -> CoreResult<Option<CartItem>> {
        if quantity == 0 {
            self.remove_from_cart(menu_item_id)?;
            return Ok(None);
        }
        validate_quantity(quantity)?;

        let line = self
            .cart
            .iter_mut()
            .find(|line| line.menu_item_id == menu_item_id)
            .ok_or_else(|| CoreError::CartItemNotFound(menu_item_id.to_string()))?;
        line.quantity = quantity;
        Ok(Some(line.clone()))
    }

    pub fn remove_from_cart(&mut self, menu_item_id: &str) -> CoreResult<CartItem> {
        let pos = self
            .cart
            .iter()
            .position(|line| line.menu_item_id == menu_item_id)
            .ok_or_else(|| CoreError::CartItemNotFound(menu_item_id.to_string()))?;
        Ok(self.cart.remove(pos))
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart_totals(&self, tax_rate: TaxRate) -> CartTotals {
        CartTotals::from_lines(
            self.cart.iter().map(|line| (line.quantity, line.unit_price)),
            tax_rate,
        )
    }

    // =========================================================================
    // Reservations
    // =========================================================================

    pub fn reservation(&self, id: &str) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Books a table. The reservation starts out pending.
    pub fn add_reservation(&mut self, new: NewReservation) -> CoreResult<Reservation> {
        self.add_reservation_at(new, Utc::now())
    }

    /// Books a table as of `now`. The slot is checked against the
    /// restaurant's local clock.
    pub fn add_reservation_at(
        &mut self,
        new: NewReservation,
        now: DateTime<Utc>,
    ) -> CoreResult<Reservation> {
        validate_customer_name(&new.customer_name)?;
        validate_email(&new.email)?;
        validate_phone(&new.phone)?;
        validate_party_size(new.party_size)?;
        validate_reservation_slot(new.date, new.time, self.local_time(now))?;

        let reservation = Reservation {
            id: generate_id(),
            customer_name: new.customer_name.trim().to_string(),
            email: new.email.trim().to_string(),
            phone: new.phone.trim().to_string(),
            date: new.date,
            time: new.time,
            party_size: new.party_size,
            table_preference: new.table_preference,
            occasion: new.occasion,
            special_requests: new.special_requests,
            status: ReservationStatus::Pending,
            member_id: new.member_id,
            created_at: now,
            updated_at: now,
        };
        self.reservations.push(reservation.clone());

        self.add_notification(
            NotificationType::Reservation,
            "New reservation",
            format!(
                "{} booked a table for {} on {} at {}",
                reservation.customer_name,
                reservation.party_size,
                reservation.date,
                reservation.time.format("%H:%M")
            ),
        );
        self.emit(StoreEvent::ReservationCreated {
            reservation_id: reservation.id.clone(),
            customer_name: reservation.customer_name.clone(),
            party_size: reservation.party_size,
            date: reservation.date,
            time: reservation.time,
        });
        Ok(reservation)
    }

    /// Moves a reservation through its lifecycle.
    ///
    /// Completed, cancelled and no-show reservations are final. Seating a
    /// reservation linked to a member counts as a visit.
    pub fn update_reservation_status(
        &mut self,
        id: &str,
        status: ReservationStatus,
    ) -> CoreResult<Reservation> {
        let reservation = self
            .reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;

        if reservation.status.is_terminal() && reservation.status != status {
            return Err(CoreError::InvalidStatusTransition {
                entity: "Reservation",
                id: id.to_string(),
                current: reservation.status.to_string(),
                requested: status.to_string(),
            });
        }

        let seated_now = status == ReservationStatus::Seated
            && reservation.status != ReservationStatus::Seated;
        reservation.status = status;
        reservation.updated_at = Utc::now();
        let updated = reservation.clone();

        if seated_now {
            if let Some(member) = updated
                .member_id
                .as_deref()
                .and_then(|mid| self.members.iter_mut().find(|m| m.id == mid))
            {
                member.visit_count += 1;
                member.updated_at = updated.updated_at;
            }
        }

        self.emit(StoreEvent::ReservationStatusChanged {
            reservation_id: updated.id.clone(),
            status,
        });
        Ok(updated)
    }

    pub fn delete_reservation(&mut self, id: &str) -> CoreResult<Reservation> {
        let pos = self
            .reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::ReservationNotFound(id.to_string()))?;
        Ok(self.reservations.remove(pos))
    }

    /// Reservations for one day, earliest first.
    pub fn reservations_on(&self, date: NaiveDate) -> Vec<&Reservation> {
        let mut day: Vec<&Reservation> =
            self.reservations.iter().filter(|r| r.date == date).collect();
        day.sort_by_key(|r| r.time);
        day
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Places an order with explicit lines, snapshotting each dish.
    pub fn add_order(&mut self, new: NewOrder) -> CoreResult<Order> {
        if new.items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let mut items = Vec::with_capacity(new.items.len());
        for line in &new.items {
            validate_quantity(line.quantity)?;
            let dish = self
                .menu_item(&line.menu_item_id)
                .ok_or_else(|| CoreError::MenuItemNotFound(line.menu_item_id.clone()))?;
            if !dish.available {
                return Err(CoreError::MenuItemUnavailable {
                    id: dish.id.clone(),
                    name: dish.name.clone(),
                });
            }
            items.push(OrderItem {
                menu_item_id: dish.id.clone(),
                name: dish.name.clone(),
                quantity: line.quantity,
                unit_price: dish.price,
                special_instructions: line.special_instructions.clone(),
            });
        }

        self.insert_order(new.details, items)
    }

    /// Checks out the cart: builds an order from its lines, then empties it.
    pub fn place_order_from_cart(&mut self, details: OrderDetails) -> CoreResult<Order> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        let items: Vec<OrderItem> = self.cart.iter().map(OrderItem::from).collect();
        let order = self.insert_order(details, items)?;
        self.clear_cart();
        Ok(order)
    }

    fn insert_order(&mut self, details: OrderDetails, items: Vec<OrderItem>) -> CoreResult<Order> {
        validate_customer_name(&details.customer_name)?;
        validate_email(&details.email)?;
        validate_phone(&details.phone)?;
        if details.order_type == OrderType::Delivery {
            let address = details.delivery_address.as_deref().unwrap_or_default();
            validate_required("delivery address", address)?;
        }

        let totals = CartTotals::from_lines(
            items.iter().map(|line| (line.quantity, line.unit_price)),
            self.tax_rate,
        );
        let now = Utc::now();
        let order = Order {
            id: generate_id(),
            customer_name: details.customer_name.trim().to_string(),
            email: details.email.trim().to_string(),
            phone: details.phone.trim().to_string(),
            items,
            order_type: details.order_type,
            status: OrderStatus::Pending,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            table_number: details.table_number,
            delivery_address: details.delivery_address,
            notes: details.notes,
            member_id: details.member_id,
            created_at: now,
            updated_at: now,
        };
        self.orders.push(order.clone());

        self.add_notification(
            NotificationType::Order,
            "New order",
            format!(
                "{} placed an order of {} items for {}",
                order.customer_name,
                order.item_count(),
                order.total
            ),
        );
        self.emit(StoreEvent::OrderCreated {
            order_id: order.id.clone(),
            customer_name: order.customer_name.clone(),
            total: order.total,
            item_count: order.item_count(),
        });
        Ok(order)
    }

    /// Changes an order's status and refreshes `updated_at`.
    ///
    /// Completing an order linked to a member credits one loyalty point per
    /// whole currency unit of the total and adds the total to their spend.
    pub fn update_order_status(&mut self, id: &str, status: OrderStatus) -> CoreResult<Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;

        if order.status.is_terminal() && order.status != status {
            return Err(CoreError::InvalidStatusTransition {
                entity: "Order",
                id: id.to_string(),
                current: order.status.to_string(),
                requested: status.to_string(),
            });
        }

        let completed_now = status == OrderStatus::Completed && order.status != status;
        order.status = status;
        order.updated_at = Utc::now();
        let updated = order.clone();

        if completed_now {
            if let Some(member) = updated
                .member_id
                .as_deref()
                .and_then(|mid| self.members.iter_mut().find(|m| m.id == mid))
            {
                let earned = u32::try_from(updated.total.whole_units().max(0)).unwrap_or(u32::MAX);
                member.total_spent += updated.total;
                credit_points(member, earned, updated.updated_at);
            }
        }

        self.emit(StoreEvent::OrderStatusChanged {
            order_id: updated.id.clone(),
            status,
        });
        Ok(updated)
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status == status).collect()
    }

    // =========================================================================
    // Members
    // =========================================================================

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    fn member_mut(&mut self, id: &str) -> CoreResult<&mut Member> {
        self.members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CoreError::MemberNotFound(id.to_string()))
    }

    /// Case-insensitive lookup by email.
    pub fn find_member_by_email(&self, email: &str) -> Option<&Member> {
        let email = email.trim();
        self.members
            .iter()
            .find(|m| m.email.eq_ignore_ascii_case(email))
    }

    /// Signs a guest up for the loyalty club. Emails are unique.
    pub fn add_member(&mut self, new: NewMember) -> CoreResult<Member> {
        validate_customer_name(&new.name)?;
        validate_email(&new.email)?;
        validate_phone(&new.phone)?;

        let email = new.email.trim().to_string();
        if self.find_member_by_email(&email).is_some() {
            return Err(ValidationError::Duplicate {
                field: "email".to_string(),
                value: email,
            }
            .into());
        }

        let now = Utc::now();
        let member = Member {
            id: generate_id(),
            name: new.name.trim().to_string(),
            email,
            phone: new.phone.trim().to_string(),
            tier: MembershipTier::Bronze,
            points: 0,
            total_spent: Money::zero(),
            visit_count: 0,
            birthday: new.birthday,
            preferences: new.preferences,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.members.push(member.clone());

        self.add_notification(
            NotificationType::Member,
            "New member",
            format!("{} joined the loyalty club", member.name),
        );
        self.emit(StoreEvent::MemberJoined {
            member_id: member.id.clone(),
            name: member.name.clone(),
        });
        Ok(member)
    }

    pub fn update_member(&mut self, id: &str, update: MemberUpdate) -> CoreResult<Member> {
        if let Some(name) = &update.name {
            validate_customer_name(name)?;
        }
        if let Some(phone) = &update.phone {
            validate_phone(phone)?;
        }

        let member = self.member_mut(id)?;
        if let Some(name) = update.name {
            member.name = name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            member.phone = phone.trim().to_string();
        }
        if let Some(birthday) = update.birthday {
            member.birthday = Some(birthday);
        }
        if let Some(preferences) = update.preferences {
            member.preferences = preferences;
        }
        if let Some(active) = update.is_active {
            member.is_active = active;
        }
        member.updated_at = Utc::now();
        Ok(member.clone())
    }

    /// Credits loyalty points and recomputes the tier.
    pub fn add_member_points(&mut self, id: &str, points: u32) -> CoreResult<Member> {
        let member = self.member_mut(id)?;
        credit_points(member, points, Utc::now());
        Ok(member.clone())
    }

    pub fn delete_member(&mut self, id: &str) -> CoreResult<Member> {
        let pos = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| CoreError::MemberNotFound(id.to_string()))?;
        Ok(self.members.remove(pos))
    }

    // =========================================================================
    // Events
    // =========================================================================

    pub fn event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    fn event_mut(&mut self, id: &str) -> CoreResult<&mut Event> {
        self.events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoreError::EventNotFound(id.to_string()))
    }

    pub fn add_event(&mut self, new: NewEvent) -> CoreResult<Event> {
        validate_required("title", &new.title)?;
        validate_event_capacity(new.capacity, 0)?;
        validate_price(new.price)?;

        let now = Utc::now();
        let event = Event {
            id: generate_id(),
            title: new.title.trim().to_string(),
            description: new.description.trim().to_string(),
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            capacity: new.capacity,
            registered: 0,
            price: new.price,
            status: EventStatus::Upcoming,
            image: new.image,
            created_at: now,
            updated_at: now,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    pub fn update_event(&mut self, id: &str, update: EventUpdate) -> CoreResult<Event> {
        if let Some(title) = &update.title {
            validate_required("title", title)?;
        }
        if let Some(price) = update.price {
            validate_price(price)?;
        }

        let event = self.event_mut(id)?;
        if let Some(capacity) = update.capacity {
            validate_event_capacity(capacity, event.registered)?;
        }

        if let Some(title) = update.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            event.description = description.trim().to_string();
        }
        if let Some(date) = update.date {
            event.date = date;
        }
        if let Some(start) = update.start_time {
            event.start_time = start;
        }
        if let Some(end) = update.end_time {
            event.end_time = Some(end);
        }
        if let Some(capacity) = update.capacity {
            event.capacity = capacity;
        }
        if let Some(price) = update.price {
            event.price = price;
        }
        if let Some(status) = update.status {
            event.status = status;
        }
        if let Some(image) = update.image {
            event.image = Some(image);
        }
        event.updated_at = Utc::now();
        Ok(event.clone())
    }

    pub fn delete_event(&mut self, id: &str) -> CoreResult<Event> {
        let pos = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CoreError::EventNotFound(id.to_string()))?;
        Ok(self.events.remove(pos))
    }

    /// Books `seats` for an upcoming event, never past its capacity.
    pub fn register_for_event(&mut self, id: &str, seats: u32) -> CoreResult<Event> {
        validate_quantity(seats)?;

        let event = self.event_mut(id)?;
        if event.status != EventStatus::Upcoming {
            return Err(CoreError::InvalidStatusTransition {
                entity: "Event",
                id: id.to_string(),
                current: event.status.to_string(),
                requested: "registered".to_string(),
            });
        }
        let remaining = event.remaining_seats();
        if seats > remaining {
            return Err(CoreError::EventFull {
                title: event.title.clone(),
                remaining,
                requested: seats,
            });
        }

        event.registered += seats;
        event.updated_at = Utc::now();
        let event = event.clone();

        self.add_notification(
            NotificationType::Event,
            "Event registration",
            format!(
                "{} seats booked for {} ({} left)",
                seats,
                event.title,
                event.remaining_seats()
            ),
        );
        self.emit(StoreEvent::EventRegistration {
            event_id: event.id.clone(),
            title: event.title.clone(),
            seats,
        });
        Ok(event)
    }

    /// Upcoming events on or after `today`, soonest first.
    pub fn upcoming_events(&self, today: NaiveDate) -> Vec<&Event> {
        let mut upcoming: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.status == EventStatus::Upcoming && e.date >= today)
            .collect();
        upcoming.sort_by_key(|e| (e.date, e.start_time));
        upcoming
    }

    // =========================================================================
    // Reviews
    // =========================================================================

    fn review_mut(&mut self, id: &str) -> CoreResult<&mut Review> {
        self.reviews
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CoreError::ReviewNotFound(id.to_string()))
    }

    /// Collects a review; it stays hidden until a moderator approves it.
    pub fn add_review(&mut self, new: NewReview) -> CoreResult<Review> {
        validate_customer_name(&new.customer_name)?;
        validate_rating(new.rating)?;
        validate_required("comment", &new.comment)?;
        if let Some(email) = &new.email {
            validate_email(email)?;
        }

        let now = Utc::now();
        let review = Review {
            id: generate_id(),
            customer_name: new.customer_name.trim().to_string(),
            email: new.email.map(|e| e.trim().to_string()),
            rating: new.rating,
            comment: new.comment.trim().to_string(),
            source: new.source,
            status: ReviewStatus::Pending,
            response: None,
            responded_at: None,
            created_at: now,
            updated_at: now,
        };
        self.reviews.push(review.clone());

        self.add_notification(
            NotificationType::Review,
            "New review",
            format!(
                "{} left a {}-star review",
                review.customer_name, review.rating
            ),
        );
        self.emit(StoreEvent::ReviewSubmitted {
            review_id: review.id.clone(),
            customer_name: review.customer_name.clone(),
            rating: review.rating,
        });
        Ok(review)
    }

    pub fn update_review_status(&mut self, id: &str, status: ReviewStatus) -> CoreResult<Review> {
        let review = self.review_mut(id)?;
        review.status = status;
        review.updated_at = Utc::now();
        Ok(review.clone())
    }

    /// Posts (or replaces) the restaurant's public reply.
    pub fn respond_to_review(&mut self, id: &str, response: &str) -> CoreResult<Review> {
        let response = validate_required("response", response)?.to_string();

        let review = self.review_mut(id)?;
        let now = Utc::now();
        review.response = Some(response);
        review.responded_at = Some(now);
        review.updated_at = now;
        Ok(review.clone())
    }

    pub fn delete_review(&mut self, id: &str) -> CoreResult<Review> {
        let pos = self
            .reviews
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| CoreError::ReviewNotFound(id.to_string()))?;
        Ok(self.reviews.remove(pos))
    }

    /// Mean rating over approved reviews; 0.0 when there are none.
    pub fn average_rating(&self) -> f64 {
        analytics::average_rating(&self.reviews)
    }

    // =========================================================================
    // Social Posts
    // =========================================================================

    fn social_post_mut(&mut self, id: &str) -> CoreResult<&mut SocialPost> {
        self.social_posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::SocialPostNotFound(id.to_string()))
    }

    /// Drafts a post; giving it a time makes it scheduled.
    pub fn add_social_post(&mut self, new: NewSocialPost) -> CoreResult<SocialPost> {
        validate_post_content(new.platform, &new.content)?;

        let now = Utc::now();
        let post = SocialPost {
            id: generate_id(),
            platform: new.platform,
            content: new.content.trim().to_string(),
            image: new.image,
            status: if new.scheduled_for.is_some() {
                PostStatus::Scheduled
            } else {
                PostStatus::Draft
            },
            scheduled_for: new.scheduled_for,
            published_at: None,
            likes: 0,
            comments: 0,
            shares: 0,
            created_at: now,
            updated_at: now,
        };
        self.social_posts.push(post.clone());
        Ok(post)
    }

    pub fn update_social_post(
        &mut self,
        id: &str,
        update: SocialPostUpdate,
    ) -> CoreResult<SocialPost> {
        let post = self.social_post_mut(id)?;
        if let Some(content) = &update.content {
            validate_post_content(post.platform, content)?;
        }

        if let Some(content) = update.content {
            post.content = content.trim().to_string();
        }
        if let Some(image) = update.image {
            post.image = Some(image);
        }
        if let Some(at) = update.scheduled_for {
            post.scheduled_for = Some(at);
            if post.status == PostStatus::Draft {
                post.status = PostStatus::Scheduled;
            }
        }
        if let Some(likes) = update.likes {
            post.likes = likes;
        }
        if let Some(comments) = update.comments {
            post.comments = comments;
        }
        if let Some(shares) = update.shares {
            post.shares = shares;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    pub fn publish_social_post(&mut self, id: &str) -> CoreResult<SocialPost> {
        let post = self.social_post_mut(id)?;
        if post.status == PostStatus::Published {
            return Err(CoreError::InvalidStatusTransition {
                entity: "Social post",
                id: id.to_string(),
                current: "published".to_string(),
                requested: "published".to_string(),
            });
        }
        let now = Utc::now();
        post.status = PostStatus::Published;
        post.published_at = Some(now);
        post.updated_at = now;
        Ok(post.clone())
    }

    pub fn delete_social_post(&mut self, id: &str) -> CoreResult<SocialPost> {
        let pos = self
            .social_posts
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CoreError::SocialPostNotFound(id.to_string()))?;
        Ok(self.social_posts.remove(pos))
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Pushes a notification to the front of the list, dropping the oldest
    /// once [`MAX_NOTIFICATIONS`] is reached.
    pub fn add_notification(
        &mut self,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Notification {
        let notification = Notification {
            id: generate_id(),
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            created_at: Utc::now(),
        };
        self.notifications.insert(0, notification.clone());
        self.notifications.truncate(MAX_NOTIFICATIONS);
        notification
    }

    pub fn mark_notification_read(&mut self, id: &str) -> CoreResult<()> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CoreError::NotificationNotFound(id.to_string()))?;
        notification.read = true;
        Ok(())
    }

    /// Returns how many notifications changed.
    pub fn mark_all_notifications_read(&mut self) -> usize {
        let mut changed = 0;
        for notification in self.notifications.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            changed += 1;
        }
        changed
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Signs an admin in and stamps `last_login`. Signing in again with the
    /// same email keeps the profile id.
    pub fn login_admin(
        &mut self,
        name: &str,
        email: &str,
        role: AdminRole,
    ) -> CoreResult<AdminUser> {
        validate_customer_name(name)?;
        validate_email(email)?;

        let email = email.trim().to_string();
        let id = match &self.admin_user {
            Some(current) if current.email.eq_ignore_ascii_case(&email) => current.id.clone(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        let avatar = self.admin_user.as_ref().and_then(|a| a.avatar.clone());

        let admin = AdminUser {
            id,
            name: name.trim().to_string(),
            email,
            role,
            avatar,
            last_login: Some(Utc::now()),
        };
        self.admin_user = Some(admin.clone());
        Ok(admin)
    }

    pub fn logout_admin(&mut self) -> Option<AdminUser> {
        self.admin_user.take()
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Recomputes the dashboard aggregate from the collections.
    pub fn refresh_analytics(&mut self) -> Analytics {
        self.analytics = analytics::compute(self, Utc::now());
        self.analytics.clone()
    }

    // =========================================================================
    // Live Feed
    // =========================================================================

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    /// Sets the free table count, clamped to the floor size. Returns the
    /// stored value.
    pub fn set_available_tables(&mut self, available: u32) -> u32 {
        self.tables.available = available.min(self.tables.total);
        self.tables.updated_at = Some(Utc::now());
        self.tables.available
    }

    /// Resizes the floor; free tables are clamped to the new size.
    pub fn set_total_tables(&mut self, total: u32) {
        self.tables.total = total;
        self.tables.available = self.tables.available.min(total);
    }

    // =========================================================================
    // Loading & Errors
    // =========================================================================

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }
}

fn credit_points(member: &mut Member, points: u32, at: DateTime<Utc>) {
    member.points = member.points.saturating_add(points);
    member.tier = MembershipTier::for_points(member.points);
    member.updated_at = at;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveTime, TimeZone};

    fn tomorrow() -> NaiveDate {
        (Utc::now() + Duration::days(1)).date_naive()
    }

    fn store_with_menu() -> (RestaurantState, String, String) {
        let mut store = RestaurantState::with_tax_rate(TaxRate::from_bps(1000));
        let risotto = store
            .add_menu_item(NewMenuItem {
                name: "Mushroom Risotto".into(),
                description: "Arborio, porcini, parmesan".into(),
                price: Money::from_cents(1800),
                category: MenuCategory::Main,
                image: None,
                featured: true,
                dietary: vec![DietaryTag::Vegetarian],
                preparation_minutes: 20,
            })
            .unwrap();
        let tiramisu = store
            .add_menu_item(NewMenuItem {
                name: "Tiramisu".into(),
                description: "Mascarpone, espresso".into(),
                price: Money::from_cents(750),
                category: MenuCategory::Dessert,
                image: None,
                featured: false,
                dietary: vec![],
                preparation_minutes: 5,
            })
            .unwrap();
        (store, risotto.id, tiramisu.id)
    }

    fn booking(name: &str) -> NewReservation {
        NewReservation {
            customer_name: name.into(),
            email: "guest@example.com".into(),
            phone: "+1 555 010 4477".into(),
            date: tomorrow(),
            time: NaiveTime::from_hms_opt(19, 30, 0).unwrap(),
            party_size: 4,
            table_preference: Some("window".into()),
            occasion: None,
            special_requests: None,
            member_id: None,
        }
    }

    fn details(name: &str) -> OrderDetails {
        OrderDetails {
            customer_name: name.into(),
            email: "guest@example.com".into(),
            phone: "+1 555 010 4477".into(),
            order_type: OrderType::Takeout,
            table_number: None,
            delivery_address: None,
            notes: None,
            member_id: None,
        }
    }

    fn new_member(email: &str) -> NewMember {
        NewMember {
            name: "Grace Hopper".into(),
            email: email.into(),
            phone: "+1 555 010 9999".into(),
            birthday: None,
            preferences: vec![],
        }
    }

    // -------------------------------------------------------------------------
    // Reservations
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_reservation_appends_one_reservation_notification() {
        let mut store = RestaurantState::default();
        let before = store.reservations.len();
        let notes_before = store.notifications.len();

        let r = store.add_reservation(booking("Ada Lovelace")).unwrap();

        assert_eq!(store.reservations.len(), before + 1);
        assert_eq!(store.notifications.len(), notes_before + 1);
        let reservation_notes = store
            .notifications
            .iter()
            .filter(|n| n.kind == NotificationType::Reservation)
            .count();
        assert_eq!(reservation_notes, 1);
        assert_eq!(r.status, ReservationStatus::Pending);

        let events = store.take_events();
        assert!(matches!(
            events.as_slice(),
            [StoreEvent::ReservationCreated { party_size: 4, .. }]
        ));
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_invalid_reservation_changes_nothing() {
        let mut store = RestaurantState::default();
        let mut bad = booking("Ada Lovelace");
        bad.party_size = 0;

        assert!(store.add_reservation(bad).is_err());
        assert!(store.reservations.is_empty());
        assert!(store.notifications.is_empty());
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_reservation_terminal_status_is_final() {
        let mut store = RestaurantState::default();
        let r = store.add_reservation(booking("Ada Lovelace")).unwrap();

        store
            .update_reservation_status(&r.id, ReservationStatus::Cancelled)
            .unwrap();
        let err = store
            .update_reservation_status(&r.id, ReservationStatus::Confirmed)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_seating_member_reservation_counts_visit() {
        let mut store = RestaurantState::default();
        let member = store.add_member(new_member("grace@example.com")).unwrap();
        let mut new = booking("Grace Hopper");
        new.member_id = Some(member.id.clone());
        let r = store.add_reservation(new).unwrap();

        store
            .update_reservation_status(&r.id, ReservationStatus::Seated)
            .unwrap();
        assert_eq!(store.member(&member.id).unwrap().visit_count, 1);
    }

    #[test]
    fn test_reservations_on_sorted_by_time() {
        let mut store = RestaurantState::default();
        let mut late = booking("Late Guest");
        late.time = NaiveTime::from_hms_opt(21, 0, 0).unwrap();
        let mut early = booking("Early Guest");
        early.time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        store.add_reservation(late).unwrap();
        store.add_reservation(early).unwrap();

        let day = store.reservations_on(tomorrow());
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].customer_name, "Early Guest");
    }

    #[test]
    fn test_reservation_slot_uses_local_clock() {
        // 04:00 UTC is 14:00 in a UTC+10 restaurant.
        let mut store = RestaurantState::default();
        store.utc_offset_minutes = 600;
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 4, 0, 0).unwrap();
        let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();

        let mut lunch = booking("Ada Lovelace");
        lunch.date = day;
        lunch.time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(matches!(
            store.add_reservation_at(lunch.clone(), now),
            Err(CoreError::Validation(ValidationError::Unavailable { .. }))
        ));

        lunch.time = NaiveTime::from_hms_opt(15, 0, 0).unwrap();
        assert!(store.add_reservation_at(lunch.clone(), now).is_ok());

        // The same 12:00 slot is still ahead for a UTC restaurant.
        let mut utc_store = RestaurantState::default();
        lunch.time = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(utc_store.add_reservation_at(lunch, now).is_ok());
    }

    #[test]
    fn test_local_offset() {
        let mut store = RestaurantState::default();
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 20, 30, 0).unwrap();
        assert_eq!(store.local_time(now), now.naive_utc());

        store.utc_offset_minutes = 660;
        assert_eq!(
            store.local_time(now),
            NaiveDate::from_ymd_opt(2026, 10, 18)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap()
        );

        store.utc_offset_minutes = 24 * 60;
        assert_eq!(store.local_offset(), Utc.fix());
    }

    // -------------------------------------------------------------------------
    // Cart & Orders
    // -------------------------------------------------------------------------

    #[test]
    fn test_add_to_cart_merges_lines() {
        let (mut store, risotto, _) = store_with_menu();
        store.add_to_cart(&risotto, 2, None).unwrap();
        let line = store
            .add_to_cart(&risotto, 1, Some("no parmesan".into()))
            .unwrap();

        assert_eq!(store.cart.len(), 1);
        assert_eq!(line.quantity, 3);
        assert_eq!(line.special_instructions.as_deref(), Some("no parmesan"));
    }

    #[test]
    fn test_add_to_cart_rejects_unavailable_and_unknown() {
        let (mut store, risotto, _) = store_with_menu();
        store.toggle_menu_item_availability(&risotto).unwrap();

        assert!(matches!(
            store.add_to_cart(&risotto, 1, None),
            Err(CoreError::MenuItemUnavailable { .. })
        ));
        assert!(matches!(
            store.add_to_cart("missing", 1, None),
            Err(CoreError::MenuItemNotFound(_))
        ));
        assert!(store.cart.is_empty());
    }

    #[test]
    fn test_price_cap_and_totals_never_overflow() {
        let (mut store, risotto, _) = store_with_menu();
        let mut pricey = NewMenuItem {
            name: "Gold Leaf Tasting".into(),
            description: String::new(),
            price: Money::from_cents(i64::MAX / 10),
            category: MenuCategory::Special,
            image: None,
            featured: false,
            dietary: vec![],
            preparation_minutes: 60,
        };
        assert!(matches!(
            store.add_menu_item(pricey.clone()),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(store
            .update_menu_item(
                &risotto,
                MenuItemUpdate {
                    price: Some(Money::from_cents(crate::MAX_PRICE_CENTS + 1)),
                    ..Default::default()
                }
            )
            .is_err());

        pricey.price = Money::from_cents(crate::MAX_PRICE_CENTS);
        let capped = store.add_menu_item(pricey).unwrap();
        store.add_to_cart(&capped.id, 99, None).unwrap();
        let totals = store.cart_totals(TaxRate::from_bps(1000));
        assert_eq!(totals.subtotal.cents(), crate::MAX_PRICE_CENTS * 99);
        assert_eq!(totals.total.cents(), crate::MAX_PRICE_CENTS * 99 * 11 / 10);

        // A corrupt snapshot can still carry an oversized price.
        store.cart[0].unit_price = Money::from_cents(i64::MAX / 10);
        let totals = store.cart_totals(TaxRate::from_bps(1000));
        assert_eq!(totals.total.cents(), i64::MAX);
        let order = store.place_order_from_cart(details("Big Spender")).unwrap();
        assert_eq!(order.total.cents(), i64::MAX);
        assert_eq!(store.refresh_analytics().total_revenue.cents(), i64::MAX);
    }

    #[test]
    fn test_update_menu_item_trims_text() {
        let (mut store, risotto, _) = store_with_menu();
        let item = store
            .update_menu_item(
                &risotto,
                MenuItemUpdate {
                    name: Some("  Wild Mushroom Risotto ".into()),
                    description: Some("  Carnaroli, porcini  ".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(item.name, "Wild Mushroom Risotto");
        assert_eq!(item.description, "Carnaroli, porcini");
    }

    #[test]
    fn test_cart_quantity_cap() {
        let (mut store, risotto, _) = store_with_menu();
        store.add_to_cart(&risotto, 98, None).unwrap();
        assert!(store.add_to_cart(&risotto, 2, None).is_err());
        assert_eq!(store.cart[0].quantity, 98);
    }

    #[test]
    fn test_update_cart_quantity_zero_removes() {
        let (mut store, risotto, tiramisu) = store_with_menu();
        store.add_to_cart(&risotto, 1, None).unwrap();
        store.add_to_cart(&tiramisu, 1, None).unwrap();

        assert_eq!(
            store.update_cart_quantity(&risotto, 4).unwrap().unwrap().quantity,
            4
        );
        assert!(store.update_cart_quantity(&tiramisu, 0).unwrap().is_none());
        assert_eq!(store.cart.len(), 1);
    }

    #[test]
    fn test_clear_cart_empties_cart() {
        let (mut store, risotto, tiramisu) = store_with_menu();
        store.add_to_cart(&risotto, 1, None).unwrap();
        store.add_to_cart(&tiramisu, 2, None).unwrap();

        store.clear_cart();
        assert!(store.cart.is_empty());
    }

    #[test]
    fn test_cart_totals() {
        let (mut store, risotto, tiramisu) = store_with_menu();
        store.add_to_cart(&risotto, 2, None).unwrap(); // 36.00
        store.add_to_cart(&tiramisu, 1, None).unwrap(); // 7.50

        let totals = store.cart_totals(TaxRate::from_bps(1000));
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal.cents(), 4350);
        assert_eq!(totals.tax.cents(), 435);
        assert_eq!(totals.total.cents(), 4785);
    }

    #[test]
    fn test_place_order_from_cart() {
        let (mut store, risotto, _) = store_with_menu();
        store.add_to_cart(&risotto, 2, None).unwrap();

        let order = store.place_order_from_cart(details("Alan Turing")).unwrap();

        assert!(store.cart.is_empty());
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal.cents(), 3600);
        assert_eq!(order.tax.cents(), 360);
        assert_eq!(order.total.cents(), 3960);
        assert_eq!(store.notifications[0].kind, NotificationType::Order);
        assert!(matches!(
            store.take_events().as_slice(),
            [StoreEvent::OrderCreated { item_count: 2, .. }]
        ));
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let (mut store, _, _) = store_with_menu();
        assert!(matches!(
            store.place_order_from_cart(details("Alan Turing")),
            Err(CoreError::EmptyCart)
        ));
        assert!(store.orders.is_empty());
    }

    #[test]
    fn test_failed_checkout_keeps_cart() {
        let (mut store, risotto, _) = store_with_menu();
        store.add_to_cart(&risotto, 1, None).unwrap();
        let mut delivery = details("Alan Turing");
        delivery.order_type = OrderType::Delivery;

        assert!(store.place_order_from_cart(delivery).is_err());
        assert_eq!(store.cart.len(), 1);
    }

    #[test]
    fn test_add_order_snapshots_menu() {
        let (mut store, risotto, _) = store_with_menu();
        let order = store
            .add_order(NewOrder {
                details: details("Alan Turing"),
                items: vec![NewOrderItem {
                    menu_item_id: risotto.clone(),
                    quantity: 1,
                    special_instructions: None,
                }],
            })
            .unwrap();

        // Deleting the dish leaves order history untouched.
        store.delete_menu_item(&risotto).unwrap();
        let stored = store.order(&order.id).unwrap();
        assert_eq!(stored.items[0].name, "Mushroom Risotto");
        assert_eq!(stored.items[0].unit_price.cents(), 1800);
    }

    #[test]
    fn test_add_order_without_items_fails() {
        let (mut store, _, _) = store_with_menu();
        let err = store
            .add_order(NewOrder {
                details: details("Alan Turing"),
                items: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::EmptyOrder));
    }

    #[test]
    fn test_update_order_status_refreshes_updated_at() {
        let (mut store, risotto, _) = store_with_menu();
        store.add_to_cart(&risotto, 1, None).unwrap();
        let order = store.place_order_from_cart(details("Alan Turing")).unwrap();
        let past = Utc::now() - Duration::minutes(5);
        store.orders[0].updated_at = past;

        let updated = store
            .update_order_status(&order.id, OrderStatus::Preparing)
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Preparing);
        assert!(updated.updated_at > past);
        assert_eq!(store.orders[0].status, OrderStatus::Preparing);
    }

    #[test]
    fn test_completed_order_is_final() {
        let (mut store, risotto, _) = store_with_menu();
        store.add_to_cart(&risotto, 1, None).unwrap();
        let order = store.place_order_from_cart(details("Alan Turing")).unwrap();
        store
            .update_order_status(&order.id, OrderStatus::Completed)
            .unwrap();

        assert!(store
            .update_order_status(&order.id, OrderStatus::Preparing)
            .is_err());
    }

    #[test]
    fn test_completing_member_order_credits_points() {
        let (mut store, risotto, _) = store_with_menu();
        let member = store.add_member(new_member("turing@example.com")).unwrap();
        store.add_to_cart(&risotto, 10, None).unwrap(); // 180.00 + 18.00 tax
        let mut d = details("Alan Turing");
        d.member_id = Some(member.id.clone());
        let order = store.place_order_from_cart(d).unwrap();

        store
            .update_order_status(&order.id, OrderStatus::Completed)
            .unwrap();
        // Completing again is a no-op, not a second credit.
        store
            .update_order_status(&order.id, OrderStatus::Completed)
            .unwrap();

        let member = store.member(&member.id).unwrap();
        assert_eq!(member.points, 198);
        assert_eq!(member.total_spent.cents(), 19800);
        assert_eq!(member.tier, MembershipTier::Bronze);
    }

    // -------------------------------------------------------------------------
    // Members
    // -------------------------------------------------------------------------

    #[test]
    fn test_duplicate_member_email_rejected() {
        let mut store = RestaurantState::default();
        store.add_member(new_member("grace@example.com")).unwrap();
        let err = store
            .add_member(new_member("GRACE@example.com"))
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(store.members.len(), 1);
    }

    #[test]
    fn test_member_points_promote_tier() {
        let mut store = RestaurantState::default();
        let m = store.add_member(new_member("grace@example.com")).unwrap();

        assert_eq!(
            store.add_member_points(&m.id, 600).unwrap().tier,
            MembershipTier::Silver
        );
        assert_eq!(
            store.add_member_points(&m.id, 5000).unwrap().tier,
            MembershipTier::Platinum
        );
    }

    // -------------------------------------------------------------------------
    // Events, Reviews, Social
    // -------------------------------------------------------------------------

    #[test]
    fn test_event_capacity_enforced() {
        let mut store = RestaurantState::default();
        let event = store
            .add_event(NewEvent {
                title: "Wine Tasting".into(),
                description: "Six Piedmont reds".into(),
                date: tomorrow(),
                start_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
                end_time: None,
                capacity: 10,
                price: Money::from_cents(4500),
                image: None,
            })
            .unwrap();

        store.register_for_event(&event.id, 8).unwrap();
        let err = store.register_for_event(&event.id, 3).unwrap_err();
        assert!(matches!(err, CoreError::EventFull { remaining: 2, .. }));
        assert_eq!(store.event(&event.id).unwrap().registered, 8);
        assert!(store
            .update_event(
                &event.id,
                EventUpdate {
                    capacity: Some(5),
                    ..Default::default()
                }
            )
            .is_err());
    }

    #[test]
    fn test_average_rating_counts_approved_only() {
        let mut store = RestaurantState::default();
        let review = |rating| NewReview {
            customer_name: "Guest Critic".into(),
            email: None,
            rating,
            comment: "Lovely evening".into(),
            source: ReviewSource::Website,
        };
        let a = store.add_review(review(5)).unwrap();
        let b = store.add_review(review(3)).unwrap();
        store.add_review(review(1)).unwrap();

        assert_eq!(store.average_rating(), 0.0);
        store.update_review_status(&a.id, ReviewStatus::Approved).unwrap();
        store.update_review_status(&b.id, ReviewStatus::Approved).unwrap();
        assert_eq!(store.average_rating(), 4.0);
    }

    #[test]
    fn test_social_post_lifecycle() {
        let mut store = RestaurantState::default();
        let post = store
            .add_social_post(NewSocialPost {
                platform: SocialPlatform::Twitter,
                content: "Truffle season starts tonight".into(),
                image: None,
                scheduled_for: None,
            })
            .unwrap();
        assert_eq!(post.status, PostStatus::Draft);

        let published = store.publish_social_post(&post.id).unwrap();
        assert_eq!(published.status, PostStatus::Published);
        assert!(published.published_at.is_some());
        assert!(store.publish_social_post(&post.id).is_err());
    }

    // -------------------------------------------------------------------------
    // Notifications, Admin, Live
    // -------------------------------------------------------------------------

    #[test]
    fn test_notifications_are_bounded_newest_first() {
        let mut store = RestaurantState::default();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            store.add_notification(NotificationType::System, "Tick", format!("#{}", i));
        }
        assert_eq!(store.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(
            store.notifications[0].message,
            format!("#{}", MAX_NOTIFICATIONS + 4)
        );
    }

    #[test]
    fn test_mark_notifications_read() {
        let mut store = RestaurantState::default();
        let first = store.add_notification(NotificationType::System, "A", "a");
        store.add_notification(NotificationType::System, "B", "b");

        store.mark_notification_read(&first.id).unwrap();
        assert_eq!(store.unread_notification_count(), 1);
        assert_eq!(store.mark_all_notifications_read(), 1);
        assert_eq!(store.unread_notification_count(), 0);
        assert!(store.mark_notification_read("missing").is_err());
    }

    #[test]
    fn test_admin_login_keeps_id_for_same_email() {
        let mut store = RestaurantState::default();
        let first = store
            .login_admin("Chef Owner", "owner@bistro.example", AdminRole::Owner)
            .unwrap();
        let again = store
            .login_admin("Chef Owner", "owner@bistro.example", AdminRole::Owner)
            .unwrap();
        assert_eq!(first.id, again.id);
        assert!(again.last_login.is_some());

        assert!(store.logout_admin().is_some());
        assert!(store.admin_user.is_none());
    }

    #[test]
    fn test_available_tables_clamped() {
        let mut store = RestaurantState::default();
        store.set_total_tables(12);
        assert_eq!(store.set_available_tables(40), 12);
        assert_eq!(store.set_available_tables(3), 3);
    }

    #[test]
    fn test_transient_fields_not_serialized() {
        let mut store = RestaurantState::default();
        store.set_error("disk full");
        store.set_loading(true);
        store.set_available_tables(3);
        store.add_reservation(booking("Ada Lovelace")).unwrap();

        let json = serde_json::to_value(&store).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("weather").is_none());
        assert!(json.get("tables").is_none());
        assert!(json.get("isLoading").is_none());
        assert_eq!(json["reservations"].as_array().unwrap().len(), 1);

        let restored: RestaurantState = serde_json::from_value(json).unwrap();
        assert_eq!(restored.reservations.len(), 1);
        assert!(restored.error.is_none());
        assert_eq!(restored.tables.available, restored.tables.total);
    }
}
