//! Dashboard aggregates.
//!
//! The CMS dashboard shows one [`Analytics`] record. It is recomputed from
//! the collections whenever the dashboard asks, never updated
//! incrementally, so it cannot drift from the data.
//!
//! ```text
//!   orders ───────┬──► revenue, order count, average order value
//!                 ├──► popular items (top 5 by quantity)
//!                 └──► orders by status
//!   reservations ─┴──► total, upcoming
//!   members ──────────► total, active
//!   reviews ──────────► average rating (approved only)
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use crate::money::Money;
use crate::state::RestaurantState;
use crate::types::{Analytics, OrderStatus, PopularItem, Review, ReviewStatus};

/// How many dishes the "popular items" widget lists.
pub const POPULAR_ITEMS_LIMIT: usize = 5;

/// Builds the dashboard aggregate as of `now`. "Upcoming" is judged by
/// the restaurant's local date.
///
/// Cancelled orders count toward `orders_by_status` and `total_orders`
/// but not toward revenue or popular items.
pub fn compute(state: &RestaurantState, now: DateTime<Utc>) -> Analytics {
    let billable: Vec<_> = state
        .orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .collect();

    let total_revenue: Money = billable.iter().map(|o| o.total).sum();
    let average_order_value = total_revenue.average_over(billable.len());

    let mut orders_by_status: BTreeMap<String, u32> = BTreeMap::new();
    for order in &state.orders {
        *orders_by_status
            .entry(order.status.as_str().to_string())
            .or_default() += 1;
    }

    let today = state.local_time(now).date();
    let upcoming_reservations = state
        .reservations
        .iter()
        .filter(|r| r.status.is_upcoming() && r.date >= today)
        .count();

    let approved = state
        .reviews
        .iter()
        .filter(|r| r.status == ReviewStatus::Approved)
        .count();

    Analytics {
        total_revenue,
        total_orders: count(state.orders.len()),
        average_order_value,
        total_reservations: count(state.reservations.len()),
        upcoming_reservations: count(upcoming_reservations),
        total_members: count(state.members.len()),
        active_members: count(state.members.iter().filter(|m| m.is_active).count()),
        average_rating: average_rating(&state.reviews),
        review_count: count(approved),
        popular_items: popular_items(state, POPULAR_ITEMS_LIMIT),
        orders_by_status,
        generated_at: Some(now),
    }
}

/// Mean star rating of approved reviews, rounded to one decimal.
pub fn average_rating(reviews: &[Review]) -> f64 {
    let (sum, n) = reviews
        .iter()
        .filter(|r| r.status == ReviewStatus::Approved)
        .fold((0u32, 0u32), |(sum, n), r| (sum + u32::from(r.rating), n + 1));
    if n == 0 {
        return 0.0;
    }
    (f64::from(sum) / f64::from(n) * 10.0).round() / 10.0
}

/// Dishes ranked by quantity ordered across non-cancelled orders.
///
/// Ties are broken by revenue, then by name, so the ranking is stable.
pub fn popular_items(state: &RestaurantState, limit: usize) -> Vec<PopularItem> {
    let mut tally: HashMap<&str, PopularItem> = HashMap::new();

    for line in state
        .orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .flat_map(|o| o.items.iter())
    {
        let entry = tally
            .entry(line.menu_item_id.as_str())
            .or_insert_with(|| PopularItem {
                menu_item_id: line.menu_item_id.clone(),
                name: line.name.clone(),
                quantity: 0,
                revenue: Money::zero(),
            });
        entry.quantity = entry.quantity.saturating_add(line.quantity);
        entry.revenue += line.line_total();
    }

    let mut ranked: Vec<PopularItem> = tally.into_values().collect();
    ranked.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then(b.revenue.cmp(&a.revenue))
            .then(a.name.cmp(&b.name))
    });
    ranked.truncate(limit);
    ranked
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
