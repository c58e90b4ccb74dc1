//! # Ordering Commands
//!
//! Menu browsing, the online-ordering cart and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │ (pending)│       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart        checkout                          │
//! │                   update_cart_item   (cart emptied on success)         │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is part of the persisted store, so it survives a reload.

use bistro_core::{
    CartItem, CartTotals, MenuCategory, MenuItem, NewOrder, Order, OrderDetails,
    RestaurantState,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    /// Total in the restaurant's currency, ready to render.
    pub display_total: String,
}

impl CartResponse {
    fn build(state: &RestaurantState, config: &ConfigState) -> Self {
        let totals = state.cart_totals(state.tax_rate);
        CartResponse {
            items: state.cart.clone(),
            display_total: config.format_currency(totals.total),
            totals,
        }
    }
}

// =============================================================================
// Menu
// =============================================================================

/// Orderable dishes, optionally for one category.
pub fn get_menu(store: &StoreState, category: Option<MenuCategory>) -> Vec<MenuItem> {
    debug!(?category, "get_menu command");
    store.with_store(|s| {
        s.menu_items
            .iter()
            .filter(|m| m.available && category.map_or(true, |c| m.category == c))
            .cloned()
            .collect()
    })
}

pub fn get_featured_menu(store: &StoreState) -> Vec<MenuItem> {
    store.with_store(|s| s.featured_menu_items().into_iter().cloned().collect())
}

// =============================================================================
// Cart
// =============================================================================

/// Gets the current cart contents.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  YOUR ORDER                                        3 items     │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Wild Mushroom Risotto    x2              $48.00              │
/// │  Tiramisu                 x1              $11.00              │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                 $59.00              │
/// │  Tax (8%)                                  $4.72              │
/// │  TOTAL                                    $63.72              │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    store.with_store(|s| CartResponse::build(s, config))
}

/// Adds a dish to the cart.
///
/// ## Behavior
/// - If the dish is already in the cart: quantity increases
/// - If not: added as a new line with its current name and price
/// - Unavailable dishes are refused
///
/// ## Arguments
/// * `menu_item_id` - Dish to add
/// * `quantity` - Quantity to add (default: 1)
/// * `special_instructions` - Replaces the line's instructions when given
pub fn add_to_cart(
    store: &StoreState,
    config: &ConfigState,
    menu_item_id: &str,
    quantity: Option<u32>,
    special_instructions: Option<String>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(menu_item_id = %menu_item_id, quantity, "add_to_cart command");

    Ok(store.dispatch(|s| {
        s.add_to_cart(menu_item_id, quantity, special_instructions)?;
        Ok::<_, bistro_core::CoreError>(CartResponse::build(s, config))
    })?)
}

/// Sets a line's quantity. Quantity 0 removes the line.
pub fn update_cart_item(
    store: &StoreState,
    config: &ConfigState,
    menu_item_id: &str,
    quantity: u32,
) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, quantity, "update_cart_item command");

    Ok(store.dispatch(|s| {
        s.update_cart_quantity(menu_item_id, quantity)?;
        Ok::<_, bistro_core::CoreError>(CartResponse::build(s, config))
    })?)
}

pub fn remove_from_cart(
    store: &StoreState,
    config: &ConfigState,
    menu_item_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(menu_item_id = %menu_item_id, "remove_from_cart command");

    Ok(store.dispatch(|s| {
        s.remove_from_cart(menu_item_id)?;
        Ok::<_, bistro_core::CoreError>(CartResponse::build(s, config))
    })?)
}

pub fn clear_cart(store: &StoreState, config: &ConfigState) -> CartResponse {
    debug!("clear_cart command");
    store.update(|s| {
        s.clear_cart();
        CartResponse::build(s, config)
    })
}

// =============================================================================
// Orders
// =============================================================================

/// Turns the cart into an order.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  checkout(details)                                                     │
/// │     │                                                                   │
/// │     ├─ cart empty ─────────────────────────────► CART_ERROR            │
/// │     ├─ name / email / phone / address invalid ─► VALIDATION_ERROR      │
/// │     │                                                                   │
/// │     ▼                                                                   │
/// │  order (pending) + "New order" notification, cart emptied              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn checkout(store: &StoreState, details: OrderDetails) -> Result<Order, ApiError> {
    debug!(order_type = ?details.order_type, "checkout command");

    let order = store.dispatch(|s| s.place_order_from_cart(details))?;
    info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok(order)
}

/// Places an order with explicit lines, bypassing the cart.
pub fn place_order(store: &StoreState, order: NewOrder) -> Result<Order, ApiError> {
    debug!(lines = order.items.len(), "place_order command");

    let order = store.dispatch(|s| s.add_order(order))?;
    info!(order_id = %order.id, total = %order.total, "Order placed");
    Ok(order)
}

/// Order tracking page.
pub fn get_order(store: &StoreState, id: &str) -> Result<Order, ApiError> {
    store
        .with_store(|s| s.order(id).cloned())
        .ok_or_else(|| ApiError::not_found("Order", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{config, demo_store, takeout};
    use crate::error::ErrorCode;
    use bistro_core::{Money, NewOrderItem, OrderStatus, OrderType};

    #[test]
    fn test_menu_hides_unavailable_dishes() {
        let store = demo_store();
        let all = get_menu(&store, None).len();

        store
            .dispatch(|s| s.toggle_menu_item_availability("menu-salmon"))
            .unwrap();

        let menu = get_menu(&store, None);
        assert_eq!(menu.len(), all - 1);
        assert!(menu.iter().all(|m| m.id != "menu-salmon"));

        let desserts = get_menu(&store, Some(MenuCategory::Dessert));
        assert!(!desserts.is_empty());
        assert!(desserts.iter().all(|m| m.category == MenuCategory::Dessert));
    }

    #[test]
    fn test_add_to_cart_merges_lines() {
        let store = demo_store();
        let config = config();

        add_to_cart(&store, &config, "menu-risotto", None, None).unwrap();
        let cart = add_to_cart(&store, &config, "menu-risotto", Some(1), Some("no truffle".into()))
            .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.totals.subtotal, Money::from_cents(4800));
        assert_eq!(cart.totals.tax, Money::from_cents(384));
        assert_eq!(cart.totals.total, Money::from_cents(5184));
        assert_eq!(cart.display_total, "$51.84");
    }

    #[test]
    fn test_cart_errors() {
        let store = demo_store();
        let config = config();

        let err = add_to_cart(&store, &config, "menu-nothing", None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = add_to_cart(&store, &config, "menu-risotto", Some(0), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = remove_from_cart(&store, &config, "menu-risotto").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        store
            .dispatch(|s| s.toggle_menu_item_availability("menu-steak"))
            .unwrap();
        let err = add_to_cart(&store, &config, "menu-steak", None, None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let store = demo_store();
        let config = config();
        add_to_cart(&store, &config, "menu-tiramisu", Some(3), None).unwrap();
        add_to_cart(&store, &config, "menu-negroni", Some(1), None).unwrap();

        let cart = update_cart_item(&store, &config, "menu-tiramisu", 0).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.totals.item_count, 1);

        let cart = clear_cart(&store, &config);
        assert!(cart.items.is_empty());
        assert_eq!(cart.display_total, "$0.00");
    }

    #[test]
    fn test_checkout_empties_cart() {
        let store = demo_store();
        let config = config();
        add_to_cart(&store, &config, "menu-risotto", Some(2), None).unwrap();
        add_to_cart(&store, &config, "menu-tiramisu", Some(1), None).unwrap();

        let order = checkout(&store, takeout("Grace Hopper")).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.subtotal, Money::from_cents(5900));
        assert_eq!(order.tax, Money::from_cents(472));
        assert_eq!(order.total, Money::from_cents(6372));
        assert!(get_cart(&store, &config).items.is_empty());
        assert_eq!(get_order(&store, &order.id).unwrap(), order);
    }

    #[test]
    fn test_checkout_with_empty_cart_is_cart_error() {
        let store = demo_store();
        let err = checkout(&store, takeout("Grace Hopper")).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert!(store.with_store(|s| s.orders.is_empty()));
    }

    #[test]
    fn test_failed_checkout_keeps_cart() {
        let store = demo_store();
        let config = config();
        add_to_cart(&store, &config, "menu-burrata", None, None).unwrap();

        let mut details = takeout("Grace Hopper");
        details.order_type = OrderType::Delivery;
        let err = checkout(&store, details).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&store, &config).items.len(), 1);
    }

    #[test]
    fn test_place_order_with_lines() {
        let store = demo_store();
        let order = place_order(
            &store,
            NewOrder {
                details: takeout("Alan Turing"),
                items: vec![NewOrderItem {
                    menu_item_id: "menu-lemonade".into(),
                    quantity: 2,
                    special_instructions: None,
                }],
            },
        )
        .unwrap();
        assert_eq!(order.total, Money::from_cents(1296));

        let err = place_order(
            &store,
            NewOrder {
                details: takeout("Alan Turing"),
                items: Vec::new(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        assert_eq!(get_order(&store, "missing").unwrap_err().code, ErrorCode::NotFound);
    }
}
