//! # Commands
//!
//! What the website and the CMS call. Each command validates its input,
//! runs one store action through [`StoreState::dispatch`](crate::state::StoreState::dispatch)
//! and returns plain data or an [`ApiError`](crate::error::ApiError).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Website                               CMS                              │
//! │  ───────                               ───                              │
//! │  booking     reservations, events,     cms   menu CRUD, reservation    │
//! │              tables, weather, toasts         and order status, reviews,│
//! │  ordering    menu, cart, checkout,           events, social posts,     │
//! │              order tracking                  notifications, analytics, │
//! │  membership  join, profile, reviews          admin login/logout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod booking;
pub mod cms;
pub mod membership;
pub mod ordering;
