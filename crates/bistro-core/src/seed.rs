//! Demo data for a fresh install.
//!
//! The website starts from this state when local storage holds no
//! snapshot (first launch, or a snapshot that failed to parse). Seed
//! records use readable ids (`menu-burrata`), which [`crate::id::timestamp_of`]
//! reports as carrying no timestamp.

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::money::Money;
use crate::state::RestaurantState;
use crate::types::*;

/// Demo store as of now.
pub fn demo_state() -> RestaurantState {
    demo_state_at(Utc::now())
}

/// Demo store with events and review dates relative to `now`.
pub fn demo_state_at(now: DateTime<Utc>) -> RestaurantState {
    let mut state = RestaurantState::default();
    state.menu_items = demo_menu(now);
    state.events = demo_events(now);
    state.reviews = demo_reviews(now);
    state.social_posts = demo_posts(now);
    state.admin_user = Some(AdminUser {
        id: "admin-owner".to_string(),
        name: "Restaurant Owner".to_string(),
        email: "owner@bistro.example".to_string(),
        role: AdminRole::Owner,
        avatar: None,
        last_login: None,
    });
    state.analytics = crate::analytics::compute(&state, now);
    state
}

struct Dish {
    slug: &'static str,
    name: &'static str,
    description: &'static str,
    cents: i64,
    category: MenuCategory,
    featured: bool,
    dietary: &'static [DietaryTag],
    minutes: u32,
}

const MENU: &[Dish] = &[
    Dish {
        slug: "burrata",
        name: "Burrata & Heirloom Tomatoes",
        description: "Creamy burrata, basil oil, aged balsamic",
        cents: 1400,
        category: MenuCategory::Appetizer,
        featured: true,
        dietary: &[DietaryTag::Vegetarian, DietaryTag::GlutenFree],
        minutes: 8,
    },
    Dish {
        slug: "calamari",
        name: "Crispy Calamari",
        description: "Lemon aioli, chili flakes",
        cents: 1300,
        category: MenuCategory::Appetizer,
        featured: false,
        dietary: &[DietaryTag::DairyFree],
        minutes: 10,
    },
    Dish {
        slug: "risotto",
        name: "Wild Mushroom Risotto",
        description: "Arborio rice, porcini, parmesan, truffle oil",
        cents: 2400,
        category: MenuCategory::Main,
        featured: true,
        dietary: &[DietaryTag::Vegetarian, DietaryTag::GlutenFree],
        minutes: 25,
    },
    Dish {
        slug: "steak",
        name: "Grilled Ribeye",
        description: "Dry-aged ribeye, rosemary potatoes, red wine jus",
        cents: 4200,
        category: MenuCategory::Main,
        featured: true,
        dietary: &[DietaryTag::GlutenFree],
        minutes: 30,
    },
    Dish {
        slug: "salmon",
        name: "Pan-Seared Salmon",
        description: "Crushed peas, lemon butter, samphire",
        cents: 3200,
        category: MenuCategory::Main,
        featured: false,
        dietary: &[DietaryTag::GlutenFree],
        minutes: 20,
    },
    Dish {
        slug: "arrabbiata",
        name: "Penne Arrabbiata",
        description: "San Marzano tomatoes, garlic, chili",
        cents: 1900,
        category: MenuCategory::Main,
        featured: false,
        dietary: &[DietaryTag::Vegan, DietaryTag::Spicy],
        minutes: 15,
    },
    Dish {
        slug: "tiramisu",
        name: "Classic Tiramisu",
        description: "Mascarpone, espresso, cocoa",
        cents: 1100,
        category: MenuCategory::Dessert,
        featured: true,
        dietary: &[DietaryTag::Vegetarian],
        minutes: 5,
    },
    Dish {
        slug: "panna-cotta",
        name: "Pistachio Panna Cotta",
        description: "Berry compote, crushed pistachio",
        cents: 1000,
        category: MenuCategory::Dessert,
        featured: false,
        dietary: &[DietaryTag::Vegetarian, DietaryTag::ContainsNuts],
        minutes: 5,
    },
    Dish {
        slug: "negroni",
        name: "House Negroni",
        description: "Gin, vermouth, bitter aperitivo",
        cents: 1300,
        category: MenuCategory::Beverage,
        featured: false,
        dietary: &[DietaryTag::Vegan],
        minutes: 3,
    },
    Dish {
        slug: "lemonade",
        name: "Rosemary Lemonade",
        description: "Fresh lemons, rosemary syrup, soda",
        cents: 600,
        category: MenuCategory::Beverage,
        featured: false,
        dietary: &[DietaryTag::Vegan],
        minutes: 3,
    },
    Dish {
        slug: "chefs-tasting",
        name: "Chef's Tasting Plate",
        description: "Five small courses chosen daily",
        cents: 6500,
        category: MenuCategory::Special,
        featured: true,
        dietary: &[],
        minutes: 40,
    },
];

fn demo_menu(now: DateTime<Utc>) -> Vec<MenuItem> {
    MENU.iter()
        .map(|dish| MenuItem {
            id: format!("menu-{}", dish.slug),
            name: dish.name.to_string(),
            description: dish.description.to_string(),
            price: Money::from_cents(dish.cents),
            category: dish.category,
            image: Some(format!("/images/menu/{}.jpg", dish.slug)),
            available: true,
            featured: dish.featured,
            dietary: dish.dietary.to_vec(),
            preparation_minutes: dish.minutes,
            created_at: now,
            updated_at: now,
        })
        .collect()
}

fn demo_events(now: DateTime<Utc>) -> Vec<Event> {
    let at = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default();
    vec![
        Event {
            id: "event-wine-tasting".to_string(),
            title: "Piedmont Wine Tasting".to_string(),
            description: "Six wines from Barolo and Barbaresco with paired small plates"
                .to_string(),
            date: (now + Duration::days(7)).date_naive(),
            start_time: at(19),
            end_time: Some(at(22)),
            capacity: 30,
            registered: 12,
            price: Money::from_cents(7500),
            status: EventStatus::Upcoming,
            image: Some("/images/events/wine-tasting.jpg".to_string()),
            created_at: now,
            updated_at: now,
        },
        Event {
            id: "event-jazz-night".to_string(),
            title: "Live Jazz Night".to_string(),
            description: "The house trio plays standards through dinner service".to_string(),
            date: (now + Duration::days(14)).date_naive(),
            start_time: at(20),
            end_time: Some(at(23)),
            capacity: 60,
            registered: 0,
            price: Money::zero(),
            status: EventStatus::Upcoming,
            image: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

fn demo_reviews(now: DateTime<Utc>) -> Vec<Review> {
    let review = |id: &str, name: &str, rating: u8, comment: &str, source, days_ago: i64| {
        let at = now - Duration::days(days_ago);
        Review {
            id: id.to_string(),
            customer_name: name.to_string(),
            email: None,
            rating,
            comment: comment.to_string(),
            source,
            status: ReviewStatus::Approved,
            response: None,
            responded_at: None,
            created_at: at,
            updated_at: at,
        }
    };
    vec![
        review(
            "review-1",
            "Sofia Marino",
            5,
            "The risotto was the best I've had outside Milan.",
            ReviewSource::Google,
            3,
        ),
        review(
            "review-2",
            "James Carter",
            4,
            "Lovely terrace, attentive staff. Dessert took a while.",
            ReviewSource::Website,
            9,
        ),
        review(
            "review-3",
            "Priya Natarajan",
            5,
            "Booked for an anniversary and they made it special.",
            ReviewSource::TripAdvisor,
            21,
        ),
    ]
}

fn demo_posts(now: DateTime<Utc>) -> Vec<SocialPost> {
    vec![SocialPost {
        id: "post-truffle-season".to_string(),
        platform: SocialPlatform::Instagram,
        content: "Truffle season is here. Our wild mushroom risotto now comes with fresh \
                  shavings every evening."
            .to_string(),
        image: Some("/images/social/truffle.jpg".to_string()),
        status: PostStatus::Published,
        scheduled_for: None,
        published_at: Some(now - Duration::days(2)),
        likes: 214,
        comments: 18,
        shares: 9,
        created_at: now - Duration::days(2),
        updated_at: now - Duration::days(2),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::timestamp_of;

    #[test]
    fn test_demo_state_shape() {
        let state = demo_state();
        assert_eq!(state.menu_items.len(), MENU.len());
        assert!(state.menu_items.iter().all(|m| m.available));
        assert!(!state.featured_menu_items().is_empty());
        assert_eq!(state.admin_user.as_ref().unwrap().role, AdminRole::Owner);
        assert!(state.cart.is_empty());
        assert!(state.orders.is_empty());
        assert_eq!(state.analytics.average_rating, 4.7);
    }

    #[test]
    fn test_demo_events_are_upcoming() {
        let now = Utc::now();
        let state = demo_state_at(now);
        assert_eq!(state.upcoming_events(now.date_naive()).len(), 2);
    }

    #[test]
    fn test_seed_ids_have_no_timestamp() {
        let state = demo_state();
        assert!(timestamp_of(&state.menu_items[0].id).is_none());
    }

    #[test]
    fn test_every_category_is_stocked() {
        let state = demo_state();
        for category in [
            MenuCategory::Appetizer,
            MenuCategory::Main,
            MenuCategory::Dessert,
            MenuCategory::Beverage,
            MenuCategory::Special,
        ] {
            assert!(!state.menu_by_category(category).is_empty());
        }
    }
}
