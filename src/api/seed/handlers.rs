use crate::api::models::*;
use crate::storage::{MenuItem, Restaurant};
use axum::{extract::State, Json};
use tracing::info;

/// The fixed sample data set: each restaurant paired with its menu items.
/// The items' soft references are filled in with the identity the store
/// assigns to the restaurant during the same seeding call.
fn seed_data() -> Vec<(Restaurant, Vec<MenuItem>)> {
    let spice_route = Restaurant {
        id: None,
        name: "Spice Route".to_string(),
        cuisine: "Indian".to_string(),
        image_url: Some("https://images.unsplash.com/photo-1544025162-d76694265947".to_string()),
        rating: 4.6,
        delivery_time_min: 30,
    };
    let spice_route_menu = vec![
        MenuItem {
            id: None,
            restaurant_id: String::new(),
            name: "Butter Chicken".to_string(),
            description: Some("Creamy tomato gravy".to_string()),
            price: 13.99,
            image_url: Some(
                "https://images.unsplash.com/photo-1604909052743-87e9f2fba5a2".to_string(),
            ),
            is_veg: false,
            spicy_level: 1,
        },
        MenuItem {
            id: None,
            restaurant_id: String::new(),
            name: "Paneer Tikka".to_string(),
            description: Some("Grilled cottage cheese".to_string()),
            price: 10.5,
            image_url: Some(
                "https://images.unsplash.com/photo-1601050690597-8df8f1864d84".to_string(),
            ),
            is_veg: true,
            spicy_level: 1,
        },
    ];

    let pasta_palace = Restaurant {
        id: None,
        name: "Pasta Palace".to_string(),
        cuisine: "Italian".to_string(),
        image_url: Some("https://images.unsplash.com/photo-1521389508051-d7ffb5dc8bbf".to_string()),
        rating: 4.4,
        delivery_time_min: 25,
    };
    let pasta_palace_menu = vec![
        MenuItem {
            id: None,
            restaurant_id: String::new(),
            name: "Margherita Pizza".to_string(),
            description: Some("Classic with basil".to_string()),
            price: 11.0,
            image_url: Some(
                "https://images.unsplash.com/photo-1548365328-9f547fb09530".to_string(),
            ),
            is_veg: true,
            spicy_level: 0,
        },
        MenuItem {
            id: None,
            restaurant_id: String::new(),
            name: "Pesto Pasta".to_string(),
            description: Some("Fresh basil pesto".to_string()),
            price: 12.75,
            image_url: Some(
                "https://images.unsplash.com/photo-1521389508051-d7ffb5dc8bbf".to_string(),
            ),
            is_veg: true,
            spicy_level: 0,
        },
    ];

    vec![
        (spice_route, spice_route_menu),
        (pasta_palace, pasta_palace_menu),
    ]
}

/// Idempotent: seeding only runs while the restaurant collection is empty.
/// The check is collection emptiness, not per-record dedup.
pub async fn seed_handler(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let existing = state
        .store
        .count_restaurants()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to count restaurants: {}", e)))?;

    if existing > 0 {
        info!(existing, "Restaurants already present, skipping seed");
        return Ok(Json(SeedResponse {
            status: "ok".to_string(),
        }));
    }

    for (restaurant, menu) in seed_data() {
        restaurant.validate().map_err(AppError::BadRequest)?;

        let restaurant_id = state
            .store
            .insert_restaurant(&restaurant)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to insert restaurant: {}", e)))?;

        let items: Vec<MenuItem> = menu
            .into_iter()
            .map(|mut item| {
                item.restaurant_id = restaurant_id.to_hex();
                item
            })
            .collect();

        for item in &items {
            item.validate().map_err(AppError::BadRequest)?;
        }

        state
            .store
            .insert_menu_items(&items)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to insert menu items: {}", e)))?;

        info!(restaurant = %restaurant.name, items = items.len(), "Seeded restaurant");
    }

    Ok(Json(SeedResponse {
        status: "ok".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_set_has_two_restaurants_with_two_items_each() {
        let data = seed_data();
        assert_eq!(data.len(), 2);
        for (_, menu) in &data {
            assert_eq!(menu.len(), 2);
        }
    }

    #[test]
    fn seed_entities_pass_validation() {
        for (restaurant, menu) in seed_data() {
            assert!(restaurant.validate().is_ok());
            for item in menu {
                assert!(item.validate().is_ok());
            }
        }
    }

    #[test]
    fn seed_soft_references_start_unassigned() {
        for (_, menu) in seed_data() {
            for item in menu {
                assert!(item.restaurant_id.is_empty());
                assert!(item.id.is_none());
            }
        }
    }
}
