use crate::api::models::*;
use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

/// Listing cap; there is no pagination cursor.
const RESTAURANT_LIST_LIMIT: i64 = 50;
const MENU_LIST_LIMIT: i64 = 200;

pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantResponse>>, AppError> {
    let restaurants = state
        .store
        .list_restaurants(RESTAURANT_LIST_LIMIT)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to list restaurants: {}", e)))?;

    info!(count = restaurants.len(), "Listed restaurants");

    Ok(Json(
        restaurants.into_iter().map(RestaurantResponse::from).collect(),
    ))
}

/// The restaurant id is taken as-is: no existence check, an unknown or
/// malformed id yields an empty menu rather than a 404.
pub async fn get_menu_handler(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<MenuItemResponse>>, AppError> {
    let items = state
        .store
        .menu_for_restaurant(&restaurant_id, MENU_LIST_LIMIT)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch menu: {}", e)))?;

    info!(restaurant_id = %restaurant_id, count = items.len(), "Fetched menu");

    Ok(Json(items.into_iter().map(MenuItemResponse::from).collect()))
}
