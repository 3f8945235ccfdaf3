use crate::api::models::AppState;
use crate::api::restaurants::handlers::{get_menu_handler, list_restaurants_handler};
use axum::{routing::get, Router};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants_handler))
        .route("/restaurants/{restaurant_id}/menu", get(get_menu_handler))
}
