use crate::api::models::AppState;
use crate::api::orders::handlers::{list_orders_handler, place_order_handler};
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/orders", post(place_order_handler).get(list_orders_handler))
}
