use crate::api::models::AppState;
use crate::api::seed::handlers::seed_handler;
use axum::{routing::post, Router};

pub fn routes() -> Router<AppState> {
    Router::new().route("/seed", post(seed_handler))
}
