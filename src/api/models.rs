use crate::storage::{MenuItem, Order, OrderLine, Restaurant, Store};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub database_url_from_env: bool,
    pub database_name_from_env: bool,
}

/// Restaurant as exposed over the wire: the store-native identity is
/// rewritten into a plain string `id`.
#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub image_url: Option<String>,
    pub rating: f64,
    pub delivery_time_min: i64,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(r: Restaurant) -> Self {
        Self {
            id: r.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: r.name,
            cuisine: r.cuisine,
            image_url: r.image_url,
            rating: r.rating,
            delivery_time_min: r.delivery_time_min,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_veg: bool,
    pub spicy_level: i64,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id.map(|id| id.to_hex()).unwrap_or_default(),
            restaurant_id: item.restaurant_id,
            name: item.name,
            description: item.description,
            price: item.price,
            image_url: item.image_url,
            is_veg: item.is_veg,
            spicy_level: item.spicy_level,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub restaurant_id: String,
    pub items: Vec<OrderLine>,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub notes: Option<String>,
    pub status: String,
    pub total: f64,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.map(|id| id.to_hex()).unwrap_or_default(),
            restaurant_id: order.restaurant_id,
            items: order.items,
            customer_name: order.customer_name,
            address: order.address,
            phone: order.phone,
            notes: order.notes,
            status: order.status,
            total: order.total,
        }
    }
}

/// One requested line of a new order
#[derive(Debug, Deserialize)]
pub struct CartItem {
    pub menuitem_id: String,
    pub quantity: i64,
}

/// Request to place an order
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub restaurant_id: String,
    pub items: Vec<CartItem>,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub notes: Option<String>,
}

/// Response after placing an order
#[derive(Debug, Serialize)]
pub struct PlaceOrderResponse {
    pub id: String,
    pub total: f64,
    pub status: String,
}

/// Query parameters for order listing
#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default = "default_order_limit")]
    pub limit: i64,
}

fn default_order_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub status: String,
}

/// Liveness response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
}

/// Diagnostic report. Connectivity problems show up as field values, never
/// as an error response.
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application error type. The taxonomy is deliberately flat: store failures
/// and malformed identities all collapse into `Internal` with the underlying
/// message as detail.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn restaurant_response_exposes_string_id_only() {
        let oid = ObjectId::new();
        let restaurant = Restaurant {
            id: Some(oid),
            name: "Pasta Palace".to_string(),
            cuisine: "Italian".to_string(),
            image_url: None,
            rating: 4.4,
            delivery_time_min: 25,
        };

        let value =
            serde_json::to_value(RestaurantResponse::from(restaurant)).expect("serialize");
        assert_eq!(value["id"], serde_json::json!(oid.to_hex()));
        assert!(value.get("_id").is_none());
    }

    #[test]
    fn order_response_preserves_line_snapshots() {
        let oid = ObjectId::new();
        let order = Order {
            id: Some(oid),
            restaurant_id: "abc".to_string(),
            items: vec![OrderLine {
                menuitem_id: "def".to_string(),
                quantity: 2,
                price: 10.0,
            }],
            customer_name: "Ada".to_string(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            notes: None,
            status: "placed".to_string(),
            total: 20.0,
        };

        let response = OrderResponse::from(order);
        assert_eq!(response.id, oid.to_hex());
        assert_eq!(response.items[0].price, 10.0);

        let value = serde_json::to_value(&response).expect("serialize");
        assert!(value.get("_id").is_none());
        assert_eq!(value["notes"], serde_json::Value::Null);
    }

    #[test]
    fn order_listing_limit_defaults_to_twenty() {
        let query: ListOrdersQuery = serde_json::from_str("{}").expect("empty query");
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn place_order_request_accepts_missing_notes() {
        let request: PlaceOrderRequest = serde_json::from_str(
            r#"{
                "restaurant_id": "abc",
                "items": [{"menuitem_id": "def", "quantity": 1}],
                "customer_name": "Ada",
                "address": "1 Main St",
                "phone": "555-0100"
            }"#,
        )
        .expect("request without notes should deserialize");
        assert!(request.notes.is_none());
        assert_eq!(request.items.len(), 1);
    }

    #[test]
    fn place_order_request_rejects_missing_required_fields() {
        let result: Result<PlaceOrderRequest, _> =
            serde_json::from_str(r#"{"restaurant_id": "abc", "items": []}"#);
        assert!(result.is_err());
    }
}
