use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Status assigned to every new order. No transition logic exists yet.
pub const ORDER_STATUS_PLACED: &str = "placed";

/// A restaurant. Identity is assigned by the store on insert and the record
/// is never updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub cuisine: String,
    pub image_url: Option<String>,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default = "default_delivery_time_min")]
    pub delivery_time_min: i64,
}

fn default_rating() -> f64 {
    4.5
}

fn default_delivery_time_min() -> i64 {
    25
}

impl Restaurant {
    /// Validate field ranges before persistence.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Restaurant name cannot be empty".to_string());
        }
        if self.cuisine.trim().is_empty() {
            return Err("Cuisine cannot be empty".to_string());
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err("Rating must be between 0 and 5".to_string());
        }
        if !(5..=120).contains(&self.delivery_time_min) {
            return Err("Delivery time must be between 5 and 120 minutes".to_string());
        }
        Ok(())
    }
}

/// A dish on a restaurant's menu. `restaurant_id` is a soft reference: the
/// hex identity of a restaurant, stored as a plain string with no integrity
/// check against the restaurant collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub restaurant_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_veg: bool,
    #[serde(default)]
    pub spicy_level: i64,
}

impl MenuItem {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Dish name cannot be empty".to_string());
        }
        if self.price < 0.0 {
            return Err("Price cannot be negative".to_string());
        }
        if !(0..=3).contains(&self.spicy_level) {
            return Err("Spicy level must be between 0 and 3".to_string());
        }
        Ok(())
    }
}

/// One line of an order: the menu item identity, the requested quantity, and
/// the price snapshotted at order time. Later menu price changes do not
/// affect persisted orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menuitem_id: String,
    pub quantity: i64,
    pub price: f64,
}

/// A placed order. Created once, never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub restaurant_id: String,
    pub items: Vec<OrderLine>,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub notes: Option<String>,
    pub status: String,
    pub total: f64,
}
