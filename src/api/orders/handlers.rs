use crate::api::models::*;
use crate::storage::{MenuItem, Order, OrderLine, ORDER_STATUS_PLACED};
use axum::{
    extract::{Query, State},
    Json,
};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use tracing::info;

/// Map each fetched menu item's hex identity to its current price.
fn price_map(menu_items: &[MenuItem]) -> HashMap<String, f64> {
    menu_items
        .iter()
        .filter_map(|item| item.id.map(|id| (id.to_hex(), item.price)))
        .collect()
}

/// Build the per-line price snapshot and the order total. A requested id
/// with no matching menu item contributes price 0.0 rather than an error,
/// and quantities are folded in as-is, including zero or negative ones.
fn build_order_lines(
    requested: &[CartItem],
    prices: &HashMap<String, f64>,
) -> (Vec<OrderLine>, f64) {
    let mut total = 0.0;
    let mut lines = Vec::with_capacity(requested.len());

    for item in requested {
        let price = prices.get(&item.menuitem_id).copied().unwrap_or(0.0);
        total += price * item.quantity as f64;
        lines.push(OrderLine {
            menuitem_id: item.menuitem_id.clone(),
            quantity: item.quantity,
            price,
        });
    }

    (lines, round_to_cents(total))
}

fn round_to_cents(total: f64) -> f64 {
    (total * 100.0).round() / 100.0
}

pub async fn place_order_handler(
    State(state): State<AppState>,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<Json<PlaceOrderResponse>, AppError> {
    info!(
        restaurant_id = %request.restaurant_id,
        lines = request.items.len(),
        "Placing order"
    );

    let menu_ids = request
        .items
        .iter()
        .map(|line| ObjectId::parse_str(&line.menuitem_id))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal(format!("Invalid menu item id: {}", e)))?;

    let menu_items = state
        .store
        .menu_items_by_ids(&menu_ids)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to look up menu items: {}", e)))?;

    let prices = price_map(&menu_items);
    let (lines, total) = build_order_lines(&request.items, &prices);

    // Price lookup and insert are two independent store operations; a menu
    // price change in between is an accepted race. The snapshot freezes
    // whatever the lookup saw.
    let order = Order {
        id: None,
        restaurant_id: request.restaurant_id,
        items: lines,
        customer_name: request.customer_name,
        address: request.address,
        phone: request.phone,
        notes: request.notes,
        status: ORDER_STATUS_PLACED.to_string(),
        total,
    };

    let order_id = state
        .store
        .insert_order(&order)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to persist order: {}", e)))?;

    info!(order_id = %order_id, total, "Order placed");

    Ok(Json(PlaceOrderResponse {
        id: order_id.to_hex(),
        total,
        status: ORDER_STATUS_PLACED.to_string(),
    }))
}

pub async fn list_orders_handler(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state
        .store
        .list_orders_newest_first(query.limit)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to list orders: {}", e)))?;

    info!(count = orders.len(), limit = query.limit, "Listed orders");

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart(entries: &[(&str, i64)]) -> Vec<CartItem> {
        entries
            .iter()
            .map(|(id, quantity)| CartItem {
                menuitem_id: (*id).to_string(),
                quantity: *quantity,
            })
            .collect()
    }

    #[test]
    fn total_sums_price_times_quantity() {
        let prices = HashMap::from([("a".to_string(), 10.0), ("b".to_string(), 5.0)]);
        let (lines, total) = build_order_lines(&cart(&[("a", 2), ("b", 1)]), &prices);

        assert_eq!(total, 25.0);
        assert_eq!(
            lines,
            vec![
                OrderLine {
                    menuitem_id: "a".to_string(),
                    quantity: 2,
                    price: 10.0
                },
                OrderLine {
                    menuitem_id: "b".to_string(),
                    quantity: 1,
                    price: 5.0
                },
            ]
        );
    }

    #[test]
    fn unknown_menu_item_contributes_zero() {
        let prices = HashMap::from([("a".to_string(), 10.0)]);
        let (lines, total) = build_order_lines(&cart(&[("a", 1), ("missing", 3)]), &prices);

        assert_eq!(total, 10.0);
        assert_eq!(lines[1].price, 0.0);
        assert_eq!(lines[1].quantity, 3);
    }

    #[test]
    fn empty_cart_yields_zero_total() {
        let (lines, total) = build_order_lines(&[], &HashMap::new());
        assert!(lines.is_empty());
        assert_eq!(total, 0.0);
    }

    #[test]
    fn zero_and_negative_quantities_fold_in_arithmetically() {
        let prices = HashMap::from([("a".to_string(), 10.0), ("b".to_string(), 4.0)]);
        let (lines, total) = build_order_lines(&cart(&[("a", 0), ("b", -2)]), &prices);

        assert_eq!(total, -8.0);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].price, 10.0);
    }

    #[test]
    fn total_is_rounded_to_two_decimal_places() {
        let prices = HashMap::from([("a".to_string(), 0.1)]);
        let (_, total) = build_order_lines(&cart(&[("a", 3)]), &prices);
        assert_eq!(total, 0.3);

        let prices = HashMap::from([("a".to_string(), 5.333)]);
        let (_, total) = build_order_lines(&cart(&[("a", 2)]), &prices);
        assert_eq!(total, 10.67);
    }

    #[test]
    fn snapshot_price_comes_from_lookup_not_request() {
        // The request never carries a price; only the store's current price
        // at lookup time lands in the persisted line.
        let prices = HashMap::from([("a".to_string(), 13.99)]);
        let (lines, _) = build_order_lines(&cart(&[("a", 1)]), &prices);
        assert_eq!(lines[0].price, 13.99);
    }

    #[test]
    fn price_map_is_keyed_by_hex_identity() {
        let oid = ObjectId::new();
        let item = MenuItem {
            id: Some(oid),
            restaurant_id: "r".to_string(),
            name: "Butter Chicken".to_string(),
            description: None,
            price: 13.99,
            image_url: None,
            is_veg: false,
            spicy_level: 1,
        };

        let prices = price_map(&[item]);
        assert_eq!(prices.get(&oid.to_hex()), Some(&13.99));
    }
}
