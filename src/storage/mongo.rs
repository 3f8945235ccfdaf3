use anyhow::Result;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::storage::{MenuItem, Order, Restaurant};

const RESTAURANT_COLLECTION: &str = "restaurant";
const MENU_ITEM_COLLECTION: &str = "menuitem";
const ORDER_COLLECTION: &str = "order";

/// Narrow seam over the document store. Handlers only ever go through these
/// methods, so the concrete store technology is swappable without touching
/// request-handling logic.
pub struct Store {
    db: Database,
}

impl Store {
    /// Create a store client. The underlying driver connects lazily; the
    /// first operation surfaces connectivity failures.
    pub async fn connect(url: &str, name: &str) -> Result<Self> {
        let client = Client::with_uri_str(url).await?;
        info!(database = name, "Store client created");
        Ok(Self {
            db: client.database(name),
        })
    }

    fn restaurants(&self) -> Collection<Restaurant> {
        self.db.collection(RESTAURANT_COLLECTION)
    }

    fn menu_items(&self) -> Collection<MenuItem> {
        self.db.collection(MENU_ITEM_COLLECTION)
    }

    fn orders(&self) -> Collection<Order> {
        self.db.collection(ORDER_COLLECTION)
    }

    pub async fn count_restaurants(&self) -> Result<u64> {
        Ok(self.restaurants().count_documents(doc! {}).await?)
    }

    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<ObjectId> {
        let result = self.restaurants().insert_one(restaurant).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow::anyhow!("store returned a non-ObjectId identity"))
    }

    pub async fn insert_menu_items(&self, items: &[MenuItem]) -> Result<()> {
        self.menu_items().insert_many(items).await?;
        Ok(())
    }

    /// Store-native order, no explicit sort.
    pub async fn list_restaurants(&self, limit: i64) -> Result<Vec<Restaurant>> {
        let cursor = self.restaurants().find(doc! {}).limit(limit).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Exact string match on the soft reference. An unknown or malformed
    /// restaurant id simply matches nothing.
    pub async fn menu_for_restaurant(
        &self,
        restaurant_id: &str,
        limit: i64,
    ) -> Result<Vec<MenuItem>> {
        let cursor = self
            .menu_items()
            .find(doc! { "restaurant_id": restaurant_id })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn menu_items_by_ids(&self, ids: &[ObjectId]) -> Result<Vec<MenuItem>> {
        let cursor = self
            .menu_items()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn insert_order(&self, order: &Order) -> Result<ObjectId> {
        let result = self.orders().insert_one(order).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow::anyhow!("store returned a non-ObjectId identity"))
    }

    /// Descending by `_id`: identities are monotonically increasing at the
    /// store, so this is newest-first.
    pub async fn list_orders_newest_first(&self, limit: i64) -> Result<Vec<Order>> {
        let cursor = self
            .orders()
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Doubles as the connectivity probe for the diagnostic endpoint.
    pub async fn collection_names(&self) -> Result<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }
}
