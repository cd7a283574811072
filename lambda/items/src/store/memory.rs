//! In-memory store mirroring the DynamoDB semantics the handler relies on:
//! put replaces, update upserts, delete of a missing key succeeds.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::{ItemStore, Result};
use crate::error::StoreError;
use crate::item::{Item, ID_FIELD, INFO_FIELD};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn scan(&self) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items.values().cloned().map(Item::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let items = self.items.read().await;
        Ok(items.get(id).cloned().map(Item::from))
    }

    async fn put(&self, item: Item) -> Result<()> {
        let id = item
            .id()
            .ok_or_else(|| StoreError::InvalidItem("missing string key attribute id".to_string()))?
            .to_string();
        self.items.write().await.insert(id, item.into());
        Ok(())
    }

    async fn update_info(&self, id: &str, info: Value) -> Result<Item> {
        let mut items = self.items.write().await;
        let fields = items.entry(id.to_string()).or_insert_with(|| {
            let mut fields = Map::new();
            fields.insert(ID_FIELD.to_string(), Value::String(id.to_string()));
            fields
        });
        fields.insert(INFO_FIELD.to_string(), info.clone());

        let mut updated = Map::new();
        updated.insert(INFO_FIELD.to_string(), info);
        Ok(updated.into())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.items.write().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: Value) -> Item {
        Item::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_put_replaces_existing_item() {
        let store = InMemoryStore::new();
        store
            .put(item(json!({"id": "a1", "info": "old", "extra": 1})))
            .await
            .unwrap();
        store.put(item(json!({"id": "a1", "info": "new"}))).await.unwrap();

        let stored = store.get("a1").await.unwrap().unwrap();
        assert_eq!(stored, item(json!({"id": "a1", "info": "new"})));
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_put_requires_string_id() {
        let store = InMemoryStore::new();
        let err = store.put(item(json!({"info": "x"}))).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));
    }

    #[tokio::test]
    async fn test_update_info_upserts_missing_item() {
        let store = InMemoryStore::new();
        let updated = store.update_info("ghost", json!("boo")).await.unwrap();
        assert_eq!(updated, item(json!({"info": "boo"})));

        let stored = store.get("ghost").await.unwrap().unwrap();
        assert_eq!(stored, item(json!({"id": "ghost", "info": "boo"})));
    }

    #[tokio::test]
    async fn test_update_info_keeps_other_fields() {
        let store = InMemoryStore::new();
        store
            .put(item(json!({"id": "a1", "info": "old", "color": "red"})))
            .await
            .unwrap();
        store.update_info("a1", json!({"n": 2})).await.unwrap();

        let stored = store.get("a1").await.unwrap().unwrap();
        assert_eq!(stored, item(json!({"id": "a1", "info": {"n": 2}, "color": "red"})));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let store = InMemoryStore::new();
        store.delete("nope").await.unwrap();
        assert_eq!(store.count().await, 0);
    }
}
