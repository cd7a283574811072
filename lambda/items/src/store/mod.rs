//! Table access.
//!
//! Every request maps to exactly one of these calls. Implementations hold no
//! per-request state and are shared across concurrent invocations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::item::Item;

pub mod dynamodb;
#[cfg(test)]
pub mod memory;

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Returns every item from a single scan. No pagination is performed.
    async fn scan(&self) -> Result<Vec<Item>>;

    /// Looks up one item by its partition key.
    async fn get(&self, id: &str) -> Result<Option<Item>>;

    /// Writes the item, replacing any existing item with the same id.
    async fn put(&self, item: Item) -> Result<()>;

    /// Sets the `info` attribute and returns the updated attributes.
    ///
    /// Creates `{id, info}` when no item with this id exists.
    async fn update_info(&self, id: &str, info: Value) -> Result<Item>;

    /// Removes the item. Removing a missing id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
