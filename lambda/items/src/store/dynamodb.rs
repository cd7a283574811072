use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::Value;

use super::{ItemStore, Result};
use crate::config::Config;
use crate::error::map_sdk_error;
use crate::item::{value_to_attribute, Item, ID_FIELD, INFO_FIELD};

/// DynamoDB-backed store for a table keyed by the string attribute `id`.
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
        }
    }

    fn key(id: &str) -> AttributeValue {
        AttributeValue::S(id.to_string())
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn scan(&self) -> Result<Vec<Item>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_sdk_error("Scan", e))?;

        result
            .items
            .unwrap_or_default()
            .into_iter()
            .map(Item::from_attributes)
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, Self::key(id))
            .send()
            .await
            .map_err(|e| map_sdk_error("GetItem", e))?;

        result.item.map(Item::from_attributes).transpose()
    }

    async fn put(&self, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item.to_attributes()))
            .send()
            .await
            .map_err(|e| map_sdk_error("PutItem", e))?;

        Ok(())
    }

    async fn update_info(&self, id: &str, info: Value) -> Result<Item> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, Self::key(id))
            .update_expression("SET #info = :info")
            .expression_attribute_names("#info", INFO_FIELD)
            .expression_attribute_values(":info", value_to_attribute(&info))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| map_sdk_error("UpdateItem", e))?;

        match result.attributes {
            Some(attributes) => Item::from_attributes(attributes),
            None => Ok(Item::new()),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_FIELD, Self::key(id))
            .send()
            .await
            .map_err(|e| map_sdk_error("DeleteItem", e))?;

        Ok(())
    }
}
