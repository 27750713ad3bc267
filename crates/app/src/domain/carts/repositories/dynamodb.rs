//! DynamoDB Cart Records Repository

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::{Client, config::Region, types::AttributeValue};

use crate::domain::carts::{
    models::UserId,
    repositories::{
        CART_PARTITION, CartRecord, CartRecordsRepository, RecordKey, RecordsRepositoryError,
    },
};

const PARTITION_ATTRIBUTE: &str = "PK";
const SORT_ATTRIBUTE: &str = "SK";
const PAYLOAD_ATTRIBUTE: &str = "Payload";

type AttributeMap = HashMap<String, AttributeValue>;

/// Cart records in a DynamoDB table keyed by `PK`/`SK` with a string `Payload`.
#[derive(Debug, Clone)]
pub(crate) struct DynamoCartRecordsRepository {
    client: Client,
    table: String,
}

impl DynamoCartRecordsRepository {
    #[must_use]
    pub(crate) fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Build a client from the default AWS credential chain, optionally pinned
    /// to a region and a custom endpoint (e.g. DynamoDB Local).
    pub(crate) async fn connect(
        table: impl Into<String>,
        region: Option<String>,
        endpoint: Option<String>,
    ) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }

        if let Some(endpoint) = endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        Self::new(Client::new(&config), table)
    }
}

fn key(user: &UserId) -> AttributeMap {
    let RecordKey { partition, sort } = RecordKey::cart(user);

    HashMap::from([
        (
            PARTITION_ATTRIBUTE.to_string(),
            AttributeValue::S(partition.to_string()),
        ),
        (SORT_ATTRIBUTE.to_string(), AttributeValue::S(sort)),
    ])
}

fn string_attribute<'a>(item: &'a AttributeMap, name: &str) -> Option<&'a String> {
    item.get(name).and_then(|value| value.as_s().ok())
}

fn into_record(item: &AttributeMap) -> Option<CartRecord> {
    let user_id = string_attribute(item, SORT_ATTRIBUTE)?;

    Some(CartRecord {
        user_id: UserId::new(user_id.clone()),
        payload: string_attribute(item, PAYLOAD_ATTRIBUTE)
            .cloned()
            .unwrap_or_default(),
    })
}

#[async_trait]
impl CartRecordsRepository for DynamoCartRecordsRepository {
    async fn get_payload(&self, user: &UserId) -> Result<Option<String>, RecordsRepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .set_key(Some(key(user)))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(output
            .item
            .as_ref()
            .and_then(|item| string_attribute(item, PAYLOAD_ATTRIBUTE).cloned()))
    }

    async fn put_payload(
        &self,
        user: &UserId,
        payload: String,
    ) -> Result<(), RecordsRepositoryError> {
        self.client
            .update_item()
            .table_name(&self.table)
            .set_key(Some(key(user)))
            .update_expression("SET #payload = :payload")
            .expression_attribute_names("#payload", PAYLOAD_ATTRIBUTE)
            .expression_attribute_values(":payload", AttributeValue::S(payload))
            .send()
            .await
            .map_err(aws_sdk_dynamodb::Error::from)?;

        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<CartRecord>, RecordsRepositoryError> {
        let mut records = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table)
                .key_condition_expression("#pk = :partition")
                .expression_attribute_names("#pk", PARTITION_ATTRIBUTE)
                .expression_attribute_values(
                    ":partition",
                    AttributeValue::S(CART_PARTITION.to_string()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(aws_sdk_dynamodb::Error::from)?;

            records.extend(output.items().iter().filter_map(into_record));

            match output.last_evaluated_key {
                Some(last_key) if !last_key.is_empty() => start_key = Some(last_key),
                _ => break,
            }
        }

        Ok(records)
    }
}
