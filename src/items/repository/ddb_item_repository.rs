use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::repository::Repository;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::items::domain::model::ItemEntity;
use crate::items::repository::ItemRepository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBItemRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBItemRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }

    async fn collect_by_owner(&self, owner_id: &str) -> SharingResult<Vec<ItemEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let mut records = vec![];
        let mut last_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let resp = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .consistent_read(false)
                .set_exclusive_start_key(last_key.clone())
                .key_condition_expression("owner_id = :owner_id")
                .expression_attribute_values(":owner_id", AttributeValue::S(owner_id.to_string()))
                .send()
                .await.map_err(SharingError::from)?;
            records.extend(resp.items.as_ref().unwrap_or(&vec![]).iter().map(ItemEntity::from));
            last_key = resp.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl Repository<ItemEntity> for DDBItemRepository {
    async fn create(&self, entity: &ItemEntity) -> SharingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(item_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    async fn update(&self, entity: &ItemEntity) -> SharingResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("item_id", AttributeValue::S(entity.item_id.clone()))
            .update_expression("SET version = :version, item_name = :item_name, item_description = :item_description, is_available = :is_available, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":item_name", AttributeValue::S(entity.item_name.clone()))
            .expression_attribute_values(":item_description", AttributeValue::S(entity.item_description.clone()))
            .expression_attribute_values(":is_available", AttributeValue::Bool(entity.is_available))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    async fn get(&self, id: &str) -> SharingResult<ItemEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "item_id = :item_id",
            )
            .expression_attribute_values(
                ":item_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(SharingError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(SharingError::database(format!("too many items for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(ItemEntity::from(map));
                    }
                }
                Err(SharingError::not_found(format!("item not found for {}", id).as_str()))
            } else {
                Err(SharingError::not_found(format!("item not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("item_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    // Queries the owner GSI when the predicate pins an owner, otherwise scans.
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<ItemEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        if let Some(owner_id) = predicate.get("owner_id") {
            let mut request = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .limit(cmp::min(page_size, 500) as i32)
                .consistent_read(false)
                .set_exclusive_start_key(exclusive_start_key)
                .key_condition_expression("owner_id = :owner_id")
                .expression_attribute_values(":owner_id", AttributeValue::S(owner_id.to_string()));
            let mut filter_expr = String::new();
            for (k, v) in predicate {
                if k != "owner_id" {
                    let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                    request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
                }
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }
            request
                .send()
                .await.map_err(SharingError::from).map(|req| {
                let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                    .map(ItemEntity::from).collect();
                from_ddb(page, page_size, req.last_evaluated_key(), records)
            })
        } else {
            let mut request = self.client
                .scan()
                .table_name(table_name)
                .limit(cmp::min(page_size, 500) as i32)
                .set_exclusive_start_key(exclusive_start_key);
            let mut filter_expr = String::new();
            for (k, v) in predicate {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
            if !filter_expr.is_empty() {
                request = request.filter_expression(filter_expr);
            }
            request
                .send()
                .await.map_err(SharingError::from).map(|req| {
                let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                    .map(ItemEntity::from).collect();
                from_ddb(page, page_size, req.last_evaluated_key(), records)
            })
        }
    }
}

#[async_trait]
impl ItemRepository for DDBItemRepository {
    async fn find_by_owner(&self, owner_id: &str) -> SharingResult<Vec<ItemEntity>> {
        self.collect_by_owner(owner_id).await
    }

    async fn find_by_request(&self, request_id: &str) -> SharingResult<Vec<ItemEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let mut records = vec![];
        let mut last_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let resp = self.client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(last_key.clone())
                .filter_expression("request_id = :request_id")
                .expression_attribute_values(":request_id", AttributeValue::S(request_id.to_string()))
                .send()
                .await.map_err(SharingError::from)?;
            records.extend(resp.items.as_ref().unwrap_or(&vec![]).iter().map(ItemEntity::from));
            last_key = resp.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }
        Ok(records)
    }

    // DynamoDB contains() is case-sensitive so the text match runs on the
    // fetched page of available items.
    async fn search_available(&self, text: &str) -> SharingResult<Vec<ItemEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let needle = text.trim().to_lowercase();
        let mut records: Vec<ItemEntity> = vec![];
        let mut last_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let resp = self.client
                .scan()
                .table_name(table_name)
                .set_exclusive_start_key(last_key.clone())
                .filter_expression("is_available = :is_available")
                .expression_attribute_values(":is_available", AttributeValue::Bool(true))
                .send()
                .await.map_err(SharingError::from)?;
            records.extend(resp.items.as_ref().unwrap_or(&vec![]).iter().map(ItemEntity::from));
            last_key = resp.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }
        Ok(records.into_iter()
            .filter(|i| i.item_name.to_lowercase().contains(needle.as_str())
                || i.item_description.to_lowercase().contains(needle.as_str()))
            .collect())
    }
}

impl From<&HashMap<String, AttributeValue>> for ItemEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        ItemEntity {
            item_id: parse_string_attribute("item_id", map).unwrap_or_else(|| String::from("")),
            version: parse_number_attribute("version", map),
            owner_id: parse_string_attribute("owner_id", map).unwrap_or_else(|| String::from("")),
            item_name: parse_string_attribute("item_name", map).unwrap_or_else(|| String::from("")),
            item_description: parse_string_attribute("item_description", map).unwrap_or_else(|| String::from("")),
            is_available: parse_bool_attribute("is_available", map),
            request_id: parse_string_attribute("request_id", map),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}
