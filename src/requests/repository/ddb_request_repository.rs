use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;

use crate::core::repository::Repository;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::requests::domain::model::RequestEntity;
use crate::requests::repository::RequestRepository;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

#[derive(Debug)]
pub(crate) struct DDBRequestRepository {
    client: Client,
    table_name: String,
    index_name: String,
}

impl DDBRequestRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<RequestEntity> for DDBRequestRepository {
    async fn create(&self, entity: &RequestEntity) -> SharingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(request_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    async fn update(&self, entity: &RequestEntity) -> SharingResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("request_id", AttributeValue::S(entity.request_id.clone()))
            .update_expression("SET version = :version, request_description = :request_description, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":request_description", AttributeValue::S(entity.request_description.clone()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    async fn get(&self, id: &str) -> SharingResult<RequestEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "request_id = :request_id",
            )
            .expression_attribute_values(
                ":request_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(SharingError::from).and_then(|req| {
            if let Some(items) = req.items {
                if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(RequestEntity::from(map));
                    }
                }
                Err(SharingError::not_found(format!("request not found for {}", id).as_str()))
            } else {
                Err(SharingError::not_found(format!("request not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("request_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    // Queries the requester GSI when the predicate pins a requester,
    // otherwise scans; both walk the result newest first.
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<RequestEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        if let Some(requester_id) = predicate.get("requester_id") {
            let mut request = self.client
                .query()
                .table_name(table_name)
                .index_name(index_name)
                .limit(cmp::min(page_size, 500) as i32)
                .consistent_read(false)
                .scan_index_forward(false)
                .set_exclusive_start_key(exclusive_start_key)
                .key_condition_expression("requester_id = :requester_id")
                .expression_attribute_values(":requester_id", AttributeValue::S(requester_id.to_string()));
            let mut filter_expr = String::new();
            for (k, v) in predicate {
                if k != "requester_id" {
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
                    .map(RequestEntity::from).collect();
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
                let mut records: Vec<RequestEntity> = req.items.as_ref().unwrap_or(&vec![]).iter()
                    .map(RequestEntity::from).collect();
                records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                from_ddb(page, page_size, req.last_evaluated_key(), records)
            })
        }
    }
}

#[async_trait]
impl RequestRepository for DDBRequestRepository {
    async fn find_by_requester(&self, requester_id: &str) -> SharingResult<Vec<RequestEntity>> {
        let res = self.query(
            &HashMap::from([("requester_id".to_string(), requester_id.to_string())]), None, 500).await?;
        Ok(res.records)
    }

    async fn find_created_by_others(&self, user_id: &str) -> SharingResult<Vec<RequestEntity>> {
        let res = self.query(
            &HashMap::from([("requester_id:<>".to_string(), user_id.to_string())]), None, 500).await?;
        Ok(res.records)
    }
}

impl From<&HashMap<String, AttributeValue>> for RequestEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        RequestEntity {
            request_id: parse_string_attribute("request_id", map).unwrap_or_else(|| String::from("")),
            version: parse_number_attribute("version", map),
            requester_id: parse_string_attribute("requester_id", map).unwrap_or_else(|| String::from("")),
            request_description: parse_string_attribute("request_description", map).unwrap_or_else(|| String::from("")),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}
