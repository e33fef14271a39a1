use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{NaiveDateTime, Utc};

use crate::bookings::domain::model::BookingEntity;
use crate::bookings::repository::BookingRepository;
use crate::core::repository::Repository;
use crate::core::sharing::{BookingStatus, PaginatedResult, SharingError, SharingResult};
use crate::utils::ddb::{add_filter_expr, date_str, from_ddb, index_name, parse_bool_attribute, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, string_date, to_ddb_page};

// DynamoDB store for bookings. Three GSIs carry the query axes, each with
// start_at as the range key so descending index order gives newest start
// first without a sort step.
#[derive(Debug)]
pub(crate) struct DDBBookingRepository {
    client: Client,
    table_name: String,
}

impl DDBBookingRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    // drains every page of a GSI query, newest start first
    async fn collect(&self, gsi_pk: &str, id: &str,
                     filter_expr: Option<String>,
                     values: Vec<(String, AttributeValue)>) -> SharingResult<Vec<BookingEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index = index_name(table_name, gsi_pk);
        let mut records = vec![];
        let mut last_key: Option<HashMap<String, AttributeValue>> = None;
        loop {
            let mut request = self.client
                .query()
                .table_name(table_name)
                .index_name(index.as_str())
                .consistent_read(false)
                .scan_index_forward(false)
                .set_exclusive_start_key(last_key.clone())
                .key_condition_expression(format!("{} = :{}", gsi_pk, gsi_pk))
                .expression_attribute_values(format!(":{}", gsi_pk).as_str(), AttributeValue::S(id.to_string()));
            if let Some(expr) = &filter_expr {
                request = request.filter_expression(expr.as_str());
            }
            for (k, v) in &values {
                request = request.expression_attribute_values(k.as_str(), v.clone());
            }
            let resp = request.send().await.map_err(SharingError::from)?;
            records.extend(resp.items.as_ref().unwrap_or(&vec![]).iter().map(BookingEntity::from));
            last_key = resp.last_evaluated_key().cloned();
            if last_key.is_none() {
                break;
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl Repository<BookingEntity> for DDBBookingRepository {
    async fn create(&self, entity: &BookingEntity) -> SharingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(booking_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    // only the status field (plus bookkeeping) ever changes after creation
    async fn update(&self, entity: &BookingEntity) -> SharingResult<usize> {
        let now = Utc::now().naive_utc();
        let table_name: &str = self.table_name.as_ref();

        self.client
            .update_item()
            .table_name(table_name)
            .key("booking_id", AttributeValue::S(entity.booking_id.clone()))
            .update_expression("SET version = :version, booking_status = :booking_status, updated_at = :updated_at")
            .expression_attribute_values(":old_version", AttributeValue::N(entity.version.to_string()))
            .expression_attribute_values(":version", AttributeValue::N((entity.version + 1).to_string()))
            .expression_attribute_values(":booking_status", AttributeValue::S(entity.booking_status.to_string()))
            .expression_attribute_values(":updated_at", string_date(now))
            .condition_expression("attribute_exists(version) AND version = :old_version")
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    async fn get(&self, id: &str) -> SharingResult<BookingEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .query()
            .table_name(table_name)
            .limit(2)
            .consistent_read(true)
            .key_condition_expression(
                "booking_id = :booking_id",
            )
            .expression_attribute_values(
                ":booking_id",
                AttributeValue::S(id.to_string()),
            )
            .send()
            .await.map_err(SharingError::from).and_then(|req| {
            if let Some(items) = req.items {
                if items.len() > 1 {
                    return Err(SharingError::database(format!("too many bookings for {}", id).as_str(), None, false));
                } else if !items.is_empty() {
                    if let Some(map) = items.first() {
                        return Ok(BookingEntity::from(map));
                    }
                }
                Err(SharingError::not_found(format!("booking not found for {}", id).as_str()))
            } else {
                Err(SharingError::not_found(format!("booking not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("booking_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(SharingError::from)
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<BookingEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, predicate);
        let (gsi_pk, id) = if let Some(booker_id) = predicate.get("booker_id") {
            ("booker_id", booker_id.to_string())
        } else if let Some(owner_id) = predicate.get("owner_id") {
            ("owner_id", owner_id.to_string())
        } else if let Some(item_id) = predicate.get("item_id") {
            ("item_id", item_id.to_string())
        } else {
            return Err(SharingError::validation(
                "booking query needs booker_id, owner_id or item_id", Some("400".to_string())));
        };
        let index = index_name(table_name, gsi_pk);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index.as_str())
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .scan_index_forward(false)
            .set_exclusive_start_key(exclusive_start_key)
            .key_condition_expression(format!("{} = :{}", gsi_pk, gsi_pk))
            .expression_attribute_values(format!(":{}", gsi_pk).as_str(), AttributeValue::S(id));
        let mut filter_expr = String::new();
        for (k, v) in predicate {
            if k != gsi_pk {
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
                .map(BookingEntity::from).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl BookingRepository for DDBBookingRepository {
    async fn search_by_booker(&self, booker_id: &str) -> SharingResult<Vec<BookingEntity>> {
        self.collect("booker_id", booker_id, None, vec![]).await
    }

    async fn search_by_booker_and_status(&self, booker_id: &str, status: BookingStatus) -> SharingResult<Vec<BookingEntity>> {
        self.collect("booker_id", booker_id,
                     Some("booking_status = :booking_status".to_string()),
                     vec![(":booking_status".to_string(), AttributeValue::S(status.to_string()))]).await
    }

    async fn search_by_booker_in_present(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("booker_id", booker_id,
                     Some("start_at < :at AND end_at > :at".to_string()),
                     vec![(":at".to_string(), string_date(at))]).await
    }

    async fn search_by_booker_in_past(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("booker_id", booker_id,
                     Some("end_at < :at".to_string()),
                     vec![(":at".to_string(), string_date(at))]).await
    }

    async fn search_by_booker_in_future(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("booker_id", booker_id,
                     Some("start_at > :at".to_string()),
                     vec![(":at".to_string(), string_date(at))]).await
    }

    async fn search_by_owner(&self, owner_id: &str) -> SharingResult<Vec<BookingEntity>> {
        self.collect("owner_id", owner_id, None, vec![]).await
    }

    async fn search_by_owner_and_status(&self, owner_id: &str, status: BookingStatus) -> SharingResult<Vec<BookingEntity>> {
        self.collect("owner_id", owner_id,
                     Some("booking_status = :booking_status".to_string()),
                     vec![(":booking_status".to_string(), AttributeValue::S(status.to_string()))]).await
    }

    async fn search_by_owner_in_present(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("owner_id", owner_id,
                     Some("start_at < :at AND end_at > :at".to_string()),
                     vec![(":at".to_string(), string_date(at))]).await
    }

    async fn search_by_owner_in_past(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("owner_id", owner_id,
                     Some("end_at < :at".to_string()),
                     vec![(":at".to_string(), string_date(at))]).await
    }

    async fn search_by_owner_in_future(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("owner_id", owner_id,
                     Some("start_at > :at AND end_at > :at".to_string()),
                     vec![(":at".to_string(), string_date(at))]).await
    }

    async fn search_overlapping(&self, item_id: &str,
                                start_at: NaiveDateTime, end_at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        self.collect("item_id", item_id,
                     Some("(start_at < :end_at AND end_at > :end_at) OR (start_at < :start_at AND end_at > :start_at) OR (start_at > :start_at AND end_at < :end_at)".to_string()),
                     vec![(":start_at".to_string(), string_date(start_at)),
                          (":end_at".to_string(), string_date(end_at))]).await
    }

    async fn exists_finished_booking(&self, item_id: &str, booker_id: &str,
                                     before: NaiveDateTime) -> SharingResult<bool> {
        let predicate = HashMap::from([
            ("item_id".to_string(), item_id.to_string()),
            ("booker_id".to_string(), booker_id.to_string()),
            ("booking_status".to_string(), BookingStatus::Approved.to_string()),
            ("end_at:<".to_string(), date_str(before)),
        ]);
        // the page limit applies before the filter, so walk pages until a
        // match or the end
        let mut page: Option<String> = None;
        loop {
            let res = self.query(&predicate, page.as_deref(), 500).await?;
            if !res.records.is_empty() {
                return Ok(true);
            }
            match res.next_page {
                Some(next) => page = Some(next),
                None => return Ok(false),
            }
        }
    }
}

impl From<&HashMap<String, AttributeValue>> for BookingEntity {
    fn from(map: &HashMap<String, AttributeValue>) -> Self {
        BookingEntity {
            booking_id: parse_string_attribute("booking_id", map).unwrap_or_else(|| String::from("")),
            version: parse_number_attribute("version", map),
            item_id: parse_string_attribute("item_id", map).unwrap_or_else(|| String::from("")),
            item_name: parse_string_attribute("item_name", map).unwrap_or_else(|| String::from("")),
            item_available: parse_bool_attribute("item_available", map),
            owner_id: parse_string_attribute("owner_id", map).unwrap_or_else(|| String::from("")),
            booker_id: parse_string_attribute("booker_id", map).unwrap_or_else(|| String::from("")),
            booker_name: parse_string_attribute("booker_name", map).unwrap_or_else(|| String::from("")),
            booker_email: parse_string_attribute("booker_email", map).unwrap_or_else(|| String::from("")),
            booking_status: BookingStatus::from(parse_string_attribute("booking_status", map).unwrap_or_else(|| BookingStatus::Waiting.to_string())),
            start_at: parse_date_attribute("start_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            end_at: parse_date_attribute("end_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            created_at: parse_date_attribute("created_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
            updated_at: parse_date_attribute("updated_at", map).unwrap_or_else(|| Utc::now().naive_utc()),
        }
    }
}
