use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// RequestEntity abstracts a broadcast need for an item; owners answer it by
// listing items that backlink to it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct RequestEntity {
    pub request_id: String,
    pub version: i64,
    pub requester_id: String,
    pub request_description: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl RequestEntity {
    pub fn new(requester_id: &str, request_description: &str) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            version: 0,
            requester_id: requester_id.to_string(),
            request_description: request_description.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
