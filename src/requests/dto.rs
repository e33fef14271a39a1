use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::items::dto::ItemDto;
use crate::utils::date::serializer;

// RequestDto is the wire representation of an item request.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct RequestDto {
    pub request_id: String,
    pub version: i64,
    pub requester_id: String,
    pub description: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl RequestDto {
    pub fn new(requester_id: &str, description: &str) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            version: 0,
            requester_id: requester_id.to_string(),
            description: description.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for RequestDto {
    fn id(&self) -> String {
        self.request_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// RequestWithProposalsDto carries the request together with the items listed
// against it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct RequestWithProposalsDto {
    pub request: RequestDto,
    pub items: Vec<ItemDto>,
}

impl RequestWithProposalsDto {
    pub fn new(request: RequestDto, items: Vec<ItemDto>) -> Self {
        Self {
            request,
            items,
        }
    }
}
