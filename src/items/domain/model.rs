use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// ItemEntity abstracts a listed item; request_id backlinks to the item
// request it answers, when it answers one.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ItemEntity {
    pub item_id: String,
    pub version: i64,
    pub owner_id: String,
    pub item_name: String,
    pub item_description: String,
    pub is_available: bool,
    pub request_id: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ItemEntity {
    pub fn new(owner_id: &str, item_name: &str, item_description: &str, is_available: bool) -> Self {
        Self {
            item_id: Uuid::new_v4().to_string(),
            version: 0,
            owner_id: owner_id.to_string(),
            item_name: item_name.to_string(),
            item_description: item_description.to_string(),
            is_available,
            request_id: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

// CommentEntity abstracts post-booking feedback left on an item.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct CommentEntity {
    pub comment_id: String,
    pub version: i64,
    pub item_id: String,
    pub author_id: String,
    pub author_name: String,
    pub comment_text: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl CommentEntity {
    pub fn new(item_id: &str, author_id: &str, author_name: &str, comment_text: &str) -> Self {
        Self {
            comment_id: Uuid::new_v4().to_string(),
            version: 0,
            item_id: item_id.to_string(),
            author_id: author_id.to_string(),
            author_name: author_name.to_string(),
            comment_text: comment_text.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
