use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::items::Item;
use crate::utils::date::serializer;

// ItemDto is the wire representation of a listed item, with comments
// attached on point lookups.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct ItemDto {
    pub item_id: String,
    pub version: i64,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<String>,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl ItemDto {
    pub fn new(owner: &str, name: &str, description: &str, available: bool) -> Self {
        Self {
            item_id: Uuid::new_v4().to_string(),
            version: 0,
            owner: owner.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            available,
            request_id: None,
            comments: vec![],
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for ItemDto {
    fn id(&self) -> String {
        self.item_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Item for ItemDto {
    fn owner_id(&self) -> String {
        self.owner.to_string()
    }

    fn name(&self) -> String {
        self.name.to_string()
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

// Partial update payload; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct ItemUpdateDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

// CommentDto is the wire representation of post-booking feedback.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct CommentDto {
    pub comment_id: String,
    pub item_id: String,
    pub author_id: String,
    pub author_name: String,
    pub text: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use crate::items::dto::ItemDto;
    use crate::items::Item;

    #[tokio::test]
    async fn test_should_build_item_dto() {
        let item = ItemDto::new("owner1", "ladder", "3m ladder", true);
        assert_eq!("owner1", item.owner_id().as_str());
        assert_eq!("ladder", Item::name(&item).as_str());
        assert!(item.is_available());
        assert!(item.comments.is_empty());
    }
}
