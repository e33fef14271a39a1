use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::utils::date::serializer;

// UserEntity abstracts a registered account; email is unique across users.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct UserEntity {
    pub user_id: String,
    pub version: i64,
    pub user_name: String,
    pub email: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl UserEntity {
    pub fn new(user_name: &str, email: &str) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            version: 0,
            user_name: user_name.to_string(),
            email: email.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
