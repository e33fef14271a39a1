use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::users::User;
use crate::utils::date::serializer;

// UserDto is the wire representation of a registered account.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct UserDto {
    pub user_id: String,
    pub version: i64,
    pub name: String,
    pub email: String,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl UserDto {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            user_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for UserDto {
    fn id(&self) -> String {
        self.user_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl User for UserDto {
    fn name(&self) -> String {
        self.name.to_string()
    }

    fn email(&self) -> String {
        self.email.to_string()
    }
}

// Partial update payload; absent fields keep their stored value.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct UserUpdateDto {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::users::dto::UserDto;

    #[tokio::test]
    async fn test_should_build_user_dto() {
        let user = UserDto::new("bob", "bob@example.org");
        assert_eq!("bob", user.name.as_str());
        assert_eq!("bob@example.org", user.email.as_str());
    }
}
