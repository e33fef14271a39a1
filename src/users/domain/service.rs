use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use crate::core::events::DomainEvent;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::gateway::events::EventPublisher;
use crate::users::domain::model::UserEntity;
use crate::users::domain::UserService;
use crate::users::dto::{UserDto, UserUpdateDto};
use crate::users::repository::UserRepository;

pub(crate) struct UserServiceImpl {
    user_repository: Box<dyn UserRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl UserServiceImpl {
    pub(crate) fn new(user_repository: Box<dyn UserRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            user_repository,
            events_publisher,
        }
    }

    async fn check_email_unused(&self, email: &str, user_id: Option<&str>) -> SharingResult<()> {
        let existing = self.user_repository.find_by_email(email).await?;
        if existing.iter().any(|u| Some(u.user_id.as_str()) != user_id) {
            return Err(SharingError::duplicate_key(
                format!("user with email {} already exists", email).as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn add_user(&self, user: &UserDto) -> SharingResult<UserDto> {
        if user.name.trim().is_empty() {
            return Err(SharingError::validation("user name should not be blank", Some("400".to_string())));
        }
        if user.email.trim().is_empty() {
            return Err(SharingError::validation("user email should not be blank", Some("400".to_string())));
        }
        self.check_email_unused(user.email.as_str(), None).await?;
        let entity = UserEntity::from(user);
        self.user_repository.create(&entity).await?;
        let saved = UserDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "user_added", "users", saved.user_id.as_str(), &HashMap::new(), &saved.clone())?).await?;
        Ok(saved)
    }

    async fn update_user(&self, id: &str, updates: &UserUpdateDto) -> SharingResult<UserDto> {
        let mut entity = self.user_repository.get(id).await?;
        if let Some(name) = &updates.name {
            entity.user_name = name.to_string();
        }
        if let Some(email) = &updates.email {
            self.check_email_unused(email.as_str(), Some(id)).await?;
            entity.email = email.to_string();
        }
        entity.updated_at = Utc::now().naive_utc();
        self.user_repository.update(&entity).await?;
        let updated = self.user_repository.get(id).await.map(|u| UserDto::from(&u))?;
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "user_updated", "users", id, &HashMap::new(), &updated.clone())?).await?;
        Ok(updated)
    }

    async fn find_user_by_id(&self, id: &str) -> SharingResult<UserDto> {
        self.user_repository.get(id).await.map(|u| UserDto::from(&u))
    }

    async fn remove_user(&self, id: &str) -> SharingResult<UserDto> {
        let removed = self.user_repository.get(id).await.map(|u| UserDto::from(&u))?;
        self.user_repository.delete(id).await?;
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "user_removed", "users", id, &HashMap::new(), &removed.clone())?).await?;
        Ok(removed)
    }

    async fn find_all_users(&self, page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<UserDto>> {
        let res = self.user_repository.query(&HashMap::new(), page, page_size).await?;
        let records = res.records.iter().map(UserDto::from).collect();
        Ok(PaginatedResult::new(page, page_size, res.next_page, records))
    }
}

impl From<&UserEntity> for UserDto {
    fn from(other: &UserEntity) -> UserDto {
        UserDto {
            user_id: other.user_id.to_string(),
            version: other.version,
            name: other.user_name.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&UserDto> for UserEntity {
    fn from(other: &UserDto) -> UserEntity {
        UserEntity {
            user_id: other.user_id.to_string(),
            version: other.version,
            user_name: other.name.to_string(),
            email: other.email.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}
