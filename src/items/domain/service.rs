use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use crate::bookings::repository::BookingRepository;
use crate::core::events::DomainEvent;
use crate::core::sharing::{SharingError, SharingResult};
use crate::gateway::events::EventPublisher;
use crate::items::domain::model::{CommentEntity, ItemEntity};
use crate::items::domain::ItemService;
use crate::items::dto::{CommentDto, ItemDto, ItemUpdateDto};
use crate::items::repository::{CommentRepository, ItemRepository};
use crate::users::domain::UserService;

pub(crate) struct ItemServiceImpl {
    item_repository: Box<dyn ItemRepository>,
    comment_repository: Box<dyn CommentRepository>,
    user_service: Box<dyn UserService>,
    booking_repository: Box<dyn BookingRepository>,
    events_publisher: Box<dyn EventPublisher>,
}

impl ItemServiceImpl {
    pub(crate) fn new(item_repository: Box<dyn ItemRepository>,
                      comment_repository: Box<dyn CommentRepository>,
                      user_service: Box<dyn UserService>,
                      booking_repository: Box<dyn BookingRepository>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            item_repository,
            comment_repository,
            user_service,
            booking_repository,
            events_publisher,
        }
    }

    async fn attach_comments(&self, item: &ItemEntity) -> SharingResult<ItemDto> {
        let comments = self.comment_repository.find_by_item(item.item_id.as_str()).await?;
        let mut dto = ItemDto::from(item);
        dto.comments = comments.iter().map(CommentDto::from).collect();
        Ok(dto)
    }
}

#[async_trait]
impl ItemService for ItemServiceImpl {
    async fn add_item(&self, owner_id: &str, item: &ItemDto) -> SharingResult<ItemDto> {
        if item.name.trim().is_empty() {
            return Err(SharingError::validation("item name should not be blank", Some("400".to_string())));
        }
        if item.description.trim().is_empty() {
            return Err(SharingError::validation("item description should not be blank", Some("400".to_string())));
        }
        let _ = self.user_service.find_user_by_id(owner_id).await?;
        let mut entity = ItemEntity::from(item);
        entity.owner_id = owner_id.to_string();
        self.item_repository.create(&entity).await?;
        let saved = ItemDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "item_added", "items", saved.item_id.as_str(), &HashMap::new(), &saved.clone())?).await?;
        Ok(saved)
    }

    async fn update_item(&self, owner_id: &str, id: &str, updates: &ItemUpdateDto) -> SharingResult<ItemDto> {
        let _ = self.user_service.find_user_by_id(owner_id).await?;
        let mut entity = self.item_repository.get(id).await?;
        if entity.owner_id != owner_id {
            return Err(SharingError::access_denied(
                format!("item {} can be updated only by its owner", id).as_str(), Some("403".to_string())));
        }
        if let Some(name) = &updates.name {
            entity.item_name = name.to_string();
        }
        if let Some(description) = &updates.description {
            entity.item_description = description.to_string();
        }
        if let Some(available) = updates.available {
            entity.is_available = available;
        }
        entity.updated_at = Utc::now().naive_utc();
        self.item_repository.update(&entity).await?;
        let updated = self.item_repository.get(id).await.map(|i| ItemDto::from(&i))?;
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "item_updated", "items", id, &HashMap::new(), &updated.clone())?).await?;
        Ok(updated)
    }

    async fn find_item_by_id(&self, id: &str) -> SharingResult<ItemDto> {
        let entity = self.item_repository.get(id).await?;
        self.attach_comments(&entity).await
    }

    async fn find_items_by_owner(&self, owner_id: &str) -> SharingResult<Vec<ItemDto>> {
        let _ = self.user_service.find_user_by_id(owner_id).await?;
        let items = self.item_repository.find_by_owner(owner_id).await?;
        Ok(items.iter().map(ItemDto::from).collect())
    }

    async fn find_items_by_request(&self, request_id: &str) -> SharingResult<Vec<ItemDto>> {
        let items = self.item_repository.find_by_request(request_id).await?;
        Ok(items.iter().map(ItemDto::from).collect())
    }

    async fn remove_item(&self, owner_id: &str, id: &str) -> SharingResult<ItemDto> {
        let entity = self.item_repository.get(id).await?;
        if entity.owner_id != owner_id {
            return Err(SharingError::access_denied(
                format!("item {} can be removed only by its owner", id).as_str(), Some("403".to_string())));
        }
        self.item_repository.delete(id).await?;
        let removed = ItemDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::deleted(
            "item_removed", "items", id, &HashMap::new(), &removed.clone())?).await?;
        Ok(removed)
    }

    async fn search_items(&self, text: &str) -> SharingResult<Vec<ItemDto>> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }
        let items = self.item_repository.search_available(text).await?;
        Ok(items.iter().map(ItemDto::from).collect())
    }

    async fn add_comment(&self, item_id: &str, author_id: &str, text: &str) -> SharingResult<CommentDto> {
        let author = self.user_service.find_user_by_id(author_id).await?;
        if text.trim().is_empty() {
            return Err(SharingError::validation("comment text should not be blank", Some("400".to_string())));
        }
        let item = self.item_repository.get(item_id).await?;
        let finished = self.booking_repository.exists_finished_booking(
            item.item_id.as_str(), author_id, Utc::now().naive_utc()).await?;
        if !finished {
            return Err(SharingError::validation(
                format!("user {} has no finished booking of item {}", author_id, item_id).as_str(),
                Some("400".to_string())));
        }
        let entity = CommentEntity::new(item.item_id.as_str(), author_id, author.name.as_str(), text);
        self.comment_repository.create(&entity).await?;
        let comment = CommentDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "comment_added", "items", comment.comment_id.as_str(), &HashMap::new(), &comment.clone())?).await?;
        Ok(comment)
    }
}

impl From<&ItemEntity> for ItemDto {
    fn from(other: &ItemEntity) -> ItemDto {
        ItemDto {
            item_id: other.item_id.to_string(),
            version: other.version,
            owner: other.owner_id.to_string(),
            name: other.item_name.to_string(),
            description: other.item_description.to_string(),
            available: other.is_available,
            request_id: other.request_id.clone(),
            comments: vec![],
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&ItemDto> for ItemEntity {
    fn from(other: &ItemDto) -> ItemEntity {
        ItemEntity {
            item_id: other.item_id.to_string(),
            version: other.version,
            owner_id: other.owner.to_string(),
            item_name: other.name.to_string(),
            item_description: other.description.to_string(),
            is_available: other.available,
            request_id: other.request_id.clone(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&CommentEntity> for CommentDto {
    fn from(other: &CommentEntity) -> CommentDto {
        CommentDto {
            comment_id: other.comment_id.to_string(),
            item_id: other.item_id.to_string(),
            author_id: other.author_id.to_string(),
            author_name: other.author_name.to_string(),
            text: other.comment_text.to_string(),
            created_at: other.created_at,
        }
    }
}
