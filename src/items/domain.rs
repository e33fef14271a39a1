use async_trait::async_trait;
use crate::core::sharing::SharingResult;
use crate::items::dto::{CommentDto, ItemDto, ItemUpdateDto};

pub mod model;
pub mod service;

#[async_trait]
pub(crate) trait ItemService: Sync + Send {
    async fn add_item(&self, owner_id: &str, item: &ItemDto) -> SharingResult<ItemDto>;
    async fn update_item(&self, owner_id: &str, id: &str, updates: &ItemUpdateDto) -> SharingResult<ItemDto>;
    async fn find_item_by_id(&self, id: &str) -> SharingResult<ItemDto>;
    async fn find_items_by_owner(&self, owner_id: &str) -> SharingResult<Vec<ItemDto>>;
    async fn find_items_by_request(&self, request_id: &str) -> SharingResult<Vec<ItemDto>>;
    async fn remove_item(&self, owner_id: &str, id: &str) -> SharingResult<ItemDto>;
    async fn search_items(&self, text: &str) -> SharingResult<Vec<ItemDto>>;
    async fn add_comment(&self, item_id: &str, author_id: &str, text: &str) -> SharingResult<CommentDto>;
}
