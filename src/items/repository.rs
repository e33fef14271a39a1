pub mod ddb_item_repository;
pub mod mem_item_repository;
pub mod ddb_comment_repository;
pub mod mem_comment_repository;

use async_trait::async_trait;
use crate::core::repository::Repository;
use crate::core::sharing::SharingResult;
use crate::items::domain::model::{CommentEntity, ItemEntity};

#[async_trait]
pub(crate) trait ItemRepository : Repository<ItemEntity> {
    async fn find_by_owner(&self, owner_id: &str) -> SharingResult<Vec<ItemEntity>>;

    async fn find_by_request(&self, request_id: &str) -> SharingResult<Vec<ItemEntity>>;

    // free-text search over name/description, available items only
    async fn search_available(&self, text: &str) -> SharingResult<Vec<ItemEntity>>;
}

#[async_trait]
pub(crate) trait CommentRepository : Repository<CommentEntity> {
    async fn find_by_item(&self, item_id: &str) -> SharingResult<Vec<CommentEntity>>;
}
