pub mod ddb_user_repository;
pub mod mem_user_repository;

use async_trait::async_trait;
use crate::core::repository::Repository;
use crate::core::sharing::SharingResult;
use crate::users::domain::model::UserEntity;

#[async_trait]
pub(crate) trait UserRepository : Repository<UserEntity> {
    async fn find_by_email(&self, email: &str) -> SharingResult<Vec<UserEntity>>;
}
