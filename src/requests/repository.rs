pub mod ddb_request_repository;
pub mod mem_request_repository;

use async_trait::async_trait;
use crate::core::repository::Repository;
use crate::core::sharing::SharingResult;
use crate::requests::domain::model::RequestEntity;

// Lists come back newest first.
#[async_trait]
pub(crate) trait RequestRepository : Repository<RequestEntity> {
    async fn find_by_requester(&self, requester_id: &str) -> SharingResult<Vec<RequestEntity>>;

    async fn find_created_by_others(&self, user_id: &str) -> SharingResult<Vec<RequestEntity>>;
}
