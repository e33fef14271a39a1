use async_trait::async_trait;
use crate::bookings::dto::PageRequest;
use crate::core::sharing::SharingResult;
use crate::requests::dto::{RequestDto, RequestWithProposalsDto};

pub mod model;
pub mod service;

#[async_trait]
pub(crate) trait RequestService: Sync + Send {
    async fn add_request(&self, requester_id: &str, description: &str) -> SharingResult<RequestDto>;
    async fn find_request_by_id(&self, user_id: &str, request_id: &str) -> SharingResult<RequestWithProposalsDto>;
    async fn find_own_requests(&self, user_id: &str) -> SharingResult<Vec<RequestWithProposalsDto>>;
    async fn find_other_requests(&self, user_id: &str, page: &PageRequest) -> SharingResult<Vec<RequestWithProposalsDto>>;
}
