use async_trait::async_trait;
use crate::core::sharing::{PaginatedResult, SharingResult};
use crate::users::dto::{UserDto, UserUpdateDto};

pub mod model;
pub mod service;

#[async_trait]
pub(crate) trait UserService: Sync + Send {
    async fn add_user(&self, user: &UserDto) -> SharingResult<UserDto>;
    async fn update_user(&self, id: &str, updates: &UserUpdateDto) -> SharingResult<UserDto>;
    async fn find_user_by_id(&self, id: &str) -> SharingResult<UserDto>;
    async fn remove_user(&self, id: &str) -> SharingResult<UserDto>;
    async fn find_all_users(&self, page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<UserDto>>;
}
