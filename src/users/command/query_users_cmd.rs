use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::users::domain::UserService;
use crate::users::dto::UserDto;

pub(crate) struct QueryUsersCommand {
    user_service: Box<dyn UserService>,
}

impl QueryUsersCommand {
    pub(crate) fn new(user_service: Box<dyn UserService>) -> Self {
        Self {
            user_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryUsersCommandRequest {
    pub page: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryUsersCommandResponse {
    pub users: Vec<UserDto>,
    pub next_page: Option<String>,
}

impl QueryUsersCommandResponse {
    pub fn new(users: Vec<UserDto>, next_page: Option<String>) -> Self {
        Self {
            users,
            next_page,
        }
    }
}

#[async_trait]
impl Command<QueryUsersCommandRequest, QueryUsersCommandResponse> for QueryUsersCommand {
    async fn execute(&self, req: QueryUsersCommandRequest) -> Result<QueryUsersCommandResponse, CommandError> {
        self.user_service.find_all_users(req.page.as_deref(), req.page_size.unwrap_or(10))
            .await.map_err(CommandError::from)
            .map(|res| QueryUsersCommandResponse::new(res.records, res.next_page))
    }
}
