use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::users::domain::UserService;
use crate::users::dto::UserDto;

pub(crate) struct GetUserCommand {
    user_service: Box<dyn UserService>,
}

impl GetUserCommand {
    pub(crate) fn new(user_service: Box<dyn UserService>) -> Self {
        Self {
            user_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetUserCommandRequest {
    user_id: String,
}

impl GetUserCommandRequest {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUserCommandResponse {
    pub user: UserDto,
}

impl GetUserCommandResponse {
    pub fn new(user: UserDto) -> Self {
        Self {
            user,
        }
    }
}

#[async_trait]
impl Command<GetUserCommandRequest, GetUserCommandResponse> for GetUserCommand {
    async fn execute(&self, req: GetUserCommandRequest) -> Result<GetUserCommandResponse, CommandError> {
        self.user_service.find_user_by_id(req.user_id.as_str())
            .await.map_err(CommandError::from).map(GetUserCommandResponse::new)
    }
}
