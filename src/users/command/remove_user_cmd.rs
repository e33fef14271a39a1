use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::users::domain::UserService;
use crate::users::dto::UserDto;

pub(crate) struct RemoveUserCommand {
    user_service: Box<dyn UserService>,
}

impl RemoveUserCommand {
    pub(crate) fn new(user_service: Box<dyn UserService>) -> Self {
        Self {
            user_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RemoveUserCommandRequest {
    user_id: String,
}

impl RemoveUserCommandRequest {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveUserCommandResponse {
    pub user: UserDto,
}

impl RemoveUserCommandResponse {
    pub fn new(user: UserDto) -> Self {
        Self {
            user,
        }
    }
}

#[async_trait]
impl Command<RemoveUserCommandRequest, RemoveUserCommandResponse> for RemoveUserCommand {
    async fn execute(&self, req: RemoveUserCommandRequest) -> Result<RemoveUserCommandResponse, CommandError> {
        self.user_service.remove_user(req.user_id.as_str())
            .await.map_err(CommandError::from).map(RemoveUserCommandResponse::new)
    }
}
