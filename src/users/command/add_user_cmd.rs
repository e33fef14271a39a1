use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::users::domain::UserService;
use crate::users::dto::UserDto;

pub(crate) struct AddUserCommand {
    user_service: Box<dyn UserService>,
}

impl AddUserCommand {
    pub(crate) fn new(user_service: Box<dyn UserService>) -> Self {
        Self {
            user_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddUserCommandRequest {
    name: String,
    email: String,
}

impl AddUserCommandRequest {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddUserCommandResponse {
    pub user: UserDto,
}

impl AddUserCommandResponse {
    pub fn new(user: UserDto) -> Self {
        Self {
            user,
        }
    }
}

#[async_trait]
impl Command<AddUserCommandRequest, AddUserCommandResponse> for AddUserCommand {
    async fn execute(&self, req: AddUserCommandRequest) -> Result<AddUserCommandResponse, CommandError> {
        self.user_service.add_user(&UserDto::new(req.name.as_str(), req.email.as_str()))
            .await.map_err(CommandError::from).map(AddUserCommandResponse::new)
    }
}
