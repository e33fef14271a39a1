use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::users::domain::UserService;
use crate::users::dto::{UserDto, UserUpdateDto};

pub(crate) struct UpdateUserCommand {
    user_service: Box<dyn UserService>,
}

impl UpdateUserCommand {
    pub(crate) fn new(user_service: Box<dyn UserService>) -> Self {
        Self {
            user_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateUserCommandRequest {
    user_id: String,
    name: Option<String>,
    email: Option<String>,
}

impl UpdateUserCommandRequest {
    pub fn new(user_id: &str, name: Option<&str>, email: Option<&str>) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateUserCommandResponse {
    pub user: UserDto,
}

impl UpdateUserCommandResponse {
    pub fn new(user: UserDto) -> Self {
        Self {
            user,
        }
    }
}

#[async_trait]
impl Command<UpdateUserCommandRequest, UpdateUserCommandResponse> for UpdateUserCommand {
    async fn execute(&self, req: UpdateUserCommandRequest) -> Result<UpdateUserCommandResponse, CommandError> {
        let updates = UserUpdateDto { name: req.name.clone(), email: req.email.clone() };
        self.user_service.update_user(req.user_id.as_str(), &updates)
            .await.map_err(CommandError::from).map(UpdateUserCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::users::command::add_user_cmd::{AddUserCommand, AddUserCommandRequest};
    use crate::users::command::update_user_cmd::{UpdateUserCommand, UpdateUserCommandRequest};
    use crate::users::factory::create_user_service;

    lazy_static! {
        static ref ADD_CMD : AsyncOnce<AddUserCommand> = AsyncOnce::new(async {
                let svc = create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddUserCommand::new(svc)
            });
        static ref UPDATE_CMD : AsyncOnce<UpdateUserCommand> = AsyncOnce::new(async {
                let svc = create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                UpdateUserCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_update_user() {
        let add_cmd: &AddUserCommand = ADD_CMD.get().await.clone();
        let update_cmd: &UpdateUserCommand = UPDATE_CMD.get().await.clone();

        let email = format!("{}@example.org", Uuid::new_v4());
        let added = add_cmd.execute(AddUserCommandRequest::new("frank", email.as_str()))
            .await.expect("should add user");
        let res = update_cmd.execute(UpdateUserCommandRequest::new(
            added.user.user_id.as_str(), Some("francis"), None)).await.expect("should update user");
        assert_eq!("francis", res.user.name.as_str());
    }
}
