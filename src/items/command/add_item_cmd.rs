use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::items::domain::ItemService;
use crate::items::dto::ItemDto;

pub(crate) struct AddItemCommand {
    item_service: Box<dyn ItemService>,
}

impl AddItemCommand {
    pub(crate) fn new(item_service: Box<dyn ItemService>) -> Self {
        Self {
            item_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddItemCommandRequest {
    owner_id: String,
    name: String,
    description: String,
    available: bool,
    request_id: Option<String>,
}

impl AddItemCommandRequest {
    pub fn new(owner_id: &str, name: &str, description: &str, available: bool) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            available,
            request_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddItemCommandResponse {
    pub item: ItemDto,
}

impl AddItemCommandResponse {
    pub fn new(item: ItemDto) -> Self {
        Self {
            item,
        }
    }
}

#[async_trait]
impl Command<AddItemCommandRequest, AddItemCommandResponse> for AddItemCommand {
    async fn execute(&self, req: AddItemCommandRequest) -> Result<AddItemCommandResponse, CommandError> {
        let mut item = ItemDto::new(req.owner_id.as_str(), req.name.as_str(),
                                    req.description.as_str(), req.available);
        item.request_id = req.request_id.clone();
        self.item_service.add_item(req.owner_id.as_str(), &item)
            .await.map_err(CommandError::from).map(AddItemCommandResponse::new)
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
    use crate::items::command::add_item_cmd::{AddItemCommand, AddItemCommandRequest};
    use crate::items::factory::create_item_service;
    use crate::users::command::add_user_cmd::{AddUserCommand, AddUserCommandRequest};
    use crate::users::factory::create_user_service;

    lazy_static! {
        static ref USER_CMD : AsyncOnce<AddUserCommand> = AsyncOnce::new(async {
                let svc = create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddUserCommand::new(svc)
            });
        static ref ITEM_CMD : AsyncOnce<AddItemCommand> = AsyncOnce::new(async {
                let svc = create_item_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddItemCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_item() {
        let user_cmd: &AddUserCommand = USER_CMD.get().await.clone();
        let item_cmd: &AddItemCommand = ITEM_CMD.get().await.clone();

        let email = format!("{}@example.org", Uuid::new_v4());
        let owner = user_cmd.execute(AddUserCommandRequest::new("ivan", email.as_str()))
            .await.expect("should add user");
        let res = item_cmd.execute(AddItemCommandRequest::new(
            owner.user.user_id.as_str(), "canoe", "red canoe", true)).await.expect("should add item");
        assert_eq!(owner.user.user_id, res.item.owner);
    }
}
