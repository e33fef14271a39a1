use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::requests::domain::RequestService;
use crate::requests::dto::RequestDto;

pub(crate) struct AddRequestCommand {
    request_service: Box<dyn RequestService>,
}

impl AddRequestCommand {
    pub(crate) fn new(request_service: Box<dyn RequestService>) -> Self {
        Self {
            request_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddRequestCommandRequest {
    requester_id: String,
    description: String,
}

impl AddRequestCommandRequest {
    pub fn new(requester_id: &str, description: &str) -> Self {
        Self {
            requester_id: requester_id.to_string(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddRequestCommandResponse {
    pub request: RequestDto,
}

impl AddRequestCommandResponse {
    pub fn new(request: RequestDto) -> Self {
        Self {
            request,
        }
    }
}

#[async_trait]
impl Command<AddRequestCommandRequest, AddRequestCommandResponse> for AddRequestCommand {
    async fn execute(&self, req: AddRequestCommandRequest) -> Result<AddRequestCommandResponse, CommandError> {
        self.request_service.add_request(req.requester_id.as_str(), req.description.as_str())
            .await.map_err(CommandError::from).map(AddRequestCommandResponse::new)
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
    use crate::requests::command::add_request_cmd::{AddRequestCommand, AddRequestCommandRequest};
    use crate::requests::factory::create_request_service;
    use crate::users::command::add_user_cmd::{AddUserCommand, AddUserCommandRequest};
    use crate::users::factory::create_user_service;

    lazy_static! {
        static ref USER_CMD : AsyncOnce<AddUserCommand> = AsyncOnce::new(async {
                let svc = create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddUserCommand::new(svc)
            });
        static ref REQUEST_CMD : AsyncOnce<AddRequestCommand> = AsyncOnce::new(async {
                let svc = create_request_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddRequestCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_add_request() {
        let user_cmd: &AddUserCommand = USER_CMD.get().await.clone();
        let request_cmd: &AddRequestCommand = REQUEST_CMD.get().await.clone();

        let requester = user_cmd.execute(AddUserCommandRequest::new(
            "judy", format!("{}@example.org", Uuid::new_v4()).as_str())).await.expect("should add user");
        let res = request_cmd.execute(AddRequestCommandRequest::new(
            requester.user.user_id.as_str(), "need a projector")).await.expect("should add request");
        assert_eq!(requester.user.user_id, res.request.requester_id);
    }
}
