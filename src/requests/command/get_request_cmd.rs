use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::requests::domain::RequestService;
use crate::requests::dto::RequestWithProposalsDto;

pub(crate) struct GetRequestCommand {
    request_service: Box<dyn RequestService>,
}

impl GetRequestCommand {
    pub(crate) fn new(request_service: Box<dyn RequestService>) -> Self {
        Self {
            request_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetRequestCommandRequest {
    request_id: String,
    user_id: String,
}

impl GetRequestCommandRequest {
    pub fn new(request_id: &str, user_id: &str) -> Self {
        Self {
            request_id: request_id.to_string(),
            user_id: user_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetRequestCommandResponse {
    pub request: RequestWithProposalsDto,
}

impl GetRequestCommandResponse {
    pub fn new(request: RequestWithProposalsDto) -> Self {
        Self {
            request,
        }
    }
}

#[async_trait]
impl Command<GetRequestCommandRequest, GetRequestCommandResponse> for GetRequestCommand {
    async fn execute(&self, req: GetRequestCommandRequest) -> Result<GetRequestCommandResponse, CommandError> {
        self.request_service.find_request_by_id(req.user_id.as_str(), req.request_id.as_str())
            .await.map_err(CommandError::from).map(GetRequestCommandResponse::new)
    }
}
