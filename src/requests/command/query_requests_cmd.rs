use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::bookings::dto::PageRequest;
use crate::core::command::{Command, CommandError};
use crate::requests::domain::RequestService;
use crate::requests::dto::RequestWithProposalsDto;

// Lists the caller's own requests, or everyone else's when `others` is set.
pub(crate) struct QueryRequestsCommand {
    request_service: Box<dyn RequestService>,
}

impl QueryRequestsCommand {
    pub(crate) fn new(request_service: Box<dyn RequestService>) -> Self {
        Self {
            request_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryRequestsCommandRequest {
    pub user_id: String,
    #[serde(default)]
    pub others: bool,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl QueryRequestsCommandRequest {
    pub fn new(user_id: &str, others: bool, from: Option<i64>, size: Option<i64>) -> Self {
        Self {
            user_id: user_id.to_string(),
            others,
            from,
            size,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryRequestsCommandResponse {
    pub requests: Vec<RequestWithProposalsDto>,
}

impl QueryRequestsCommandResponse {
    pub fn new(requests: Vec<RequestWithProposalsDto>) -> Self {
        Self {
            requests,
        }
    }
}

#[async_trait]
impl Command<QueryRequestsCommandRequest, QueryRequestsCommandResponse> for QueryRequestsCommand {
    async fn execute(&self, req: QueryRequestsCommandRequest) -> Result<QueryRequestsCommandResponse, CommandError> {
        if req.others {
            let page = PageRequest::new(req.from, req.size);
            self.request_service.find_other_requests(req.user_id.as_str(), &page)
                .await.map_err(CommandError::from).map(QueryRequestsCommandResponse::new)
        } else {
            self.request_service.find_own_requests(req.user_id.as_str())
                .await.map_err(CommandError::from).map(QueryRequestsCommandResponse::new)
        }
    }
}
