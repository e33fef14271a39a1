use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::items::domain::ItemService;
use crate::items::dto::CommentDto;

pub(crate) struct AddCommentCommand {
    item_service: Box<dyn ItemService>,
}

impl AddCommentCommand {
    pub(crate) fn new(item_service: Box<dyn ItemService>) -> Self {
        Self {
            item_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddCommentCommandRequest {
    item_id: String,
    author_id: String,
    text: String,
}

impl AddCommentCommandRequest {
    pub fn new(item_id: &str, author_id: &str, text: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
            author_id: author_id.to_string(),
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddCommentCommandResponse {
    pub comment: CommentDto,
}

impl AddCommentCommandResponse {
    pub fn new(comment: CommentDto) -> Self {
        Self {
            comment,
        }
    }
}

#[async_trait]
impl Command<AddCommentCommandRequest, AddCommentCommandResponse> for AddCommentCommand {
    async fn execute(&self, req: AddCommentCommandRequest) -> Result<AddCommentCommandResponse, CommandError> {
        self.item_service.add_comment(req.item_id.as_str(), req.author_id.as_str(), req.text.as_str())
            .await.map_err(CommandError::from).map(AddCommentCommandResponse::new)
    }
}
