use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::items::domain::ItemService;
use crate::items::dto::ItemDto;

pub(crate) struct SearchItemsCommand {
    item_service: Box<dyn ItemService>,
}

impl SearchItemsCommand {
    pub(crate) fn new(item_service: Box<dyn ItemService>) -> Self {
        Self {
            item_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItemsCommandRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SearchItemsCommandResponse {
    pub items: Vec<ItemDto>,
}

impl SearchItemsCommandResponse {
    pub fn new(items: Vec<ItemDto>) -> Self {
        Self {
            items,
        }
    }
}

#[async_trait]
impl Command<SearchItemsCommandRequest, SearchItemsCommandResponse> for SearchItemsCommand {
    async fn execute(&self, req: SearchItemsCommandRequest) -> Result<SearchItemsCommandResponse, CommandError> {
        self.item_service.search_items(req.text.as_str())
            .await.map_err(CommandError::from).map(SearchItemsCommandResponse::new)
    }
}
