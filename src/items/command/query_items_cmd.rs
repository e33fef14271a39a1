use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::items::domain::ItemService;
use crate::items::dto::ItemDto;

pub(crate) struct QueryItemsCommand {
    item_service: Box<dyn ItemService>,
}

impl QueryItemsCommand {
    pub(crate) fn new(item_service: Box<dyn ItemService>) -> Self {
        Self {
            item_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryItemsCommandRequest {
    pub owner_id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryItemsCommandResponse {
    pub items: Vec<ItemDto>,
}

impl QueryItemsCommandResponse {
    pub fn new(items: Vec<ItemDto>) -> Self {
        Self {
            items,
        }
    }
}

#[async_trait]
impl Command<QueryItemsCommandRequest, QueryItemsCommandResponse> for QueryItemsCommand {
    async fn execute(&self, req: QueryItemsCommandRequest) -> Result<QueryItemsCommandResponse, CommandError> {
        self.item_service.find_items_by_owner(req.owner_id.as_str())
            .await.map_err(CommandError::from).map(QueryItemsCommandResponse::new)
    }
}
