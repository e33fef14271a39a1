use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::items::domain::ItemService;
use crate::items::dto::{ItemDto, ItemUpdateDto};

pub(crate) struct UpdateItemCommand {
    item_service: Box<dyn ItemService>,
}

impl UpdateItemCommand {
    pub(crate) fn new(item_service: Box<dyn ItemService>) -> Self {
        Self {
            item_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateItemCommandRequest {
    owner_id: String,
    item_id: String,
    name: Option<String>,
    description: Option<String>,
    available: Option<bool>,
}

impl UpdateItemCommandRequest {
    pub fn new(owner_id: &str, item_id: &str, name: Option<&str>,
               description: Option<&str>, available: Option<bool>) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            item_id: item_id.to_string(),
            name: name.map(str::to_string),
            description: description.map(str::to_string),
            available,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateItemCommandResponse {
    pub item: ItemDto,
}

impl UpdateItemCommandResponse {
    pub fn new(item: ItemDto) -> Self {
        Self {
            item,
        }
    }
}

#[async_trait]
impl Command<UpdateItemCommandRequest, UpdateItemCommandResponse> for UpdateItemCommand {
    async fn execute(&self, req: UpdateItemCommandRequest) -> Result<UpdateItemCommandResponse, CommandError> {
        let updates = ItemUpdateDto {
            name: req.name.clone(),
            description: req.description.clone(),
            available: req.available,
        };
        self.item_service.update_item(req.owner_id.as_str(), req.item_id.as_str(), &updates)
            .await.map_err(CommandError::from).map(UpdateItemCommandResponse::new)
    }
}
