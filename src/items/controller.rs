use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};
use crate::items::command::add_comment_cmd::{AddCommentCommand, AddCommentCommandRequest, AddCommentCommandResponse};
use crate::items::command::add_item_cmd::{AddItemCommand, AddItemCommandRequest, AddItemCommandResponse};
use crate::items::command::get_item_cmd::{GetItemCommand, GetItemCommandRequest, GetItemCommandResponse};
use crate::items::command::query_items_cmd::{QueryItemsCommand, QueryItemsCommandRequest, QueryItemsCommandResponse};
use crate::items::command::search_items_cmd::{SearchItemsCommand, SearchItemsCommandRequest, SearchItemsCommandResponse};
use crate::items::command::update_item_cmd::{UpdateItemCommand, UpdateItemCommandRequest, UpdateItemCommandResponse};
use crate::items::domain::ItemService;
use crate::items::factory;

async fn build_service(state: AppState) -> Box<dyn ItemService> {
    factory::create_item_service(&state.config, state.store).await
}

pub(crate) async fn add_item(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddItemCommandResponse>, ServerError> {
    let req: AddItemCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddItemCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>) -> Result<Json<GetItemCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetItemCommand::new(svc).execute(GetItemCommandRequest::new(item_id.as_str())).await?;
    Ok(Json(res))
}

pub(crate) async fn query_items(
    State(state): State<AppState>,
    Query(req): Query<QueryItemsCommandRequest>) -> Result<Json<QueryItemsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryItemsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn search_items(
    State(state): State<AppState>,
    Query(req): Query<SearchItemsCommandRequest>) -> Result<Json<SearchItemsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = SearchItemsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateItemCommandResponse>, ServerError> {
    let updates: serde_json::Map<String, Value> = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let owner_id = updates.get("owner_id").and_then(Value::as_str).unwrap_or_default().to_string();
    let req = UpdateItemCommandRequest::new(
        owner_id.as_str(),
        item_id.as_str(),
        updates.get("name").and_then(Value::as_str),
        updates.get("description").and_then(Value::as_str),
        updates.get("available").and_then(Value::as_bool));
    let svc = build_service(state).await;
    let res = UpdateItemCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn add_comment(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    json: Json<Value>) -> Result<Json<AddCommentCommandResponse>, ServerError> {
    let body: serde_json::Map<String, Value> = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let author_id = body.get("author_id").and_then(Value::as_str).unwrap_or_default().to_string();
    let text = body.get("text").and_then(Value::as_str).unwrap_or_default().to_string();
    let svc = build_service(state).await;
    let res = AddCommentCommand::new(svc).execute(
        AddCommentCommandRequest::new(item_id.as_str(), author_id.as_str(), text.as_str())).await?;
    Ok(Json(res))
}
