use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};
use crate::users::command::add_user_cmd::{AddUserCommand, AddUserCommandRequest, AddUserCommandResponse};
use crate::users::command::get_user_cmd::{GetUserCommand, GetUserCommandRequest, GetUserCommandResponse};
use crate::users::command::query_users_cmd::{QueryUsersCommand, QueryUsersCommandRequest, QueryUsersCommandResponse};
use crate::users::command::remove_user_cmd::{RemoveUserCommand, RemoveUserCommandRequest, RemoveUserCommandResponse};
use crate::users::command::update_user_cmd::{UpdateUserCommand, UpdateUserCommandRequest, UpdateUserCommandResponse};
use crate::users::domain::UserService;
use crate::users::factory;

async fn build_service(state: AppState) -> Box<dyn UserService> {
    factory::create_user_service(&state.config, state.store).await
}

pub(crate) async fn add_user(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddUserCommandResponse>, ServerError> {
    let req: AddUserCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddUserCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>) -> Result<Json<GetUserCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetUserCommand::new(svc).execute(GetUserCommandRequest::new(user_id.as_str())).await?;
    Ok(Json(res))
}

pub(crate) async fn query_users(
    State(state): State<AppState>,
    Query(req): Query<QueryUsersCommandRequest>) -> Result<Json<QueryUsersCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryUsersCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    json: Json<Value>) -> Result<Json<UpdateUserCommandResponse>, ServerError> {
    let updates: serde_json::Map<String, Value> = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let name = updates.get("name").and_then(Value::as_str);
    let email = updates.get("email").and_then(Value::as_str);
    let svc = build_service(state).await;
    let res = UpdateUserCommand::new(svc).execute(
        UpdateUserCommandRequest::new(user_id.as_str(), name, email)).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>) -> Result<Json<RemoveUserCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = RemoveUserCommand::new(svc).execute(RemoveUserCommandRequest::new(user_id.as_str())).await?;
    Ok(Json(res))
}
