use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};
use crate::requests::command::add_request_cmd::{AddRequestCommand, AddRequestCommandRequest, AddRequestCommandResponse};
use crate::requests::command::get_request_cmd::{GetRequestCommand, GetRequestCommandRequest, GetRequestCommandResponse};
use crate::requests::command::query_requests_cmd::{QueryRequestsCommand, QueryRequestsCommandRequest, QueryRequestsCommandResponse};
use crate::requests::domain::RequestService;
use crate::requests::factory;

async fn build_service(state: AppState) -> Box<dyn RequestService> {
    factory::create_request_service(&state.config, state.store).await
}

pub(crate) async fn add_request(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddRequestCommandResponse>, ServerError> {
    let req: AddRequestCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = AddRequestCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct UserParams {
    user_id: String,
}

pub(crate) async fn get_request(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Query(params): Query<UserParams>) -> Result<Json<GetRequestCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetRequestCommand::new(svc).execute(
        GetRequestCommandRequest::new(request_id.as_str(), params.user_id.as_str())).await?;
    Ok(Json(res))
}

pub(crate) async fn query_requests(
    State(state): State<AppState>,
    Query(req): Query<QueryRequestsCommandRequest>) -> Result<Json<QueryRequestsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryRequestsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
