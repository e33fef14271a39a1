use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde_json::Value;
use crate::bookings::command::change_booking_status_cmd::{ChangeBookingStatusCommand, ChangeBookingStatusCommandRequest, ChangeBookingStatusCommandResponse};
use crate::bookings::command::create_booking_cmd::{CreateBookingCommand, CreateBookingCommandRequest, CreateBookingCommandResponse};
use crate::bookings::command::get_booking_cmd::{GetBookingCommand, GetBookingCommandRequest, GetBookingCommandResponse};
use crate::bookings::command::query_bookings_cmd::{QueryBookingsCommand, QueryBookingsCommandRequest, QueryBookingsCommandResponse};
use crate::bookings::command::query_owner_bookings_cmd::{QueryOwnerBookingsCommand, QueryOwnerBookingsCommandRequest, QueryOwnerBookingsCommandResponse};
use crate::bookings::domain::BookingService;
use crate::bookings::factory;
use crate::core::command::Command;
use crate::core::controller::{json_to_server_error, AppState, ServerError};

async fn build_service(state: AppState) -> Box<dyn BookingService> {
    factory::create_booking_service(&state.config, state.store).await
}

pub(crate) async fn create_booking(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<CreateBookingCommandResponse>, ServerError> {
    let req: CreateBookingCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let svc = build_service(state).await;
    let res = CreateBookingCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct StatusParams {
    requester_id: String,
    approved: bool,
}

pub(crate) async fn change_booking_status(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    Query(params): Query<StatusParams>) -> Result<Json<ChangeBookingStatusCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = ChangeBookingStatusCommand::new(svc).execute(
        ChangeBookingStatusCommandRequest::new(booking_id.as_str(),
                                               params.requester_id.as_str(),
                                               params.approved)).await?;
    Ok(Json(res))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct RequesterParams {
    requester_id: String,
}

pub(crate) async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    Query(params): Query<RequesterParams>) -> Result<Json<GetBookingCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = GetBookingCommand::new(svc).execute(
        GetBookingCommandRequest::new(booking_id.as_str(), params.requester_id.as_str())).await?;
    Ok(Json(res))
}

pub(crate) async fn query_bookings(
    State(state): State<AppState>,
    Query(req): Query<QueryBookingsCommandRequest>) -> Result<Json<QueryBookingsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryBookingsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn query_owner_bookings(
    State(state): State<AppState>,
    Query(req): Query<QueryOwnerBookingsCommandRequest>) -> Result<Json<QueryOwnerBookingsCommandResponse>, ServerError> {
    let svc = build_service(state).await;
    let res = QueryOwnerBookingsCommand::new(svc).execute(req).await?;
    Ok(Json(res))
}
