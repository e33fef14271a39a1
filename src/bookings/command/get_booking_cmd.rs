use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::bookings::domain::BookingService;
use crate::bookings::dto::BookingDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct GetBookingCommand {
    booking_service: Box<dyn BookingService>,
}

impl GetBookingCommand {
    pub(crate) fn new(booking_service: Box<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBookingCommandRequest {
    booking_id: String,
    requester_id: String,
}

impl GetBookingCommandRequest {
    pub fn new(booking_id: &str, requester_id: &str) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            requester_id: requester_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBookingCommandResponse {
    pub booking: BookingDto,
}

impl GetBookingCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<GetBookingCommandRequest, GetBookingCommandResponse> for GetBookingCommand {
    async fn execute(&self, req: GetBookingCommandRequest) -> Result<GetBookingCommandResponse, CommandError> {
        self.booking_service.find_booking_by_id(req.requester_id.as_str(), req.booking_id.as_str())
            .await.map_err(CommandError::from).map(GetBookingCommandResponse::new)
    }
}
