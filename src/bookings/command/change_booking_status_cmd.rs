use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::bookings::domain::BookingService;
use crate::bookings::dto::BookingDto;
use crate::core::command::{Command, CommandError};

pub(crate) struct ChangeBookingStatusCommand {
    booking_service: Box<dyn BookingService>,
}

impl ChangeBookingStatusCommand {
    pub(crate) fn new(booking_service: Box<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangeBookingStatusCommandRequest {
    booking_id: String,
    requester_id: String,
    approved: bool,
}

impl ChangeBookingStatusCommandRequest {
    pub fn new(booking_id: &str, requester_id: &str, approved: bool) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            requester_id: requester_id.to_string(),
            approved,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChangeBookingStatusCommandResponse {
    pub booking: BookingDto,
}

impl ChangeBookingStatusCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<ChangeBookingStatusCommandRequest, ChangeBookingStatusCommandResponse> for ChangeBookingStatusCommand {
    async fn execute(&self, req: ChangeBookingStatusCommandRequest) -> Result<ChangeBookingStatusCommandResponse, CommandError> {
        self.booking_service.change_booking_status(
            req.booking_id.as_str(), req.approved, req.requester_id.as_str())
            .await.map_err(CommandError::from).map(ChangeBookingStatusCommandResponse::new)
    }
}
