use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::bookings::domain::BookingService;
use crate::bookings::dto::{BookingDto, PageRequest};
use crate::core::command::{Command, CommandError};

// Lists the bookings on items the caller owns, sliced by state.
pub(crate) struct QueryOwnerBookingsCommand {
    booking_service: Box<dyn BookingService>,
}

impl QueryOwnerBookingsCommand {
    pub(crate) fn new(booking_service: Box<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

fn default_state() -> String {
    "ALL".to_string()
}

#[derive(Debug, Deserialize)]
pub(crate) struct QueryOwnerBookingsCommandRequest {
    pub owner_id: String,
    #[serde(default = "default_state")]
    pub state: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl QueryOwnerBookingsCommandRequest {
    pub fn new(owner_id: &str, state: &str, from: Option<i64>, size: Option<i64>) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            state: state.to_string(),
            from,
            size,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryOwnerBookingsCommandResponse {
    pub bookings: Vec<BookingDto>,
}

impl QueryOwnerBookingsCommandResponse {
    pub fn new(bookings: Vec<BookingDto>) -> Self {
        Self {
            bookings,
        }
    }
}

#[async_trait]
impl Command<QueryOwnerBookingsCommandRequest, QueryOwnerBookingsCommandResponse> for QueryOwnerBookingsCommand {
    async fn execute(&self, req: QueryOwnerBookingsCommandRequest) -> Result<QueryOwnerBookingsCommandResponse, CommandError> {
        let page = PageRequest::new(req.from, req.size);
        self.booking_service.find_owner_bookings_by_state(req.owner_id.as_str(), req.state.as_str(), &page)
            .await.map_err(CommandError::from).map(QueryOwnerBookingsCommandResponse::new)
    }
}
