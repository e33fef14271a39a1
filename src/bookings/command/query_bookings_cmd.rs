use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::bookings::domain::BookingService;
use crate::bookings::dto::{BookingDto, PageRequest};
use crate::core::command::{Command, CommandError};

// Lists the caller's own bookings, sliced by state.
pub(crate) struct QueryBookingsCommand {
    booking_service: Box<dyn BookingService>,
}

impl QueryBookingsCommand {
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
pub(crate) struct QueryBookingsCommandRequest {
    pub booker_id: String,
    #[serde(default = "default_state")]
    pub state: String,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

impl QueryBookingsCommandRequest {
    pub fn new(booker_id: &str, state: &str, from: Option<i64>, size: Option<i64>) -> Self {
        Self {
            booker_id: booker_id.to_string(),
            state: state.to_string(),
            from,
            size,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct QueryBookingsCommandResponse {
    pub bookings: Vec<BookingDto>,
}

impl QueryBookingsCommandResponse {
    pub fn new(bookings: Vec<BookingDto>) -> Self {
        Self {
            bookings,
        }
    }
}

#[async_trait]
impl Command<QueryBookingsCommandRequest, QueryBookingsCommandResponse> for QueryBookingsCommand {
    async fn execute(&self, req: QueryBookingsCommandRequest) -> Result<QueryBookingsCommandResponse, CommandError> {
        let page = PageRequest::new(req.from, req.size);
        self.booking_service.find_bookings_by_state(req.booker_id.as_str(), req.state.as_str(), &page)
            .await.map_err(CommandError::from).map(QueryBookingsCommandResponse::new)
    }
}
