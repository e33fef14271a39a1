use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::bookings::domain::BookingService;
use crate::bookings::dto::{BookingCreateDto, BookingDto};
use crate::core::command::{Command, CommandError};

pub(crate) struct CreateBookingCommand {
    booking_service: Box<dyn BookingService>,
}

impl CreateBookingCommand {
    pub(crate) fn new(booking_service: Box<dyn BookingService>) -> Self {
        Self {
            booking_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBookingCommandRequest {
    booker_id: String,
    item_id: String,
    start_at: Option<NaiveDateTime>,
    end_at: Option<NaiveDateTime>,
}

impl CreateBookingCommandRequest {
    pub fn new(booker_id: &str, item_id: &str,
               start_at: Option<NaiveDateTime>, end_at: Option<NaiveDateTime>) -> Self {
        Self {
            booker_id: booker_id.to_string(),
            item_id: item_id.to_string(),
            start_at,
            end_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBookingCommandResponse {
    pub booking: BookingDto,
}

impl CreateBookingCommandResponse {
    pub fn new(booking: BookingDto) -> Self {
        Self {
            booking,
        }
    }
}

#[async_trait]
impl Command<CreateBookingCommandRequest, CreateBookingCommandResponse> for CreateBookingCommand {
    async fn execute(&self, req: CreateBookingCommandRequest) -> Result<CreateBookingCommandResponse, CommandError> {
        let candidate = BookingCreateDto::new(req.item_id.as_str(), req.start_at, req.end_at);
        self.booking_service.save(&candidate, req.booker_id.as_str())
            .await.map_err(CommandError::from).map(CreateBookingCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::bookings::command::create_booking_cmd::{CreateBookingCommand, CreateBookingCommandRequest};
    use crate::bookings::factory::create_booking_service;
    use crate::core::command::Command;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::core::sharing::BookingStatus;
    use crate::items::command::add_item_cmd::{AddItemCommand, AddItemCommandRequest};
    use crate::items::factory::create_item_service;
    use crate::users::command::add_user_cmd::{AddUserCommand, AddUserCommandRequest};
    use crate::users::factory::create_user_service;

    lazy_static! {
        static ref USER_CMD : AsyncOnce<AddUserCommand> = AsyncOnce::new(async {
                let svc = create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddUserCommand::new(svc)
            });
        static ref ITEM_CMD : AsyncOnce<AddItemCommand> = AsyncOnce::new(async {
                let svc = create_item_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                AddItemCommand::new(svc)
            });
        static ref BOOKING_CMD : AsyncOnce<CreateBookingCommand> = AsyncOnce::new(async {
                let svc = create_booking_service(&Configuration::new("test"), RepositoryStore::InMemory).await;
                CreateBookingCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_create_booking() {
        let user_cmd: &AddUserCommand = USER_CMD.get().await.clone();
        let item_cmd: &AddItemCommand = ITEM_CMD.get().await.clone();
        let booking_cmd: &CreateBookingCommand = BOOKING_CMD.get().await.clone();

        let owner = user_cmd.execute(AddUserCommandRequest::new(
            "owner", format!("{}@example.org", Uuid::new_v4()).as_str())).await.expect("should add owner");
        let booker = user_cmd.execute(AddUserCommandRequest::new(
            "booker", format!("{}@example.org", Uuid::new_v4()).as_str())).await.expect("should add booker");
        let item = item_cmd.execute(AddItemCommandRequest::new(
            owner.user.user_id.as_str(), "drill", "cordless drill", true)).await.expect("should add item");

        let now = Utc::now().naive_utc();
        let res = booking_cmd.execute(CreateBookingCommandRequest::new(
            booker.user.user_id.as_str(), item.item.item_id.as_str(),
            Some(now + Duration::days(1)), Some(now + Duration::days(2)))).await.expect("should create booking");
        assert_eq!(BookingStatus::Waiting, res.booking.status);
        assert_eq!(booker.user.user_id, res.booking.booker.user_id);
    }
}
