use async_trait::async_trait;
use crate::core::sharing::SharingResult;
use crate::bookings::dto::{BookingCreateDto, BookingDto, PageRequest};

pub mod model;
pub mod rules;
pub mod service;

// The lifecycle service is the only writer of booking records; every
// operation validates the actors and the target through the domain rules
// before touching the store.
#[async_trait]
pub(crate) trait BookingService: Sync + Send {
    async fn save(&self, booking: &BookingCreateDto, requester_id: &str) -> SharingResult<BookingDto>;
    async fn change_booking_status(&self, booking_id: &str, approved: bool, requester_id: &str) -> SharingResult<BookingDto>;
    async fn find_booking_by_id(&self, requester_id: &str, booking_id: &str) -> SharingResult<BookingDto>;
    async fn find_bookings_by_state(&self, booker_id: &str, state: &str, page: &PageRequest) -> SharingResult<Vec<BookingDto>>;
    async fn find_owner_bookings_by_state(&self, owner_id: &str, state: &str, page: &PageRequest) -> SharingResult<Vec<BookingDto>>;
}
