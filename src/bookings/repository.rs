pub mod ddb_booking_repository;
pub mod mem_booking_repository;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::bookings::domain::model::BookingEntity;
use crate::core::repository::Repository;
use crate::core::sharing::{BookingStatus, SharingResult};

// Query shapes the booking store supports: the six state buckets for the
// booker view and the owner view, the interval overlap lookup used at
// admission time, and the finished-booking check consumed by the comment
// subsystem. All lists come back ordered newest start first.
#[async_trait]
pub(crate) trait BookingRepository : Repository<BookingEntity> {
    async fn search_by_booker(&self, booker_id: &str) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_booker_and_status(&self, booker_id: &str, status: BookingStatus) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_booker_in_present(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_booker_in_past(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_booker_in_future(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_owner(&self, owner_id: &str) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_owner_and_status(&self, owner_id: &str, status: BookingStatus) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_owner_in_present(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_owner_in_past(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    async fn search_by_owner_in_future(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    // bookings on the item whose interval intersects [start_at, end_at),
    // regardless of status; the admission rules filter by status
    async fn search_overlapping(&self, item_id: &str,
                                start_at: NaiveDateTime, end_at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>>;

    // whether the booker holds an approved booking of the item that ended
    // before the given instant
    async fn exists_finished_booking(&self, item_id: &str, booker_id: &str,
                                     before: NaiveDateTime) -> SharingResult<bool>;
}
