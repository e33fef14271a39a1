use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use lazy_static::lazy_static;

use crate::bookings::domain::model::BookingEntity;
use crate::bookings::domain::rules;
use crate::bookings::repository::BookingRepository;
use crate::core::repository::Repository;
use crate::core::sharing::{BookingStatus, PaginatedResult, SharingError, SharingResult};
use crate::utils::memory::{entity_matches, paginate};

lazy_static! {
    static ref BOOKINGS: RwLock<HashMap<String, BookingEntity>> = RwLock::new(HashMap::new());
}

#[derive(Debug)]
pub(crate) struct MemBookingRepository;

impl MemBookingRepository {
    pub(crate) fn new() -> Self {
        Self
    }

    // snapshot matching bookings ordered newest start first
    fn collect<F>(&self, filter: F) -> Vec<BookingEntity>
    where F: Fn(&BookingEntity) -> bool {
        let mut records: Vec<BookingEntity> = BOOKINGS.read().unwrap().values()
            .filter(|b| filter(b))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.start_at.cmp(&a.start_at));
        records
    }
}

#[async_trait]
impl Repository<BookingEntity> for MemBookingRepository {
    async fn create(&self, entity: &BookingEntity) -> SharingResult<usize> {
        let mut bookings = BOOKINGS.write().unwrap();
        if bookings.contains_key(entity.booking_id.as_str()) {
            return Err(SharingError::duplicate_key(format!("booking {} already exists", entity.booking_id).as_str()));
        }
        bookings.insert(entity.booking_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &BookingEntity) -> SharingResult<usize> {
        let mut bookings = BOOKINGS.write().unwrap();
        match bookings.get(entity.booking_id.as_str()) {
            Some(existing) if existing.version == entity.version => {
                let mut next = entity.clone();
                next.version += 1;
                bookings.insert(next.booking_id.clone(), next);
                Ok(1)
            }
            Some(_) => Err(SharingError::database(
                format!("booking {} version conflict", entity.booking_id).as_str(), None, false)),
            None => Err(SharingError::not_found(format!("booking not found for {}", entity.booking_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SharingResult<BookingEntity> {
        BOOKINGS.read().unwrap().get(id).cloned()
            .ok_or_else(|| SharingError::not_found(format!("booking not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        BOOKINGS.write().unwrap().remove(id)
            .map(|_| 1)
            .ok_or_else(|| SharingError::not_found(format!("booking not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<BookingEntity>> {
        let mut records: Vec<BookingEntity> = BOOKINGS.read().unwrap().values()
            .filter(|b| serde_json::to_value(b).map(|v| entity_matches(&v, predicate)).unwrap_or(false))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.start_at.cmp(&a.start_at));
        let (slice, next_page) = paginate(records, page, page_size);
        Ok(PaginatedResult::new(page, page_size, next_page, slice))
    }
}

#[async_trait]
impl BookingRepository for MemBookingRepository {
    async fn search_by_booker(&self, booker_id: &str) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.booker_id == booker_id))
    }

    async fn search_by_booker_and_status(&self, booker_id: &str, status: BookingStatus) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.booker_id == booker_id && b.booking_status == status))
    }

    async fn search_by_booker_in_present(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.booker_id == booker_id && b.start_at < at && b.end_at > at))
    }

    async fn search_by_booker_in_past(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.booker_id == booker_id && b.end_at < at))
    }

    async fn search_by_booker_in_future(&self, booker_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.booker_id == booker_id && b.start_at > at))
    }

    async fn search_by_owner(&self, owner_id: &str) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.owner_id == owner_id))
    }

    async fn search_by_owner_and_status(&self, owner_id: &str, status: BookingStatus) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.owner_id == owner_id && b.booking_status == status))
    }

    async fn search_by_owner_in_present(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.owner_id == owner_id && b.start_at < at && b.end_at > at))
    }

    async fn search_by_owner_in_past(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.owner_id == owner_id && b.end_at < at))
    }

    async fn search_by_owner_in_future(&self, owner_id: &str, at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.owner_id == owner_id && b.start_at > at && b.end_at > at))
    }

    async fn search_overlapping(&self, item_id: &str,
                                start_at: NaiveDateTime, end_at: NaiveDateTime) -> SharingResult<Vec<BookingEntity>> {
        Ok(self.collect(|b| b.item_id == item_id && rules::overlaps(b, start_at, end_at)))
    }

    async fn exists_finished_booking(&self, item_id: &str, booker_id: &str,
                                     before: NaiveDateTime) -> SharingResult<bool> {
        Ok(BOOKINGS.read().unwrap().values()
            .any(|b| b.item_id == item_id && b.booker_id == booker_id
                && b.booking_status == BookingStatus::Approved && b.end_at < before))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;
    use crate::bookings::domain::model::BookingEntity;
    use crate::bookings::repository::mem_booking_repository::MemBookingRepository;
    use crate::bookings::repository::BookingRepository;
    use crate::core::repository::Repository;
    use crate::core::sharing::BookingStatus;

    #[tokio::test]
    async fn test_should_create_update_booking() {
        let repo = MemBookingRepository::new();
        let start_at = Utc::now().naive_utc() + Duration::days(1);
        let mut booking = BookingEntity::sample(Uuid::new_v4().to_string().as_str(),
                                                Uuid::new_v4().to_string().as_str(),
                                                start_at, start_at + Duration::days(1));
        assert_eq!(1, repo.create(&booking).await.expect("should create booking"));

        booking.booking_status = BookingStatus::Approved;
        assert_eq!(1, repo.update(&booking).await.expect("should update booking"));
        let loaded = repo.get(booking.booking_id.as_str()).await.expect("should return booking");
        assert_eq!(BookingStatus::Approved, loaded.booking_status);
        assert_eq!(1, loaded.version);
    }

    #[tokio::test]
    async fn test_should_order_newest_start_first() {
        let repo = MemBookingRepository::new();
        let booker_id = Uuid::new_v4().to_string();
        let base = Utc::now().naive_utc() + Duration::days(1);
        let early = BookingEntity::sample(Uuid::new_v4().to_string().as_str(), booker_id.as_str(),
                                          base, base + Duration::days(1));
        let late = BookingEntity::sample(Uuid::new_v4().to_string().as_str(), booker_id.as_str(),
                                         base + Duration::days(3), base + Duration::days(4));
        let _ = repo.create(&early).await.expect("should create booking");
        let _ = repo.create(&late).await.expect("should create booking");

        let listed = repo.search_by_booker(booker_id.as_str()).await.expect("should search");
        assert_eq!(vec![late.booking_id, early.booking_id],
                   listed.iter().map(|b| b.booking_id.clone()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_should_find_overlapping_bookings() {
        let repo = MemBookingRepository::new();
        let item_id = Uuid::new_v4().to_string();
        let base = Utc::now().naive_utc() + Duration::days(10);
        let existing = BookingEntity::sample(item_id.as_str(), Uuid::new_v4().to_string().as_str(),
                                             base, base + Duration::days(2));
        let _ = repo.create(&existing).await.expect("should create booking");

        let hits = repo.search_overlapping(item_id.as_str(),
                                           base + Duration::days(1), base + Duration::days(3))
            .await.expect("should search");
        assert_eq!(1, hits.len());

        let misses = repo.search_overlapping(item_id.as_str(),
                                             base + Duration::days(2), base + Duration::days(3))
            .await.expect("should search");
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_should_detect_finished_booking() {
        let repo = MemBookingRepository::new();
        let item_id = Uuid::new_v4().to_string();
        let booker_id = Uuid::new_v4().to_string();
        let now = Utc::now().naive_utc();
        let mut finished = BookingEntity::sample(item_id.as_str(), booker_id.as_str(),
                                                 now - Duration::days(3), now - Duration::days(2));
        finished.booking_status = BookingStatus::Approved;
        let _ = repo.create(&finished).await.expect("should create booking");

        assert!(repo.exists_finished_booking(item_id.as_str(), booker_id.as_str(), now)
            .await.expect("should check"));
        assert!(!repo.exists_finished_booking(item_id.as_str(), "someone-else", now)
            .await.expect("should check"));
    }
}
