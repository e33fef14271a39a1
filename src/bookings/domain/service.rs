use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use tracing::log::debug;
use crate::bookings::domain::model::BookingEntity;
use crate::bookings::domain::rules;
use crate::bookings::domain::BookingService;
use crate::bookings::dto::{BookingCreateDto, BookingDto, PageRequest};
use crate::bookings::repository::BookingRepository;
use crate::bookings::search::BookingSearchFactory;
use crate::core::events::DomainEvent;
use crate::core::sharing::{BookingState, SharingResult};
use crate::gateway::events::EventPublisher;
use crate::items::domain::ItemService;
use crate::users::domain::UserService;

pub(crate) struct BookingServiceImpl {
    booking_repository: Box<dyn BookingRepository>,
    user_service: Box<dyn UserService>,
    item_service: Box<dyn ItemService>,
    search_factory: BookingSearchFactory,
    events_publisher: Box<dyn EventPublisher>,
}

impl BookingServiceImpl {
    pub(crate) fn new(booking_repository: Box<dyn BookingRepository>,
                      user_service: Box<dyn UserService>,
                      item_service: Box<dyn ItemService>,
                      search_factory: BookingSearchFactory,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            booking_repository,
            user_service,
            item_service,
            search_factory,
            events_publisher,
        }
    }
}

#[async_trait]
impl BookingService for BookingServiceImpl {
    async fn save(&self, booking: &BookingCreateDto, requester_id: &str) -> SharingResult<BookingDto> {
        let booker = self.user_service.find_user_by_id(requester_id).await?;
        let item = self.item_service.find_item_by_id(booking.item_id.as_str()).await?;
        let (start_at, end_at) = rules::require_period(booking.start_at, booking.end_at)?;
        rules::validate_not_owner(&item, requester_id)?;
        rules::validate_period(start_at, end_at, Utc::now().naive_utc())?;
        rules::validate_available(&item)?;
        let existing = self.booking_repository.search_overlapping(
            item.item_id.as_str(), start_at, end_at).await?;
        rules::validate_no_overlap(&existing)?;

        let entity = BookingEntity::from_item_booker(&item, &booker, start_at, end_at);
        self.booking_repository.create(&entity).await?;
        let saved = BookingDto::from(&entity);
        debug!("booking {} saved for booker {}", saved.booking_id, requester_id);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "booking_created", "bookings", saved.booking_id.as_str(), &HashMap::new(), &saved.clone())?).await?;
        Ok(saved)
    }

    async fn change_booking_status(&self, booking_id: &str, approved: bool, requester_id: &str) -> SharingResult<BookingDto> {
        let mut booking = self.booking_repository.get(booking_id).await?;
        rules::validate_owner(&booking, requester_id)?;
        let target = rules::status_for(approved);
        rules::validate_status_change(&booking, target)?;
        booking.booking_status = target;
        booking.updated_at = Utc::now().naive_utc();
        self.booking_repository.update(&booking).await?;
        let updated = self.booking_repository.get(booking_id).await.map(|b| BookingDto::from(&b))?;
        debug!("booking {} status changed to {}", booking_id, target);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "booking_status_changed", "bookings", booking_id, &HashMap::new(), &updated.clone())?).await?;
        Ok(updated)
    }

    async fn find_booking_by_id(&self, requester_id: &str, booking_id: &str) -> SharingResult<BookingDto> {
        let booking = self.booking_repository.get(booking_id).await?;
        rules::validate_access(&booking, requester_id)?;
        Ok(BookingDto::from(&booking))
    }

    async fn find_bookings_by_state(&self, booker_id: &str, state: &str, page: &PageRequest) -> SharingResult<Vec<BookingDto>> {
        let _ = self.user_service.find_user_by_id(booker_id).await?;
        let state = BookingState::parse(state)?;
        let records = self.search_factory.search_for(state)?
            .bookings_for_booker(booker_id, self.booking_repository.as_ref()).await?;
        page.validate()?;
        Ok(page.slice(records).iter().map(BookingDto::from).collect())
    }

    async fn find_owner_bookings_by_state(&self, owner_id: &str, state: &str, page: &PageRequest) -> SharingResult<Vec<BookingDto>> {
        let _ = self.user_service.find_user_by_id(owner_id).await?;
        let state = BookingState::parse(state)?;
        let records = self.search_factory.search_for(state)?
            .bookings_for_owner(owner_id, self.booking_repository.as_ref()).await?;
        page.validate()?;
        Ok(page.slice(records).iter().map(BookingDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::{Duration, Utc};
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::bookings::domain::BookingService;
    use crate::bookings::dto::{BookingCreateDto, PageRequest};
    use crate::bookings::factory;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::core::sharing::{BookingStatus, SharingError};
    use crate::items::domain::ItemService;
    use crate::items::dto::ItemDto;
    use crate::items::factory::create_item_service;
    use crate::users::domain::UserService;
    use crate::users::dto::UserDto;
    use crate::users::factory::create_user_service;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn BookingService>> = AsyncOnce::new(async {
                factory::create_booking_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref USER_SVC: AsyncOnce<Box<dyn UserService>> = AsyncOnce::new(async {
                create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref ITEM_SVC: AsyncOnce<Box<dyn ItemService>> = AsyncOnce::new(async {
                create_item_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    async fn add_user(name: &str) -> UserDto {
        let user = UserDto::new(name, format!("{}@example.org", Uuid::new_v4()).as_str());
        USER_SVC.get().await.add_user(&user).await.expect("should add user")
    }

    async fn add_item(owner: &UserDto, available: bool) -> ItemDto {
        let item = ItemDto::new(owner.user_id.as_str(), "drill", "cordless drill", available);
        ITEM_SVC.get().await.add_item(owner.user_id.as_str(), &item).await.expect("should add item")
    }

    fn period(start_days: i64, end_days: i64) -> (Option<chrono::NaiveDateTime>, Option<chrono::NaiveDateTime>) {
        let now = Utc::now().naive_utc();
        (Some(now + Duration::days(start_days)), Some(now + Duration::days(end_days)))
    }

    #[tokio::test]
    async fn test_should_save_booking_as_waiting() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(1, 2);
        let booking = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                       booker.user_id.as_str()).await.expect("should save booking");
        assert_eq!(BookingStatus::Waiting, booking.status);
        assert_eq!(item.item_id, booking.item.item_id);
        assert_eq!(booker.user_id, booking.booker.user_id);
        assert_eq!(owner.user_id, booking.item.owner_id);
    }

    #[tokio::test]
    async fn test_should_reject_booking_for_unknown_user_or_item() {
        let booking_svc = SUT_SVC.get().await.clone();
        let booker = add_user("booker").await;

        let (start_at, end_at) = period(1, 2);
        let res = booking_svc.save(&BookingCreateDto::new("missing-item", start_at, end_at),
                                   "missing-user").await;
        assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
        let res = booking_svc.save(&BookingCreateDto::new("missing-item", start_at, end_at),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_missing_period_ends() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(1, 2);
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), None, end_at),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, None),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_deny_owner_booking_own_item() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(1, 2);
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                   owner.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::AccessDenied { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_inverted_or_past_period() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(2, 1);
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));

        let (start_at, end_at) = period(-2, -1);
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));

        let (start_at, _) = period(1, 2);
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, start_at),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_unavailable_item() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, false).await;

        let (start_at, end_at) = period(1, 2);
        let res = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                   booker.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_approve_then_reject_double_booking() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let third = add_user("third").await;
        let item = add_item(&owner, true).await;
        let now = Utc::now().naive_utc();

        // B books [now+1d, now+2d)
        let booking = booking_svc.save(&BookingCreateDto::new(
            item.item_id.as_str(), Some(now + Duration::days(1)), Some(now + Duration::days(2))),
            booker.user_id.as_str()).await.expect("should save booking");
        assert_eq!(BookingStatus::Waiting, booking.status);

        // the owner approves
        let approved = booking_svc.change_booking_status(
            booking.booking_id.as_str(), true, owner.user_id.as_str()).await.expect("should approve");
        assert_eq!(BookingStatus::Approved, approved.status);

        // C asks for an overlapping period
        let res = booking_svc.save(&BookingCreateDto::new(
            item.item_id.as_str(), Some(now + Duration::hours(36)), Some(now + Duration::hours(60))),
            third.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));

        // B asks for a disjoint period
        let second = booking_svc.save(&BookingCreateDto::new(
            item.item_id.as_str(), Some(now + Duration::days(3)), Some(now + Duration::days(4))),
            booker.user_id.as_str()).await.expect("should save booking");
        assert_eq!(BookingStatus::Waiting, second.status);

        // the approved booking no longer shows up as waiting for the owner
        let waiting = booking_svc.find_owner_bookings_by_state(
            owner.user_id.as_str(), "WAITING", &PageRequest::default()).await.expect("should list");
        assert_eq!(vec![second.booking_id.clone()],
                   waiting.iter().map(|b| b.booking_id.clone()).collect::<Vec<_>>());

        // both bookings, newest start first
        let all = booking_svc.find_owner_bookings_by_state(
            owner.user_id.as_str(), "ALL", &PageRequest::default()).await.expect("should list");
        assert_eq!(vec![second.booking_id.clone(), booking.booking_id.clone()],
                   all.iter().map(|b| b.booking_id.clone()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_should_reject_redundant_approval() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(1, 2);
        let booking = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                       booker.user_id.as_str()).await.expect("should save booking");
        let approved = booking_svc.change_booking_status(
            booking.booking_id.as_str(), true, owner.user_id.as_str()).await.expect("should approve");
        assert_eq!(BookingStatus::Approved, approved.status);

        let res = booking_svc.change_booking_status(
            booking.booking_id.as_str(), true, owner.user_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_deny_status_change_by_non_owner() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(1, 2);
        let booking = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                       booker.user_id.as_str()).await.expect("should save booking");
        for approved in [true, false] {
            let res = booking_svc.change_booking_status(
                booking.booking_id.as_str(), approved, booker.user_id.as_str()).await;
            assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
        }
    }

    #[tokio::test]
    async fn test_should_limit_booking_read_access() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let stranger = add_user("stranger").await;
        let item = add_item(&owner, true).await;

        let (start_at, end_at) = period(1, 2);
        let booking = booking_svc.save(&BookingCreateDto::new(item.item_id.as_str(), start_at, end_at),
                                       booker.user_id.as_str()).await.expect("should save booking");

        let seen = booking_svc.find_booking_by_id(booker.user_id.as_str(), booking.booking_id.as_str())
            .await.expect("booker should see booking");
        assert_eq!(booking.booking_id, seen.booking_id);
        let seen = booking_svc.find_booking_by_id(owner.user_id.as_str(), booking.booking_id.as_str())
            .await.expect("owner should see booking");
        assert_eq!(booking.booking_id, seen.booking_id);
        let res = booking_svc.find_booking_by_id(stranger.user_id.as_str(), booking.booking_id.as_str()).await;
        assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_unknown_state_token() {
        let booking_svc = SUT_SVC.get().await.clone();
        let user = add_user("user").await;

        let res = booking_svc.find_bookings_by_state(
            user.user_id.as_str(), "BOGUS", &PageRequest::default()).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_listing_for_unknown_user() {
        let booking_svc = SUT_SVC.get().await.clone();

        let res = booking_svc.find_bookings_by_state(
            "missing-user", "ALL", &PageRequest::default()).await;
        assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_reject_invalid_pagination() {
        let booking_svc = SUT_SVC.get().await.clone();
        let user = add_user("user").await;

        let res = booking_svc.find_bookings_by_state(
            user.user_id.as_str(), "ALL", &PageRequest::new(Some(-1), None)).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
        let res = booking_svc.find_bookings_by_state(
            user.user_id.as_str(), "ALL", &PageRequest::new(None, Some(0))).await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_page_ordered_bookings() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;
        let now = Utc::now().naive_utc();

        let mut ids = vec![];
        for i in 0..3 {
            let booking = booking_svc.save(&BookingCreateDto::new(
                item.item_id.as_str(),
                Some(now + Duration::days(1 + 2 * i)),
                Some(now + Duration::days(2 + 2 * i))),
                booker.user_id.as_str()).await.expect("should save booking");
            ids.push(booking.booking_id);
        }

        let all = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "ALL", &PageRequest::default()).await.expect("should list");
        assert_eq!(vec![ids[2].clone(), ids[1].clone(), ids[0].clone()],
                   all.iter().map(|b| b.booking_id.clone()).collect::<Vec<_>>());

        // from=1, size=1 over the ordered result returns exactly the middle one
        let pageed = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "ALL", &PageRequest::new(Some(1), Some(1))).await.expect("should list");
        assert_eq!(vec![ids[1].clone()],
                   pageed.iter().map(|b| b.booking_id.clone()).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_should_bucket_booker_states() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let item = add_item(&owner, true).await;
        let now = Utc::now().naive_utc();

        let booking = booking_svc.save(&BookingCreateDto::new(
            item.item_id.as_str(), Some(now + Duration::days(1)), Some(now + Duration::days(2))),
            booker.user_id.as_str()).await.expect("should save booking");

        let waiting = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "WAITING", &PageRequest::default()).await.expect("should list");
        assert_eq!(1, waiting.len());
        let future = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "FUTURE", &PageRequest::default()).await.expect("should list");
        assert_eq!(1, future.len());
        let past = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "PAST", &PageRequest::default()).await.expect("should list");
        assert!(past.is_empty());
        let current = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "CURRENT", &PageRequest::default()).await.expect("should list");
        assert!(current.is_empty());

        let rejected = booking_svc.change_booking_status(
            booking.booking_id.as_str(), false, owner.user_id.as_str()).await.expect("should reject");
        assert_eq!(BookingStatus::Rejected, rejected.status);
        let rejected_list = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "REJECTED", &PageRequest::default()).await.expect("should list");
        assert_eq!(1, rejected_list.len());
        let waiting = booking_svc.find_bookings_by_state(
            booker.user_id.as_str(), "WAITING", &PageRequest::default()).await.expect("should list");
        assert!(waiting.is_empty());
    }

    #[tokio::test]
    async fn test_should_allow_rebooking_over_rejected_period() {
        let booking_svc = SUT_SVC.get().await.clone();
        let owner = add_user("owner").await;
        let booker = add_user("booker").await;
        let third = add_user("third").await;
        let item = add_item(&owner, true).await;
        let now = Utc::now().naive_utc();

        let booking = booking_svc.save(&BookingCreateDto::new(
            item.item_id.as_str(), Some(now + Duration::days(1)), Some(now + Duration::days(2))),
            booker.user_id.as_str()).await.expect("should save booking");
        let _ = booking_svc.change_booking_status(
            booking.booking_id.as_str(), false, owner.user_id.as_str()).await.expect("should reject");

        // a rejected booking frees the interval
        let replacement = booking_svc.save(&BookingCreateDto::new(
            item.item_id.as_str(), Some(now + Duration::hours(30)), Some(now + Duration::hours(42))),
            third.user_id.as_str()).await.expect("should save booking");
        assert_eq!(BookingStatus::Waiting, replacement.status);
    }
}
