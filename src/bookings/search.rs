use std::collections::HashMap;
use async_trait::async_trait;
use chrono::Utc;
use crate::bookings::domain::model::BookingEntity;
use crate::bookings::repository::BookingRepository;
use crate::core::sharing::{BookingState, BookingStatus, SharingError, SharingResult};

// One strategy per state token translates the requested bucket into the
// matching store query, separately for the booker view and the owner view.
#[async_trait]
pub(crate) trait BookingSearch: Sync + Send {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>>;
    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>>;
}

struct SearchAll;

#[async_trait]
impl BookingSearch for SearchAll {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_booker(booker_id).await
    }

    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_owner(owner_id).await
    }
}

struct SearchCurrent;

#[async_trait]
impl BookingSearch for SearchCurrent {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_booker_in_present(booker_id, Utc::now().naive_utc()).await
    }

    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_owner_in_present(owner_id, Utc::now().naive_utc()).await
    }
}

struct SearchPast;

#[async_trait]
impl BookingSearch for SearchPast {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_booker_in_past(booker_id, Utc::now().naive_utc()).await
    }

    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_owner_in_past(owner_id, Utc::now().naive_utc()).await
    }
}

struct SearchFuture;

#[async_trait]
impl BookingSearch for SearchFuture {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_booker_in_future(booker_id, Utc::now().naive_utc()).await
    }

    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_owner_in_future(owner_id, Utc::now().naive_utc()).await
    }
}

struct SearchWaiting;

#[async_trait]
impl BookingSearch for SearchWaiting {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_booker_and_status(booker_id, BookingStatus::Waiting).await
    }

    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_owner_and_status(owner_id, BookingStatus::Waiting).await
    }
}

struct SearchRejected;

#[async_trait]
impl BookingSearch for SearchRejected {
    async fn bookings_for_booker(&self, booker_id: &str,
                                 repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_booker_and_status(booker_id, BookingStatus::Rejected).await
    }

    async fn bookings_for_owner(&self, owner_id: &str,
                                repository: &dyn BookingRepository) -> SharingResult<Vec<BookingEntity>> {
        repository.search_by_owner_and_status(owner_id, BookingStatus::Rejected).await
    }
}

// Immutable state-to-strategy map, built once at service construction and
// passed in, so adding a state is a table edit.
pub(crate) struct BookingSearchFactory {
    strategies: HashMap<BookingState, Box<dyn BookingSearch>>,
}

impl BookingSearchFactory {
    pub(crate) fn new() -> Self {
        let mut strategies: HashMap<BookingState, Box<dyn BookingSearch>> = HashMap::new();
        strategies.insert(BookingState::All, Box::new(SearchAll));
        strategies.insert(BookingState::Current, Box::new(SearchCurrent));
        strategies.insert(BookingState::Past, Box::new(SearchPast));
        strategies.insert(BookingState::Future, Box::new(SearchFuture));
        strategies.insert(BookingState::Waiting, Box::new(SearchWaiting));
        strategies.insert(BookingState::Rejected, Box::new(SearchRejected));
        Self {
            strategies,
        }
    }

    pub(crate) fn search_for(&self, state: BookingState) -> SharingResult<&dyn BookingSearch> {
        self.strategies.get(&state)
            .map(|s| s.as_ref())
            .ok_or_else(|| SharingError::runtime(
                format!("no search strategy for state {}", state).as_str(), None))
    }
}

impl Default for BookingSearchFactory {
    fn default() -> Self {
        Self::new()
    }
}
