use crate::bookings::domain::service::BookingServiceImpl;
use crate::bookings::domain::BookingService;
use crate::bookings::repository::ddb_booking_repository::DDBBookingRepository;
use crate::bookings::repository::mem_booking_repository::MemBookingRepository;
use crate::bookings::repository::BookingRepository;
use crate::bookings::search::BookingSearchFactory;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::items::factory::create_item_service;
use crate::users::factory::create_user_service;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_booking_repository(store: RepositoryStore) -> Box<dyn BookingRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBBookingRepository::new(client, "bookings"))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "bookings", "booking_id",
                                 &[("booker_id", "start_at"),
                                   ("owner_id", "start_at"),
                                   ("item_id", "start_at")]).await;
            Box::new(DDBBookingRepository::new(client, "bookings"))
        }
        RepositoryStore::InMemory => {
            Box::new(MemBookingRepository::new())
        }
    }
}

pub(crate) async fn create_booking_service(config: &Configuration, store: RepositoryStore) -> Box<dyn BookingService> {
    let booking_repo = create_booking_repository(store).await;
    let user_svc = create_user_service(config, store).await;
    let item_svc = create_item_service(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(BookingServiceImpl::new(booking_repo, user_svc, item_svc,
                                     BookingSearchFactory::new(), publisher))
}
