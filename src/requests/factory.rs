use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::items::factory::create_item_service;
use crate::requests::domain::service::RequestServiceImpl;
use crate::requests::domain::RequestService;
use crate::requests::repository::ddb_request_repository::DDBRequestRepository;
use crate::requests::repository::mem_request_repository::MemRequestRepository;
use crate::requests::repository::RequestRepository;
use crate::users::factory::create_user_service;
use crate::utils::ddb::{build_db_client, create_table, index_name};

pub(crate) async fn create_request_repository(store: RepositoryStore) -> Box<dyn RequestRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBRequestRepository::new(client, "requests", index_name("requests", "requester_id").as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "requests", "request_id", &[("requester_id", "created_at")]).await;
            Box::new(DDBRequestRepository::new(client, "requests", index_name("requests", "requester_id").as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemRequestRepository::new())
        }
    }
}

pub(crate) async fn create_request_service(config: &Configuration, store: RepositoryStore) -> Box<dyn RequestService> {
    let request_repo = create_request_repository(store).await;
    let user_svc = create_user_service(config, store).await;
    let item_svc = create_item_service(config, store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(RequestServiceImpl::new(request_repo, user_svc, item_svc, publisher))
}
