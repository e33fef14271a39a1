use crate::bookings::factory::create_booking_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::items::domain::service::ItemServiceImpl;
use crate::items::domain::ItemService;
use crate::items::repository::ddb_comment_repository::DDBCommentRepository;
use crate::items::repository::ddb_item_repository::DDBItemRepository;
use crate::items::repository::mem_comment_repository::MemCommentRepository;
use crate::items::repository::mem_item_repository::MemItemRepository;
use crate::items::repository::{CommentRepository, ItemRepository};
use crate::users::factory::create_user_service;
use crate::utils::ddb::{build_db_client, create_table, index_name};

pub(crate) async fn create_item_repository(store: RepositoryStore) -> Box<dyn ItemRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBItemRepository::new(client, "items", index_name("items", "owner_id").as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "items", "item_id", &[("owner_id", "created_at")]).await;
            Box::new(DDBItemRepository::new(client, "items", index_name("items", "owner_id").as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemItemRepository::new())
        }
    }
}

pub(crate) async fn create_comment_repository(store: RepositoryStore) -> Box<dyn CommentRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBCommentRepository::new(client, "comments", index_name("comments", "item_id").as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "comments", "comment_id", &[("item_id", "created_at")]).await;
            Box::new(DDBCommentRepository::new(client, "comments", index_name("comments", "item_id").as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemCommentRepository::new())
        }
    }
}

pub(crate) async fn create_item_service(config: &Configuration, store: RepositoryStore) -> Box<dyn ItemService> {
    let item_repo = create_item_repository(store).await;
    let comment_repo = create_comment_repository(store).await;
    let user_svc = create_user_service(config, store).await;
    let booking_repo = create_booking_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(ItemServiceImpl::new(item_repo, comment_repo, user_svc, booking_repo, publisher))
}
