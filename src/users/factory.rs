use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::factory::create_publisher;
use crate::users::domain::service::UserServiceImpl;
use crate::users::domain::UserService;
use crate::users::repository::ddb_user_repository::DDBUserRepository;
use crate::users::repository::mem_user_repository::MemUserRepository;
use crate::users::repository::UserRepository;
use crate::utils::ddb::{build_db_client, create_table, index_name};

pub(crate) async fn create_user_repository(store: RepositoryStore) -> Box<dyn UserRepository> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBUserRepository::new(client, "users", index_name("users", "email").as_str()))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, "users", "user_id", &[("email", "created_at")]).await;
            Box::new(DDBUserRepository::new(client, "users", index_name("users", "email").as_str()))
        }
        RepositoryStore::InMemory => {
            Box::new(MemUserRepository::new())
        }
    }
}

pub(crate) async fn create_user_service(_config: &Configuration, store: RepositoryStore) -> Box<dyn UserService> {
    let user_repo = create_user_repository(store).await;
    let publisher = create_publisher(store.gateway_publisher()).await;
    Box::new(UserServiceImpl::new(user_repo, publisher))
}
