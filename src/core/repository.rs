use async_trait::async_trait;
use core::option::Option;
use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::core::sharing::{PaginatedResult, SharingResult};
use crate::gateway::GatewayPublisherVia;

#[async_trait]
pub trait Repository<Entity>: Sync + Send {
    // create an entity
    async fn create(&self, entity: &Entity) -> SharingResult<usize>;

    // updates an entity
    async fn update(&self, entity: &Entity) -> SharingResult<usize>;

    // get an entity
    async fn get(&self, id: &str) -> SharingResult<Entity>;

    // delete an entity
    async fn delete(&self, id: &str) -> SharingResult<usize>;

    // find entities matching the predicate
    async fn query(&self, predicate: &HashMap::<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<Entity>>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub(crate) enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    InMemory,
}

impl RepositoryStore {
    pub fn gateway_publisher(&self) -> GatewayPublisherVia  {
        match self {
            RepositoryStore::DynamoDB => {GatewayPublisherVia::Sns},
            RepositoryStore::LocalDynamoDB => {GatewayPublisherVia::LocalDynamoDB},
            RepositoryStore::InMemory => {GatewayPublisherVia::Logs},
        }
    }
}
