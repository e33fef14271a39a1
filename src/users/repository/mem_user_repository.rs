use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use lazy_static::lazy_static;

use crate::core::repository::Repository;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::users::domain::model::UserEntity;
use crate::users::repository::UserRepository;
use crate::utils::memory::{entity_matches, paginate};

lazy_static! {
    // process-wide store, like the in-memory storage of the original system
    static ref USERS: RwLock<HashMap<String, UserEntity>> = RwLock::new(HashMap::new());
}

#[derive(Debug)]
pub(crate) struct MemUserRepository;

impl MemUserRepository {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Repository<UserEntity> for MemUserRepository {
    async fn create(&self, entity: &UserEntity) -> SharingResult<usize> {
        let mut users = USERS.write().unwrap();
        if users.contains_key(entity.user_id.as_str()) {
            return Err(SharingError::duplicate_key(format!("user {} already exists", entity.user_id).as_str()));
        }
        users.insert(entity.user_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &UserEntity) -> SharingResult<usize> {
        let mut users = USERS.write().unwrap();
        match users.get(entity.user_id.as_str()) {
            Some(existing) if existing.version == entity.version => {
                let mut next = entity.clone();
                next.version += 1;
                users.insert(next.user_id.clone(), next);
                Ok(1)
            }
            Some(_) => Err(SharingError::database(
                format!("user {} version conflict", entity.user_id).as_str(), None, false)),
            None => Err(SharingError::not_found(format!("user not found for {}", entity.user_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SharingResult<UserEntity> {
        USERS.read().unwrap().get(id).cloned()
            .ok_or_else(|| SharingError::not_found(format!("user not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        USERS.write().unwrap().remove(id)
            .map(|_| 1)
            .ok_or_else(|| SharingError::not_found(format!("user not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<UserEntity>> {
        let mut records: Vec<UserEntity> = USERS.read().unwrap().values()
            .filter(|u| serde_json::to_value(u).map(|v| entity_matches(&v, predicate)).unwrap_or(false))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let (slice, next_page) = paginate(records, page, page_size);
        Ok(PaginatedResult::new(page, page_size, next_page, slice))
    }
}

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn find_by_email(&self, email: &str) -> SharingResult<Vec<UserEntity>> {
        Ok(USERS.read().unwrap().values()
            .filter(|u| u.email == email)
            .cloned()
            .collect())
    }
}
