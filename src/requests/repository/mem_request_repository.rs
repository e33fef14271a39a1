use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use lazy_static::lazy_static;

use crate::core::repository::Repository;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::requests::domain::model::RequestEntity;
use crate::requests::repository::RequestRepository;
use crate::utils::memory::{entity_matches, paginate};

lazy_static! {
    static ref REQUESTS: RwLock<HashMap<String, RequestEntity>> = RwLock::new(HashMap::new());
}

#[derive(Debug)]
pub(crate) struct MemRequestRepository;

impl MemRequestRepository {
    pub(crate) fn new() -> Self {
        Self
    }

    fn collect<F>(&self, filter: F) -> Vec<RequestEntity>
    where F: Fn(&RequestEntity) -> bool {
        let mut records: Vec<RequestEntity> = REQUESTS.read().unwrap().values()
            .filter(|r| filter(r))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }
}

#[async_trait]
impl Repository<RequestEntity> for MemRequestRepository {
    async fn create(&self, entity: &RequestEntity) -> SharingResult<usize> {
        let mut requests = REQUESTS.write().unwrap();
        if requests.contains_key(entity.request_id.as_str()) {
            return Err(SharingError::duplicate_key(format!("request {} already exists", entity.request_id).as_str()));
        }
        requests.insert(entity.request_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &RequestEntity) -> SharingResult<usize> {
        let mut requests = REQUESTS.write().unwrap();
        match requests.get(entity.request_id.as_str()) {
            Some(existing) if existing.version == entity.version => {
                let mut next = entity.clone();
                next.version += 1;
                requests.insert(next.request_id.clone(), next);
                Ok(1)
            }
            Some(_) => Err(SharingError::database(
                format!("request {} version conflict", entity.request_id).as_str(), None, false)),
            None => Err(SharingError::not_found(format!("request not found for {}", entity.request_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SharingResult<RequestEntity> {
        REQUESTS.read().unwrap().get(id).cloned()
            .ok_or_else(|| SharingError::not_found(format!("request not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        REQUESTS.write().unwrap().remove(id)
            .map(|_| 1)
            .ok_or_else(|| SharingError::not_found(format!("request not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<RequestEntity>> {
        let mut records: Vec<RequestEntity> = REQUESTS.read().unwrap().values()
            .filter(|r| serde_json::to_value(r).map(|v| entity_matches(&v, predicate)).unwrap_or(false))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let (slice, next_page) = paginate(records, page, page_size);
        Ok(PaginatedResult::new(page, page_size, next_page, slice))
    }
}

#[async_trait]
impl RequestRepository for MemRequestRepository {
    async fn find_by_requester(&self, requester_id: &str) -> SharingResult<Vec<RequestEntity>> {
        Ok(self.collect(|r| r.requester_id == requester_id))
    }

    async fn find_created_by_others(&self, user_id: &str) -> SharingResult<Vec<RequestEntity>> {
        Ok(self.collect(|r| r.requester_id != user_id))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::repository::Repository;
    use crate::requests::domain::model::RequestEntity;
    use crate::requests::repository::mem_request_repository::MemRequestRepository;
    use crate::requests::repository::RequestRepository;

    #[tokio::test]
    async fn test_should_create_and_list_requests() {
        let repo = MemRequestRepository::new();
        let requester_id = Uuid::new_v4().to_string();
        let request = RequestEntity::new(requester_id.as_str(), "need a drill");
        assert_eq!(1, repo.create(&request).await.expect("should create request"));

        let own = repo.find_by_requester(requester_id.as_str()).await.expect("should list own");
        assert_eq!(1, own.len());

        let others = repo.find_created_by_others(requester_id.as_str()).await.expect("should list others");
        assert!(others.iter().all(|r| r.requester_id != requester_id));
    }
}
