use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use lazy_static::lazy_static;

use crate::core::repository::Repository;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::items::domain::model::ItemEntity;
use crate::items::repository::ItemRepository;
use crate::utils::memory::{entity_matches, paginate};

lazy_static! {
    static ref ITEMS: RwLock<HashMap<String, ItemEntity>> = RwLock::new(HashMap::new());
}

#[derive(Debug)]
pub(crate) struct MemItemRepository;

impl MemItemRepository {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Repository<ItemEntity> for MemItemRepository {
    async fn create(&self, entity: &ItemEntity) -> SharingResult<usize> {
        let mut items = ITEMS.write().unwrap();
        if items.contains_key(entity.item_id.as_str()) {
            return Err(SharingError::duplicate_key(format!("item {} already exists", entity.item_id).as_str()));
        }
        items.insert(entity.item_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &ItemEntity) -> SharingResult<usize> {
        let mut items = ITEMS.write().unwrap();
        match items.get(entity.item_id.as_str()) {
            Some(existing) if existing.version == entity.version => {
                let mut next = entity.clone();
                next.version += 1;
                items.insert(next.item_id.clone(), next);
                Ok(1)
            }
            Some(_) => Err(SharingError::database(
                format!("item {} version conflict", entity.item_id).as_str(), None, false)),
            None => Err(SharingError::not_found(format!("item not found for {}", entity.item_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SharingResult<ItemEntity> {
        ITEMS.read().unwrap().get(id).cloned()
            .ok_or_else(|| SharingError::not_found(format!("item not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        ITEMS.write().unwrap().remove(id)
            .map(|_| 1)
            .ok_or_else(|| SharingError::not_found(format!("item not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<ItemEntity>> {
        let mut records: Vec<ItemEntity> = ITEMS.read().unwrap().values()
            .filter(|i| serde_json::to_value(i).map(|v| entity_matches(&v, predicate)).unwrap_or(false))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let (slice, next_page) = paginate(records, page, page_size);
        Ok(PaginatedResult::new(page, page_size, next_page, slice))
    }
}

#[async_trait]
impl ItemRepository for MemItemRepository {
    async fn find_by_owner(&self, owner_id: &str) -> SharingResult<Vec<ItemEntity>> {
        let mut records: Vec<ItemEntity> = ITEMS.read().unwrap().values()
            .filter(|i| i.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn find_by_request(&self, request_id: &str) -> SharingResult<Vec<ItemEntity>> {
        Ok(ITEMS.read().unwrap().values()
            .filter(|i| i.request_id.as_deref() == Some(request_id))
            .cloned()
            .collect())
    }

    async fn search_available(&self, text: &str) -> SharingResult<Vec<ItemEntity>> {
        let needle = text.trim().to_lowercase();
        Ok(ITEMS.read().unwrap().values()
            .filter(|i| i.is_available
                && (i.item_name.to_lowercase().contains(needle.as_str())
                    || i.item_description.to_lowercase().contains(needle.as_str())))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::repository::Repository;
    use crate::items::domain::model::ItemEntity;
    use crate::items::repository::mem_item_repository::MemItemRepository;
    use crate::items::repository::ItemRepository;

    #[tokio::test]
    async fn test_should_create_get_update_item() {
        let repo = MemItemRepository::new();
        let owner = Uuid::new_v4().to_string();
        let mut item = ItemEntity::new(owner.as_str(), "saw", "hand saw", true);
        assert_eq!(1, repo.create(&item).await.expect("should create item"));

        item.is_available = false;
        assert_eq!(1, repo.update(&item).await.expect("should update item"));
        let loaded = repo.get(item.item_id.as_str()).await.expect("should return item");
        assert!(!loaded.is_available);

        let by_owner = repo.find_by_owner(owner.as_str()).await.expect("should query owner");
        assert_eq!(1, by_owner.len());
    }

    #[tokio::test]
    async fn test_should_search_available_items() {
        let repo = MemItemRepository::new();
        let owner = Uuid::new_v4().to_string();
        let marker = Uuid::new_v4().to_string();
        let visible = ItemEntity::new(owner.as_str(), format!("hammer {}", marker).as_str(), "claw hammer", true);
        let hidden = ItemEntity::new(owner.as_str(), format!("hammer {}", marker).as_str(), "broken hammer", false);
        let _ = repo.create(&visible).await.expect("should create item");
        let _ = repo.create(&hidden).await.expect("should create item");

        let found = repo.search_available(marker.to_uppercase().as_str()).await.expect("should search");
        assert_eq!(1, found.len());
        assert_eq!(visible.item_id, found[0].item_id);
    }
}
