use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use lazy_static::lazy_static;

use crate::core::repository::Repository;
use crate::core::sharing::{PaginatedResult, SharingError, SharingResult};
use crate::items::domain::model::CommentEntity;
use crate::items::repository::CommentRepository;
use crate::utils::memory::{entity_matches, paginate};

lazy_static! {
    static ref COMMENTS: RwLock<HashMap<String, CommentEntity>> = RwLock::new(HashMap::new());
}

#[derive(Debug)]
pub(crate) struct MemCommentRepository;

impl MemCommentRepository {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Repository<CommentEntity> for MemCommentRepository {
    async fn create(&self, entity: &CommentEntity) -> SharingResult<usize> {
        let mut comments = COMMENTS.write().unwrap();
        if comments.contains_key(entity.comment_id.as_str()) {
            return Err(SharingError::duplicate_key(format!("comment {} already exists", entity.comment_id).as_str()));
        }
        comments.insert(entity.comment_id.clone(), entity.clone());
        Ok(1)
    }

    async fn update(&self, entity: &CommentEntity) -> SharingResult<usize> {
        let mut comments = COMMENTS.write().unwrap();
        match comments.get(entity.comment_id.as_str()) {
            Some(existing) if existing.version == entity.version => {
                let mut next = entity.clone();
                next.version += 1;
                comments.insert(next.comment_id.clone(), next);
                Ok(1)
            }
            Some(_) => Err(SharingError::database(
                format!("comment {} version conflict", entity.comment_id).as_str(), None, false)),
            None => Err(SharingError::not_found(format!("comment not found for {}", entity.comment_id).as_str())),
        }
    }

    async fn get(&self, id: &str) -> SharingResult<CommentEntity> {
        COMMENTS.read().unwrap().get(id).cloned()
            .ok_or_else(|| SharingError::not_found(format!("comment not found for {}", id).as_str()))
    }

    async fn delete(&self, id: &str) -> SharingResult<usize> {
        COMMENTS.write().unwrap().remove(id)
            .map(|_| 1)
            .ok_or_else(|| SharingError::not_found(format!("comment not found for {}", id).as_str()))
    }

    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> SharingResult<PaginatedResult<CommentEntity>> {
        let mut records: Vec<CommentEntity> = COMMENTS.read().unwrap().values()
            .filter(|c| serde_json::to_value(c).map(|v| entity_matches(&v, predicate)).unwrap_or(false))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let (slice, next_page) = paginate(records, page, page_size);
        Ok(PaginatedResult::new(page, page_size, next_page, slice))
    }
}

#[async_trait]
impl CommentRepository for MemCommentRepository {
    async fn find_by_item(&self, item_id: &str) -> SharingResult<Vec<CommentEntity>> {
        let mut records: Vec<CommentEntity> = COMMENTS.read().unwrap().values()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;
    use crate::core::repository::Repository;
    use crate::items::domain::model::CommentEntity;
    use crate::items::repository::mem_comment_repository::MemCommentRepository;
    use crate::items::repository::CommentRepository;

    #[tokio::test]
    async fn test_should_create_and_list_comments() {
        let repo = MemCommentRepository::new();
        let item_id = Uuid::new_v4().to_string();
        let comment = CommentEntity::new(item_id.as_str(), "author1", "heidi", "great tool");
        assert_eq!(1, repo.create(&comment).await.expect("should create comment"));

        let listed = repo.find_by_item(item_id.as_str()).await.expect("should list comments");
        assert_eq!(1, listed.len());
        assert_eq!("great tool", listed[0].comment_text.as_str());
    }
}
