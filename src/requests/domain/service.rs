use std::collections::HashMap;
use async_trait::async_trait;
use crate::bookings::dto::PageRequest;
use crate::core::events::DomainEvent;
use crate::core::sharing::{SharingError, SharingResult};
use crate::gateway::events::EventPublisher;
use crate::items::domain::ItemService;
use crate::requests::domain::model::RequestEntity;
use crate::requests::domain::RequestService;
use crate::requests::dto::{RequestDto, RequestWithProposalsDto};
use crate::requests::repository::RequestRepository;
use crate::users::domain::UserService;

pub(crate) struct RequestServiceImpl {
    request_repository: Box<dyn RequestRepository>,
    user_service: Box<dyn UserService>,
    item_service: Box<dyn ItemService>,
    events_publisher: Box<dyn EventPublisher>,
}

impl RequestServiceImpl {
    pub(crate) fn new(request_repository: Box<dyn RequestRepository>,
                      user_service: Box<dyn UserService>,
                      item_service: Box<dyn ItemService>,
                      events_publisher: Box<dyn EventPublisher>) -> Self {
        Self {
            request_repository,
            user_service,
            item_service,
            events_publisher,
        }
    }

    async fn with_proposals(&self, entity: &RequestEntity) -> SharingResult<RequestWithProposalsDto> {
        let items = self.item_service.find_items_by_request(entity.request_id.as_str()).await?;
        Ok(RequestWithProposalsDto::new(RequestDto::from(entity), items))
    }
}

#[async_trait]
impl RequestService for RequestServiceImpl {
    async fn add_request(&self, requester_id: &str, description: &str) -> SharingResult<RequestDto> {
        let _ = self.user_service.find_user_by_id(requester_id).await?;
        if description.trim().is_empty() {
            return Err(SharingError::validation("request description should not be blank", Some("400".to_string())));
        }
        let entity = RequestEntity::new(requester_id, description);
        self.request_repository.create(&entity).await?;
        let saved = RequestDto::from(&entity);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "request_added", "requests", saved.request_id.as_str(), &HashMap::new(), &saved.clone())?).await?;
        Ok(saved)
    }

    async fn find_request_by_id(&self, user_id: &str, request_id: &str) -> SharingResult<RequestWithProposalsDto> {
        let _ = self.user_service.find_user_by_id(user_id).await?;
        let entity = self.request_repository.get(request_id).await?;
        self.with_proposals(&entity).await
    }

    async fn find_own_requests(&self, user_id: &str) -> SharingResult<Vec<RequestWithProposalsDto>> {
        let _ = self.user_service.find_user_by_id(user_id).await?;
        let entities = self.request_repository.find_by_requester(user_id).await?;
        let mut requests = vec![];
        for entity in &entities {
            requests.push(self.with_proposals(entity).await?);
        }
        Ok(requests)
    }

    async fn find_other_requests(&self, user_id: &str, page: &PageRequest) -> SharingResult<Vec<RequestWithProposalsDto>> {
        let _ = self.user_service.find_user_by_id(user_id).await?;
        page.validate()?;
        let entities = page.slice(self.request_repository.find_created_by_others(user_id).await?);
        let mut requests = vec![];
        for entity in &entities {
            requests.push(self.with_proposals(entity).await?);
        }
        Ok(requests)
    }
}

impl From<&RequestEntity> for RequestDto {
    fn from(other: &RequestEntity) -> RequestDto {
        RequestDto {
            request_id: other.request_id.to_string(),
            version: other.version,
            requester_id: other.requester_id.to_string(),
            description: other.request_description.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

impl From<&RequestDto> for RequestEntity {
    fn from(other: &RequestDto) -> RequestEntity {
        RequestEntity {
            request_id: other.request_id.to_string(),
            version: other.version,
            requester_id: other.requester_id.to_string(),
            request_description: other.description.to_string(),
            created_at: other.created_at,
            updated_at: other.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use lazy_static::lazy_static;
    use uuid::Uuid;
    use crate::bookings::dto::PageRequest;
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::core::sharing::SharingError;
    use crate::items::domain::ItemService;
    use crate::items::dto::ItemDto;
    use crate::items::factory::create_item_service;
    use crate::requests::domain::RequestService;
    use crate::requests::factory;
    use crate::users::domain::UserService;
    use crate::users::dto::UserDto;
    use crate::users::factory::create_user_service;

    lazy_static! {
        static ref SUT_SVC: AsyncOnce<Box<dyn RequestService>> = AsyncOnce::new(async {
                factory::create_request_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref USER_SVC: AsyncOnce<Box<dyn UserService>> = AsyncOnce::new(async {
                create_user_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
        static ref ITEM_SVC: AsyncOnce<Box<dyn ItemService>> = AsyncOnce::new(async {
                create_item_service(&Configuration::new("test"), RepositoryStore::InMemory).await
            });
    }

    async fn add_user() -> UserDto {
        let user = UserDto::new("requester", format!("{}@example.org", Uuid::new_v4()).as_str());
        USER_SVC.get().await.add_user(&user).await.expect("should add user")
    }

    #[tokio::test]
    async fn test_should_add_and_get_request_with_proposals() {
        let request_svc = SUT_SVC.get().await.clone();
        let requester = add_user().await;
        let owner = add_user().await;

        let request = request_svc.add_request(requester.user_id.as_str(), "need a drill")
            .await.expect("should add request");

        let mut item = ItemDto::new(owner.user_id.as_str(), "drill", "cordless drill", true);
        item.request_id = Some(request.request_id.to_string());
        let _ = ITEM_SVC.get().await.add_item(owner.user_id.as_str(), &item).await.expect("should add item");

        let loaded = request_svc.find_request_by_id(requester.user_id.as_str(), request.request_id.as_str())
            .await.expect("should return request");
        assert_eq!(request.request_id, loaded.request.request_id);
        assert_eq!(1, loaded.items.len());
        assert_eq!(item.item_id, loaded.items[0].item_id);
    }

    #[tokio::test]
    async fn test_should_reject_blank_description() {
        let request_svc = SUT_SVC.get().await.clone();
        let requester = add_user().await;

        let res = request_svc.add_request(requester.user_id.as_str(), "  ").await;
        assert!(matches!(res, Err(SharingError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_list_own_and_other_requests() {
        let request_svc = SUT_SVC.get().await.clone();
        let requester = add_user().await;
        let other = add_user().await;

        let first = request_svc.add_request(requester.user_id.as_str(), "need a ladder")
            .await.expect("should add request");
        let second = request_svc.add_request(other.user_id.as_str(), "need a kayak")
            .await.expect("should add request");

        let own = request_svc.find_own_requests(requester.user_id.as_str())
            .await.expect("should list own");
        assert_eq!(vec![first.request_id.clone()],
                   own.iter().map(|r| r.request.request_id.clone()).collect::<Vec<_>>());

        let others = request_svc.find_other_requests(requester.user_id.as_str(), &PageRequest::default())
            .await.expect("should list others");
        assert!(others.iter().any(|r| r.request.request_id == second.request_id));
        assert!(others.iter().all(|r| r.request.requester_id != requester.user_id));
    }

    #[tokio::test]
    async fn test_should_reject_requests_for_unknown_user() {
        let request_svc = SUT_SVC.get().await.clone();

        let res = request_svc.add_request("missing-user", "need a drill").await;
        assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
        let res = request_svc.find_own_requests("missing-user").await;
        assert!(matches!(res, Err(SharingError::NotFound { message: _ })));
    }
}
