use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::sharing::SharingError;

#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn create_topic(&mut self, topic: &str) -> Result<String, SharingError>;
    async fn get_topics(&mut self) -> Result<Vec<String>, SharingError>;
    async fn publish(&self, event: &DomainEvent) -> Result<(), SharingError>;
}
