use async_trait::async_trait;
use tracing::log::info;
use crate::core::events::DomainEvent;
use crate::core::sharing::SharingError;
use crate::gateway::events::EventPublisher;

// Publisher for the in-memory store: events only land in the log stream.
#[derive(Debug)]
pub struct LogsPublisher {
}

impl LogsPublisher {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl EventPublisher for LogsPublisher {
    async fn create_topic(&mut self, topic: &str) -> Result<String, SharingError> {
        Ok(topic.to_string())
    }

    async fn get_topics(&mut self) -> Result<Vec<String>, SharingError> {
        Ok(vec![])
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), SharingError> {
        info!("domain event {} {} {}", event.name, event.key, event.json_data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::{factory, GatewayPublisherVia};

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::added("test-name", "group", "key", &HashMap::new(), &data).expect("build event");
        let publisher = factory::create_publisher(GatewayPublisherVia::Logs).await;
        let _ = publisher.publish(&event).await.expect("should publish");
    }
}
