use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts config options for the sharing services
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub(crate) struct Configuration {
    pub service_id: String,
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Configuration {
    pub fn new(service_id: &str) -> Self {
        Configuration {
            service_id: service_id.to_string(),
            default_page_size: 10,
            max_page_size: 500,
        }
    }
}
