use serde::Deserialize;

/// Connection settings for the hosted object-storage service.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub url: String,
    #[serde(default = "crate::config::defaults::default_storage_bucket")]
    pub bucket: String,
    pub service_key: String,
}
