mod http_client;
mod object_key;

pub use http_client::HttpObjectStorage;
pub use object_key::object_key;

use async_trait::async_trait;

use crate::error::AppResult;

/// The hosted object-storage service, reduced to what listing creation
/// needs: write an object, derive its public URL, and delete it again when
/// a create flow has to roll back.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Uploads `bytes` under `key` and returns the object's public URL.
    async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> AppResult<String>;

    /// Removes an object. Used to roll back a failed create.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Deterministic public-URL derivation from bucket + key.
    fn public_url(&self, key: &str) -> String;
}
