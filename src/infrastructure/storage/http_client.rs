use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use tracing::error;

use crate::config::StorageConfig;
use crate::error::{AppError, AppResult};

use super::ObjectStorage;

/// HTTP client for the hosted storage service's object API.
///
/// Objects are written with the service key; reads go through the public
/// URL, which is derived from bucket + key and needs no credentials.
pub struct HttpObjectStorage {
    config: StorageConfig,
    client: Client,
}

impl HttpObjectStorage {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn object_endpoint(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url.trim_end_matches('/'),
            self.config.bucket,
            key
        )
    }

    async fn map_error_response(operation: &str, response: reqwest::Response) -> AppError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(%status, operation, body = %body, "storage request failed");

        match status {
            StatusCode::CONFLICT => AppError::Conflict("object already exists".to_string()),
            StatusCode::NOT_FOUND => AppError::NotFound("object not found".to_string()),
            status if status.is_client_error() => {
                AppError::BadRequest(format!("storage rejected the {operation}: {body}"))
            }
            _ => AppError::storage_unavailable(
                "Storage service is unavailable. Please try again later.",
            ),
        }
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStorage {
    async fn upload(&self, key: &str, content_type: &str, bytes: Vec<u8>) -> AppResult<String> {
        let response = self
            .client
            .post(self.object_endpoint(key))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.service_key))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, key, "storage upload transport failure");
                AppError::storage_unavailable(
                    "Storage service is unreachable. Please try again later.",
                )
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response("upload", response).await);
        }

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let response = self
            .client
            .delete(self.object_endpoint(key))
            .header(AUTHORIZATION, format!("Bearer {}", self.config.service_key))
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, key, "storage delete transport failure");
                AppError::storage_unavailable(
                    "Storage service is unreachable. Please try again later.",
                )
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response("delete", response).await);
        }

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.config.url.trim_end_matches('/'),
            self.config.bucket,
            key
        )
    }
}
