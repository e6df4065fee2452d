use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Error payload returned by the hosted auth service. The provider is not
/// entirely consistent about which field carries the human-readable text,
/// so all known spellings are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthProviderErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl AuthProviderErrorResponse {
    pub fn message(&self) -> String {
        self.msg
            .clone()
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| "authentication provider error".to_string())
    }
}

#[derive(Debug, Serialize)]
struct MagicLinkRequest<'a> {
    email: &'a str,
    create_user: bool,
}

/// Operations this service delegates to the hosted auth provider.
///
/// Session tokens themselves are validated locally (see `session_token`);
/// only link issuance and revocation need a round-trip.
#[async_trait]
pub trait AuthProviderClient: Send + Sync {
    /// Requests a one-time login link mailed to `email`; the link redirects
    /// to `redirect_to` once the provider establishes the session.
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> AppResult<()>;

    /// Revokes the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> AppResult<()>;
}

pub struct HttpAuthProviderClient {
    config: AuthConfig,
    client: Client,
}

impl HttpAuthProviderClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.config.provider_url.trim_end_matches('/'), path)
    }

    async fn map_error_response(operation: &str, response: reqwest::Response) -> AppError {
        let status = response.status();
        let parsed: AuthProviderErrorResponse = response.json().await.unwrap_or_default();
        let message = parsed.message();
        error!(%status, operation, message = %message, "auth provider request failed");

        match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::RateLimited,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized,
            // client-error messages pass through verbatim
            status if status.is_client_error() => AppError::BadRequest(message),
            _ => AppError::auth_provider_unavailable(
                "Authentication provider is unavailable. Please try again later.",
            ),
        }
    }
}

#[async_trait]
impl AuthProviderClient for HttpAuthProviderClient {
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.endpoint("/otp"))
            .query(&[("redirect_to", redirect_to)])
            .header(AUTHORIZATION, format!("Bearer {}", self.config.service_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&MagicLinkRequest {
                email,
                create_user: true,
            })
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "auth provider transport failure");
                AppError::auth_provider_unavailable(
                    "Authentication provider is unreachable. Please try again later.",
                )
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response("send_magic_link", response).await);
        }

        Ok(())
    }

    async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        let response = self
            .client
            .post(self.endpoint("/logout"))
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "auth provider transport failure");
                AppError::auth_provider_unavailable(
                    "Authentication provider is unreachable. Please try again later.",
                )
            })?;

        if !response.status().is_success() {
            return Err(Self::map_error_response("sign_out", response).await);
        }

        Ok(())
    }
}
