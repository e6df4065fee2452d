use serde::Deserialize;

/// Connection settings for the hosted auth provider.
///
/// The provider issues passwordless email-link sessions; its access tokens
/// are HS256 JWTs signed with `jwt_secret`, which this service validates
/// locally on every request.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub provider_url: String,
    pub service_key: String,
    pub jwt_secret: String,
    pub issuer: String,
    #[serde(default = "crate::config::defaults::default_auth_audience")]
    pub audience: String,
}
