use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::domain::SessionUser;
use crate::error::{AppError, AppResult};

/// Claims carried by the hosted provider's HS256 access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: Option<String>,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
}

impl SessionClaims {
    pub fn into_session_user(self) -> SessionUser {
        SessionUser {
            id: self.sub,
            email: self.email.unwrap_or_default(),
        }
    }
}

pub fn validate_session_token(token: &str, config: &AuthConfig) -> AppResult<SessionClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(AppError::from)
}

/// Mints a provider-compatible token. The hosted provider is the normal
/// issuer; this exists for tooling and tests.
pub fn issue_session_token(
    user_id: Uuid,
    email: &str,
    ttl_seconds: i64,
    config: &AuthConfig,
) -> AppResult<String> {
    let exp = Utc::now() + Duration::seconds(ttl_seconds);
    let claims = SessionClaims {
        sub: user_id,
        email: Some(email.to_string()),
        exp: exp.timestamp() as usize,
        iss: config.issuer.clone(),
        aud: config.audience.clone(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(e.into()))
}
