#![allow(dead_code)]

use classifieds_backend::config::AuthConfig;

pub mod fixtures;
pub mod mocks;

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        provider_url: "https://auth.test".to_string(),
        service_key: "test-service-key".to_string(),
        jwt_secret: "test-secret-value-for-signing".to_string(),
        issuer: "https://auth.test/auth/v1".to_string(),
        audience: "authenticated".to_string(),
    }
}
