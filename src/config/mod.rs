pub mod auth_config;
pub mod database_config;
pub mod defaults;
pub mod security_config;
pub mod storage_config;

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use thiserror::Error;

pub use auth_config::AuthConfig;
pub use database_config::DatabaseConfig;
pub use security_config::SecurityConfig;
pub use storage_config::StorageConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration is incomplete: {0}")]
    Incomplete(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "defaults::default_host")]
    pub host: String,
    #[serde(default = "defaults::default_port")]
    pub port: u16,
    #[serde(default = "defaults::default_environment")]
    pub environment: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "defaults::default_logging_level")]
    pub level: String,
    #[serde(default = "defaults::default_logging_json_format")]
    pub json_format: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Box<figment::Error>> {
        let config: Self = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Toml::file("config/development.toml").nested())
            .merge(Env::prefixed("APP_").split("__"))
            .merge(Env::prefixed("DATABASE_").split("__"))
            .merge(Env::prefixed("AUTH_").split("__"))
            .merge(Env::prefixed("STORAGE_").split("__"))
            .merge(Env::prefixed("SECURITY_").split("__"))
            .merge(Env::prefixed("LOGGING_").split("__"))
            .merge(
                Env::raw()
                    .only(&[
                        "DATABASE_URL",
                        "JWT_SECRET",
                        "AUTH_PROVIDER_URL",
                        "AUTH_SERVICE_KEY",
                        "STORAGE_URL",
                        "STORAGE_SERVICE_KEY",
                    ])
                    .map(|key| match key.as_str() {
                        "DATABASE_URL" => "database.url".into(),
                        "JWT_SECRET" => "auth.jwt_secret".into(),
                        "AUTH_PROVIDER_URL" => "auth.provider_url".into(),
                        "AUTH_SERVICE_KEY" => "auth.service_key".into(),
                        "STORAGE_URL" => "storage.url".into(),
                        "STORAGE_SERVICE_KEY" => "storage.service_key".into(),
                        _ => key.into(),
                    }),
            )
            .extract()
            .map_err(Box::new)?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt_secret = self.auth.jwt_secret.trim();
        if jwt_secret.is_empty() {
            return Err(ConfigError::Incomplete(
                "JWT_SECRET must be set via environment variable".to_string(),
            ));
        }
        if jwt_secret == "change-me-in-production" {
            return Err(ConfigError::Incomplete(
                "JWT_SECRET must be set to a secure value, not the default placeholder"
                    .to_string(),
            ));
        }

        if self.auth.provider_url.trim().is_empty() {
            return Err(ConfigError::Incomplete(
                "AUTH_PROVIDER_URL must point at the hosted auth service".to_string(),
            ));
        }
        if self.storage.url.trim().is_empty() {
            return Err(ConfigError::Incomplete(
                "STORAGE_URL must point at the hosted storage service".to_string(),
            ));
        }

        Ok(())
    }
}
