use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::{middleware::Logger, web, App, HttpServer};
use classifieds_backend::api::{openapi, routes};
use classifieds_backend::api::routes::AppState;
use classifieds_backend::application::{CatalogService, ListingService, SessionService};
use classifieds_backend::config::AppConfig;
use classifieds_backend::infrastructure::auth::HttpAuthProviderClient;
use classifieds_backend::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use classifieds_backend::infrastructure::repositories::{
    CategoryRepositoryImpl, ListingRepositoryImpl,
};
use classifieds_backend::infrastructure::storage::HttpObjectStorage;
use classifieds_backend::observability::error_tracking::capture_unexpected_5xx;
use classifieds_backend::observability::AppMetrics;
use classifieds_backend::security::{cors_middleware, security_headers, LoginThrottle};
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().expect("failed to load application configuration");
    config
        .validate()
        .expect("application configuration is invalid");

    tracing_subscriber::registry()
        .with(EnvFilter::new(config.logging.level.clone()))
        .with(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true),
        )
        .init();

    let pool = create_pool(&config.database)
        .await
        .expect("failed to create database pool");

    run_migrations(&pool)
        .await
        .expect("database migrations failed");

    let category_repo = Arc::new(CategoryRepositoryImpl::new(pool.clone()));
    let listing_repo = Arc::new(ListingRepositoryImpl::new(pool.clone()));
    let storage = Arc::new(HttpObjectStorage::new(config.storage.clone()));
    let auth_provider = Arc::new(HttpAuthProviderClient::new(config.auth.clone()));

    let state = AppState {
        catalog_service: Arc::new(CatalogService::new(category_repo)),
        listing_service: Arc::new(ListingService::new(listing_repo, storage)),
        session_service: Arc::new(SessionService::new(auth_provider, config.auth.clone())),
        security: config.security.clone(),
        login_throttle: Arc::new(LoginThrottle::new()),
        app_environment: config.app.environment.clone(),
        metrics: Arc::new(AppMetrics::default()),
        db_pool: pool.clone(),
    };

    let bind_host = config.app.host.clone();
    let bind_port = config.app.port;
    let security_config = config.security.clone();
    let metrics = state.metrics.clone();

    info!(host = %bind_host, port = bind_port, environment = %config.app.environment, "starting server");

    HttpServer::new(move || {
        let metrics = metrics.clone();
        App::new()
            .wrap(Logger::default())
            .wrap_fn(move |req, srv| {
                let request_id = Uuid::new_v4().to_string();
                let path = req.path().to_string();
                let method = req.method().to_string();
                let metrics = metrics.clone();
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    match fut.await {
                        Ok(mut response) => {
                            response.headers_mut().insert(
                                actix_web::http::header::HeaderName::from_static("x-request-id"),
                                actix_web::http::header::HeaderValue::from_str(&request_id)
                                    .unwrap_or_else(|_| {
                                        actix_web::http::header::HeaderValue::from_static(
                                            "invalid-request-id",
                                        )
                                    }),
                            );

                            let status = response.status().as_u16();
                            let latency_ms = start.elapsed().as_millis() as u64;
                            metrics.record_request(status, latency_ms);

                            info!(
                                request_id = %request_id,
                                method = %method,
                                path = %path,
                                status = status,
                                latency_ms = latency_ms,
                                "request completed"
                            );

                            if status >= 500 {
                                let _ = capture_unexpected_5xx(&path, &method, status, &request_id);
                            }
                            Ok(response)
                        }
                        Err(error) => Err(error),
                    }
                }
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
            .configure(openapi::configure_swagger_ui)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
