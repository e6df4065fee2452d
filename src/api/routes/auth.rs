use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::api::dtos::{EstablishSessionRequest, LoginLinkRequest, SessionUserResponse};
use crate::api::routes::AppState;
use crate::error::{AppError, AppResult};
use crate::middleware::{bearer_token, MaybeUser};
use crate::middleware::request_logging::get_client_ip;
use crate::security::LoginThrottle;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login-link", web::post().to(login_link))
            .route("/session", web::post().to(establish_session))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login-link",
    request_body = LoginLinkRequest,
    responses(
        (status = 202, description = "Login link accepted for delivery"),
        (status = 400, description = "Validation failed"),
        (status = 429, description = "Too many link requests for this email")
    ),
    tag = "auth"
)]
pub async fn login_link(
    state: web::Data<AppState>,
    request: HttpRequest,
    payload: web::Json<LoginLinkRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let client_ip = get_client_ip(&request);
    let key = LoginThrottle::key(&payload.email, &client_ip);
    state.login_throttle.enforce_fixed_window(
        &key,
        state.security.login_link_max_requests,
        state.security.login_link_window_seconds,
    )?;

    state
        .session_service
        .send_login_link(&payload.email, &payload.redirect_to)
        .await?;
    Ok(HttpResponse::Accepted().finish())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/session",
    request_body = EstablishSessionRequest,
    responses(
        (status = 200, description = "Session established", body = SessionUserResponse),
        (status = 401, description = "Token expired or invalid")
    ),
    tag = "auth"
)]
pub async fn establish_session(
    state: web::Data<AppState>,
    payload: web::Json<EstablishSessionRequest>,
) -> AppResult<HttpResponse> {
    payload.validate()?;

    let user = state.session_service.establish_session(&payload.access_token)?;
    Ok(HttpResponse::Ok().json(SessionUserResponse::from(user)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Session revoked"),
        (status = 401, description = "Missing bearer token")
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn logout(state: web::Data<AppState>, request: HttpRequest) -> AppResult<HttpResponse> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;
    state.session_service.sign_out(token).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current identity, or null when anonymous", body = SessionUserResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(user: MaybeUser) -> HttpResponse {
    HttpResponse::Ok().json(user.0.map(SessionUserResponse::from))
}
