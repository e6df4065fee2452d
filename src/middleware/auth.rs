use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::api::routes::AppState;
use crate::domain::SessionUser;
use crate::error::AppError;

/// Pulls the bearer token out of the Authorization header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

/// Extractor for routes that require a signed-in caller. Token validation
/// is local, so extraction is synchronous.
pub struct AuthenticatedUser(pub SessionUser);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_user(req).map(AuthenticatedUser))
    }
}

/// Extractor for routes that serve both anonymous and signed-in callers.
/// Never rejects: a missing or invalid token resolves to `None`.
pub struct MaybeUser(pub Option<SessionUser>);

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeUser(resolve_user(req).ok())))
    }
}

fn resolve_user(req: &HttpRequest) -> Result<SessionUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError(anyhow::anyhow!("missing AppState app data")))?;

    let token = bearer_token(req).ok_or(AppError::Unauthorized)?;

    match state.session_service.current_user(token) {
        Some(user) => Ok(user),
        None => {
            state.metrics.record_auth_failure();
            Err(AppError::Unauthorized)
        }
    }
}
