use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::SessionUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginLinkRequest {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,

    /// Where the provider redirects once the emailed link is followed.
    #[validate(url(message = "redirect_to must be a valid URL"))]
    pub redirect_to: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EstablishSessionRequest {
    #[validate(length(min = 1, message = "access_token is required"))]
    pub access_token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUserResponse {
    pub id: Uuid,
    pub email: String,
}

impl From<SessionUser> for SessionUserResponse {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
        }
    }
}
