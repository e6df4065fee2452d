mod provider;
mod session_token;

pub use provider::{AuthProviderClient, AuthProviderErrorResponse, HttpAuthProviderClient};
pub use session_token::{issue_session_token, validate_session_token, SessionClaims};
