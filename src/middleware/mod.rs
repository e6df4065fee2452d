pub mod auth;
pub mod request_logging;

pub use auth::{bearer_token, AuthenticatedUser, MaybeUser};
