use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity resolved from a provider access token.
///
/// The hosted auth provider owns the full user object; this service only
/// ever needs the id (for ownership) and the email (for display).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}
