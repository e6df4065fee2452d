use serde::Serialize;
use utoipa::ToSchema;

/// Standard error body produced by `AppError::error_response`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: String,
}
