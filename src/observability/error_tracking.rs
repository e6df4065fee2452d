use crate::error::{AppError, AppResult};
use tracing::error;
use uuid::Uuid;

/// Emits a structured capture event for an unexpected server-side failure.
/// The returned event id correlates the log line with the request.
pub fn capture_unexpected_5xx(
    path: &str,
    method: &str,
    status: u16,
    request_id: &str,
) -> AppResult<Uuid> {
    if status < 500 {
        return Err(AppError::BadRequest(
            "capture_unexpected_5xx requires an HTTP 5xx status".to_string(),
        ));
    }

    let event_id = Uuid::new_v4();
    error!(
        tracking_backend = "log",
        event_id = %event_id,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = status,
        "error-tracking capture for unexpected 5xx"
    );
    Ok(event_id)
}
