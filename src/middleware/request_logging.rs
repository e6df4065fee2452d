use actix_web::http::header;
use actix_web::HttpRequest;
use tracing::Span;

/// Client IP as actix resolves it. Forwarded headers are honored only when
/// a trusted proxy is configured, so this value is not client-spoofable.
pub fn get_client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn get_user_agent(req: &HttpRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Span carrying the per-request context every handler log line inherits.
pub fn create_request_span(
    request_id: &str,
    method: &str,
    path: &str,
    client_ip: &str,
    user_agent: &str,
) -> Span {
    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        client_ip = %client_ip,
        user_agent = %user_agent
    )
}

/// HTTP status class for grouping (2xx, 3xx, 4xx, 5xx).
pub fn get_status_class(status: u16) -> &'static str {
    match status {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_class_covers_common_codes() {
        assert_eq!(get_status_class(200), "2xx");
        assert_eq!(get_status_class(301), "3xx");
        assert_eq!(get_status_class(404), "4xx");
        assert_eq!(get_status_class(503), "5xx");
        assert_eq!(get_status_class(600), "unknown");
    }

    #[test]
    fn user_agent_defaults_to_unknown() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        assert_eq!(get_user_agent(&req), "unknown");
    }

    #[test]
    fn client_ip_defaults_to_unknown() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        assert_eq!(get_client_ip(&req), "unknown");
    }
}
