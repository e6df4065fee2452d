pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_environment() -> String {
    "development".to_string()
}

pub fn default_logging_level() -> String {
    "info".to_string()
}

pub fn default_logging_json_format() -> bool {
    true
}

pub fn default_db_acquire_timeout_seconds() -> u64 {
    10
}

pub fn default_auth_audience() -> String {
    "authenticated".to_string()
}

pub fn default_storage_bucket() -> String {
    "images".to_string()
}

pub fn default_cors_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

pub fn default_metrics_allow_private_only() -> bool {
    true
}

pub fn default_login_link_max_requests() -> u32 {
    5
}

pub fn default_login_link_window_seconds() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_link_defaults_are_conservative() {
        assert!(default_login_link_max_requests() <= 10);
        assert!(default_login_link_window_seconds() >= 60);
    }

    #[test]
    fn default_bucket_matches_hosted_store() {
        assert_eq!(default_storage_bucket(), "images");
    }
}
