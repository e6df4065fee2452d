use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{AppError, AppResult};

/// In-memory fixed-window limiter for login-link requests. Keyed by
/// email plus client IP so one sender cannot drain another's allowance.
#[derive(Default)]
pub struct LoginThrottle {
    entries: RwLock<HashMap<String, LinkRequestWindow>>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(email: &str, ip: &str) -> String {
        format!("{}|{ip}", email.trim().to_lowercase())
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, LinkRequestWindow>> {
        self.entries.write().unwrap_or_else(|e| {
            tracing::warn!("login throttle lock was poisoned, recovering the lock");
            e.into_inner()
        })
    }

    fn cleanup_expired_entries(
        entries: &mut HashMap<String, LinkRequestWindow>,
        now: DateTime<Utc>,
    ) {
        entries.retain(|_, window| window.ends_at > now);
    }

    /// Counts this request against the caller's window, rejecting once the
    /// window's allowance is spent. A fresh window opens on the first
    /// request after expiry.
    pub fn enforce_fixed_window(
        &self,
        key: &str,
        max_requests: u32,
        window_seconds: u64,
    ) -> AppResult<()> {
        let now = Utc::now();
        let mut entries = self.write_entries();
        Self::cleanup_expired_entries(&mut entries, now);

        let window = entries.entry(key.to_string()).or_insert(LinkRequestWindow {
            requests: 0,
            ends_at: now + Duration::seconds(window_seconds as i64),
        });
        window.requests = window.requests.saturating_add(1);

        if window.requests > max_requests {
            return Err(AppError::RateLimited);
        }

        Ok(())
    }
}

#[derive(Clone)]
struct LinkRequestWindow {
    requests: u32,
    ends_at: DateTime<Utc>,
}
