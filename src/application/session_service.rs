use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::config::AuthConfig;
use crate::domain::SessionUser;
use crate::error::AppResult;
use crate::infrastructure::auth::{validate_session_token, AuthProviderClient};

/// Adapter over the hosted auth provider's passwordless email-link flow.
///
/// Link issuance and revocation round-trip to the provider; access tokens
/// are validated locally. Session changes (established, signed out) are
/// published to `SessionWatch` subscribers.
pub struct SessionService {
    provider: Arc<dyn AuthProviderClient>,
    auth_config: AuthConfig,
    sessions: watch::Sender<Option<SessionUser>>,
}

impl SessionService {
    pub fn new(provider: Arc<dyn AuthProviderClient>, auth_config: AuthConfig) -> Self {
        let (sessions, _) = watch::channel(None);
        Self {
            provider,
            auth_config,
            sessions,
        }
    }

    /// Resolves the identity behind a bearer token. Never errors: any
    /// decode failure (expired, malformed, wrong issuer) resolves to
    /// absent.
    pub fn current_user(&self, access_token: &str) -> Option<SessionUser> {
        validate_session_token(access_token, &self.auth_config)
            .ok()
            .map(|claims| claims.into_session_user())
    }

    /// Asks the provider to mail a one-time login link. Provider errors
    /// surface verbatim to the caller.
    pub async fn send_login_link(&self, email: &str, redirect_to: &str) -> AppResult<()> {
        self.provider.send_magic_link(email, redirect_to).await?;
        info!(%email, "login link requested");
        Ok(())
    }

    /// Strictly validates a token the client obtained by following the
    /// emailed link, publishes the new identity, and returns it. Expired
    /// and malformed tokens are distinct failures.
    pub fn establish_session(&self, access_token: &str) -> AppResult<SessionUser> {
        let user = validate_session_token(access_token, &self.auth_config)?.into_session_user();
        self.sessions.send_replace(Some(user.clone()));
        info!(user_id = %user.id, "session established");
        Ok(user)
    }

    /// Revokes the session at the provider, then publishes the signed-out
    /// state. A failed provider call leaves the session untouched.
    pub async fn sign_out(&self, access_token: &str) -> AppResult<()> {
        self.provider.sign_out(access_token).await?;
        self.sessions.send_replace(None);
        info!("session signed out");
        Ok(())
    }

    /// Subscribes to session changes. The returned handle owns the
    /// subscription; dropping it unsubscribes.
    pub fn subscribe(&self) -> SessionWatch {
        SessionWatch {
            receiver: self.sessions.subscribe(),
        }
    }
}

/// An owned subscription to session changes.
pub struct SessionWatch {
    receiver: watch::Receiver<Option<SessionUser>>,
}

impl SessionWatch {
    /// The identity as of the last published change.
    pub fn current(&self) -> Option<SessionUser> {
        self.receiver.borrow().clone()
    }

    /// Waits for the next session change. Returns `None` once the service
    /// has shut down.
    pub async fn changed(&mut self) -> Option<Option<SessionUser>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }
}
