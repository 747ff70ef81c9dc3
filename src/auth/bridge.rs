//! Auth bridge
//!
//! Turns the three user intents into provider calls and keeps a local
//! mirror of the provider's session. There is no global auth singleton: the
//! bridge is built once at startup and handed to whoever needs it, and the
//! session listener lives exactly as long as its [`SessionSubscription`].

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tokio::task::JoinHandle;

use crate::auth::provider::{AuthError, IdentityProvider};
use crate::models::{LogInRequest, Session, SignUpRequest};

fn separators() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[-_\s]+").expect("separator pattern compiles"))
}

/// Turn a provider code into the text shown to the user.
///
/// `auth/wrong-password` becomes `WRONG PASSWORD`.
pub fn normalize_code(code: &str) -> String {
    let bare = code.rsplit_once('/').map(|(_, rest)| rest).unwrap_or(code);
    separators().replace_all(bare.trim(), " ").trim().to_uppercase()
}

#[derive(Clone)]
pub struct AuthBridge {
    provider: Arc<dyn IdentityProvider>,
}

impl AuthBridge {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }

    /// Create the account, then stamp the username on it
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Session, AuthError> {
        tracing::info!(email = %request.email, "sign up requested");
        let account = self
            .provider
            .create_account(request.email.trim(), &request.password)
            .await?;
        let username = request.username.trim();
        let account = self.provider.update_display_name(&account, username).await?;
        Ok(Session::new(username, account.email))
    }

    pub async fn log_in(&self, request: LogInRequest) -> Result<Session, AuthError> {
        tracing::info!(email = %request.email, "log in requested");
        let account = self
            .provider
            .sign_in(request.email.trim(), &request.password)
            .await?;
        Ok(account.session())
    }

    pub async fn log_out(&self) -> Result<(), AuthError> {
        tracing::info!("log out requested");
        self.provider.sign_out().await
    }

    /// Current mirrored session
    pub fn current(&self) -> Option<Session> {
        self.provider.subscribe().borrow().clone()
    }

    /// Whether there is anything to sign out of. Never touches the network.
    pub fn has_session(&self) -> bool {
        self.provider.has_session()
    }

    /// Bring back the session of an earlier run, if the provider kept one
    pub async fn restore(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.provider.restore().await?.map(|account| account.session()))
    }

    /// Restore any persisted session, then forward every session change to
    /// `on_change` (starting with the current value) until the returned
    /// subscription is dropped.
    pub fn listen<F>(&self, on_change: F) -> SessionSubscription
    where
        F: Fn(Option<Session>) + Send + 'static,
    {
        let provider = Arc::clone(&self.provider);
        let mut rx = provider.subscribe();
        let handle = tokio::spawn(async move {
            if let Err(e) = provider.restore().await {
                tracing::warn!(code = %e.code, "session restore failed");
            }
            on_change(rx.borrow_and_update().clone());
            while rx.changed().await.is_ok() {
                let session = rx.borrow_and_update().clone();
                tracing::debug!(signed_in = session.is_some(), "provider session changed");
                on_change(session);
            }
        });
        SessionSubscription { handle }
    }
}

/// Live session listener; aborted on drop
#[derive(Debug)]
pub struct SessionSubscription {
    handle: JoinHandle<()>,
}

impl SessionSubscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
