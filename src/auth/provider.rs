//! Identity provider seam
//!
//! The provider owns accounts, credentials and session persistence. We only
//! consume five operations plus a session-change feed.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

use crate::models::Session;

/// Provider error codes, SDK style (`auth/<kebab-case>`)
pub mod codes {
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const MISSING_PASSWORD: &str = "auth/missing-password";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const USER_DISABLED: &str = "auth/user-disabled";
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const OPERATION_NOT_ALLOWED: &str = "auth/operation-not-allowed";
    pub const TOKEN_EXPIRED: &str = "auth/user-token-expired";
    pub const INVALID_USER_TOKEN: &str = "auth/invalid-user-token";
    pub const INVALID_API_KEY: &str = "auth/invalid-api-key";
    pub const NETWORK_REQUEST_FAILED: &str = "auth/network-request-failed";
    pub const INTERNAL_ERROR: &str = "auth/internal-error";
}

/// A failed provider call, carrying the provider's code string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct AuthError {
    pub code: String,
    pub message: String,
}

impl AuthError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn network(err: impl fmt::Display) -> Self {
        Self::new(codes::NETWORK_REQUEST_FAILED, err.to_string())
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(codes::INTERNAL_ERROR, err.to_string())
    }

    /// Whether the stored credentials are no longer usable
    pub fn is_stale_session(&self) -> bool {
        matches!(
            self.code.as_str(),
            codes::TOKEN_EXPIRED | codes::INVALID_USER_TOKEN | codes::USER_NOT_FOUND | codes::USER_DISABLED
        )
    }
}

/// Authenticated account as the provider reports it
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: String,
    pub refresh_token: String,
}

impl Account {
    pub fn session(&self) -> Session {
        Session::from_provider(self.display_name.as_deref(), self.email.clone())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account with email + password and sign it in
    async fn create_account(&self, email: &str, password: &str) -> Result<Account, AuthError>;

    /// Verify credentials and sign in
    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError>;

    /// Set the account's display name
    async fn update_display_name(&self, account: &Account, display_name: &str) -> Result<Account, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Bring back a session persisted by an earlier run, if any
    async fn restore(&self) -> Result<Option<Account>, AuthError>;

    /// Whether a session is held or persisted, checked without the network
    fn has_session(&self) -> bool;

    /// Session-change feed. Holds the current session.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;
}

/// Broadcasts session changes to subscribers
#[derive(Debug)]
pub struct SessionFeed {
    tx: watch::Sender<Option<Session>>,
}

impl SessionFeed {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn publish(&self, account: Option<&Account>) {
        let session = account.map(Account::session);
        self.tx.send_if_modified(|current| {
            if *current == session {
                false
            } else {
                *current = session;
                true
            }
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }
}

impl Default for SessionFeed {
    fn default() -> Self {
        Self::new()
    }
}
