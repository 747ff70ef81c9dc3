//! Firebase Authentication over the Identity Toolkit REST API
//!
//! Endpoints used:
//! - `accounts:signUp`, `accounts:signInWithPassword`, `accounts:update`,
//!   `accounts:lookup` on identitytoolkit.googleapis.com
//! - `token` (refresh) on securetoken.googleapis.com
//!
//! Sign-out is local: forget the tokens. The refresh token is kept in a
//! small JSON file so the next launch can restore the session.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::auth::provider::{codes, Account, AuthError, IdentityProvider, SessionFeed};
use crate::models::Session;

const IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com";
const TOKEN_URL: &str = "https://securetoken.googleapis.com";

/// Map an Identity Toolkit error message to an SDK-style code.
///
/// Messages look like `EMAIL_EXISTS` or `WEAK_PASSWORD : Password should be
/// at least 6 characters`.
pub fn map_rest_error(message: &str) -> AuthError {
    let (key, detail) = match message.split_once(" : ") {
        Some((k, d)) => (k.trim(), d.trim()),
        None => (message.trim(), ""),
    };
    let code = match key {
        "EMAIL_EXISTS" => codes::EMAIL_ALREADY_IN_USE,
        "INVALID_EMAIL" => codes::INVALID_EMAIL,
        "WEAK_PASSWORD" => codes::WEAK_PASSWORD,
        "MISSING_PASSWORD" => codes::MISSING_PASSWORD,
        "INVALID_PASSWORD" => codes::WRONG_PASSWORD,
        "EMAIL_NOT_FOUND" | "USER_NOT_FOUND" => codes::USER_NOT_FOUND,
        "USER_DISABLED" => codes::USER_DISABLED,
        "INVALID_LOGIN_CREDENTIALS" => codes::INVALID_CREDENTIAL,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => codes::TOO_MANY_REQUESTS,
        "OPERATION_NOT_ALLOWED" | "PASSWORD_LOGIN_DISABLED" => codes::OPERATION_NOT_ALLOWED,
        "TOKEN_EXPIRED" => codes::TOKEN_EXPIRED,
        "INVALID_ID_TOKEN" | "INVALID_REFRESH_TOKEN" => codes::INVALID_USER_TOKEN,
        "API_KEY_INVALID" => codes::INVALID_API_KEY,
        k if k.starts_with("API key not valid") => codes::INVALID_API_KEY,
        _ => codes::INTERNAL_ERROR,
    };
    let message = if detail.is_empty() { key } else { detail };
    AuthError::new(code, message)
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRequest<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupRequest<'a> {
    id_token: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    user_id: String,
}

#[derive(Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// =============================================================================
// Session file
// =============================================================================

/// What survives between runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub refresh_token: String,
}

/// JSON file holding the refresh token
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location (~/.local/share/redlotus/session.json)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("redlotus").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<StoredSession> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    }

    pub fn save(&self, session: &StoredSession) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
    }

    pub fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// Provider
// =============================================================================

pub struct FirebaseProvider {
    api_key: String,
    identity_url: String,
    token_url: String,
    client: reqwest::Client,
    store: Option<SessionStore>,
    feed: SessionFeed,
    current: Mutex<Option<Account>>,
}

impl FirebaseProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_urls(api_key, IDENTITY_URL, TOKEN_URL)
    }

    /// Point both endpoints at one server (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        Self::with_urls(api_key, base.clone(), base)
    }

    fn with_urls(api_key: impl Into<String>, identity_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: identity_url.into(),
            token_url: token_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            store: None,
            feed: SessionFeed::new(),
            current: Mutex::new(None),
        }
    }

    /// Persist sessions to `store`
    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    fn accounts_url(&self, method: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.identity_url,
            method,
            urlencoding::encode(&self.api_key)
        )
    }

    fn refresh_url(&self) -> String {
        format!("{}/v1/token?key={}", self.token_url, urlencoding::encode(&self.api_key))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, AuthError> {
        let status = response.status();
        let body = response.text().await.map_err(AuthError::network)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| AuthError::internal(format!("bad response: {}", e)));
        }

        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => Err(map_rest_error(&envelope.error.message)),
            Err(_) => Err(AuthError::internal(format!("HTTP {}", status.as_u16()))),
        }
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T, AuthError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(AuthError::network)?;
        Self::decode(response).await
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<Account, AuthError> {
        let request = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };
        let response: AccountResponse = self.post_json(&self.accounts_url(method), &request).await?;
        let account = Account {
            uid: response.local_id,
            email: if response.email.is_empty() {
                email.to_string()
            } else {
                response.email
            },
            display_name: response.display_name.filter(|n| !n.is_empty()),
            id_token: response.id_token.unwrap_or_default(),
            refresh_token: response.refresh_token.unwrap_or_default(),
        };
        self.signed_in(&account);
        Ok(account)
    }

    /// Record a signed-in account: remember it, persist it, notify listeners
    fn signed_in(&self, account: &Account) {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(account.clone());
        }
        if let Some(store) = &self.store {
            let stored = StoredSession {
                uid: account.uid.clone(),
                email: account.email.clone(),
                display_name: account.display_name.clone(),
                refresh_token: account.refresh_token.clone(),
            };
            if let Err(e) = store.save(&stored) {
                tracing::warn!(path = %store.path().display(), error = %e, "could not persist session");
            }
        }
        self.feed.publish(Some(account));
    }

    fn forget(&self) {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                tracing::warn!(path = %store.path().display(), error = %e, "could not remove session file");
            }
        }
        self.feed.publish(None);
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        let response = self
            .client
            .post(self.refresh_url())
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(AuthError::network)?;
        Self::decode(response).await
    }
}

#[async_trait]
impl IdentityProvider for FirebaseProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn update_display_name(&self, account: &Account, display_name: &str) -> Result<Account, AuthError> {
        let request = UpdateRequest {
            id_token: &account.id_token,
            display_name,
            return_secure_token: true,
        };
        let response: AccountResponse = self.post_json(&self.accounts_url("update"), &request).await?;
        let updated = Account {
            uid: response.local_id,
            email: account.email.clone(),
            display_name: response
                .display_name
                .or_else(|| Some(display_name.to_string())),
            id_token: response.id_token.unwrap_or_else(|| account.id_token.clone()),
            refresh_token: response
                .refresh_token
                .unwrap_or_else(|| account.refresh_token.clone()),
        };
        self.signed_in(&updated);
        Ok(updated)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.forget();
        Ok(())
    }

    async fn restore(&self) -> Result<Option<Account>, AuthError> {
        let Some(stored) = self.store.as_ref().and_then(SessionStore::load) else {
            return Ok(None);
        };

        let refreshed = match self.refresh(&stored.refresh_token).await {
            Ok(r) => r,
            Err(e) if e.is_stale_session() => {
                tracing::info!(code = %e.code, "stored session no longer valid");
                self.forget();
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let lookup: LookupResponse = self
            .post_json(
                &self.accounts_url("lookup"),
                &LookupRequest {
                    id_token: &refreshed.id_token,
                },
            )
            .await?;

        let user = lookup.users.into_iter().next();
        let account = Account {
            uid: user
                .as_ref()
                .map(|u| u.local_id.clone())
                .unwrap_or(refreshed.user_id),
            email: user
                .as_ref()
                .map(|u| u.email.clone())
                .filter(|e| !e.is_empty())
                .unwrap_or(stored.email),
            display_name: user.and_then(|u| u.display_name).or(stored.display_name),
            id_token: refreshed.id_token,
            refresh_token: refreshed.refresh_token,
        };
        tracing::info!(email = %account.email, "session restored");
        self.signed_in(&account);
        Ok(Some(account))
    }

    fn has_session(&self) -> bool {
        let held = self.current.lock().map(|c| c.is_some()).unwrap_or(false);
        held || self.store.as_ref().and_then(SessionStore::load).is_some()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.feed.subscribe()
    }
}
