//! In-process identity provider
//!
//! Used when no API key is configured (offline mode) and in tests. Accounts
//! live for the lifetime of the process and follow the same validation
//! rules and error codes as the hosted provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use tokio::sync::watch;

use crate::auth::provider::{codes, Account, AuthError, IdentityProvider, SessionFeed};
use crate::models::Session;

/// Minimum password length accepted by the provider
pub const MIN_PASSWORD_LEN: usize = 6;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

#[derive(Debug, Clone)]
struct StoredAccount {
    uid: String,
    password: String,
    display_name: Option<String>,
    disabled: bool,
}

#[derive(Debug, Default)]
pub struct MemoryProvider {
    accounts: Mutex<HashMap<String, StoredAccount>>,
    current: Mutex<Option<Account>>,
    feed: SessionFeed,
    next_id: AtomicU64,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing account
    pub fn with_account(self, email: &str, password: &str, display_name: Option<&str>) -> Self {
        let uid = self.fresh_id("uid");
        self.accounts_lock().insert(
            email.to_ascii_lowercase(),
            StoredAccount {
                uid,
                password: password.to_string(),
                display_name: display_name.map(String::from),
                disabled: false,
            },
        );
        self
    }

    /// Mark an account disabled
    pub fn disable(&self, email: &str) {
        if let Some(acc) = self.accounts_lock().get_mut(&email.to_ascii_lowercase()) {
            acc.disabled = true;
        }
    }

    /// Simulate a sign-out that happened elsewhere
    pub fn revoke_session(&self) {
        *self.current_lock() = None;
        self.feed.publish(None);
    }

    pub fn account_count(&self) -> usize {
        self.accounts_lock().len()
    }

    fn accounts_lock(&self) -> MutexGuard<'_, HashMap<String, StoredAccount>> {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current_lock(&self) -> MutexGuard<'_, Option<Account>> {
        self.current.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fresh_id(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", prefix, n)
    }

    fn issue(&self, email: &str, stored: &StoredAccount) -> Account {
        let account = Account {
            uid: stored.uid.clone(),
            email: email.to_string(),
            display_name: stored.display_name.clone(),
            id_token: self.fresh_id("id"),
            refresh_token: self.fresh_id("refresh"),
        };
        *self.current_lock() = Some(account.clone());
        self.feed.publish(Some(&account));
        account
    }
}

#[async_trait]
impl IdentityProvider for MemoryProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let key = email.trim().to_ascii_lowercase();
        if !is_valid_email(&key) {
            return Err(AuthError::new(codes::INVALID_EMAIL, "The email address is badly formatted."));
        }
        if password.is_empty() {
            return Err(AuthError::new(codes::MISSING_PASSWORD, "Password is required."));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(
                codes::WEAK_PASSWORD,
                "Password should be at least 6 characters",
            ));
        }

        let stored = {
            let mut accounts = self.accounts_lock();
            if accounts.contains_key(&key) {
                return Err(AuthError::new(
                    codes::EMAIL_ALREADY_IN_USE,
                    "The email address is already in use by another account.",
                ));
            }
            let stored = StoredAccount {
                uid: self.fresh_id("uid"),
                password: password.to_string(),
                display_name: None,
                disabled: false,
            };
            accounts.insert(key.clone(), stored.clone());
            stored
        };
        Ok(self.issue(&key, &stored))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Account, AuthError> {
        let key = email.trim().to_ascii_lowercase();
        if !is_valid_email(&key) {
            return Err(AuthError::new(codes::INVALID_EMAIL, "The email address is badly formatted."));
        }
        let stored = self
            .accounts_lock()
            .get(&key)
            .cloned()
            .ok_or_else(|| AuthError::new(codes::USER_NOT_FOUND, "There is no user record for this email."))?;
        if stored.disabled {
            return Err(AuthError::new(codes::USER_DISABLED, "The user account has been disabled."));
        }
        if stored.password != password {
            return Err(AuthError::new(codes::WRONG_PASSWORD, "The password is invalid."));
        }
        Ok(self.issue(&key, &stored))
    }

    async fn update_display_name(&self, account: &Account, display_name: &str) -> Result<Account, AuthError> {
        let key = account.email.to_ascii_lowercase();
        {
            let mut accounts = self.accounts_lock();
            let stored = accounts
                .get_mut(&key)
                .filter(|s| s.uid == account.uid)
                .ok_or_else(|| AuthError::new(codes::INVALID_USER_TOKEN, "Unknown account."))?;
            stored.display_name = Some(display_name.to_string());
        }
        let updated = Account {
            display_name: Some(display_name.to_string()),
            ..account.clone()
        };
        *self.current_lock() = Some(updated.clone());
        self.feed.publish(Some(&updated));
        Ok(updated)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        *self.current_lock() = None;
        self.feed.publish(None);
        Ok(())
    }

    async fn restore(&self) -> Result<Option<Account>, AuthError> {
        Ok(self.current_lock().clone())
    }

    fn has_session(&self) -> bool {
        self.current_lock().is_some()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.feed.subscribe()
    }
}
