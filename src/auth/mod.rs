//! Authentication
//!
//! - `provider`: identity provider trait, account and error types
//! - `firebase`: hosted provider over REST
//! - `memory`: in-process provider (offline mode, tests)
//! - `bridge`: user intents and the session mirror

pub mod bridge;
pub mod firebase;
pub mod memory;
pub mod provider;

pub use bridge::{normalize_code, AuthBridge, SessionSubscription};
pub use firebase::{FirebaseProvider, SessionStore};
pub use memory::MemoryProvider;
pub use provider::{codes, Account, AuthError, IdentityProvider};
