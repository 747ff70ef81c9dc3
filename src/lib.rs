//! Red Lotus - terminal teaser site for the Silver Spark Films series
//!
//! A hero banner with a countdown to the next episode, cast and crew
//! galleries, a teaser player and a crew account backed by an identity
//! provider.
//!
//! # Modules
//!
//! - `models` - Data structures for sessions, views, playback, content
//! - `content` - Cast roster, credits and copy
//! - `clock` - Injectable time source
//! - `countdown` - Next release boundary of the 15-day cycle
//! - `media` - Teaser element, playback controller, external player
//! - `presentation` - Active view and overlays
//! - `auth` - Identity providers and the auth bridge
//! - `app` - Event-driven application state machine
//! - `runtime` - Event sources, effect execution, the main loop
//! - `ui` - TUI components
//! - `cli` / `commands` - Scriptable subcommands
//! - `config` - Config file and API key lookup

pub mod app;
pub mod auth;
pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod content;
pub mod countdown;
pub mod media;
pub mod models;
pub mod presentation;
pub mod runtime;
pub mod ui;

// Re-export commonly used types
pub use models::{
    AuthForm, AuthMode, CastMember, CreditEntry, FormField, LogInRequest, Notice, NoticeKind,
    PlaybackState, Session, SignUpRequest, ViewMode,
};

pub use app::{Action, App, AuthOutcome, Effect, Event};
pub use auth::{AuthBridge, AuthError, IdentityProvider};
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{CountdownEngine, Remaining};
pub use presentation::Presentation;
