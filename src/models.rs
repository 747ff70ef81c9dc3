//! Data structures shared across Red Lotus
//!
//! Organized by domain:
//! - **Session**: identity mirrored from the provider
//! - **Presentation**: views, overlays, auth form
//! - **Playback**: teaser player state
//! - **Content**: cast and crew records
//! - **Notices**: blocking messages shown over the UI

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when the provider reports an account without one
pub const FALLBACK_DISPLAY_NAME: &str = "Crew Member";

// =============================================================================
// Session
// =============================================================================

/// Authenticated identity, mirrored read-only from the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub display_name: String,
    pub email: String,
}

impl Session {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// Build a session from provider fields, filling in the fallback name
    pub fn from_provider(display_name: Option<&str>, email: impl Into<String>) -> Self {
        let name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(FALLBACK_DISPLAY_NAME);
        Self::new(name, email)
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.display_name, self.email)
    }
}

// =============================================================================
// Presentation
// =============================================================================

/// Top-level view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Hero banner, countdown, cast and crew
    #[default]
    Home,
    /// Cast gallery only
    Cast,
    /// Production credits only
    Crew,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Home, ViewMode::Cast, ViewMode::Crew];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Home => "SERIES",
            ViewMode::Cast => "THE CAST",
            ViewMode::Crew => "THE CREW",
        }
    }

    pub fn shows_cast(&self) -> bool {
        matches!(self, ViewMode::Home | ViewMode::Cast)
    }

    pub fn shows_crew(&self) -> bool {
        matches!(self, ViewMode::Home | ViewMode::Crew)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which form the auth overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "LOGIN",
            AuthMode::Signup => "SIGNUP",
        }
    }

    /// Submit button caption
    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "ENTER THE DARK",
            AuthMode::Signup => "JOIN THE CREW",
        }
    }

    /// Caption of the mode switch link
    pub fn switch_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Create an Account",
            AuthMode::Signup => "Back to Login",
        }
    }

    /// Form fields shown in this mode, in focus order
    pub fn fields(&self) -> &'static [FormField] {
        match self {
            AuthMode::Login => &[FormField::Email, FormField::Password],
            AuthMode::Signup => &[FormField::Username, FormField::Email, FormField::Password],
        }
    }
}

/// A single auth form input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Username,
    Email,
    Password,
}

impl FormField {
    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Username => "USERNAME",
            FormField::Email => "EMAIL ADDRESS",
            FormField::Password => "PASSWORD",
        }
    }
}

/// Auth form contents (kept across failed submissions)
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub focus: usize,
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("focus", &self.focus)
            .finish()
    }
}

impl AuthForm {
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Username => &self.username,
            FormField::Email => &self.email,
            FormField::Password => &self.password,
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Username => &mut self.username,
            FormField::Email => &mut self.email,
            FormField::Password => &mut self.password,
        }
    }

    /// Field currently holding focus for the given mode
    pub fn focused(&self, mode: AuthMode) -> FormField {
        let fields = mode.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    pub fn focus_next(&mut self, mode: AuthMode) {
        self.focus = (self.focus + 1) % mode.fields().len();
    }

    pub fn focus_prev(&mut self, mode: AuthMode) {
        let len = mode.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn insert(&mut self, mode: AuthMode, c: char) {
        let field = self.focused(mode);
        self.value_mut(field).push(c);
    }

    pub fn backspace(&mut self, mode: AuthMode) {
        let field = self.focused(mode);
        self.value_mut(field).pop();
    }

    /// Name of the first required field left blank, if any
    pub fn missing_field(&self, mode: AuthMode) -> Option<FormField> {
        mode.fields()
            .iter()
            .copied()
            .find(|f| self.value(*f).trim().is_empty())
    }
}

/// Sign-up request
#[derive(Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Log-in request
#[derive(Clone, PartialEq, Eq)]
pub struct LogInRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LogInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogInRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Playback
// =============================================================================

/// Observable teaser player state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    /// Progress in percent, always within [0, 100]
    pub progress_percent: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    pub controls_visible: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            progress_percent: 0.0,
            is_muted: false,
            is_fullscreen: false,
            controls_visible: true,
        }
    }
}

// =============================================================================
// Content
// =============================================================================

/// A member of the starring cast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CastMember {
    /// Character played
    pub role: &'static str,
    pub actor: &'static str,
    /// Portrait asset name
    pub image: &'static str,
}

/// A production credit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditEntry {
    pub title: &'static str,
    pub names: &'static [&'static str],
    /// Portrait of the lead name, when one exists
    pub image: Option<&'static str>,
    /// Rendered with the highlight accent
    pub featured: bool,
}

impl CreditEntry {
    pub fn joined_names(&self) -> String {
        self.names.join(" & ")
    }
}

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Blocking message shown above everything until the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

// =============================================================================
// Tests
// =============================================================================
