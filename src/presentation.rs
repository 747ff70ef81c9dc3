//! Presentation state
//!
//! Which view is active and which overlays are up. Transitions are plain
//! synchronous setters driven by user actions; overlays and views never
//! affect each other.

use crate::models::{AuthForm, AuthMode, ViewMode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub view: ViewMode,
    pub auth_open: bool,
    pub teaser_open: bool,
    pub auth_mode: AuthMode,
    pub form: AuthForm,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the main view. Overlays stay as they are.
    pub fn navigate(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn open_auth(&mut self) {
        self.auth_open = true;
    }

    pub fn close_auth(&mut self) {
        self.auth_open = false;
    }

    pub fn toggle_auth_mode(&mut self) {
        self.auth_mode = self.auth_mode.toggled();
        let len = self.auth_mode.fields().len();
        if self.form.focus >= len {
            self.form.focus = len - 1;
        }
    }

    pub fn open_teaser(&mut self) {
        self.teaser_open = true;
    }

    pub fn close_teaser(&mut self) {
        self.teaser_open = false;
    }

    /// The auth form receives keys only when it is the topmost overlay
    pub fn auth_has_focus(&self) -> bool {
        self.auth_open && !self.teaser_open
    }
}
