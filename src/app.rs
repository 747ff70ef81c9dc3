//! App state and core application logic
//!
//! `App::update` is the whole state machine: every input (key, pointer,
//! ticker, media notification, provider callback, finished effect) arrives
//! as an [`Event`], mutates state synchronously and may return [`Effect`]s
//! for the runtime to execute. Nothing in here blocks or awaits.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::auth::{normalize_code, AuthError};
use crate::clock::Clock;
use crate::countdown::{CountdownEngine, Remaining};
use crate::media::{MediaEvent, MediaSource, PlaybackController, PlayerKind};
use crate::models::*;
use crate::presentation::Presentation;
use crate::ui::layout;

/// Shown after a successful sign up
pub const SIGNUP_WELCOME: &str = "Welcome to the Red Lotus Crew!";
/// Shown after a successful log in
pub const LOGIN_WELCOME: &str = "Welcome back into the Dark.";
/// Title of every failed auth notice
pub const ACCESS_DENIED: &str = "ACCESS DENIED";

/// Fraction of the teaser skipped by the arrow keys
const SEEK_STEP: f64 = 0.05;

// =============================================================================
// Events
// =============================================================================

/// Everything the event loop can deliver
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Countdown ticker (1 s)
    Tick,
    /// Media frame ticker (250 ms)
    Frame,
    /// Notification from the open media element
    Media(MediaEvent),
    Key(KeyEvent),
    Pointer(MouseEvent),
    Resize(u16, u16),
    /// Direct user intent (also produced by key and pointer handling)
    Action(Action),
    /// Provider session feed
    SessionChanged(Option<Session>),
    AuthFinished(AuthOutcome),
    ExternalPlayerFailed(String),
}

/// User intents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Navigate(ViewMode),
    OpenAuth,
    CloseAuth,
    ToggleAuthMode,
    SubmitAuth,
    LogOut,
    OpenTeaser,
    CloseTeaser,
    TogglePlay,
    /// Jump to a fraction of the teaser
    Seek(f64),
    /// Skip by a fraction of the teaser
    SeekBy(f64),
    ToggleMute,
    ToggleFullscreen,
    /// Hand the teaser file to VLC/mpv
    OpenExternal,
    DismissNotice,
    Quit,
}

/// Result of a spawned provider call
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    SignedUp(Result<Session, AuthError>),
    LoggedIn(Result<Session, AuthError>),
    LoggedOut(Result<(), AuthError>),
}

/// Side effects for the runtime
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SignUp(SignUpRequest),
    LogIn(LogInRequest),
    LogOut,
    OpenExternal(PathBuf, PlayerKind),
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    pub presentation: Presentation,
    /// Mirror of the provider session
    pub session: Option<Session>,
    pub remaining: Remaining,
    /// Blocking message, dismissed by the next key press
    pub notice: Option<Notice>,
    /// A sign up or log in is in flight
    pub auth_pending: bool,
    /// Last pointer position
    pub pointer: Option<(u16, u16)>,

    countdown: CountdownEngine,
    player: Option<PlaybackController>,
    pointer_in_player: bool,
    screen: Rect,
    clock: Arc<dyn Clock>,
    media: MediaSource,
    teaser_file: Option<PathBuf>,
    player_kind: PlayerKind,
}

impl App {
    pub fn new(clock: Arc<dyn Clock>, media: MediaSource) -> Self {
        let mut countdown = CountdownEngine::standard();
        let remaining = countdown.tick(clock.now());
        Self {
            running: true,
            presentation: Presentation::new(),
            session: None,
            remaining,
            notice: None,
            auth_pending: false,
            pointer: None,
            countdown,
            player: None,
            pointer_in_player: false,
            screen: Rect::new(0, 0, 80, 24),
            clock,
            media,
            teaser_file: None,
            player_kind: PlayerKind::default(),
        }
    }

    /// Replace the release schedule
    pub fn with_countdown(mut self, mut countdown: CountdownEngine) -> Self {
        self.remaining = countdown.tick(self.clock.now());
        self.countdown = countdown;
        self
    }

    /// Teaser file for the external player
    pub fn with_teaser_file(mut self, path: Option<PathBuf>, kind: PlayerKind) -> Self {
        self.teaser_file = path;
        self.player_kind = kind;
        self
    }

    /// Terminal size used for pointer hit-testing
    pub fn with_screen(mut self, width: u16, height: u16) -> Self {
        self.screen = Rect::new(0, 0, width, height);
        self
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    /// Teaser player state, while the overlay is open
    pub fn playback(&self) -> Option<PlaybackState> {
        self.player.as_ref().map(PlaybackController::state)
    }

    pub fn player(&self) -> Option<&PlaybackController> {
        self.player.as_ref()
    }

    pub fn screen(&self) -> Rect {
        self.screen
    }

    pub fn has_teaser_file(&self) -> bool {
        self.teaser_file.is_some()
    }

    pub fn player_kind(&self) -> PlayerKind {
        self.player_kind
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    /// Apply one event
    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Tick => {
                self.remaining = self.countdown.tick(self.clock.now());
                Vec::new()
            }
            Event::Frame => {
                if let Some(player) = self.player.as_mut() {
                    player.frame();
                }
                Vec::new()
            }
            Event::Media(media) => {
                if let Some(player) = self.player.as_mut() {
                    player.handle(media);
                }
                Vec::new()
            }
            Event::Key(key) => self.handle_key(key),
            Event::Pointer(mouse) => self.handle_pointer(mouse),
            Event::Resize(width, height) => {
                self.screen = Rect::new(0, 0, width, height);
                Vec::new()
            }
            Event::Action(action) => self.apply(action),
            Event::SessionChanged(session) => {
                tracing::debug!(signed_in = session.is_some(), "session mirrored");
                if session.is_some() && self.presentation.auth_open && !self.auth_pending {
                    self.presentation.close_auth();
                }
                self.session = session;
                Vec::new()
            }
            Event::AuthFinished(outcome) => {
                self.finish_auth(outcome);
                Vec::new()
            }
            Event::ExternalPlayerFailed(message) => {
                self.notice = Some(Notice::error("PLAYER ERROR", message));
                Vec::new()
            }
        }
    }

    /// Apply one user intent
    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Navigate(view) => self.presentation.navigate(view),
            Action::OpenAuth => {
                if self.session.is_none() {
                    self.presentation.open_auth();
                }
            }
            Action::CloseAuth => self.presentation.close_auth(),
            Action::ToggleAuthMode => self.presentation.toggle_auth_mode(),
            Action::SubmitAuth => return self.submit_auth(),
            Action::LogOut => {
                if self.session.take().is_some() {
                    self.presentation.navigate(ViewMode::Home);
                    return vec![Effect::LogOut];
                }
            }
            Action::OpenTeaser => self.open_teaser(),
            Action::CloseTeaser => {
                self.presentation.close_teaser();
                self.player = None;
                self.pointer_in_player = false;
            }
            Action::TogglePlay => self.with_player(PlaybackController::toggle_play),
            Action::Seek(fraction) => self.with_player(|p| p.seek(fraction)),
            Action::SeekBy(delta) => self.with_player(|p| p.seek_by(delta)),
            Action::ToggleMute => self.with_player(PlaybackController::toggle_mute),
            Action::ToggleFullscreen => self.with_player(PlaybackController::toggle_fullscreen),
            Action::OpenExternal => match &self.teaser_file {
                Some(path) => return vec![Effect::OpenExternal(path.clone(), self.player_kind)],
                None => {
                    self.notice = Some(Notice::error(
                        "NO TEASER FILE",
                        "Set [teaser] path in the config file to watch in a desktop player.",
                    ));
                }
            },
            Action::DismissNotice => self.notice = None,
            Action::Quit => self.running = false,
        }
        Vec::new()
    }

    fn with_player(&mut self, f: impl FnOnce(&mut PlaybackController)) {
        if let Some(player) = self.player.as_mut() {
            f(player);
        }
    }

    fn open_teaser(&mut self) {
        if self.player.is_some() {
            return;
        }
        self.presentation.open_teaser();
        let element = self.media.open(Arc::clone(&self.clock));
        let mut player = PlaybackController::new(element, Arc::clone(&self.clock));
        player.autoplay();
        tracing::debug!(playing = player.state().is_playing, "teaser opened");
        self.player = Some(player);
    }

    fn submit_auth(&mut self) -> Vec<Effect> {
        if self.auth_pending {
            tracing::debug!("auth submission ignored while another is pending");
            return Vec::new();
        }
        let mode = self.presentation.auth_mode;
        let form = &self.presentation.form;
        if let Some(field) = form.missing_field(mode) {
            self.notice = Some(Notice::error(
                ACCESS_DENIED,
                format!("{} REQUIRED", field.placeholder()),
            ));
            return Vec::new();
        }

        self.auth_pending = true;
        let effect = match mode {
            AuthMode::Signup => Effect::SignUp(SignUpRequest {
                username: form.username.trim().to_string(),
                email: form.email.trim().to_string(),
                password: form.password.clone(),
            }),
            AuthMode::Login => Effect::LogIn(LogInRequest {
                email: form.email.trim().to_string(),
                password: form.password.clone(),
            }),
        };
        vec![effect]
    }

    fn finish_auth(&mut self, outcome: AuthOutcome) {
        let (result, welcome) = match outcome {
            AuthOutcome::LoggedOut(result) => {
                if let Err(e) = result {
                    tracing::warn!(code = %e.code, "provider sign-out failed");
                }
                return;
            }
            AuthOutcome::SignedUp(result) => (result, SIGNUP_WELCOME),
            AuthOutcome::LoggedIn(result) => (result, LOGIN_WELCOME),
        };

        if !self.auth_pending {
            tracing::debug!("dropping auth completion with nothing pending");
            return;
        }
        self.auth_pending = false;

        match result {
            Ok(session) => {
                tracing::info!(user = %session.display_name, "signed in");
                self.session = Some(session);
                self.presentation.close_auth();
                self.presentation.form = AuthForm::default();
                self.notice = Some(Notice::success("ACCESS GRANTED", welcome));
            }
            Err(e) => {
                tracing::info!(code = %e.code, "auth attempt rejected");
                self.notice = Some(Notice::error(ACCESS_DENIED, normalize_code(&e.code)));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.apply(Action::Quit);
        }
        // A notice swallows the key that dismisses it
        if self.notice.is_some() {
            return self.apply(Action::DismissNotice);
        }

        if self.presentation.teaser_open {
            self.handle_teaser_key(key)
        } else if self.presentation.auth_has_focus() {
            self.handle_auth_key(key)
        } else {
            self.handle_page_key(key)
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let action = match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('1') | KeyCode::Char('h') => Action::Navigate(ViewMode::Home),
            KeyCode::Char('2') | KeyCode::Char('c') => Action::Navigate(ViewMode::Cast),
            KeyCode::Char('3') | KeyCode::Char('w') => Action::Navigate(ViewMode::Crew),
            KeyCode::Tab => Action::Navigate(next_view(self.presentation.view)),
            KeyCode::BackTab => Action::Navigate(prev_view(self.presentation.view)),
            KeyCode::Char('t') | KeyCode::Enter => Action::OpenTeaser,
            KeyCode::Char('l') => Action::OpenAuth,
            KeyCode::Char('o') => Action::LogOut,
            _ => return Vec::new(),
        };
        self.apply(action)
    }

    fn handle_auth_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let mode = self.presentation.auth_mode;
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.apply(Action::CloseAuth),
            KeyCode::Enter => self.apply(Action::SubmitAuth),
            KeyCode::F(2) => self.apply(Action::ToggleAuthMode),
            KeyCode::Char('t') if ctrl => self.apply(Action::ToggleAuthMode),
            KeyCode::Tab | KeyCode::Down => {
                self.presentation.form.focus_next(mode);
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.presentation.form.focus_prev(mode);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.presentation.form.backspace(mode);
                Vec::new()
            }
            KeyCode::Char(c) if !ctrl => {
                self.presentation.form.insert(mode, c);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_teaser_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('x') => Action::CloseTeaser,
            KeyCode::Char(' ') | KeyCode::Char('k') => Action::TogglePlay,
            KeyCode::Char('m') => Action::ToggleMute,
            KeyCode::Char('f') => Action::ToggleFullscreen,
            KeyCode::Left => Action::SeekBy(-SEEK_STEP),
            KeyCode::Right => Action::SeekBy(SEEK_STEP),
            KeyCode::Char('e') => Action::OpenExternal,
            KeyCode::Char(d) if d.is_ascii_digit() => {
                let tenth = d.to_digit(10).unwrap_or(0);
                Action::Seek(f64::from(tenth) / 10.0)
            }
            _ => return Vec::new(),
        };
        self.apply(action)
    }

    // -------------------------------------------------------------------------
    // Pointer Event Handling
    // -------------------------------------------------------------------------

    fn handle_pointer(&mut self, mouse: MouseEvent) -> Vec<Effect> {
        let (column, row) = (mouse.column, mouse.row);
        self.pointer = Some((column, row));

        let Some(player) = self.player.as_mut() else {
            return Vec::new();
        };
        let area = layout::player_area(self.screen, player.state().is_fullscreen);
        let inside = layout::contains(area, column, row);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if inside {
                    player.pointer_moved();
                    self.pointer_in_player = true;
                } else if self.pointer_in_player {
                    player.pointer_left();
                    self.pointer_in_player = false;
                }
                Vec::new()
            }
            MouseEventKind::Down(MouseButton::Left) if inside => {
                player.pointer_moved();
                self.pointer_in_player = true;
                match layout::seek_fraction(area, column, row) {
                    Some(fraction) => self.apply(Action::Seek(fraction)),
                    None => Vec::new(),
                }
            }
            _ => Vec::new(),
        }
    }
}

fn next_view(view: ViewMode) -> ViewMode {
    let i = ViewMode::ALL.iter().position(|v| *v == view).unwrap_or(0);
    ViewMode::ALL[(i + 1) % ViewMode::ALL.len()]
}

fn prev_view(view: ViewMode) -> ViewMode {
    let len = ViewMode::ALL.len();
    let i = ViewMode::ALL.iter().position(|v| *v == view).unwrap_or(0);
    ViewMode::ALL[(i + len - 1) % len]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::codes;
    use crate::clock::ManualClock;
    use crate::media::AutoplayPolicy;
    use chrono::{TimeZone, Utc};

    fn app() -> (Arc<ManualClock>, App) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 21, 0, 0, 0).unwrap());
        let media = MediaSource::virtual_teaser(100.0, AutoplayPolicy::Allowed);
        let app = App::new(clock.clone(), media).with_screen(100, 40);
        (clock, app)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.update(key(KeyCode::Char(c)));
        }
    }

    // -------------------------------------------------------------------------
    // Page keys
    // -------------------------------------------------------------------------

    #[test]
    fn test_app_quit_key() {
        let (_clock, mut app) = app();
        assert!(app.running);
        app.update(key(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn test_app_quit_ctrl_c() {
        let (_clock, mut app) = app();
        app.presentation.open_auth();
        app.update(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!app.running);
    }

    #[test]
    fn test_view_keys() {
        let (_clock, mut app) = app();
        app.update(key(KeyCode::Char('2')));
        assert_eq!(app.presentation.view, ViewMode::Cast);
        app.update(key(KeyCode::Char('w')));
        assert_eq!(app.presentation.view, ViewMode::Crew);
        app.update(key(KeyCode::Tab));
        assert_eq!(app.presentation.view, ViewMode::Home);
        app.update(key(KeyCode::BackTab));
        assert_eq!(app.presentation.view, ViewMode::Crew);
    }

    #[test]
    fn test_release_events_ignored() {
        let (_clock, mut app) = app();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        release.kind = KeyEventKind::Release;
        app.update(Event::Key(release));
        assert!(app.running);
    }

    #[test]
    fn test_notice_swallows_key() {
        let (_clock, mut app) = app();
        app.notice = Some(Notice::error("X", "Y"));
        app.update(key(KeyCode::Char('q')));
        assert!(app.running);
        assert!(app.notice.is_none());
    }

    // -------------------------------------------------------------------------
    // Auth overlay
    // -------------------------------------------------------------------------

    #[test]
    fn test_typing_goes_to_focused_field() {
        let (_clock, mut app) = app();
        app.update(key(KeyCode::Char('l')));
        assert!(app.presentation.auth_open);

        // 'q' is text here, not quit
        type_text(&mut app, "q@x.com");
        app.update(key(KeyCode::Tab));
        type_text(&mut app, "pw");
        assert!(app.running);
        assert_eq!(app.presentation.form.email, "q@x.com");
        assert_eq!(app.presentation.form.password, "pw");
    }

    #[test]
    fn test_mode_toggle_keys() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenAuth);
        app.update(key(KeyCode::F(2)));
        assert_eq!(app.presentation.auth_mode, AuthMode::Signup);
        app.update(Event::Key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL)));
        assert_eq!(app.presentation.auth_mode, AuthMode::Login);
        app.update(key(KeyCode::Esc));
        assert!(!app.presentation.auth_open);
    }

    #[test]
    fn test_submit_with_blank_field() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenAuth);
        let effects = app.apply(Action::SubmitAuth);
        assert!(effects.is_empty());
        assert!(!app.auth_pending);
        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.title, ACCESS_DENIED);
        assert_eq!(notice.message, "EMAIL ADDRESS REQUIRED");
    }

    #[test]
    fn test_second_submit_blocked() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenAuth);
        app.presentation.form.email = "n@x.com".into();
        app.presentation.form.password = "secret123".into();

        let first = app.apply(Action::SubmitAuth);
        assert!(matches!(first.as_slice(), [Effect::LogIn(_)]));
        assert!(app.apply(Action::SubmitAuth).is_empty());
    }

    #[test]
    fn test_failed_login_keeps_overlay_and_input() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenAuth);
        app.presentation.form.email = "n@x.com".into();
        app.presentation.form.password = "nope".into();
        app.apply(Action::SubmitAuth);

        app.update(Event::AuthFinished(AuthOutcome::LoggedIn(Err(AuthError::new(
            codes::WRONG_PASSWORD,
            "bad",
        )))));
        assert!(app.presentation.auth_open);
        assert_eq!(app.presentation.form.email, "n@x.com");
        assert_eq!(app.notice.as_ref().unwrap().message, "WRONG PASSWORD");
        assert!(!app.auth_pending);
    }

    #[test]
    fn test_stray_completion_dropped() {
        let (_clock, mut app) = app();
        app.update(Event::AuthFinished(AuthOutcome::LoggedIn(Ok(Session::new("A", "a@x.com")))));
        assert!(app.session.is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_open_auth_ignored_when_signed_in() {
        let (_clock, mut app) = app();
        app.session = Some(Session::new("Nikhil", "n@x.com"));
        app.update(key(KeyCode::Char('l')));
        assert!(!app.presentation.auth_open);
    }

    #[test]
    fn test_logout_resets_view() {
        let (_clock, mut app) = app();
        app.session = Some(Session::new("Nikhil", "n@x.com"));
        app.apply(Action::Navigate(ViewMode::Crew));
        let effects = app.update(key(KeyCode::Char('o')));
        assert_eq!(effects, vec![Effect::LogOut]);
        assert!(app.session.is_none());
        assert_eq!(app.presentation.view, ViewMode::Home);

        // Already signed out: nothing to do
        assert!(app.apply(Action::LogOut).is_empty());
    }

    // -------------------------------------------------------------------------
    // Teaser overlay
    // -------------------------------------------------------------------------

    #[test]
    fn test_teaser_autoplays_and_closes() {
        let (_clock, mut app) = app();
        app.update(key(KeyCode::Char('t')));
        assert!(app.presentation.teaser_open);
        assert!(app.playback().unwrap().is_playing);

        app.update(key(KeyCode::Char(' ')));
        assert!(!app.playback().unwrap().is_playing);

        app.update(key(KeyCode::Esc));
        assert!(!app.presentation.teaser_open);
        assert!(app.playback().is_none());
    }

    #[test]
    fn test_digit_seeks() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenTeaser);
        app.update(key(KeyCode::Char('5')));
        assert!((app.player().unwrap().position() - 50.0).abs() < 0.01);
        app.update(key(KeyCode::Right));
        assert!((app.player().unwrap().position() - 55.0).abs() < 0.01);
    }

    #[test]
    fn test_click_on_seek_bar() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenTeaser);
        let area = layout::player_area(app.screen(), false);
        let bar = layout::progress_bar_area(area);
        app.update(Event::Pointer(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: bar.x + bar.width - 1,
            row: bar.y,
            modifiers: KeyModifiers::empty(),
        }));
        assert_eq!(app.playback().unwrap().progress_percent, 100.0);
    }

    #[test]
    fn test_pointer_leaving_player_hides_controls() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenTeaser);
        let area = layout::player_area(app.screen(), false);
        let moved = |column, row| {
            Event::Pointer(MouseEvent {
                kind: MouseEventKind::Moved,
                column,
                row,
                modifiers: KeyModifiers::empty(),
            })
        };
        app.update(moved(area.x + 2, area.y + 2));
        assert!(app.playback().unwrap().controls_visible);
        app.update(moved(0, 0));
        assert!(!app.playback().unwrap().controls_visible);
        assert_eq!(app.pointer, Some((0, 0)));
    }

    #[test]
    fn test_external_without_file() {
        let (_clock, mut app) = app();
        app.apply(Action::OpenTeaser);
        assert!(app.update(key(KeyCode::Char('e'))).is_empty());
        assert_eq!(app.notice.as_ref().unwrap().title, "NO TEASER FILE");

        let (_clock, app) = self::app();
        let mut app = app.with_teaser_file(Some("teaser.mp4".into()), PlayerKind::Mpv);
        let effects = app.apply(Action::OpenExternal);
        assert_eq!(effects, vec![Effect::OpenExternal("teaser.mp4".into(), PlayerKind::Mpv)]);
    }

    #[test]
    fn test_tick_updates_remaining() {
        let (clock, mut app) = app();
        // 2024-01-21 is 20 days past the anchor
        assert_eq!(app.remaining.days, 10);
        clock.advance_millis(1_000);
        app.update(Event::Tick);
        assert_eq!(app.remaining.days, 9);
        assert_eq!(app.remaining.seconds, 59);
    }
}
