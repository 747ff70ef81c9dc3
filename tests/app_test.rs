//! End-to-end flow tests for Red Lotus
//!
//! Drives the app through its event channel with a manual clock, a virtual
//! teaser and the in-process identity provider: sign up, failed log in,
//! log out, teaser playback and the full runtime loop on a test terminal.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use redlotus::app::{ACCESS_DENIED, LOGIN_WELCOME, SIGNUP_WELCOME};
use redlotus::auth::MemoryProvider;
use redlotus::clock::ManualClock;
use redlotus::media::{AutoplayPolicy, MediaEvent, MediaSource};
use redlotus::models::{AuthMode, LogInRequest, NoticeKind, Session, ViewMode};
use redlotus::runtime::{AuthContext, EffectRunner, Runtime};
use redlotus::{Action, App, AuthBridge, Event};

// =============================================================================
// Helpers
// =============================================================================

fn test_app() -> (Arc<ManualClock>, App) {
    // 20 days past the schedule anchor
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

/// Feed events back into the app, running effects, until `done` holds
async fn pump_until(
    app: &mut App,
    runner: &mut EffectRunner,
    rx: &mut UnboundedReceiver<Event>,
    done: impl Fn(&App) -> bool,
) {
    while !done(app) {
        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("event arrives in time")
            .expect("channel open");
        for effect in app.update(event) {
            runner.run(effect);
        }
    }
}

fn submit(app: &mut App, runner: &mut EffectRunner) {
    for effect in app.update(key(KeyCode::Enter)) {
        runner.run(effect);
    }
}

// =============================================================================
// Sign up / log in flows
// =============================================================================

#[tokio::test]
async fn test_signup_flow_closes_overlay() {
    let (_clock, mut app) = test_app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let bridge = AuthBridge::new(Arc::new(MemoryProvider::new()));
    let mut runner = EffectRunner::new(bridge, tx);

    app.update(key(KeyCode::Char('l')));
    app.update(key(KeyCode::F(2)));
    assert_eq!(app.presentation.auth_mode, AuthMode::Signup);

    type_text(&mut app, "Nikhil");
    app.update(key(KeyCode::Tab));
    type_text(&mut app, "n@x.com");
    app.update(key(KeyCode::Tab));
    type_text(&mut app, "secret123");
    submit(&mut app, &mut runner);
    assert!(app.auth_pending);

    pump_until(&mut app, &mut runner, &mut rx, |a| !a.auth_pending).await;

    assert_eq!(app.session, Some(Session::new("Nikhil", "n@x.com")));
    assert!(!app.presentation.auth_open);
    assert!(app.presentation.form.password.is_empty());
    let notice = app.notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, SIGNUP_WELCOME);
}

#[tokio::test]
async fn test_login_wrong_password_keeps_overlay() {
    let (_clock, mut app) = test_app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let provider = MemoryProvider::new().with_account("n@x.com", "secret123", Some("Nikhil"));
    let mut runner = EffectRunner::new(AuthBridge::new(Arc::new(provider)), tx);

    app.apply(Action::OpenAuth);
    type_text(&mut app, "n@x.com");
    app.update(key(KeyCode::Tab));
    type_text(&mut app, "wrongpass");
    submit(&mut app, &mut runner);

    pump_until(&mut app, &mut runner, &mut rx, |a| !a.auth_pending).await;

    assert!(app.session.is_none());
    assert!(app.presentation.auth_open);
    let notice = app.notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, ACCESS_DENIED);
    assert_eq!(notice.message, "WRONG PASSWORD");

    // Dismiss, fix the password, try again
    app.update(key(KeyCode::Esc));
    assert!(app.notice.is_none());
    assert!(app.presentation.auth_open);
    for _ in 0.."wrongpass".len() {
        app.update(key(KeyCode::Backspace));
    }
    type_text(&mut app, "secret123");
    submit(&mut app, &mut runner);
    pump_until(&mut app, &mut runner, &mut rx, |a| !a.auth_pending).await;

    assert_eq!(app.session, Some(Session::new("Nikhil", "n@x.com")));
    assert_eq!(app.notice.as_ref().unwrap().message, LOGIN_WELCOME);
}

#[test]
fn test_double_toggle_returns_to_login() {
    let (_clock, mut app) = test_app();
    app.apply(Action::OpenAuth);
    assert_eq!(app.presentation.auth_mode, AuthMode::Login);
    app.apply(Action::ToggleAuthMode);
    assert_eq!(app.presentation.auth_mode, AuthMode::Signup);
    app.apply(Action::ToggleAuthMode);
    assert_eq!(app.presentation.auth_mode, AuthMode::Login);
}

#[tokio::test]
async fn test_logout_returns_home() {
    let (_clock, mut app) = test_app();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let provider = Arc::new(MemoryProvider::new().with_account("n@x.com", "secret123", Some("Nikhil")));
    let bridge = AuthBridge::new(provider.clone());
    let mut runner = EffectRunner::new(bridge.clone(), tx);

    app.apply(Action::OpenAuth);
    type_text(&mut app, "n@x.com");
    app.update(key(KeyCode::Tab));
    type_text(&mut app, "secret123");
    submit(&mut app, &mut runner);
    pump_until(&mut app, &mut runner, &mut rx, |a| a.session.is_some()).await;
    app.apply(Action::DismissNotice);

    app.update(key(KeyCode::Char('3')));
    assert_eq!(app.presentation.view, ViewMode::Crew);
    for effect in app.update(key(KeyCode::Char('o'))) {
        runner.run(effect);
    }
    assert!(app.session.is_none());
    assert_eq!(app.presentation.view, ViewMode::Home);

    // Provider follows once the effect lands
    for _ in 0..50 {
        if bridge.current().is_none() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(bridge.current(), None);
}

#[test]
fn test_session_change_from_provider() {
    let (_clock, mut app) = test_app();
    app.apply(Action::OpenAuth);

    // Restored elsewhere: the overlay is no longer needed
    app.update(Event::SessionChanged(Some(Session::new("Nikhil", "n@x.com"))));
    assert!(!app.presentation.auth_open);
    assert_eq!(app.session.as_ref().unwrap().display_name, "Nikhil");

    // Revoked by the provider
    app.update(Event::SessionChanged(None));
    assert!(app.session.is_none());
}

// =============================================================================
// Countdown and teaser
// =============================================================================

#[test]
fn test_countdown_rolls_over_at_boundary() {
    let (clock, mut app) = test_app();
    assert_eq!(app.remaining.days, 10);

    // One second before the boundary
    clock.set(Utc.with_ymd_and_hms(2024, 1, 30, 23, 59, 59).unwrap());
    app.update(Event::Tick);
    assert_eq!(app.remaining.total_seconds(), 1);

    // Exactly on the boundary, then past it
    clock.advance_millis(1_000);
    app.update(Event::Tick);
    assert!(app.remaining.is_zero());

    clock.advance_millis(1_000);
    app.update(Event::Tick);
    assert_eq!(app.remaining.days, 14);
    assert_eq!(app.remaining.hours, 23);
    assert_eq!(app.remaining.seconds, 59);
}

#[test]
fn test_teaser_plays_to_end() {
    let (clock, mut app) = test_app();
    app.update(key(KeyCode::Char('t')));
    assert!(app.playback().unwrap().is_playing);

    clock.advance_millis(50_000);
    app.update(Event::Frame);
    let state = app.playback().unwrap();
    assert!((state.progress_percent - 50.0).abs() < 1.0);
    // Idle past the hide delay while playing
    assert!(!state.controls_visible);

    clock.advance_millis(60_000);
    app.update(Event::Frame);
    let state = app.playback().unwrap();
    assert!(!state.is_playing);
    assert!(state.controls_visible);
    assert_eq!(state.progress_percent, 100.0);
}

#[test]
fn test_media_events_routed_to_player() {
    let (_clock, mut app) = test_app();
    // No player yet: ignored
    app.update(Event::Media(MediaEvent::Ended));
    assert!(app.playback().is_none());

    app.apply(Action::OpenTeaser);
    app.update(Event::Media(MediaEvent::TimeUpdate {
        current: 25.0,
        duration: 100.0,
    }));
    assert_eq!(app.playback().unwrap().progress_percent, 25.0);

    app.update(Event::Media(MediaEvent::FullscreenChange(true)));
    assert!(app.playback().unwrap().is_fullscreen);
}

#[test]
fn test_blocked_autoplay_waits_for_gesture() {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 21, 0, 0, 0).unwrap());
    let media = MediaSource::virtual_teaser(100.0, AutoplayPolicy::RequireActivation);
    let mut app = App::new(clock, media);

    app.apply(Action::OpenTeaser);
    assert!(!app.playback().unwrap().is_playing);
    app.update(key(KeyCode::Char(' ')));
    assert!(app.playback().unwrap().is_playing);
}

// =============================================================================
// Runtime
// =============================================================================

#[tokio::test]
async fn test_runtime_quits_on_q() {
    let (_clock, mut app) = test_app();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    let runtime = Runtime::new();
    let auth = AuthContext::start(Arc::new(MemoryProvider::new()), runtime.sender());

    runtime.sender().send(key(KeyCode::Char('q'))).unwrap();
    tokio::time::timeout(Duration::from_secs(2), runtime.run(&mut terminal, &mut app, &auth))
        .await
        .expect("loop exits")
        .unwrap();

    assert!(!app.running);
    assert_eq!(app.screen().width, 100);
}

#[tokio::test]
async fn test_runtime_signs_in_through_effects() {
    let (_clock, mut app) = test_app();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    let runtime = Runtime::new();
    let provider = MemoryProvider::new().with_account("n@x.com", "secret123", Some("Nikhil"));
    let auth = AuthContext::start(Arc::new(provider), runtime.sender());

    let tx = runtime.sender();
    tx.send(key(KeyCode::Char('l'))).unwrap();
    for c in "n@x.com".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Tab)).unwrap();
    for c in "secret123".chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();

    let quitter = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = tx.send(Event::Action(Action::Quit));
    });

    tokio::time::timeout(Duration::from_secs(3), runtime.run(&mut terminal, &mut app, &auth))
        .await
        .expect("loop exits")
        .unwrap();
    quitter.await.unwrap();

    assert_eq!(app.session, Some(Session::new("Nikhil", "n@x.com")));
    assert!(!app.presentation.auth_open);
    assert!(!app.auth_pending);
}

#[tokio::test]
async fn test_runtime_logout_then_quit_signs_out_provider() {
    let (_clock, mut app) = test_app();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    let runtime = Runtime::new();
    let provider = Arc::new(MemoryProvider::new().with_account("n@x.com", "secret123", Some("Nikhil")));
    let bridge = AuthBridge::new(provider.clone());
    let session = bridge
        .log_in(LogInRequest {
            email: "n@x.com".into(),
            password: "secret123".into(),
        })
        .await
        .unwrap();
    app.session = Some(session);
    let auth = AuthContext::start(provider, runtime.sender());

    // Both keys land in the same batch
    let tx = runtime.sender();
    tx.send(key(KeyCode::Char('o'))).unwrap();
    tx.send(key(KeyCode::Char('q'))).unwrap();

    tokio::time::timeout(Duration::from_secs(3), runtime.run(&mut terminal, &mut app, &auth))
        .await
        .expect("loop exits")
        .unwrap();

    assert!(app.session.is_none());
    assert!(auth.bridge.current().is_none(), "provider still holds the session");
}
