//! UI rendering tests for Red Lotus
//!
//! Renders the full screen into a ratatui `TestBackend` and checks what
//! ends up in the buffer.
//!
//! ## Test Cases
//! - theme: palette is RGB, body text meets WCAG AA on black
//! - home: logo, title, countdown digits, teaser button, galleries
//! - views: cast grid, crew credits
//! - auth overlay: masked password, placeholders, pending label
//! - player overlay: title, controls, idle-hidden controls
//! - notice popup, session button, custom cursor

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

use redlotus::clock::ManualClock;
use redlotus::media::{AutoplayPolicy, MediaSource};
use redlotus::models::{FormField, Notice, Session, ViewMode};
use redlotus::ui::theme::{color_to_rgb, meets_wcag_aa, Theme};
use redlotus::ui::{self, CURSOR_GLYPH};
use redlotus::{Action, App, Event};

// =============================================================================
// Helpers
// =============================================================================

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn test_app() -> (Arc<ManualClock>, App) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 21, 0, 0, 0).unwrap());
    let media = MediaSource::virtual_teaser(100.0, AutoplayPolicy::Allowed);
    let app = App::new(clock.clone(), media).with_screen(100, 40);
    (clock, app)
}

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                text.push_str(cell.symbol());
            }
        }
        text.push('\n');
    }
    text
}

fn draw(app: &App, width: u16, height: u16) -> String {
    let mut terminal = test_terminal(width, height);
    terminal.draw(|frame| ui::render(frame, app)).unwrap();
    buffer_text(terminal.backend().buffer())
}

// =============================================================================
// THEME
// =============================================================================

#[test]
fn test_theme_colors_valid_rgb() {
    let colors = [
        ("BACKGROUND", Theme::BACKGROUND),
        ("CARD", Theme::CARD),
        ("LOTUS_RED", Theme::LOTUS_RED),
        ("WHITE", Theme::WHITE),
        ("TEXT", Theme::TEXT),
        ("MUTED", Theme::MUTED),
        ("DIM", Theme::DIM),
        ("SUCCESS", Theme::SUCCESS),
        ("ERROR", Theme::ERROR),
        ("BORDER", Theme::BORDER),
        ("BORDER_FOCUSED", Theme::BORDER_FOCUSED),
    ];
    for (name, color) in colors {
        assert!(color_to_rgb(color).is_some(), "{} should be an RGB color", name);
    }
}

#[test]
fn test_theme_text_contrast() {
    let bg = color_to_rgb(Theme::BACKGROUND).unwrap();
    for color in [Theme::TEXT, Theme::WHITE, Theme::MUTED, Theme::LOTUS_RED] {
        let fg = color_to_rgb(color).unwrap();
        assert!(meets_wcag_aa(fg, bg), "{:?} on black fails AA", color);
    }
}

// =============================================================================
// HOME
// =============================================================================

#[test]
fn test_home_shows_hero_and_countdown() {
    let (_clock, app) = test_app();
    let screen = draw(&app, 100, 40);

    assert!(screen.contains("SILVER SPARK"));
    assert!(screen.contains("RED LOTUS"));
    assert!(screen.contains("NEXT EPISODE IN"));
    assert!(screen.contains("10 : 00 : 00 : 00"));
    assert!(screen.contains("WATCH TEASER"));
    assert!(screen.contains("THE CAST"));
    assert!(screen.contains("THE CREW"));
    assert!(screen.contains("LOGIN"));
    assert!(screen.contains("guest"));
}

#[test]
fn test_countdown_redraws_after_tick() {
    let (clock, mut app) = test_app();
    clock.advance_millis(61_000);
    app.update(Event::Tick);
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("09 : 23 : 58 : 59"));
}

#[test]
fn test_layout_responsive() {
    let (_clock, app) = test_app();
    // Minimum and large sizes both render
    let small = draw(&app, 80, 24);
    assert!(small.contains("RED LOTUS"));
    let large = draw(&app, 200, 50);
    assert!(large.contains("RED LOTUS"));
}

// =============================================================================
// GALLERIES
// =============================================================================

#[test]
fn test_cast_view_lists_every_member() {
    let (_clock, mut app) = test_app();
    app.apply(Action::Navigate(ViewMode::Cast));
    let screen = draw(&app, 100, 40);
    for member in redlotus::content::CAST.iter() {
        assert!(screen.contains(member.actor), "missing {}", member.actor);
        assert!(screen.contains(member.role), "missing {}", member.role);
    }
}

#[test]
fn test_crew_view_lists_credits() {
    let (_clock, mut app) = test_app();
    app.apply(Action::Navigate(ViewMode::Crew));
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("WRITER, DIRECTOR & SCREENPLAY"));
    assert!(screen.contains("MUSIC DIRECTOR & BGM"));
    assert!(screen.contains("BADLAPUR & AMBARNATH"));
}

// =============================================================================
// AUTH OVERLAY
// =============================================================================

#[test]
fn test_auth_overlay_masks_password() {
    let (_clock, mut app) = test_app();
    app.apply(Action::OpenAuth);
    app.presentation.form.email = "n@x.com".into();
    *app.presentation.form.value_mut(FormField::Password) = "secret123".into();

    let screen = draw(&app, 100, 40);
    assert!(screen.contains("n@x.com"));
    assert!(screen.contains("•••••••••"));
    assert!(!screen.contains("secret123"));
    assert!(screen.contains("ENTER THE DARK"));
}

#[test]
fn test_signup_overlay_shows_placeholders() {
    let (_clock, mut app) = test_app();
    app.apply(Action::OpenAuth);
    app.apply(Action::ToggleAuthMode);
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("SIGNUP"));
    assert!(screen.contains("USERNAME"));
    assert!(screen.contains("EMAIL ADDRESS"));
    assert!(screen.contains("JOIN THE CREW"));
    assert!(screen.contains("Back to Login"));
}

#[test]
fn test_pending_auth_label() {
    let (_clock, mut app) = test_app();
    app.apply(Action::OpenAuth);
    app.auth_pending = true;
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("AUTHENTICATING…"));
}

// =============================================================================
// PLAYER OVERLAY
// =============================================================================

#[test]
fn test_player_overlay_with_controls() {
    let (_clock, mut app) = test_app();
    app.apply(Action::OpenTeaser);
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("TEASER"));
    assert!(screen.contains("PLAYING"));
    assert!(screen.contains("Play/Pause"));
    assert!(screen.contains("00:00 / 01:40"));
}

#[test]
fn test_player_controls_hide_when_idle() {
    let (clock, mut app) = test_app();
    app.apply(Action::OpenTeaser);
    clock.advance_millis(3_000);
    app.update(Event::Frame);
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("PLAYING"));
    assert!(!screen.contains("Play/Pause"));
}

// =============================================================================
// NOTICE / NAV / CURSOR
// =============================================================================

#[test]
fn test_notice_popup() {
    let (_clock, mut app) = test_app();
    app.notice = Some(Notice::error("ACCESS DENIED", "WRONG PASSWORD"));
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("✗ ACCESS DENIED"));
    assert!(screen.contains("WRONG PASSWORD"));
    assert!(screen.contains("press any key"));
}

#[test]
fn test_signed_in_nav() {
    let (_clock, mut app) = test_app();
    app.session = Some(Session::new("Nikhil", "n@x.com"));
    let screen = draw(&app, 100, 40);
    assert!(screen.contains("NIKHIL"));
    assert!(screen.contains("LOGOUT"));
    assert!(screen.contains("◉ Nikhil"));
}

#[test]
fn test_cursor_drawn_at_pointer() {
    let (_clock, mut app) = test_app();
    app.pointer = Some((7, 12));
    let mut terminal = test_terminal(100, 40);
    terminal.draw(|frame| ui::render(frame, &app)).unwrap();
    let buffer = terminal.backend().buffer();
    let cell = buffer.cell((7, 12)).unwrap();
    assert_eq!(cell.symbol(), CURSOR_GLYPH);
    assert_eq!(cell.fg, Theme::LOTUS_RED);
}
