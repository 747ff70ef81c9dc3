//! Terminal UI components
//!
//! Rendering is a pure function of [`App`] plus the compiled-in content
//! tables. Built with ratatui in a black-and-red noir look.

pub mod auth;
pub mod gallery;
pub mod home;
pub mod layout;
pub mod player;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::content;
use crate::models::{Notice, NoticeKind, ViewMode};

/// Glyph drawn at the pointer position
pub const CURSOR_GLYPH: &str = "●";

/// Draw the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Theme::text()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(layout::NAV_HEIGHT),
            Constraint::Min(1),
            Constraint::Length(layout::STATUS_HEIGHT),
        ])
        .split(area);

    render_nav(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);

    // Overlays, bottom to top
    if app.presentation.auth_open {
        auth::render(frame, layout::auth_area(area), app);
    }
    if let Some(player) = app.player() {
        player::render(frame, area, player);
    }
    if let Some(notice) = &app.notice {
        render_notice(frame, area, notice);
    }
    if let Some((column, row)) = app.pointer {
        render_cursor(frame, column, row);
    }
}

/// Studio logo, view tabs and the session button
fn render_nav(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Min(1),
            Constraint::Length(24),
        ])
        .split(inner);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(content::STUDIO, Theme::headline()),
        Span::raw(" "),
        Span::styled(content::STUDIO_SUFFIX, Theme::kicker()),
    ]));
    frame.render_widget(logo, columns[0]);

    let mut tabs = Vec::new();
    for (i, view) in ViewMode::ALL.iter().enumerate() {
        let style = if *view == app.presentation.view {
            Theme::nav_active()
        } else {
            Theme::nav()
        };
        tabs.push(Span::styled(format!("{}", i + 1), Theme::keybind()));
        tabs.push(Span::raw(" "));
        tabs.push(Span::styled(view.label(), style));
        tabs.push(Span::raw("   "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).alignment(Alignment::Center),
        columns[1],
    );

    let session = match &app.session {
        Some(session) => Line::from(vec![
            Span::styled(session.display_name.to_uppercase(), Theme::headline()),
            Span::raw(" "),
            Span::styled(" LOGOUT ", Theme::button_light()),
        ]),
        None => Line::from(Span::styled(" LOGIN ", Theme::button())),
    };
    frame.render_widget(
        Paragraph::new(session).alignment(Alignment::Right),
        columns[2],
    );
}

fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.presentation.view {
        ViewMode::Home => home::render(frame, area, app),
        ViewMode::Cast => gallery::render_cast(frame, area),
        ViewMode::Crew => gallery::render_crew(frame, area),
    }
}

/// Status bar at the bottom: active view, session, key hints
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let view = Span::styled(
        format!(" {} ", app.presentation.view.label()),
        Theme::button(),
    );

    let who = match &app.session {
        Some(session) => Span::styled(format!(" ◉ {} ", session.display_name), Theme::success()),
        None => Span::styled(" ○ guest ", Theme::dimmed()),
    };

    let help = if app.presentation.teaser_open {
        " space:play  m:mute  f:fullscreen  ←→:seek  e:external  esc:close "
    } else if app.presentation.auth_has_focus() {
        " tab:next field  enter:submit  F2:switch form  esc:close "
    } else if app.session.is_some() {
        " q:quit  1-3:views  t:teaser  o:logout "
    } else {
        " q:quit  1-3:views  t:teaser  l:login "
    };

    let mut spans = vec![view, who, Span::raw("│"), Span::styled(help, Theme::dimmed())];
    if app.auth_pending {
        spans.push(Span::styled(" AUTHENTICATING… ", Theme::kicker()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::status_bar()), area);
}

/// Blocking notice popup
fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let popup_width = 56.min(area.width.saturating_sub(4));
    let popup_area = layout::centered(area, popup_width, 7);

    frame.render_widget(Clear, popup_area);

    let (style, icon) = match notice.kind {
        NoticeKind::Success => (Theme::success(), "✓"),
        NoticeKind::Error => (Theme::error(), "✗"),
    };

    let popup = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(notice.message.as_str(), Theme::headline())),
        Line::from(""),
        Line::from(Span::styled("press any key", Theme::dimmed())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(style)
            .title(Span::styled(format!(" {} {} ", icon, notice.title), style))
            .style(Theme::text()),
    );

    frame.render_widget(popup, popup_area);
}

/// Custom pointer, drawn over everything
fn render_cursor(frame: &mut Frame, column: u16, row: u16) {
    if let Some(cell) = frame.buffer_mut().cell_mut(Position::new(column, row)) {
        cell.set_symbol(CURSOR_GLYPH).set_style(Theme::cursor());
    }
}
