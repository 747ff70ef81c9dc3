//! Home view: hero banner with the release countdown, then cast and crew

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::content;
use crate::countdown::Remaining;
use crate::ui::{gallery, Theme};

const HERO_HEIGHT: u16 = 12;
const FOOTER_HEIGHT: u16 = 2;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HERO_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_hero(frame, chunks[0], app);

    let galleries = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    gallery::render_cast(frame, galleries[0]);
    gallery::render_crew(frame, galleries[1]);

    render_footer(frame, chunks[2]);
}

fn render_hero(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(content::SERIES_KICKER.to_uppercase(), Theme::kicker())),
        Line::from(Span::styled(
            content::SERIES_TITLE,
            Theme::headline().add_modifier(Modifier::REVERSED),
        )),
        Line::from(Span::styled(
            content::TAGLINE,
            Theme::muted().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled("NEXT EPISODE IN", Theme::dimmed())),
    ];
    lines.extend(countdown_lines(&app.remaining));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" ▶ WATCH TEASER ", Theme::button()),
        Span::styled("  t", Theme::keybind()),
    ]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// `DD : HH : MM : SS` with unit captions underneath
pub fn countdown_lines(remaining: &Remaining) -> [Line<'static>; 2] {
    [
        Line::from(Span::styled(remaining.to_string(), Theme::headline())),
        Line::from(Span::styled("DAYS   HRS    MIN    SEC", Theme::dimmed())),
    ]
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(vec![Line::from(vec![
        Span::styled(content::FOOTER_PITCH, Theme::muted()),
        Span::raw("  "),
        Span::styled(format!("© {}", content::FOOTER_BRAND), Theme::dimmed()),
    ])])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP).border_style(Theme::border()));
    frame.render_widget(footer, area);
}
