//! Teaser player overlay
//!
//! A bordered "screen" with the series title, and a controls strip along the
//! bottom holding the seek bar, time readout and key hints. The strip is
//! left blank while the controller reports the controls hidden.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::content;
use crate::media::PlaybackController;
use crate::models::PlaybackState;
use crate::ui::{layout, Theme};

/// Format seconds as HH:MM:SS or MM:SS
pub fn format_duration(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Seek bar of `width` cells: (filled, empty)
pub fn progress_cells(percent: f64, width: u16) -> (u16, u16) {
    let width = width as f64;
    let filled = (percent.clamp(0.0, 100.0) / 100.0 * width).round();
    (filled as u16, (width - filled) as u16)
}

pub fn render(frame: &mut Frame, screen: Rect, player: &PlaybackController) {
    let state = player.state();
    let area = layout::player_area(screen, state.is_fullscreen);

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if state.is_fullscreen { BorderType::Plain } else { BorderType::Double })
        .border_style(Theme::border_focused())
        .title(Span::styled(
            format!(" ▶ {} · TEASER ", content::SERIES_TITLE),
            Theme::title(),
        ))
        .style(Theme::text());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let controls = layout::controls_area(area);
    let picture = Rect {
        height: inner.height.saturating_sub(controls.height),
        ..inner
    };
    render_picture(frame, picture, &state);

    if state.controls_visible {
        render_controls(frame, area, player, &state);
    }
}

fn render_picture(frame: &mut Frame, area: Rect, state: &PlaybackState) {
    let status = if state.is_playing {
        Span::styled("▶ PLAYING", Theme::success())
    } else {
        Span::styled("❚❚ PAUSED", Theme::dimmed())
    };
    let top = area.height.saturating_sub(3) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(content::SERIES_TITLE, Theme::headline())));
    lines.push(Line::from(Span::styled(content::TAGLINE, Theme::muted())));
    lines.push(Line::from(status));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_controls(frame: &mut Frame, player_area: Rect, player: &PlaybackController, state: &PlaybackState) {
    let bar = layout::progress_bar_area(player_area);
    let (filled, empty) = progress_cells(state.progress_percent, bar.width);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("━".repeat(filled as usize), Theme::progress_filled()),
            Span::styled("─".repeat(empty as usize), Theme::progress_empty()),
        ])),
        bar,
    );

    let controls = layout::controls_area(player_area);
    if controls.height < 2 {
        return;
    }
    let readout = Rect {
        y: controls.y + 1,
        height: controls.height - 1,
        ..controls
    };

    let play_icon = if state.is_playing { "❚❚" } else { "▶" };
    let sound_icon = if state.is_muted { "🔇" } else { "🔊" };
    let fullscreen_icon = if state.is_fullscreen { "⤡" } else { "⤢" };

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", play_icon), Theme::accent()),
            Span::styled(
                format!(
                    "{} / {}",
                    format_duration(player.position()),
                    format_duration(player.duration())
                ),
                Theme::text(),
            ),
            Span::raw("   "),
            Span::styled(sound_icon, Theme::muted()),
            Span::raw("  "),
            Span::styled(fullscreen_icon, Theme::muted()),
        ]),
        Line::from(vec![
            Span::styled(" SPACE ", Theme::keybind()),
            Span::styled("Play/Pause  ", Theme::dimmed()),
            Span::styled(" ←→ ", Theme::keybind()),
            Span::styled("Seek  ", Theme::dimmed()),
            Span::styled(" M ", Theme::keybind()),
            Span::styled("Mute  ", Theme::dimmed()),
            Span::styled(" F ", Theme::keybind()),
            Span::styled("Fullscreen  ", Theme::dimmed()),
            Span::styled(" ESC ", Theme::keybind()),
            Span::styled("Close", Theme::dimmed()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), readout);
}
