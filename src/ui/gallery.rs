//! Cast and crew galleries
//!
//! Cast members render as a grid of cards, credits as a single column.
//! Featured credits are drawn inverted.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::content::{CAST, CREW};
use crate::models::{CastMember, CreditEntry};
use crate::ui::Theme;

const CARD_WIDTH: u16 = 22;
const CARD_HEIGHT: u16 = 4;

/// Cards per row for a given width, at least one
pub fn columns_for(width: u16) -> u16 {
    (width / CARD_WIDTH).clamp(1, 4)
}

pub fn render_cast(frame: &mut Frame, area: Rect) {
    let block = section_block(" THE CAST ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = columns_for(inner.width);
    let width = inner.width / cols;

    for (i, member) in CAST.iter().enumerate() {
        let i = i as u16;
        let y = inner.y + (i / cols) * CARD_HEIGHT;
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        let card = Rect::new(inner.x + (i % cols) * width, y, width, CARD_HEIGHT);
        render_cast_card(frame, card, member);
    }
}

fn render_cast_card(frame: &mut Frame, area: Rect, member: &CastMember) {
    let card = Paragraph::new(vec![
        Line::from(Span::styled(member.role, Theme::kicker())),
        Line::from(Span::styled(member.actor, Theme::headline())),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Theme::border())
            .style(Theme::card()),
    );
    frame.render_widget(card, area);
}

pub fn render_crew(frame: &mut Frame, area: Rect) {
    let block = section_block(" THE CREW ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = CREW.iter().flat_map(credit_lines).collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn credit_lines(entry: &CreditEntry) -> [Line<'static>; 3] {
    let names = if entry.featured {
        Span::styled(format!(" {} ", entry.joined_names()), Theme::card_featured())
    } else {
        Span::styled(entry.joined_names(), Theme::headline())
    };
    [
        Line::from(Span::styled(entry.title, Theme::dimmed())),
        Line::from(names),
        Line::from(""),
    ]
}

fn section_block(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::TOP)
        .border_style(Theme::border())
        .title(Span::styled(title, Theme::title()))
        .title_alignment(Alignment::Center)
}
