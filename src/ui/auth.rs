//! Login / signup dialog

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{AuthForm, AuthMode, FormField};
use crate::ui::Theme;

const FIELD_HEIGHT: u16 = 3;

/// On-screen text of a field: the value (password masked) or its placeholder
pub fn field_text(form: &AuthForm, field: FormField) -> (String, bool) {
    let value = form.value(field);
    if value.is_empty() {
        return (field.placeholder().to_string(), true);
    }
    match field {
        FormField::Password => ("•".repeat(value.chars().count()), false),
        _ => (value.to_string(), false),
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let mode = app.presentation.auth_mode;
    let form = &app.presentation.form;
    let focused = app.presentation.auth_has_focus();

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Theme::border_focused())
        .title(Span::styled(format!(" {} ", mode.title()), Theme::title()))
        .title_alignment(Alignment::Center)
        .style(Theme::text());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let fields = mode.fields();
    let mut constraints = vec![Constraint::Length(2)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
    constraints.push(Constraint::Length(2));
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let heading = match mode {
        AuthMode::Login => "Welcome back. The dark remembers you.",
        AuthMode::Signup => "Join the crew behind the lotus.",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(heading, Theme::muted())).alignment(Alignment::Center),
        rows[0],
    );

    let active = form.focused(mode);
    for (i, field) in fields.iter().enumerate() {
        let (text, placeholder) = field_text(form, *field);
        let has_focus = focused && *field == active;
        let mut spans = vec![Span::styled(
            text,
            if placeholder { Theme::placeholder() } else { Theme::input() },
        )];
        if has_focus {
            spans.push(Span::styled("▏", Theme::accent()));
        }
        let input = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(if has_focus { Theme::border_focused() } else { Theme::border() }),
        );
        frame.render_widget(input, rows[i + 1]);
    }

    let submit_label = if app.auth_pending {
        "AUTHENTICATING…"
    } else {
        mode.submit_label()
    };
    let submit = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", submit_label), Theme::button()),
        Span::styled("  enter", Theme::keybind()),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(submit, rows[fields.len() + 1]);

    let footer = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("F2 ", Theme::keybind()),
            Span::styled(mode.switch_label(), Theme::muted()),
        ]),
        Line::from(vec![
            Span::styled("esc ", Theme::keybind()),
            Span::styled("close", Theme::dimmed()),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(footer, rows[fields.len() + 2]);
}
