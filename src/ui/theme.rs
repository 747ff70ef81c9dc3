//! Noir theme for Red Lotus
//!
//! Black stage, lotus-red accents, greyscale everything else.

use ratatui::style::{Color, Modifier, Style};

/// Red-on-black palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #000000
    pub const BACKGROUND: Color = Color::Rgb(0x00, 0x00, 0x00);

    /// Card surface: #0a0a0a
    pub const CARD: Color = Color::Rgb(0x0a, 0x0a, 0x0a);

    /// Lotus red: #ff0000
    pub const LOTUS_RED: Color = Color::Rgb(0xff, 0x00, 0x00);

    /// Headline white: #ffffff
    pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Body text: #d1d5db
    pub const TEXT: Color = Color::Rgb(0xd1, 0xd5, 0xdb);

    /// Secondary text: #9ca3af
    pub const MUTED: Color = Color::Rgb(0x9c, 0xa3, 0xaf);

    /// Captions, hints: #6b7280
    pub const DIM: Color = Color::Rgb(0x6b, 0x72, 0x80);

    /// Success: #22c55e
    pub const SUCCESS: Color = Color::Rgb(0x22, 0xc5, 0x5e);

    /// Error: #ff3b3b
    pub const ERROR: Color = Color::Rgb(0xff, 0x3b, 0x3b);

    /// Hairline borders: #2a2a2a
    pub const BORDER: Color = Color::Rgb(0x2a, 0x2a, 0x2a);

    /// Focused border
    pub const BORDER_FOCUSED: Color = Self::LOTUS_RED;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// Poster-style headline
    pub fn headline() -> Style {
        Style::default().fg(Self::WHITE).add_modifier(Modifier::BOLD)
    }

    /// Red kicker above headlines
    pub fn kicker() -> Style {
        Style::default()
            .fg(Self::LOTUS_RED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::LOTUS_RED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn accent() -> Style {
        Style::default().fg(Self::LOTUS_RED)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Gallery card surface
    pub fn card() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::CARD)
    }

    /// Inverted card for featured credits
    pub fn card_featured() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    /// Active navigation item
    pub fn nav_active() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn nav() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Solid red call-to-action
    pub fn button() -> Style {
        Style::default()
            .fg(Self::WHITE)
            .bg(Self::LOTUS_RED)
            .add_modifier(Modifier::BOLD)
    }

    /// White call-to-action
    pub fn button_light() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::WHITE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::WHITE).bg(Self::BACKGROUND)
    }

    pub fn placeholder() -> Style {
        Style::default().fg(Self::DIM).bg(Self::BACKGROUND)
    }

    pub fn keybind() -> Style {
        Style::default().fg(Self::LOTUS_RED)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::MUTED).bg(Self::CARD)
    }

    pub fn progress_filled() -> Style {
        Style::default().fg(Self::LOTUS_RED)
    }

    pub fn progress_empty() -> Style {
        Style::default().fg(Self::BORDER)
    }

    /// Custom pointer glyph
    pub fn cursor() -> Style {
        Style::default()
            .fg(Self::LOTUS_RED)
            .add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Relative luminance (https://www.w3.org/TR/WCAG20/#relativeluminancedef)
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Contrast ratio between 1 (same color) and 21 (black/white)
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG AA for normal text (4.5:1)
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// WCAG AA for large text (3:1)
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// RGB tuple of an `Rgb` color
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}
