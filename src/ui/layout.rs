//! Screen geometry shared by rendering and pointer hit-testing

use ratatui::layout::Rect;

/// Height of the navigation bar
pub const NAV_HEIGHT: u16 = 3;
/// Height of the status bar
pub const STATUS_HEIGHT: u16 = 1;
/// Rows used by the player controls (inside the player border)
pub const CONTROLS_HEIGHT: u16 = 3;

/// Rect of `width` x `height` centered in `area`, clipped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Teaser player frame: full screen, or a wide 16:9-ish box
pub fn player_area(screen: Rect, fullscreen: bool) -> Rect {
    if fullscreen {
        return screen;
    }
    let width = (screen.width.saturating_mul(9) / 10).max(20);
    // Terminal cells are about twice as tall as wide
    let height = (width.saturating_mul(9) / 32 + CONTROLS_HEIGHT + 2).min(screen.height.saturating_sub(2));
    centered(screen, width, height)
}

/// Controls strip at the bottom of the player, inside the border
pub fn controls_area(player: Rect) -> Rect {
    let inner = inner(player);
    let height = CONTROLS_HEIGHT.min(inner.height);
    Rect {
        x: inner.x,
        y: inner.y + inner.height - height,
        width: inner.width,
        height,
    }
}

/// Seek bar row: top row of the controls, with a one-cell margin each side
pub fn progress_bar_area(player: Rect) -> Rect {
    let controls = controls_area(player);
    Rect {
        x: controls.x + 1,
        y: controls.y,
        width: controls.width.saturating_sub(2),
        height: controls.height.min(1),
    }
}

/// Fraction of the seek bar under `column`, if `(column, row)` hits it
pub fn seek_fraction(player: Rect, column: u16, row: u16) -> Option<f64> {
    let bar = progress_bar_area(player);
    if bar.width == 0 || !contains(bar, column, row) {
        return None;
    }
    if bar.width == 1 {
        return Some(0.0);
    }
    Some((column - bar.x) as f64 / (bar.width - 1) as f64)
}

/// Auth dialog box
pub fn auth_area(screen: Rect) -> Rect {
    centered(screen, 48, 20)
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

fn inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}
