//! Theme and Colors
//!
//! A small studio palette: one accent for the active step, a progress blue,
//! and the usual success/error pair.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// UI Colors
// ============================================================================

/// Accent for the active step and selections
pub const ACCENT_MAGENTA: Color = Color::Magenta;

/// Progress gauge fill
pub const PROGRESS_BLUE: Color = Color::Rgb(100, 180, 255);

/// Script text
pub const SCRIPT_TEXT: Color = Color::Rgb(230, 230, 230);

/// Hints, separators, future steps
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Error banner
pub const ERROR_RED: Color = Color::Rgb(255, 80, 80);

/// Completed steps and the final result
pub const SUCCESS_GREEN: Color = Color::Rgb(120, 230, 120);

// ============================================================================
// Styles
// ============================================================================

/// Active step / selected item
#[must_use]
pub fn active() -> Style {
    Style::default()
        .fg(ACCENT_MAGENTA)
        .add_modifier(Modifier::BOLD)
}

/// Finished step
#[must_use]
pub fn done() -> Style {
    Style::default().fg(SUCCESS_GREEN)
}

/// Hints and inactive items
#[must_use]
pub fn dim() -> Style {
    Style::default().fg(DIM_GRAY)
}

/// Error text
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR_RED)
}
