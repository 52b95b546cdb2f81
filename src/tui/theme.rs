//! Color theme for the quest viewer TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::viewer::{CellStyle, Stripe, Tier};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Teal: primary accent, active items, focused borders.
pub const PRIMARY: Color = Color::Rgb(0x00, 0x80, 0x80);
/// Light teal: highlights, hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x00, 0x96, 0x88);

/// Coral: titles, selected quest.
pub const ACCENT: Color = Color::Rgb(0xFF, 0x7F, 0x50);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Charcoal base background.
pub const BG_BASE: Color = Color::Rgb(0x0A, 0x19, 0x19);
/// Surface: odd enemy rows.
pub const BG_SURFACE: Color = Color::Rgb(0x12, 0x26, 0x26);
/// Header cells.
pub const BG_HEAD: Color = Color::Rgb(0x00, 0x00, 0x00);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE0, 0xE0, 0xE0);
/// Secondary labels, continuation rows.
pub const TEXT_MUTED: Color = Color::Rgb(0x80, 0x80, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x50, 0x50, 0x50);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Wave title bar ("w1", "w2", ...).
pub fn wave_title() -> Style {
    Style::default()
        .fg(TEXT)
        .bg(BG_HEAD)
        .add_modifier(Modifier::BOLD)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Key hint style (e.g., "q:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Table cell style. Odd enemies get the surface background; continuation
/// rows of the narrow layout are dimmed.
pub fn cell(style: CellStyle) -> Style {
    match style {
        CellStyle::Head => Style::default()
            .fg(TEXT)
            .bg(BG_HEAD)
            .add_modifier(Modifier::BOLD),
        CellStyle::Body { stripe, tier } => {
            let base = match stripe {
                Stripe::Even => Style::default(),
                Stripe::Odd => Style::default().bg(BG_SURFACE),
            };
            match tier {
                Tier::Primary => base.fg(TEXT),
                Tier::Secondary => base.fg(TEXT_MUTED),
            }
        }
    }
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(PRIMARY))
}
