//! Quest table rendering.
//!
//! Column layouts are data (`columns`), rendering is a pure function over
//! them (`table::render`), and output backends (`html`, the terminal view)
//! only walk the resulting model.

pub mod columns;
pub mod format;
pub mod html;
pub mod table;

pub use columns::{Align, Column, FieldSource, Formatter};
pub use format::{format_dr, format_grouped, format_number};
pub use table::{
    render, CellStyle, CellView, QuestView, RowView, Stripe, TableView, Tier, Viewport, WaveView,
};
