//! Terminal UI: quest list, quest tables, and HTML export.

pub mod app;
pub mod events;
pub mod layout;
pub mod theme;
pub mod views;
