/// Quest Viewer - quest and enemy tables for the terminal and the browser
///
/// Core library joining quest data with the enemy roster and rendering
/// the result as wide or narrow tables.

pub mod cli;
pub mod config;
pub mod core;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
