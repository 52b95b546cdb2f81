//! Error types for loading and joining quest tables.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for quest store operations.
pub type Result<T> = std::result::Result<T, QuestError>;

/// Errors raised while building the quest index.
///
/// All of these are load-time failures. A quest id that simply has no data
/// is not an error: lookups return `None` for it.
#[derive(Debug, Error, Diagnostic)]
pub enum QuestError {
    /// The data file could not be read.
    #[error("Failed to read quest data: {0}")]
    #[diagnostic(code("QUEST::IO"))]
    Io(#[from] std::io::Error),

    /// The data file is not valid JSON or does not match the table layout.
    #[error("Malformed quest data: {0}")]
    #[diagnostic(
        code("QUEST::JSON"),
        help("Expected top-level `quests`, `questData` and `enemyData` sections")
    )]
    Json(#[from] serde_json::Error),

    /// A table key that should be an integer id is not one.
    #[error("Invalid {table} id: {key:?}")]
    #[diagnostic(code("QUEST::INVALID_ID"))]
    InvalidId { table: &'static str, key: String },

    /// The same id appears twice in one table.
    #[error("Duplicate {table} id: {id}")]
    #[diagnostic(code("QUEST::DUPLICATE_ID"))]
    DuplicateId { table: &'static str, id: u32 },

    /// A wave entry references an enemy that is not in the enemy table.
    #[error(
        "Quest {quest_id} wave w{} slot {} references unknown enemy {enemy_id}",
        .wave + 1,
        .position + 1
    )]
    #[diagnostic(
        code("QUEST::UNKNOWN_ENEMY"),
        help("The quest and enemy tables are out of sync; regenerate the data file")
    )]
    UnknownEnemy {
        quest_id: u32,
        /// Zero-based wave index.
        wave: usize,
        /// Zero-based slot within the wave.
        position: usize,
        enemy_id: u32,
    },

    /// The process-wide store was already installed.
    #[error("Quest store is already initialized")]
    #[diagnostic(code("QUEST::ALREADY_INITIALIZED"))]
    AlreadyInitialized,
}
