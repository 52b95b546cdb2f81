//! Quest data store.
//!
//! Loads the three flat tables shipped with the viewer (quest list, quest
//! data, enemy data) and joins them once into a read-only index in which
//! every enemy stub carries an owned copy of its enemy record.

pub mod error;
pub mod index;
pub mod store;
pub mod types;

pub use error::{QuestError, Result};
pub use index::{build_quest_index, QuestIndex, QuestList, QuestStore};
pub use store::{quest_data, quest_list};
pub use types::{
    Chapter, EnemyRecord, EnemyStub, FieldValue, QuestEnemy, QuestRecord, QuestSource, QuestStats,
    RawChapterRow, RawQuest, Wave,
};
