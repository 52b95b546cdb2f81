//! Process-wide quest store.
//!
//! Installed once at startup and read through `quest_list` / `quest_data`
//! for the rest of the process.

use std::sync::{LazyLock, OnceLock};

use super::error::{QuestError, Result};
use super::index::{QuestList, QuestStore};
use super::types::QuestRecord;

static STORE: OnceLock<QuestStore> = OnceLock::new();
static EMPTY_LIST: LazyLock<QuestList> = LazyLock::new(QuestList::default);

/// Install the process-wide store. Fails if one is already installed.
pub fn init(store: QuestStore) -> Result<&'static QuestStore> {
    let mut installed = false;
    let current = STORE.get_or_init(|| {
        installed = true;
        store
    });
    if installed {
        Ok(current)
    } else {
        Err(QuestError::AlreadyInitialized)
    }
}

/// The installed store, if any.
pub fn get() -> Option<&'static QuestStore> {
    STORE.get()
}

/// The raw quest list. Empty until a store is installed.
pub fn quest_list() -> &'static QuestList {
    get().map_or(&*EMPTY_LIST, QuestStore::quest_list)
}

/// The joined record for one quest, or `None` if unknown or not yet loaded.
pub fn quest_data(id: u32) -> Option<&'static QuestRecord> {
    get()?.quest_data(id)
}
