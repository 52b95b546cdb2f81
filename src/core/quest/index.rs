//! Quest table join.
//!
//! `build_quest_index` replaces every enemy stub with an owned copy of the
//! matching enemy record. The join runs once at load time; the resulting
//! `QuestStore` is read-only.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use tracing::instrument;

use super::error::{QuestError, Result};
use super::types::{Chapter, EnemyRecord, QuestEnemy, QuestRecord, QuestSource, Wave};

/// Quest id -> joined quest record, in data file order.
pub type QuestIndex = IndexMap<u32, QuestRecord>;

/// Quest id -> chapter metadata, in data file order.
pub type QuestList = IndexMap<u32, Chapter>;

/// Data set bundled into the binary.
const BUNDLED_QUEST_DATA: &str = include_str!("../../../data/quest.json");

fn parse_id(table: &'static str, key: &str) -> Result<u32> {
    key.trim().parse().map_err(|_| QuestError::InvalidId {
        table,
        key: key.to_string(),
    })
}

fn enemy_table(source: &QuestSource) -> Result<HashMap<u32, &EnemyRecord>> {
    let mut enemies = HashMap::with_capacity(source.enemy_data.len());
    for (key, record) in &source.enemy_data {
        let id = parse_id("enemyData", key)?;
        if enemies.insert(id, record).is_some() {
            return Err(QuestError::DuplicateId {
                table: "enemyData",
                id,
            });
        }
    }
    Ok(enemies)
}

/// Join quest data against the enemy table.
///
/// The source is never modified; each enemy entry in the output is a clone
/// of the enemy record as it was at build time. Fails on the first enemy id
/// that has no enemy record.
#[instrument(skip_all, fields(quests = source.quest_data.len()))]
pub fn build_quest_index(source: &QuestSource) -> Result<QuestIndex> {
    let enemies = enemy_table(source)?;
    let mut index = QuestIndex::with_capacity(source.quest_data.len());

    for (key, raw) in &source.quest_data {
        let quest_id = parse_id("questData", key)?;

        let waves = raw
            .enemies
            .iter()
            .enumerate()
            .map(|(wave, stubs)| {
                stubs
                    .iter()
                    .enumerate()
                    .map(|(position, stub)| {
                        let detail = enemies.get(&stub.enemy_id).ok_or(
                            QuestError::UnknownEnemy {
                                quest_id,
                                wave,
                                position,
                                enemy_id: stub.enemy_id,
                            },
                        )?;
                        Ok(QuestEnemy {
                            enemy_id: stub.enemy_id,
                            detail: (*detail).clone(),
                        })
                    })
                    .collect::<Result<Wave>>()
            })
            .collect::<Result<Vec<Wave>>>()?;

        let record = QuestRecord {
            stats: raw.stats.clone(),
            enemies: waves,
        };
        if index.insert(quest_id, record).is_some() {
            return Err(QuestError::DuplicateId {
                table: "questData",
                id: quest_id,
            });
        }
    }

    Ok(index)
}

fn build_quest_list(source: &QuestSource) -> Result<QuestList> {
    let mut list = QuestList::with_capacity(source.quests.len());
    for row in &source.quests {
        if list.insert(row.id, row.chapter.clone()).is_some() {
            return Err(QuestError::DuplicateId {
                table: "quests",
                id: row.id,
            });
        }
    }
    Ok(list)
}

// ============================================================================
// Quest Store
// ============================================================================

/// The loaded quest list plus the joined quest index.
#[derive(Debug, Clone, Default)]
pub struct QuestStore {
    list: QuestList,
    index: QuestIndex,
}

impl QuestStore {
    /// Build the store from parsed tables.
    pub fn from_source(source: &QuestSource) -> Result<Self> {
        let list = build_quest_list(source)?;
        let index = build_quest_index(source)?;

        for id in list.keys().filter(|id| !index.contains_key(*id)) {
            log::warn!("Quest {id} is listed but has no quest data");
        }

        log::info!(
            "Quest store built: {} listed, {} with data, {} enemy records",
            list.len(),
            index.len(),
            source.enemy_data.len()
        );

        Ok(Self { list, index })
    }

    /// Parse and join a JSON data file's contents.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let source: QuestSource = serde_json::from_str(json)?;
        Self::from_source(&source)
    }

    /// Read, parse and join a JSON data file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading quest data from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// The data set compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_QUEST_DATA)
    }

    /// The raw quest list, unjoined.
    pub fn quest_list(&self) -> &QuestList {
        &self.list
    }

    /// The joined record for one quest, or `None` if it has no quest data.
    pub fn quest_data(&self, id: u32) -> Option<&QuestRecord> {
        self.index.get(&id)
    }

    /// Display title for a quest: chapter label from the list, then the
    /// quest's own name, then its id.
    pub fn title(&self, id: u32) -> String {
        self.list
            .get(&id)
            .map(Chapter::label)
            .filter(|label| !label.is_empty())
            .or_else(|| self.quest_data(id).and_then(|q| q.stats.name.clone()))
            .unwrap_or_else(|| format!("Quest {id}"))
    }

    /// The whole joined index.
    pub fn index(&self) -> &QuestIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quest::types::{EnemyStub, FieldValue, RawChapterRow, RawQuest, QuestStats};
    use proptest::prelude::*;
    use serde_json::json;

    fn slime() -> EnemyRecord {
        EnemyRecord {
            name: Some("Slime".into()),
            class: Some("Normal".into()),
            lv: Some(FieldValue::Int(5)),
            hp: Some(5000),
            buff: Some("None".into()),
            dr: Some(FieldValue::Int(10)),
            attributes: Some("Water".into()),
            characteristics: Some("Slow".into()),
        }
    }

    fn source_with_waves(waves: Vec<Vec<u32>>) -> QuestSource {
        let mut source = QuestSource::default();
        source.quests.push(RawChapterRow {
            id: 100,
            chapter: Chapter {
                chapter: Some("Prologue".into()),
                ..Default::default()
            },
        });
        source.quest_data.insert(
            "100".into(),
            RawQuest {
                stats: QuestStats {
                    lv: Some(20),
                    ..Default::default()
                },
                enemies: waves
                    .into_iter()
                    .map(|w| w.into_iter().map(|enemy_id| EnemyStub { enemy_id }).collect())
                    .collect(),
            },
        );
        source.enemy_data.insert("7".into(), slime());
        source.enemy_data.insert(
            "8".into(),
            EnemyRecord {
                name: Some("Golem".into()),
                hp: Some(12000),
                ..Default::default()
            },
        );
        source
    }

    #[test]
    fn test_join_inlines_enemy_records() {
        let source = source_with_waves(vec![vec![7, 8], vec![8]]);
        let index = build_quest_index(&source).unwrap();
        let quest = &index[&100u32];

        assert_eq!(quest.enemies.len(), 2);
        assert_eq!(quest.enemies[0][0].enemy_id, 7);
        assert_eq!(quest.enemies[0][0].detail, slime());
        assert_eq!(quest.enemies[0][1].detail.name.as_deref(), Some("Golem"));
        assert_eq!(quest.enemies[1][0].enemy_id, 8);
        assert_eq!(quest.enemy_count(), 3);
    }

    #[test]
    fn test_join_does_not_mutate_source() {
        let source = source_with_waves(vec![vec![7]]);
        let before = source.clone();
        build_quest_index(&source).unwrap();
        assert_eq!(source, before);
    }

    #[test]
    fn test_joined_copy_has_no_live_link() {
        let mut source = source_with_waves(vec![vec![7]]);
        let index = build_quest_index(&source).unwrap();

        source.enemy_data["7"].hp = Some(1);
        assert_eq!(index[&100u32].enemies[0][0].detail.hp, Some(5000));
    }

    #[test]
    fn test_unknown_enemy_fails_fast() {
        let source = source_with_waves(vec![vec![7], vec![8, 99]]);
        let err = build_quest_index(&source).unwrap_err();
        match err {
            QuestError::UnknownEnemy {
                quest_id,
                wave,
                position,
                enemy_id,
            } => {
                assert_eq!((quest_id, wave, position, enemy_id), (100, 1, 1, 99));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_quest_key() {
        let mut source = source_with_waves(vec![]);
        let raw = source.quest_data.shift_remove("100").unwrap();
        source.quest_data.insert("abc".into(), raw);
        assert!(matches!(
            build_quest_index(&source),
            Err(QuestError::InvalidId { table: "questData", .. })
        ));
    }

    #[test]
    fn test_duplicate_enemy_key() {
        let mut source = source_with_waves(vec![]);
        source.enemy_data.insert("07".into(), slime());
        assert!(matches!(
            build_quest_index(&source),
            Err(QuestError::DuplicateId { table: "enemyData", id: 7 })
        ));
    }

    #[test]
    fn test_listed_quest_without_data_is_not_found() {
        let mut source = source_with_waves(vec![vec![7]]);
        source.quests.push(RawChapterRow {
            id: 200,
            chapter: Chapter::default(),
        });
        let store = QuestStore::from_source(&source).unwrap();

        assert_eq!(store.quest_list().len(), 2);
        assert!(store.quest_data(100).is_some());
        assert!(store.quest_data(200).is_none());
        assert!(store.quest_data(12345).is_none());
    }

    #[test]
    fn test_title_fallbacks() {
        let mut source = source_with_waves(vec![]);
        source.quest_data["100"].stats.name = Some("Beach".into());
        let store = QuestStore::from_source(&source).unwrap();
        assert_eq!(store.title(100), "Prologue");
        assert_eq!(store.title(5), "Quest 5");

        source.quests.clear();
        let store = QuestStore::from_source(&source).unwrap();
        assert_eq!(store.title(100), "Beach");
    }

    #[test]
    fn test_duplicate_quest_list_entry() {
        let mut source = source_with_waves(vec![]);
        source.quests.push(source.quests[0].clone());
        assert!(matches!(
            QuestStore::from_source(&source),
            Err(QuestError::DuplicateId { table: "quests", id: 100 })
        ));
    }

    #[test]
    fn test_from_json_str_integer_like_keys() {
        let json = json!({
            "quests": [{ "id": 1, "chapter": "A" }],
            "questData": { "1": { "lv": 3, "enemies": [[{ "enemyId": 2 }]] } },
            "enemyData": { "2": { "name": "Bat" } }
        });
        let store = QuestStore::from_json_str(&json.to_string()).unwrap();
        let quest = store.quest_data(1).unwrap();
        assert_eq!(quest.enemies[0][0].detail.name.as_deref(), Some("Bat"));
    }

    #[test]
    fn test_from_json_str_malformed() {
        assert!(matches!(
            QuestStore::from_json_str("{ not json"),
            Err(QuestError::Json(_))
        ));
    }

    #[test]
    fn test_from_json_str_missing_section() {
        // `questdata` is misspelled, so the quest data section is absent
        let json = json!({
            "quests": [{ "id": 1, "chapter": "A" }],
            "questdata": { "1": { "lv": 3, "enemies": [] } },
            "enemyData": {}
        });
        let err = QuestStore::from_json_str(&json.to_string()).unwrap_err();
        assert!(matches!(err, QuestError::Json(_)));
        assert!(err.to_string().contains("questData"), "{err}");
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            QuestStore::from_path(&missing),
            Err(QuestError::Io(_))
        ));
    }

    #[test]
    fn test_bundled_data_joins() {
        let store = QuestStore::bundled().unwrap();
        assert!(!store.quest_list().is_empty());
        for quest in store.index().values() {
            for wave in &quest.enemies {
                assert!(wave.iter().all(|e| e.detail.name.is_some()));
            }
        }
    }

    proptest! {
        #[test]
        fn prop_join_is_deterministic_and_preserves_order(
            waves in prop::collection::vec(
                prop::collection::vec(prop_oneof![Just(7u32), Just(8u32)], 0..5),
                0..4,
            )
        ) {
            let source = source_with_waves(waves.clone());
            let first = build_quest_index(&source).unwrap();
            let second = build_quest_index(&source).unwrap();
            prop_assert_eq!(&first, &second);

            let quest = &first[&100u32];
            prop_assert_eq!(quest.enemies.len(), waves.len());
            for (joined, ids) in quest.enemies.iter().zip(&waves) {
                let joined_ids: Vec<u32> = joined.iter().map(|e| e.enemy_id).collect();
                prop_assert_eq!(&joined_ids, ids);
            }
        }
    }
}
