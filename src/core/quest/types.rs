//! Quest and enemy table types.
//!
//! Raw types mirror the JSON data file. Joined types (`QuestRecord`,
//! `QuestEnemy`) are what the viewer consumes.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// Field Values
// ============================================================================

/// A scalar table value: the data file mixes numbers and text in some columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, parsing text that holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{v}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

// ============================================================================
// Enemy Table
// ============================================================================

/// One row of the enemy table. Any column may be missing from the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyRecord {
    pub name: Option<String>,
    pub class: Option<String>,
    pub lv: Option<FieldValue>,
    pub hp: Option<i64>,
    pub buff: Option<String>,
    /// Damage resist, in percent.
    pub dr: Option<FieldValue>,
    pub attributes: Option<String>,
    pub characteristics: Option<String>,
}

/// A wave entry before the join: only the enemy id is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyStub {
    pub enemy_id: u32,
}

/// A wave entry after the join, holding its own copy of the enemy record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestEnemy {
    pub enemy_id: u32,
    #[serde(flatten)]
    pub detail: EnemyRecord,
}

/// Enemies encountered together, in battle order.
pub type Wave = Vec<QuestEnemy>;

// ============================================================================
// Quest Tables
// ============================================================================

/// Scalar quest columns shared by the raw and joined quest rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuestStats {
    pub chapter_id: Option<u32>,
    pub name: Option<String>,
    pub lv: Option<i64>,
    pub ap: Option<i64>,
    pub bond: Option<i64>,
    pub exp: Option<i64>,
    pub qp: Option<i64>,
    pub drop: Option<String>,
    /// Terrain tags.
    pub attributes: Option<String>,
}

/// A `questData` row as stored in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawQuest {
    #[serde(flatten)]
    pub stats: QuestStats,
    pub enemies: Vec<Vec<EnemyStub>>,
}

/// A fully denormalized quest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestRecord {
    #[serde(flatten)]
    pub stats: QuestStats,
    pub enemies: Vec<Wave>,
}

impl QuestRecord {
    /// Total number of enemies across all waves.
    pub fn enemy_count(&self) -> usize {
        self.enemies.iter().map(Vec::len).sum()
    }
}

/// Chapter metadata attached to an entry of the quest list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub chapter: Option<String>,
    pub name: Option<String>,
    /// Columns the viewer does not interpret, kept in file order.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Chapter {
    /// "Chapter / Name" label for list displays.
    pub fn label(&self) -> String {
        match (self.chapter.as_deref(), self.name.as_deref()) {
            (Some(chapter), Some(name)) => format!("{chapter} / {name}"),
            (Some(only), None) | (None, Some(only)) => only.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// A `quests` row: id plus chapter metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawChapterRow {
    pub id: u32,
    #[serde(flatten)]
    pub chapter: Chapter,
}

/// The whole data file. All three sections are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestSource {
    pub quests: Vec<RawChapterRow>,
    /// Keyed by quest id (JSON object keys are strings).
    pub quest_data: IndexMap<String, RawQuest>,
    /// Keyed by enemy id.
    pub enemy_data: IndexMap<String, EnemyRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_untagged() {
        let values: Vec<FieldValue> = serde_json::from_value(json!([30, 12.5, "30"])).unwrap();
        assert_eq!(
            values,
            vec![
                FieldValue::Int(30),
                FieldValue::Float(12.5),
                FieldValue::Text("30".into())
            ]
        );
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Int(10).to_string(), "10");
        assert_eq!(FieldValue::Float(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::from("Sea").to_string(), "Sea");
    }

    #[test]
    fn test_field_value_as_f64_parses_text() {
        assert_eq!(FieldValue::from(" 40 ").as_f64(), Some(40.0));
        assert_eq!(FieldValue::from("none").as_f64(), None);
    }

    #[test]
    fn test_enemy_record_missing_columns() {
        let record: EnemyRecord = serde_json::from_value(json!({ "name": "Slime" })).unwrap();
        assert_eq!(record.name.as_deref(), Some("Slime"));
        assert!(record.hp.is_none());
        assert!(record.dr.is_none());
    }

    #[test]
    fn test_raw_quest_camel_case() {
        let raw: RawQuest = serde_json::from_value(json!({
            "chapterId": 3,
            "qp": 2000,
            "enemies": [[{ "enemyId": 7 }]]
        }))
        .unwrap();
        assert_eq!(raw.stats.chapter_id, Some(3));
        assert_eq!(raw.stats.qp, Some(2000));
        assert_eq!(raw.enemies[0][0].enemy_id, 7);
    }

    #[test]
    fn test_chapter_keeps_unknown_columns() {
        let row: RawChapterRow = serde_json::from_value(json!({
            "id": 1,
            "chapter": "Fuyuki",
            "name": "Burning City",
            "note": "Free quest"
        }))
        .unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.chapter.label(), "Fuyuki / Burning City");
        assert_eq!(row.chapter.extra.get("note"), Some(&json!("Free quest")));
    }

    #[test]
    fn test_quest_enemy_flattens_detail() {
        let enemy = QuestEnemy {
            enemy_id: 7,
            detail: EnemyRecord {
                name: Some("Slime".into()),
                ..Default::default()
            },
        };
        let value = serde_json::to_value(&enemy).unwrap();
        assert_eq!(value["enemyId"], json!(7));
        assert_eq!(value["name"], json!("Slime"));
    }
}
