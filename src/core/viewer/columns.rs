//! Declarative column layouts.
//!
//! Each table is described by a list of [`Column`]s; the renderer walks the
//! descriptors to build both the header and the body, so changing a layout
//! never touches rendering code.

use crate::core::quest::{FieldValue, QuestEnemy, QuestRecord};

use super::format::{format_dr, format_grouped, format_number};

/// Converts a present field value into cell text.
pub type Formatter = fn(&FieldValue) -> String;

/// Horizontal alignment of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// One column of a table layout.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub label: &'static str,
    /// Field looked up through [`FieldSource::field`].
    pub key: &'static str,
    pub align: Align,
    /// Relative width, in percent of the table.
    pub width: u16,
    pub formatter: Option<Formatter>,
    /// Number of grid columns this cell covers.
    pub span: u16,
}

impl Column {
    pub const fn new(label: &'static str, key: &'static str, align: Align, width: u16) -> Self {
        Self {
            label,
            key,
            align,
            width,
            formatter: None,
            span: 1,
        }
    }

    pub const fn formatted(mut self, formatter: Formatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub const fn spanning(mut self, span: u16) -> Self {
        self.span = span;
        self
    }

    /// Cell text for `source`. The formatter only runs on a present value;
    /// a missing field yields an empty cell.
    pub fn cell_text(&self, source: &impl FieldSource) -> String {
        match (source.field(self.key), self.formatter) {
            (Some(value), Some(format)) => format(&value),
            (Some(value), None) => value.to_string(),
            (None, _) => String::new(),
        }
    }
}

// ============================================================================
// Field Lookup
// ============================================================================

/// Key-based access to a record's display fields.
pub trait FieldSource {
    /// The value stored under `key`, or `None` if the key is unknown or the
    /// record has no value for it.
    fn field(&self, key: &str) -> Option<FieldValue>;
}

fn text(value: &Option<String>) -> Option<FieldValue> {
    value.clone().map(FieldValue::Text)
}

fn int(value: Option<i64>) -> Option<FieldValue> {
    value.map(FieldValue::Int)
}

impl FieldSource for QuestRecord {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let stats = &self.stats;
        match key {
            "chapterId" => stats.chapter_id.map(|id| FieldValue::Int(i64::from(id))),
            "name" => text(&stats.name),
            "lv" => int(stats.lv),
            "ap" => int(stats.ap),
            "bond" => int(stats.bond),
            "exp" => int(stats.exp),
            "qp" => int(stats.qp),
            "drop" => text(&stats.drop),
            "attributes" => text(&stats.attributes),
            _ => None,
        }
    }
}

impl FieldSource for QuestEnemy {
    fn field(&self, key: &str) -> Option<FieldValue> {
        let detail = &self.detail;
        match key {
            "enemyId" => Some(FieldValue::Int(i64::from(self.enemy_id))),
            "name" => text(&detail.name),
            "class" => text(&detail.class),
            "lv" => detail.lv.clone(),
            "hp" => int(detail.hp),
            "buff" => text(&detail.buff),
            "dr" => detail.dr.clone(),
            "attributes" => text(&detail.attributes),
            "characteristics" => text(&detail.characteristics),
            _ => None,
        }
    }
}

// ============================================================================
// Layouts
// ============================================================================

/// Key of the blank spacer column; no record has a field under it.
pub const SPACER_KEY: &str = "spacer";

/// Quest summary: a single header row and a single data row.
pub const QUEST_INFO_COLUMNS: &[Column] = &[
    Column::new("Lv", "lv", Align::Left, 10),
    Column::new("AP", "ap", Align::Left, 10),
    Column::new("Bond", "bond", Align::Left, 10).formatted(format_grouped),
    Column::new("Exp", "exp", Align::Left, 10).formatted(format_grouped),
    Column::new("QP", "qp", Align::Left, 10).formatted(format_grouped),
    Column::new("", SPACER_KEY, Align::Left, 5),
    Column::new("Terrain", "attributes", Align::Left, 40),
];

/// Enemy table for wide screens: one row per enemy.
pub const ENEMY_COLUMNS_WIDE: &[&[Column]] = &[&[
    Column::new("Name", "name", Align::Left, 20),
    Column::new("", "class", Align::Left, 5),
    Column::new("DR", "dr", Align::Center, 5).formatted(format_dr),
    Column::new("HP", "hp", Align::Left, 10).formatted(format_number),
    Column::new("Attribute", "attributes", Align::Left, 10),
    Column::new("Traits", "characteristics", Align::Left, 20),
    Column::new("Buff", "buff", Align::Left, 15),
]];

/// Enemy table for narrow screens: two stacked rows per enemy.
pub const ENEMY_COLUMNS_NARROW: &[&[Column]] = &[
    &[
        Column::new("Name", "name", Align::Left, 50).spanning(3),
        Column::new("Buff", "buff", Align::Left, 20),
        Column::new("HP", "hp", Align::Right, 20).formatted(format_number),
    ],
    &[
        Column::new("Class", "class", Align::Left, 10),
        Column::new("DR", "dr", Align::Left, 10).formatted(format_dr),
        Column::new("Attribute", "attributes", Align::Left, 10),
        Column::new("Traits", "characteristics", Align::Left, 40).spanning(2),
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quest::EnemyRecord;

    fn enemy() -> QuestEnemy {
        QuestEnemy {
            enemy_id: 7,
            detail: EnemyRecord {
                name: Some("Slime".into()),
                hp: Some(5000),
                dr: Some(FieldValue::Int(10)),
                ..Default::default()
            },
        }
    }

    fn keys(layout: &[&[Column]]) -> Vec<&'static str> {
        let mut keys: Vec<_> = layout.iter().flat_map(|row| row.iter().map(|c| c.key)).collect();
        keys.sort_unstable();
        keys
    }

    #[test]
    fn test_layouts_show_same_fields() {
        assert_eq!(keys(ENEMY_COLUMNS_WIDE), keys(ENEMY_COLUMNS_NARROW));
    }

    #[test]
    fn test_narrow_rows_cover_same_grid() {
        let spans: Vec<u16> = ENEMY_COLUMNS_NARROW
            .iter()
            .map(|row| row.iter().map(|c| c.span).sum())
            .collect();
        assert_eq!(spans, vec![5, 5]);
    }

    #[test]
    fn test_cell_text_applies_formatter() {
        let hp = ENEMY_COLUMNS_WIDE[0][3];
        assert_eq!(hp.cell_text(&enemy()), "\u{a0}\u{a0}5,000");
        let dr = ENEMY_COLUMNS_WIDE[0][2];
        assert_eq!(dr.cell_text(&enemy()), "10%");
    }

    #[test]
    fn test_cell_text_skips_formatter_on_missing_field() {
        fn must_not_run(_: &FieldValue) -> String {
            panic!("formatter called on a missing field");
        }
        let column = Column::new("Buff", "buff", Align::Left, 10).formatted(must_not_run);
        assert_eq!(column.cell_text(&enemy()), "");
    }

    #[test]
    fn test_spacer_is_blank() {
        let quest = QuestRecord::default();
        assert_eq!(QUEST_INFO_COLUMNS[5].cell_text(&quest), "");
        assert!(quest.field(SPACER_KEY).is_none());
    }

    #[test]
    fn test_enemy_field_lookup() {
        let e = enemy();
        assert_eq!(e.field("enemyId"), Some(FieldValue::Int(7)));
        assert_eq!(e.field("name"), Some(FieldValue::Text("Slime".into())));
        assert_eq!(e.field("class"), None);
        assert_eq!(e.field("unknown"), None);
    }
}
