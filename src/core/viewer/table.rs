//! Quest view model and the `render` entry point.
//!
//! `render` is a pure function of (quest id, lookup, viewport). It produces a
//! backend-neutral table model that the HTML writer and the terminal view
//! both consume.

use crate::core::quest::{QuestEnemy, QuestRecord};

use super::columns::{
    Align, Column, FieldSource, ENEMY_COLUMNS_NARROW, ENEMY_COLUMNS_WIDE, QUEST_INFO_COLUMNS,
};

/// Available display width, as decided by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Viewport {
    #[default]
    Wide,
    Narrow,
}

impl Viewport {
    /// Narrow when `width` is below `breakpoint`.
    pub fn from_width(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }

    /// Enemy column layout for this viewport, one slice per stacked row.
    pub fn enemy_columns(self) -> &'static [&'static [Column]] {
        match self {
            Viewport::Wide => ENEMY_COLUMNS_WIDE,
            Viewport::Narrow => ENEMY_COLUMNS_NARROW,
        }
    }
}

/// Alternating background, assigned per enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stripe {
    Even,
    Odd,
}

impl Stripe {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Stripe::Even
        } else {
            Stripe::Odd
        }
    }
}

/// First row of an enemy, or a continuation row in the narrow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Secondary,
}

impl Tier {
    pub fn for_row(row: usize) -> Self {
        if row == 0 {
            Tier::Primary
        } else {
            Tier::Secondary
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Head,
    Body { stripe: Stripe, tier: Tier },
}

impl CellStyle {
    /// Style class name used by the HTML stylesheet.
    pub fn class_name(self) -> &'static str {
        match self {
            CellStyle::Head => "head",
            CellStyle::Body { stripe: Stripe::Even, tier: Tier::Primary } => "body",
            CellStyle::Body { stripe: Stripe::Even, tier: Tier::Secondary } => "body2nd",
            CellStyle::Body { stripe: Stripe::Odd, tier: Tier::Primary } => "body-odd",
            CellStyle::Body { stripe: Stripe::Odd, tier: Tier::Secondary } => "body2nd-odd",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub text: String,
    pub align: Align,
    pub width: u16,
    pub span: u16,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowView {
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub header: Vec<RowView>,
    pub body: Vec<RowView>,
}

/// One wave: a title ("w1", "w2", ...) and its enemy rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveView {
    pub title: String,
    pub table: TableView,
}

/// Everything shown for one quest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestView {
    pub quest_id: u32,
    pub viewport: Viewport,
    pub quest_info: TableView,
    /// Column labels for the enemy tables; wide layout only.
    pub enemy_header: Option<TableView>,
    pub waves: Vec<WaveView>,
}

fn header_row(columns: &[Column]) -> RowView {
    RowView {
        cells: columns
            .iter()
            .map(|column| CellView {
                text: column.label.to_string(),
                align: column.align,
                width: column.width,
                span: column.span,
                style: CellStyle::Head,
            })
            .collect(),
    }
}

fn body_row(columns: &[Column], source: &impl FieldSource, style: CellStyle) -> RowView {
    RowView {
        cells: columns
            .iter()
            .map(|column| CellView {
                text: column.cell_text(source),
                align: column.align,
                width: column.width,
                span: column.span,
                style,
            })
            .collect(),
    }
}

fn enemy_rows<'a>(
    layout: &'static [&'static [Column]],
    wave: &'a [QuestEnemy],
) -> impl Iterator<Item = RowView> + 'a {
    wave.iter().enumerate().flat_map(move |(index, enemy)| {
        let stripe = Stripe::for_index(index);
        layout.iter().enumerate().map(move |(row, columns)| {
            let style = CellStyle::Body {
                stripe,
                tier: Tier::for_row(row),
            };
            body_row(columns, enemy, style)
        })
    })
}

/// Render the quest tables for `quest_id`.
///
/// `lookup` is the quest data accessor (normally [`crate::core::quest::quest_data`]).
/// Returns `None`, the empty output, when the quest is unknown.
pub fn render<'a, F>(quest_id: u32, lookup: F, viewport: Viewport) -> Option<QuestView>
where
    F: Fn(u32) -> Option<&'a QuestRecord>,
{
    let quest = lookup(quest_id)?;
    let layout = viewport.enemy_columns();

    let quest_info = TableView {
        header: vec![header_row(QUEST_INFO_COLUMNS)],
        body: vec![body_row(
            QUEST_INFO_COLUMNS,
            quest,
            CellStyle::Body {
                stripe: Stripe::Even,
                tier: Tier::Primary,
            },
        )],
    };

    let enemy_header = match viewport {
        Viewport::Wide => Some(TableView {
            header: layout.iter().map(|columns| header_row(columns)).collect(),
            body: Vec::new(),
        }),
        Viewport::Narrow => None,
    };

    let waves = quest
        .enemies
        .iter()
        .enumerate()
        .map(|(wave_no, wave)| WaveView {
            title: format!("w{}", wave_no + 1),
            table: TableView {
                header: Vec::new(),
                body: enemy_rows(layout, wave).collect(),
            },
        })
        .collect();

    Some(QuestView {
        quest_id,
        viewport,
        quest_info,
        enemy_header,
        waves,
    })
}
