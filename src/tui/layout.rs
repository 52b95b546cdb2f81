//! Root layout computation for quest list + viewer + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

use crate::core::viewer::Viewport;

/// Width of the quest list panel.
pub const QUEST_LIST_WIDTH: u16 = 30;

/// Computed layout regions for a single frame.
pub struct ViewerLayout {
    /// Quest list panel (None in the narrow layout).
    pub list: Option<Rect>,
    /// Quest tables.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
    /// Table layout the viewer should render with.
    pub viewport: Viewport,
}

impl ViewerLayout {
    /// Compute layout regions from the terminal area.
    ///
    /// Below `narrow_width` columns the quest list is hidden and the enemy
    /// tables switch to the stacked two-row layout.
    pub fn compute(area: Rect, narrow_width: u16) -> Self {
        let viewport = Viewport::from_width(area.width, narrow_width);

        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let (list, main) = match viewport {
            Viewport::Narrow => (None, content_area),
            Viewport::Wide => {
                let cols = Layout::horizontal([
                    Constraint::Length(QUEST_LIST_WIDTH),
                    Constraint::Min(1),
                ])
                .split(content_area);
                (Some(cols[0]), cols[1])
            }
        };

        ViewerLayout {
            list,
            main,
            status,
            viewport,
        }
    }
}
