use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::viewer::{Align, QuestView, RowView};
use crate::tui::theme;

/// One terminal line of a rendered quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewLine<'a> {
    Row(&'a RowView),
    WaveTitle(&'a str),
    Gap,
}

/// Flatten a quest view into terminal lines: quest info, a gap, the enemy
/// column header (wide only), then each wave title followed by its rows.
pub fn view_lines(view: &QuestView) -> Vec<ViewLine<'_>> {
    let mut lines = Vec::new();
    lines.extend(view.quest_info.header.iter().map(ViewLine::Row));
    lines.extend(view.quest_info.body.iter().map(ViewLine::Row));
    lines.push(ViewLine::Gap);

    if let Some(header) = &view.enemy_header {
        lines.extend(header.header.iter().map(ViewLine::Row));
    }
    for wave in &view.waves {
        lines.push(ViewLine::WaveTitle(&wave.title));
        lines.extend(wave.table.body.iter().map(ViewLine::Row));
    }
    lines
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Right,
    }
}

/// Quest table panel.
#[derive(Debug, Default)]
pub struct QuestViewerState {
    /// First visible line.
    pub scroll: usize,
}

impl QuestViewerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, title: &str, view: Option<&QuestView>) {
        let block = theme::block_focused(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(view) = view else {
            self.scroll = 0;
            let hint = Paragraph::new(Line::from(Span::styled(
                "No table data for this quest",
                theme::muted(),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        };

        let lines = view_lines(view);
        let height = inner.height as usize;
        self.scroll = self.scroll.min(lines.len().saturating_sub(height));

        for (offset, line) in lines.iter().skip(self.scroll).take(height).enumerate() {
            let rect = Rect::new(inner.x, inner.y + offset as u16, inner.width, 1);
            match line {
                ViewLine::Row(row) => render_row(frame, rect, row),
                ViewLine::WaveTitle(title) => {
                    let bar = Paragraph::new(format!(" {title}")).style(theme::wave_title());
                    frame.render_widget(bar, rect);
                }
                ViewLine::Gap => {}
            }
        }
    }
}

/// Lay out one table row on a single line. Cells share the width in
/// proportion to their declared percentages, so spanned cells get more room.
fn render_row(frame: &mut Frame, area: Rect, row: &RowView) {
    let constraints = row
        .cells
        .iter()
        .map(|cell| Constraint::Fill(cell.width.max(1)));
    let slots = Layout::horizontal(constraints).spacing(1).split(area);

    for (cell, slot) in row.cells.iter().zip(slots.iter()) {
        let paragraph = Paragraph::new(cell.text.as_str())
            .alignment(alignment(cell.align))
            .style(theme::cell(cell.style));
        frame.render_widget(paragraph, *slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quest::{EnemyRecord, QuestEnemy, QuestRecord};
    use crate::core::viewer::{render, Viewport};
    use ratatui::{backend::TestBackend, Terminal};

    fn record() -> QuestRecord {
        let enemy = |name: &str| QuestEnemy {
            enemy_id: 1,
            detail: EnemyRecord {
                name: Some(name.into()),
                hp: Some(5000),
                ..Default::default()
            },
        };
        QuestRecord {
            enemies: vec![vec![enemy("Slime"), enemy("Golem")], vec![enemy("Dragon")]],
            ..Default::default()
        }
    }

    fn count_rows(lines: &[ViewLine<'_>]) -> usize {
        lines.iter().filter(|l| matches!(l, ViewLine::Row(_))).count()
    }

    #[test]
    fn test_view_lines_wide() {
        let quest = record();
        let view = render(1, |_| Some(&quest), Viewport::Wide).unwrap();
        let lines = view_lines(&view);

        // 2 quest rows + 1 enemy header + 3 enemies
        assert_eq!(count_rows(&lines), 6);
        let titles: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                ViewLine::WaveTitle(t) => Some(*t),
                _ => None,
            })
            .collect();
        assert_eq!(titles, vec!["w1", "w2"]);
    }

    #[test]
    fn test_view_lines_narrow() {
        let quest = record();
        let view = render(1, |_| Some(&quest), Viewport::Narrow).unwrap();
        // 2 quest rows + 3 enemies x 2 rows, no enemy header
        assert_eq!(count_rows(&view_lines(&view)), 8);
    }

    #[test]
    fn test_render_draws_enemy_names() {
        let quest = record();
        let view = render(1, |_| Some(&quest), Viewport::Wide).unwrap();
        let mut state = QuestViewerState::new();

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                state.render(frame, area, "Quest 1", Some(&view));
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Slime"));
        assert!(text.contains("Dragon"));
        assert!(text.contains("w2"));
    }

    #[test]
    fn test_scroll_is_clamped() {
        let quest = record();
        let view = render(1, |_| Some(&quest), Viewport::Wide).unwrap();
        let mut state = QuestViewerState::new();
        state.scroll_down(1000);

        let mut terminal = Terminal::new(TestBackend::new(100, 8)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                state.render(frame, area, "Quest 1", Some(&view));
            })
            .unwrap();

        // 9 lines, 6 visible inside the border
        assert_eq!(state.scroll, view_lines(&view).len() - 6);
    }

    #[test]
    fn test_missing_quest_resets_scroll() {
        let mut state = QuestViewerState::new();
        state.scroll_down(3);
        let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                state.render(frame, area, "Quest 9", None);
            })
            .unwrap();
        assert_eq!(state.scroll, 0);
    }
}
