use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use crate::core::quest::QuestList;
use crate::tui::theme;

/// One selectable entry of the quest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestListEntry {
    pub id: u32,
    pub label: String,
    /// Whether the quest has table data (listed-only quests render nothing).
    pub has_data: bool,
}

/// Quest list panel: every listed quest, in data file order.
pub struct QuestListState {
    pub entries: Vec<QuestListEntry>,
    pub list_state: ListState,
}

impl QuestListState {
    pub fn new(list: &QuestList, has_data: impl Fn(u32) -> bool) -> Self {
        let entries: Vec<QuestListEntry> = list
            .iter()
            .map(|(id, chapter)| {
                let label = chapter.label();
                QuestListEntry {
                    id: *id,
                    label: if label.is_empty() { id.to_string() } else { label },
                    has_data: has_data(*id),
                }
            })
            .collect();

        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            entries,
            list_state,
        }
    }

    pub fn selected(&self) -> Option<&QuestListEntry> {
        self.list_state.selected().and_then(|i| self.entries.get(i))
    }

    pub fn selected_id(&self) -> Option<u32> {
        self.selected().map(|entry| entry.id)
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let label_style = if entry.has_data {
                    Style::default().fg(theme::TEXT)
                } else {
                    Style::default().fg(theme::TEXT_DIM)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>8} ", entry.id), theme::muted()),
                    Span::styled(entry.label.clone(), label_style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(theme::block_focused("Quests"))
            .highlight_style(theme::highlight())
            .highlight_symbol("▸ ");

        let mut render_state = self.list_state.clone();
        frame.render_stateful_widget(list, area, &mut render_state);
    }
}
