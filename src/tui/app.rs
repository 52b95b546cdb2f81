use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use super::events::{Action, AppEvent, Notification, NotificationLevel};
use super::layout::ViewerLayout;
use super::theme;
use super::views::quest_list::QuestListState;
use super::views::quest_viewer::QuestViewerState;
use crate::config::AppConfig;
use crate::core::quest::QuestStore;
use crate::core::viewer::{html, render, Viewport};

/// Lines moved per scroll step.
const SCROLL_STEP: usize = 5;
/// Notification lifetime in ticks.
const NOTIFICATION_TTL: u32 = 60;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Quest list panel.
    pub quests: QuestListState,
    /// Quest table panel.
    pub viewer: QuestViewerState,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Viewport used by the most recent frame.
    pub viewport: Viewport,
    store: &'static QuestStore,
    narrow_width: u16,
    export_dir: PathBuf,
}

impl AppState {
    pub fn new(store: &'static QuestStore, config: &AppConfig) -> Self {
        Self {
            running: true,
            quests: QuestListState::new(store.quest_list(), |id| store.quest_data(id).is_some()),
            viewer: QuestViewerState::new(),
            notifications: Vec::new(),
            show_help: false,
            viewport: Viewport::default(),
            store,
            narrow_width: config.tui.narrow_width,
            export_dir: config.export_dir(),
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.handle_event(AppEvent::Tick);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Input(input) => {
                let Some(action) = Action::from_event(&input) else {
                    return;
                };
                // Help modal swallows everything except closing it
                if self.show_help {
                    if matches!(action, Action::ToggleHelp | Action::Quit) {
                        self.show_help = false;
                    }
                    return;
                }
                self.handle_action(action);
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::NextQuest => {
                self.quests.next();
                self.viewer.reset_scroll();
            }
            Action::PrevQuest => {
                self.quests.prev();
                self.viewer.reset_scroll();
            }
            Action::ScrollDown => self.viewer.scroll_down(SCROLL_STEP),
            Action::ScrollUp => self.viewer.scroll_up(SCROLL_STEP),
            Action::ExportHtml => self.export_selected(),
        }
    }

    fn export_selected(&mut self) {
        let Some(quest_id) = self.quests.selected_id() else {
            return;
        };
        let store = self.store;
        let title = store.title(quest_id);
        let page = html::render_page(quest_id, &title, |id| store.quest_data(id), self.viewport);
        let path = self.export_dir.join(format!("quest-{quest_id}.html"));

        match std::fs::write(&path, page) {
            Ok(()) => {
                log::info!("Exported quest {quest_id} to {}", path.display());
                self.push_notification(
                    format!("Saved {}", path.display()),
                    NotificationLevel::Success,
                );
            }
            Err(e) => {
                log::error!("Failed to export quest {quest_id} to {}: {e}", path.display());
                self.push_notification(format!("Export failed: {e}"), NotificationLevel::Error);
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }
        self.notifications.push(Notification {
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL,
        });
        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = ViewerLayout::compute(area, self.narrow_width);
        self.viewport = layout.viewport;

        if let Some(list_area) = layout.list {
            self.quests.render(frame, list_area);
        }

        let store = self.store;
        let selected = self.quests.selected_id();
        let view = selected.and_then(|id| render(id, |q| store.quest_data(q), layout.viewport));
        let title = selected
            .map(|id| store.title(id))
            .unwrap_or_else(|| "No quests".to_string());
        self.viewer
            .render(frame, layout.main, &title, view.as_ref());

        self.render_status_bar(frame, layout.status);
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let viewport = match self.viewport {
            Viewport::Wide => "wide",
            Viewport::Narrow => "narrow",
        };
        let position = match self.quests.list_state.selected() {
            Some(i) => format!("{}/{}", i + 1, self.quests.entries.len()),
            None => "0/0".to_string(),
        };

        let status = Line::from(vec![
            Span::styled(" QUESTS ", theme::brand_badge()),
            Span::raw(" "),
            Span::styled(
                position,
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(viewport, theme::muted()),
            Span::raw(" │ "),
            Span::styled("j/k", theme::key_hint()),
            Span::raw(":quest "),
            Span::styled("PgUp/PgDn", theme::key_hint()),
            Span::raw(":scroll "),
            Span::styled("e", theme::key_hint()),
            Span::raw(":export "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let notification_area = Rect::new(x, 1.min(area.height), max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 60, area);

        let keybindings = [
            ("j / ↓ / n", "Next quest"),
            ("k / ↑ / p", "Previous quest"),
            ("PgDn / Space", "Scroll tables down"),
            ("PgUp / b", "Scroll tables up"),
            ("e", "Export quest as HTML"),
            ("?", "Toggle this help"),
            ("q / Esc", "Quit"),
        ];

        let mut lines = vec![Line::raw("")];
        for (key, desc) in keybindings {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {key:<14}"),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(desc),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Narrow terminals stack each enemy on two rows.",
            theme::muted(),
        )));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::title()))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Calculate a centered rect using percentage of parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
