use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse/resize).
    Input(Event),
}

/// High-level actions resolved from key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NextQuest,
    PrevQuest,
    ScrollDown,
    ScrollUp,
    ToggleHelp,
    ExportHtml,
    Quit,
}

impl Action {
    /// Map a key press or mouse wheel event to an action.
    pub fn from_event(event: &Event) -> Option<Action> {
        if let Event::Mouse(mouse) = event {
            return match mouse.kind {
                MouseEventKind::ScrollDown => Some(Action::ScrollDown),
                MouseEventKind::ScrollUp => Some(Action::ScrollUp),
                _ => None,
            };
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (*modifiers, *code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, code) => match code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ToggleHelp),
                KeyCode::Char('j') | KeyCode::Down | KeyCode::Char('n') => Some(Action::NextQuest),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::Char('p') => Some(Action::PrevQuest),
                KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::ScrollDown),
                KeyCode::PageUp | KeyCode::Char('b') => Some(Action::ScrollUp),
                KeyCode::Char('e') => Some(Action::ExportHtml),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            Action::from_event(&key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            Action::from_event(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(
            Action::from_event(&key(KeyCode::Down, KeyModifiers::NONE)),
            Some(Action::NextQuest)
        );
        assert_eq!(
            Action::from_event(&key(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(Action::PrevQuest)
        );
        assert_eq!(
            Action::from_event(&key(KeyCode::PageDown, KeyModifiers::NONE)),
            Some(Action::ScrollDown)
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(Action::from_event(&release), None);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let wheel = Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(Action::from_event(&wheel), Some(Action::ScrollDown));
    }

    #[test]
    fn test_resize_is_not_an_action() {
        assert_eq!(Action::from_event(&Event::Resize(100, 40)), None);
    }
}
