//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::TaskflowError;
use crate::tui::app::{App, Focus};

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Store the typed task.
    Submit,
    Refresh,
    /// Toggle completion of the selected task.
    Toggle,
    Delete,
    CycleFilter,
}

const HELP: &str = "Tab:focus | j/k:nav | space:toggle | d:delete | f:filter | r:refresh | q:quit";

/// Poll the terminal and translate one key press.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App<'_>) -> Result<Option<Action>, TaskflowError> {
    if !event::poll(Duration::from_millis(100))
        .map_err(|e| TaskflowError::Terminal(format!("Event poll failed: {e}")))?
    {
        return Ok(None);
    }

    match event::read().map_err(|e| TaskflowError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(app, key)),
        _ => Ok(None),
    }
}

/// Apply a key to the app. Text editing and navigation happen here;
/// anything touching the store comes back as an [`Action`].
pub fn handle_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
        app.toggle_focus();
        return None;
    }

    match app.focus {
        Focus::Input => handle_input_key(app, key),
        Focus::List => handle_list_key(app, key),
    }
}

fn handle_input_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Esc if app.input.is_empty() => return Some(Action::Quit),
        KeyCode::Esc => app.clear_input(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Char(c) => app.push_char(c),
        _ => {},
    }
    None
}

fn handle_list_key(app: &mut App<'_>, key: KeyEvent) -> Option<Action> {
    if key.code != KeyCode::Char('g') {
        app.cancel_pending();
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') => app.handle_g(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Home => app.select_first(),
        KeyCode::Char(' ') | KeyCode::Enter => return Some(Action::Toggle),
        KeyCode::Char('d') | KeyCode::Delete => return Some(Action::Delete),
        KeyCode::Char('f') => return Some(Action::CycleFilter),
        KeyCode::Char('r') => return Some(Action::Refresh),
        KeyCode::Char('?') => app.status = Some(HELP.to_string()),
        _ => {},
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::board::ListFilter;
    use crate::storage::TaskStore;
    use chrono::NaiveDate;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 14)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_typing_goes_to_input() {
        let store = TaskStore::open_in_memory().unwrap();
        let clock = clock();
        let mut app = App::new(&store, &clock, ListFilter::All).unwrap();

        for c in "quick P2".chars() {
            assert_eq!(handle_key(&mut app, key(KeyCode::Char(c))), None);
        }
        assert_eq!(app.input, "quick P2");
        assert_eq!(app.preview.title, "quick");

        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.input, "quick P");
        assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), Some(Action::Submit));
    }

    #[test]
    fn test_escape_clears_then_quits() {
        let store = TaskStore::open_in_memory().unwrap();
        let clock = clock();
        let mut app = App::new(&store, &clock, ListFilter::All).unwrap();

        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), None);
        assert!(app.input.is_empty());
        assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), Some(Action::Quit));
    }

    #[test]
    fn test_list_keys() {
        let store = TaskStore::open_in_memory().unwrap();
        let clock = clock();
        let mut app = App::new(&store, &clock, ListFilter::All).unwrap();

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::List);
        assert_eq!(handle_key(&mut app, key(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('d'))), Some(Action::Delete));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('f'))), Some(Action::CycleFilter));
        assert_eq!(handle_key(&mut app, key(KeyCode::Char('q'))), Some(Action::Quit));
        assert!(app.input.is_empty());

        handle_key(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_ctrl_c_quits_anywhere() {
        let store = TaskStore::open_in_memory().unwrap();
        let clock = clock();
        let mut app = App::new(&store, &clock, ListFilter::All).unwrap();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, ctrl_c), Some(Action::Quit));
        assert!(app.input.is_empty());
    }
}
