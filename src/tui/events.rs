use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// User actions from terminal events.
///
/// The same actions drive the result list and the location dialog; the app
/// interprets them according to which one has focus.
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    /// Esc: clear the query, close the dialog, or quit when there is nothing to clear
    Cancel,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Enter: launch the selection, or submit the dialog
    Submit,
    CopyToClipboard,
    OpenSettings,
    Refresh,
    Input(char),
    DeleteChar,
    Paste(String),
    None,
}

/// Poll for terminal events and convert to actions
pub fn poll_event(timeout: Duration) -> anyhow::Result<Action> {
    if !event::poll(timeout)? {
        return Ok(Action::None);
    }

    Ok(match event::read()? {
        // Windows reports both press and release
        Event::Key(key) if key.kind != KeyEventKind::Release => key_to_action(key),
        Event::Paste(text) => Action::Paste(text),
        _ => Action::None,
    })
}

fn key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Cancel,

        // Navigation (Emacs style)
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::MoveUp,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::MoveDown,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => Action::CopyToClipboard,
        (KeyCode::Char('o'), KeyModifiers::CONTROL) => Action::OpenSettings,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => Action::Refresh,

        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::Input(c)
        }
        (KeyCode::Backspace, _) => Action::DeleteChar,

        _ => Action::None,
    }
}
