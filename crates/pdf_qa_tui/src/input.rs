//! Keyboard handling

use crate::app::{App, Mode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop must do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    /// Start a submit cycle with the current question.
    Submit,
    Quit,
}

/// Apply `key` to `app` and report anything the event loop has to act on.
pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputAction::Quit;
    }

    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_alert();
        }
        return InputAction::None;
    }

    if let Mode::PickDocument { path } = &mut app.mode {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => path.push(c),
            KeyCode::Backspace => {
                path.pop();
            }
            _ => {}
        }
        match key.code {
            KeyCode::Enter => app.confirm_picker(),
            KeyCode::Esc => app.cancel_picker(),
            _ => {}
        }
        return InputAction::None;
    }

    match key.code {
        KeyCode::Char('o') if key.modifiers.contains(KeyModifiers::CONTROL) => app.open_picker(),
        KeyCode::Enter => {
            if app.send_enabled() {
                return InputAction::Submit;
            }
        }
        KeyCode::Esc => {
            if !app.is_busy() {
                return InputAction::Quit;
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.insert_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.move_cursor_left(),
        KeyCode::Right => app.move_cursor_right(),
        KeyCode::Home if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll_to_top(),
        KeyCode::End if key.modifiers.contains(KeyModifiers::CONTROL) => app.scroll_to_bottom(),
        KeyCode::Home => app.move_cursor_home(),
        KeyCode::End => app.move_cursor_end(),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        _ => {}
    }
    InputAction::None
}
