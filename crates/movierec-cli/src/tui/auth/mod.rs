//! Login and registration pages.

/// Form state.
pub mod state;
/// Form rendering.
pub mod ui;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use self::state::AuthState;
use super::command::Effect;

/// Handles a key on the auth form. Only `Esc` is left to the shell, so
/// typed characters never trigger global shortcuts.
pub fn handle_key(state: &mut AuthState, key: KeyEvent) -> Option<Vec<Effect>> {
    let effects = match key.code {
        KeyCode::Esc => return None,
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.switch_mode()
        }
        KeyCode::Enter => state.submit(),
        KeyCode::Tab | KeyCode::Down => {
            state.focus_next();
            Vec::new()
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_previous();
            Vec::new()
        }
        KeyCode::Backspace => {
            state.pop();
            Vec::new()
        }
        KeyCode::Char(c) => {
            state.push(c);
            Vec::new()
        }
        _ => Vec::new(),
    };
    Some(effects)
}
