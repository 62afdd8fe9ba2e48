//! Movie detail page.

/// Detail state.
pub mod state;
/// Detail rendering.
pub mod ui;

use crossterm::event::{KeyCode, KeyEvent};

use self::state::DetailState;
use super::command::Effect;

/// Handles a key on the detail page. `None` leaves the key to the shell.
pub fn handle_key(
    state: &mut DetailState,
    key: KeyEvent,
    authenticated: bool,
) -> Option<Vec<Effect>> {
    if state.awaiting_rating {
        let effects = match key.code {
            KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                Some(d) => state.rate(if d == 0 { 10 } else { d }, authenticated),
                None => {
                    state.awaiting_rating = false;
                    Vec::new()
                }
            },
            _ => {
                state.awaiting_rating = false;
                Vec::new()
            }
        };
        return Some(effects);
    }

    let effects = match key.code {
        KeyCode::Char('r') => state.begin_rating(authenticated),
        KeyCode::Char('w') => state.toggle_watchlist(authenticated),
        KeyCode::Char('o') => state.open_poster(),
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            Vec::new()
        }
        KeyCode::Enter => state.open_selected(),
        _ => return None,
    };
    Some(effects)
}
