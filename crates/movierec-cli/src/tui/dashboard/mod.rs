//! Dashboard page: personalized recommendations, watchlist and search.

/// Dashboard state.
pub mod state;
/// Dashboard rendering.
pub mod ui;

use crossterm::event::{KeyCode, KeyEvent};

use self::state::DashboardState;
use super::command::Effect;

/// Handles a key on the dashboard. `None` leaves the key to the shell.
pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> Option<Vec<Effect>> {
    if state.search.editing {
        let effects = match key.code {
            KeyCode::Esc => {
                state.search.cancel();
                Vec::new()
            }
            KeyCode::Enter => state.submit_search(),
            KeyCode::Backspace => {
                state.search.pop();
                Vec::new()
            }
            KeyCode::Char(c) => {
                state.search.push(c);
                Vec::new()
            }
            _ => Vec::new(),
        };
        return Some(effects);
    }

    let effects = match key.code {
        KeyCode::Right | KeyCode::Tab => {
            state.next_tab();
            Vec::new()
        }
        KeyCode::Left | KeyCode::BackTab => {
            state.previous_tab();
            Vec::new()
        }
        KeyCode::Char('/') => {
            state.begin_search();
            Vec::new()
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_up();
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_down();
            Vec::new()
        }
        KeyCode::Enter => state.open_selected(),
        KeyCode::Char('x') | KeyCode::Delete => state.remove_selected(),
        KeyCode::PageDown => state.next_watchlist_page(),
        KeyCode::PageUp => state.previous_watchlist_page(),
        _ => return None,
    };
    Some(effects)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::tui::dashboard::state::Tab;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_switch_tabs() {
        // Arrange
        let mut state = DashboardState::new();

        // Act
        handle_key(&mut state, press(KeyCode::Right));
        handle_key(&mut state, press(KeyCode::Right));

        // Assert
        assert_eq!(state.tab, Tab::Search);
        handle_key(&mut state, press(KeyCode::Left));
        assert_eq!(state.tab, Tab::Watchlist);
    }

    #[test]
    fn test_slash_opens_search_tab_in_editing_mode() {
        // Arrange
        let mut state = DashboardState::new();

        // Act
        handle_key(&mut state, press(KeyCode::Char('/')));
        let consumed = handle_key(&mut state, press(KeyCode::Char('d')));

        // Assert
        assert_eq!(state.tab, Tab::Search);
        assert_eq!(consumed, Some(Vec::new()));
        assert_eq!(state.search.buffer, "d");
    }

    #[test]
    fn test_unknown_keys_fall_through() {
        // Arrange
        let mut state = DashboardState::new();

        // Act & Assert
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('h'))), None);
    }
}
