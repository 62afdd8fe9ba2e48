//! Home page: featured slider, browse listing and title search.

/// Home page state.
pub mod state;
/// Home page rendering.
pub mod ui;

use crossterm::event::{KeyCode, KeyEvent};

use self::state::{HomeState, HomeView};
use super::command::Effect;

/// Handles a key on the home page. `None` leaves the key to the shell.
pub fn handle_key(state: &mut HomeState, key: KeyEvent) -> Option<Vec<Effect>> {
    if state.search.editing {
        return Some(handle_search_input(state, key.code));
    }
    handle_normal_input(state, key.code)
}

/// Handles key input while the search box is focused.
fn handle_search_input(state: &mut HomeState, key: KeyCode) -> Vec<Effect> {
    match key {
        KeyCode::Esc => state.search.cancel(),
        KeyCode::Enter => return state.submit_search(),
        KeyCode::Backspace => state.search.pop(),
        KeyCode::Char(c) => state.search.push(c),
        _ => {}
    }
    Vec::new()
}

/// Handles key input in normal mode.
fn handle_normal_input(state: &mut HomeState, key: KeyCode) -> Option<Vec<Effect>> {
    let effects = match key {
        KeyCode::Char('/') => {
            state.search.begin();
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
        KeyCode::Right => state.next_page(),
        KeyCode::Left => state.previous_page(),
        KeyCode::Char('g') => state.cycle_genre(),
        KeyCode::Char('f') => state.open_featured(),
        KeyCode::Char(']') => {
            state.slider_tick();
            Vec::new()
        }
        KeyCode::Char('[') => {
            state.slider.back(state.featured.len());
            Vec::new()
        }
        KeyCode::Esc if state.view == HomeView::Search => {
            state.clear_search();
            Vec::new()
        }
        _ => return None,
    };
    Some(effects)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::tui::command::Command;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_into_search_consumes_every_key() {
        // Arrange
        let mut state = HomeState::new();
        handle_key(&mut state, press(KeyCode::Char('/')));

        // Act
        let q = handle_key(&mut state, press(KeyCode::Char('q')));
        let h = handle_key(&mut state, press(KeyCode::Char('h')));

        // Assert
        assert_eq!(q, Some(Vec::new()));
        assert_eq!(h, Some(Vec::new()));
        assert_eq!(state.search.buffer, "qh");
    }

    #[test]
    fn test_enter_submits_search() {
        // Arrange
        let mut state = HomeState::new();
        handle_key(&mut state, press(KeyCode::Char('/')));
        for c in "heat".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)));
        }

        // Act
        let effects = handle_key(&mut state, press(KeyCode::Enter)).unwrap();

        // Assert
        assert_eq!(
            effects,
            vec![Effect::Run(Command::Search {
                query: String::from("heat"),
                page: 1
            })]
        );
        assert!(!state.search.editing);
    }

    #[test]
    fn test_global_keys_fall_through() {
        // Arrange
        let mut state = HomeState::new();

        // Act & Assert
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('q'))), None);
        assert_eq!(handle_key(&mut state, press(KeyCode::Esc)), None);
    }

    #[test]
    fn test_esc_in_search_view_restores_browse() {
        // Arrange
        let mut state = HomeState::new();
        state.search.buffer = String::from("alien");
        state.submit_search();

        // Act
        let effects = handle_key(&mut state, press(KeyCode::Esc));

        // Assert
        assert_eq!(effects, Some(Vec::new()));
        assert_eq!(state.view, HomeView::Browse);
    }
}
