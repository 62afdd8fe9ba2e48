//! Dashboard rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use super::state::{DashboardState, Tab};
use crate::tui::widgets;

/// Draws the dashboard into `area`.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, area: Rect, state: &mut DashboardState) {
    let show_search = state.tab == Tab::Search;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // tabs
            Constraint::Length(if show_search { 3 } else { 0 }),
            Constraint::Min(5),    // list
            Constraint::Length(3), // footer
        ])
        .split(area);

    let selected = Tab::ALL.iter().position(|t| *t == state.tab).unwrap_or(0);
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.label()))
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" Dashboard: \u{2190}/\u{2192} "));
    frame.render_widget(tabs, chunks[0]);

    if show_search {
        frame.render_widget(
            widgets::search_input(&state.search.buffer, state.search.editing),
            chunks[1],
        );
    }

    let title = match state.tab {
        Tab::Recommendations => String::from(" Recommended for you "),
        Tab::Watchlist => format!(" Watchlist ({})  x: remove ", state.watchlist.len()),
        Tab::Search => state.active_query.as_ref().map_or_else(
            || String::from(" Search "),
            |q| format!(" Results for \"{q}\" "),
        ),
    };
    let movies = state.visible_movies();
    let table = widgets::movie_table(&movies, title, !state.search.editing);
    frame.render_stateful_widget(table, chunks[2], &mut state.table_state);

    let mut lines = vec![widgets::status_line(
        state.loading(),
        state.error.as_deref(),
        None,
    )];
    match state.tab {
        Tab::Recommendations if state.recommendations.is_empty() => {
            if let Some(message) = &state.recommendations_message {
                lines.push(Line::from(message.clone()));
            }
        }
        Tab::Watchlist if state.watchlist_pagination.controls_visible() => {
            lines.push(Line::from(format!(
                "{}  PgUp/PgDn",
                state.watchlist_pagination.label()
            )));
        }
        _ => {}
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        chunks[3],
    );
}
