//! Home page rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::{HomeState, HomeView};
use crate::tui::widgets;

/// Draws the home page into `area`.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, area: Rect, state: &mut HomeState, description_limit: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search
            Constraint::Length(8), // featured
            Constraint::Min(5),    // listing
            Constraint::Length(3), // footer
        ])
        .split(area);

    frame.render_widget(
        widgets::search_input(&state.search.buffer, state.search.editing),
        chunks[0],
    );
    draw_featured(frame, chunks[1], state, description_limit);
    draw_listing(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);
}

/// Draws the featured slider card.
fn draw_featured(frame: &mut Frame, area: Rect, state: &HomeState, description_limit: usize) {
    let total = state.featured.len();
    let title = if total == 0 {
        String::from(" Featured ")
    } else {
        format!(
            " Featured {}/{total}  [ ] f ",
            state.slider.index(total).saturating_add(1)
        )
    };
    let lines = state.current_featured().map_or_else(
        || vec![Line::from(Span::styled("No featured movies.", Style::default().fg(Color::DarkGray)))],
        |movie| widgets::movie_card_lines(movie, description_limit),
    );
    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(card, area);
}

/// Draws the browse or search table.
fn draw_listing(frame: &mut Frame, area: Rect, state: &mut HomeState) {
    let title = match (state.view, &state.active_query) {
        (HomeView::Search, Some(query)) => format!(" Search results for \"{query}\" "),
        _ => state.genre_name().map_or_else(
            || String::from(" Browse "),
            |genre| format!(" Browse: {genre}  (g) "),
        ),
    };
    let table = widgets::movie_table(state.visible_movies(), title, !state.search.editing);
    frame.render_stateful_widget(table, area, &mut state.table_state);
}

/// Draws pagination and status.
fn draw_footer(frame: &mut Frame, area: Rect, state: &HomeState) {
    let mut lines = vec![widgets::status_line(
        state.loading,
        state.error.as_deref(),
        None,
    )];
    if state.pagination_visible() {
        let p = &state.pagination;
        let prev = if p.has_previous { "\u{2190} Previous" } else { "" };
        let next = if p.has_next { "Next \u{2192}" } else { "" };
        lines.push(Line::from(format!("{prev}  {}  {next}", p.label())));
    } else if state.view == HomeView::Search && !state.loading {
        lines.push(Line::from(format!(
            "{} result(s)  Esc: back to browse",
            state.search_results.len()
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );
}
