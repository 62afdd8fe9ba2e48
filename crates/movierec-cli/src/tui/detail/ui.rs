//! Movie detail rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::DetailState;
use crate::tui::widgets;

/// Draws the detail page into `area`.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, area: Rect, state: &mut DetailState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(55), // movie
            Constraint::Min(5),         // similar
            Constraint::Length(3),      // actions
        ])
        .split(area);

    draw_movie(frame, chunks[0], state);

    let table = widgets::movie_table(
        &state.recommendations,
        String::from(" Similar movies "),
        true,
    );
    frame.render_stateful_widget(table, chunks[1], &mut state.table_state);

    draw_actions(frame, chunks[2], state);
}

/// Draws the movie card with its metadata.
fn draw_movie(frame: &mut Frame, area: Rect, state: &DetailState) {
    let block = Block::default().borders(Borders::ALL).title(format!(" Movie {} ", state.id));
    let Some(movie) = &state.movie else {
        let line = widgets::status_line(state.loading, state.error.as_deref(), None);
        frame.render_widget(Paragraph::new(line).block(block), area);
        return;
    };

    let mut lines = widgets::movie_card_lines(movie, usize::MAX);
    if let Some(original) = movie.original_title.as_deref().filter(|t| *t != movie.title) {
        lines.insert(1, Line::from(Span::styled(
            format!("({original})"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let runtime = movie
        .runtime
        .map_or_else(|| String::from("-"), |m| format!("{m} min"));
    let votes = movie
        .vote_count
        .map_or_else(|| String::from("-"), |v| v.to_string());
    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Runtime: {runtime}   Votes: {votes}   Language: {}",
        movie.original_language.as_deref().unwrap_or("-")
    )));

    if state.status_known || state.status.in_watchlist() || state.status.rating.is_some() {
        let watch = if state.status.in_watchlist() {
            "\u{2713} In watchlist"
        } else {
            "Not in watchlist"
        };
        let rating = state
            .status
            .rating
            .map_or_else(|| String::from("Not rated"), |r| format!("Your rating: {r}/10"));
        lines.push(Line::from(Span::styled(
            format!("{watch}   {rating}"),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

/// Draws the action hints and status.
fn draw_actions(frame: &mut Frame, area: Rect, state: &DetailState) {
    let dim = Style::default().fg(Color::DarkGray);
    let watch_label = if state.status.in_watchlist() {
        "[w] Remove from watchlist"
    } else {
        "[w] Add to watchlist"
    };
    let watch = if state.watchlist_pending {
        Span::styled("[w] Updating...", dim)
    } else if state.status_loading {
        Span::styled("[w] Checking...", dim)
    } else {
        Span::raw(watch_label)
    };
    let rate = if state.rating_pending {
        Span::styled("  [r] Saving...", dim)
    } else if state.awaiting_rating {
        Span::styled("  Rate 1-9, 0 = 10", Style::default().fg(Color::Yellow))
    } else {
        Span::raw("  [r] Rate")
    };
    let lines = vec![
        Line::from(vec![watch, rate, Span::raw("  [o] Poster  [Esc] Back")]),
        widgets::status_line(
            state.loading && state.movie.is_some(),
            state.error.as_deref().filter(|_| state.movie.is_some()),
            state.notice.as_deref(),
        ),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP)),
        area,
    );
}
