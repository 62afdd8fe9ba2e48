//! Stateless presentation helpers shared by every page.

use ratatui::layout::Constraint;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use movierec_api::{Movie, Route, User};

/// Glyph shown where a poster image would be.
pub const POSTER_PLACEHOLDER: &str = "\u{1F3AC}";

/// Shown when a movie has no usable release date.
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// Shown when a movie has no vote average.
pub const NO_RATING: &str = "N/A";

/// Poster cell text: the placeholder glyph without a poster URL, a hint to
/// open it otherwise.
#[must_use]
pub fn poster_label(movie: &Movie) -> String {
    movie.poster().map_or_else(
        || String::from(POSTER_PLACEHOLDER),
        |_| String::from("[poster: o]"),
    )
}

/// `"N/A"` when absent, otherwise one decimal (`8.4`).
#[must_use]
pub fn rating_text(vote_average: Option<f64>) -> String {
    vote_average.map_or_else(|| String::from(NO_RATING), |v| format!("{v:.1}"))
}

/// Release year, or `"Unknown Year"` when the date is missing or invalid.
#[must_use]
pub fn release_year(movie: &Movie) -> String {
    movie
        .release_year()
        .map_or_else(|| String::from(UNKNOWN_YEAR), |y| y.to_string())
}

/// Cuts `text` after `limit` characters and appends `...`.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return String::from(text);
    }
    let head: String = text.chars().take(limit).collect();
    format!("{}...", head.trim_end())
}

/// Comma-separated genre labels, `-` when there are none.
#[must_use]
pub fn genre_text(genres: &[String]) -> String {
    if genres.is_empty() {
        String::from("-")
    } else {
        genres.join(", ")
    }
}

/// Lines for a movie card: title, year and rating, genres, poster, overview.
#[must_use]
pub fn movie_card_lines(movie: &Movie, description_limit: usize) -> Vec<Line<'static>> {
    let overview = movie
        .overview
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map_or_else(
            || String::from("No description available."),
            |text| truncate(text, description_limit),
        );

    vec![
        Line::from(Span::styled(
            movie.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(release_year(movie)),
            Span::raw("  \u{2605} "),
            Span::styled(
                rating_text(movie.vote_average),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(Span::styled(
            genre_text(&movie.genres),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(poster_label(movie)),
        Line::from(""),
        Line::from(overview),
    ]
}

/// One table row per movie: poster, title, year, rating, genres.
#[must_use]
pub fn movie_row(movie: &Movie) -> Row<'static> {
    Row::new(vec![
        poster_label(movie),
        movie.title.clone(),
        release_year(movie),
        rating_text(movie.vote_average),
        genre_text(&movie.genres),
    ])
}

/// A bordered movie table with a header row.
#[must_use]
pub fn movie_table(movies: &[Movie], title: String, focused: bool) -> Table<'static> {
    let header = Row::new(vec!["", "Title", "Year", "Rating", "Genres"])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(1);

    let widths = [
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Percentage(30),
    ];

    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    Table::new(movies.iter().map(movie_row).collect::<Vec<_>>(), widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(border_style),
        )
        .row_highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
}

/// The search box; highlighted while editing.
#[must_use]
pub fn search_input(query: &str, editing: bool) -> Paragraph<'static> {
    let style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let text = if query.is_empty() && !editing {
        Span::styled(
            String::from("Search movies..."),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(format!("{query}{}", if editing { "_" } else { "" }))
    };
    Paragraph::new(Line::from(text))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Search: / "))
}

/// Navigation bar; the login entry turns into logout when signed in.
#[must_use]
pub fn nav_bar(route: &Route, user: Option<&User>) -> Paragraph<'static> {
    let item = |key: &str, label: &str, active: bool| {
        let style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Span::styled(format!("[{key}] {label}  "), style)
    };

    let mut spans = vec![
        Span::styled(
            String::from("movierec  "),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        item("h", "Home", *route == Route::Home),
    ];
    match user {
        Some(user) => {
            spans.push(item("d", "Dashboard", *route == Route::Dashboard));
            spans.push(item("l", "Logout", false));
            spans.push(Span::styled(
                format!("Hi, {}", user.display_name()),
                Style::default().fg(Color::Green),
            ));
        }
        None => {
            spans.push(item("l", "Login", *route == Route::Login));
            spans.push(item("^r", "Register", *route == Route::Register));
        }
    }

    Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL))
}

/// Status text for a page: the error wins over the loading indicator.
#[must_use]
pub fn status_line(loading: bool, error: Option<&str>, notice: Option<&str>) -> Line<'static> {
    if let Some(error) = error {
        return Line::from(Span::styled(
            String::from(error),
            Style::default().fg(Color::Red),
        ));
    }
    if loading {
        return Line::from(Span::styled(
            String::from("Loading..."),
            Style::default().fg(Color::Yellow),
        ));
    }
    notice.map_or_else(
        || Line::from(""),
        |text| Line::from(Span::styled(String::from(text), Style::default().fg(Color::Green))),
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    fn movie(value: serde_json::Value) -> Movie {
        serde_json::from_value(value).unwrap()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_missing_poster_shows_placeholder() {
        // Arrange
        let m = movie(json!({"id": 1, "title": "No Poster", "poster_url": null}));

        // Act & Assert
        assert_eq!(poster_label(&m), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_empty_poster_shows_placeholder() {
        // Arrange
        let m = movie(json!({"id": 1, "title": "Blank", "poster_url": "  "}));

        // Act & Assert
        assert_eq!(poster_label(&m), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_poster_present() {
        // Arrange
        let m = movie(json!({
            "id": 1,
            "title": "Heat",
            "poster_url": "https://image.tmdb.org/t/p/w500/heat.jpg"
        }));

        // Act & Assert
        assert_ne!(poster_label(&m), POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_rating_text() {
        // Arrange & Act & Assert
        assert_eq!(rating_text(None), "N/A");
        assert_eq!(rating_text(Some(8.4)), "8.4");
        assert_eq!(rating_text(Some(7.0)), "7.0");
    }

    #[test]
    fn test_null_vote_average_is_na() {
        // Arrange
        let m = movie(json!({"id": 1, "title": "Unrated", "vote_average": null}));

        // Act & Assert
        assert_eq!(rating_text(m.vote_average), "N/A");
    }

    #[test]
    fn test_release_year() {
        // Arrange
        let dated = movie(json!({"id": 1, "title": "Alien", "release_date": "1979-05-25"}));
        let garbage = movie(json!({"id": 2, "title": "?", "release_date": "someday"}));
        let missing = movie(json!({"id": 3, "title": "?"}));

        // Act & Assert
        assert_eq!(release_year(&dated), "1979");
        assert_eq!(release_year(&garbage), UNKNOWN_YEAR);
        assert_eq!(release_year(&missing), UNKNOWN_YEAR);
    }

    #[test]
    fn test_truncate() {
        // Arrange
        let long = "a".repeat(200);

        // Act
        let cut = truncate(&long, 150);

        // Assert
        assert_eq!(cut.chars().count(), 153);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate("short", 150), "short");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        // Arrange & Act
        let cut = truncate("\u{7345}\u{5B50}\u{738B}\u{306E}\u{5192}\u{967A}", 3);

        // Assert
        assert_eq!(cut, "\u{7345}\u{5B50}\u{738B}...");
    }

    #[test]
    fn test_genre_text() {
        // Arrange & Act & Assert
        assert_eq!(genre_text(&[]), "-");
        assert_eq!(
            genre_text(&[String::from("Action"), String::from("Drama")]),
            "Action, Drama"
        );
    }

    #[test]
    fn test_card_lines_use_fallbacks() {
        // Arrange
        let m = movie(json!({"id": 9, "title": "Mystery", "overview": ""}));

        // Act
        let lines: Vec<String> = movie_card_lines(&m, 150).iter().map(line_text).collect();

        // Assert
        assert_eq!(lines.first().unwrap(), "Mystery");
        assert!(lines.iter().any(|l| l.contains(UNKNOWN_YEAR) && l.contains(NO_RATING)));
        assert!(lines.iter().any(|l| l == POSTER_PLACEHOLDER));
        assert!(lines.iter().any(|l| l == "No description available."));
    }

    #[test]
    fn test_status_line_error_wins() {
        // Arrange & Act
        let line = status_line(true, Some("Failed to load movies."), None);

        // Assert
        assert_eq!(line_text(&line), "Failed to load movies.");
    }

    #[test]
    fn test_status_line_loading_and_notice() {
        // Arrange & Act & Assert
        assert_eq!(line_text(&status_line(true, None, Some("done"))), "Loading...");
        assert_eq!(line_text(&status_line(false, None, Some("done"))), "done");
        assert_eq!(line_text(&status_line(false, None, None)), "");
    }
}
