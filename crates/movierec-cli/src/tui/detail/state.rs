//! Movie detail state: the movie, similar movies, and the user's
//! watchlist and rating actions.

use movierec_api::{ApiError, ErrorKind, Movie, MovieStatus, Route};
use ratatui::widgets::TableState;

use crate::tui::command::{Command, Effect, Outcome};
use crate::tui::selection;

/// Shown when the movie does not exist.
pub const NOT_FOUND: &str = "Movie not found.";

/// Shown when the movie cannot be loaded for another reason.
pub const LOAD_FAILED: &str = "Failed to load movie details.";

/// Shown when adding or removing fails.
pub const WATCHLIST_FAILED: &str = "Failed to update watchlist.";

/// Shown when rating fails.
pub const RATING_FAILED: &str = "Failed to save rating.";

/// Shown when the watchlist/rating status cannot be loaded.
pub const STATUS_FAILED: &str = "Watchlist status unavailable.";

/// Ratings accepted by the backend.
pub const RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// State for the movie detail page.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DetailState {
    /// Route ID being shown.
    pub id: u64,
    /// The loaded movie.
    pub movie: Option<Movie>,
    /// Similar movies.
    pub recommendations: Vec<Movie>,
    /// Watchlist/rating status of the signed-in user.
    pub status: MovieStatus,
    /// Whether `status` came from the backend.
    pub status_known: bool,
    /// Status request outstanding.
    pub status_loading: bool,
    /// The watchlist flag was changed on this page.
    watchlist_touched: bool,
    /// The rating was changed on this page.
    rating_touched: bool,
    /// Movie request outstanding.
    pub loading: bool,
    /// Add/remove request outstanding; the control is disabled meanwhile.
    pub watchlist_pending: bool,
    /// Rating request outstanding.
    pub rating_pending: bool,
    /// `r` was pressed; the next digit is the rating.
    pub awaiting_rating: bool,
    /// Page-level error message.
    pub error: Option<String>,
    /// Confirmation of the last action.
    pub notice: Option<String>,
    /// Selection in the similar movies table.
    pub table_state: TableState,
}

impl DetailState {
    /// Creates a state for route ID `id`.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self {
            id,
            movie: None,
            recommendations: Vec::new(),
            status: MovieStatus::default(),
            status_known: false,
            status_loading: false,
            watchlist_touched: false,
            rating_touched: false,
            loading: false,
            watchlist_pending: false,
            rating_pending: false,
            awaiting_rating: false,
            error: None,
            notice: None,
            table_state: TableState::default(),
        }
    }

    /// Loads the movie and its similar movies.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.loading = true;
        vec![
            Effect::Run(Command::MovieDetail { id: self.id }),
            Effect::Run(Command::MovieRecommendations { id: self.id }),
        ]
    }

    /// Toggles watchlist membership.
    ///
    /// Unauthenticated users are sent to login; the intent is ignored while
    /// a previous toggle is in flight, before the movie has loaded, or
    /// before the current membership is known.
    pub fn toggle_watchlist(&mut self, authenticated: bool) -> Vec<Effect> {
        if !authenticated {
            return vec![Effect::Navigate(Route::Login)];
        }
        if self.watchlist_pending {
            tracing::debug!(id = self.id, "watchlist toggle already in flight");
            return Vec::new();
        }
        if !self.status_known {
            tracing::debug!(id = self.id, "watchlist status not known yet");
            return Vec::new();
        }
        let Some(movie) = &self.movie else {
            return Vec::new();
        };
        let command = match self.status.watchlist_entry {
            Some(entry_id) => Command::RemoveFromWatchlist { entry_id },
            None => Command::AddToWatchlist { movie_id: movie.id },
        };
        self.watchlist_pending = true;
        self.notice = None;
        vec![Effect::Run(command)]
    }

    /// Starts a rating: the next digit picks the value.
    pub fn begin_rating(&mut self, authenticated: bool) -> Vec<Effect> {
        if !authenticated {
            return vec![Effect::Navigate(Route::Login)];
        }
        if !self.rating_pending && self.movie.is_some() {
            self.awaiting_rating = true;
        }
        Vec::new()
    }

    /// Rates the movie `value` out of 10.
    pub fn rate(&mut self, value: u8, authenticated: bool) -> Vec<Effect> {
        self.awaiting_rating = false;
        if !authenticated {
            return vec![Effect::Navigate(Route::Login)];
        }
        if self.rating_pending || !RATING_RANGE.contains(&value) {
            return Vec::new();
        }
        let Some(movie) = &self.movie else {
            return Vec::new();
        };
        self.rating_pending = true;
        self.notice = None;
        vec![Effect::Run(Command::RateMovie {
            movie_id: movie.id,
            rating: value,
        })]
    }

    /// Opens the poster image in the browser.
    #[must_use]
    pub fn open_poster(&self) -> Vec<Effect> {
        self.movie
            .as_ref()
            .and_then(Movie::poster)
            .map_or_else(Vec::new, |url| vec![Effect::OpenUrl(String::from(url))])
    }

    /// Cursor down in similar movies.
    pub fn move_down(&mut self) {
        selection::move_down(&mut self.table_state, self.recommendations.len());
    }

    /// Cursor up in similar movies.
    pub fn move_up(&mut self) {
        selection::move_up(&mut self.table_state, self.recommendations.len());
    }

    /// Opens the selected similar movie.
    #[must_use]
    pub fn open_selected(&self) -> Vec<Effect> {
        selection::selected(&self.table_state, self.recommendations.len())
            .and_then(|i| self.recommendations.get(i))
            .map_or_else(Vec::new, |m| {
                vec![Effect::Navigate(Route::Movie(m.route_id()))]
            })
    }

    fn is_current(&self, movie_id: u64) -> bool {
        self.movie.as_ref().is_some_and(|m| m.id == movie_id)
    }

    /// Applies a finished command.
    pub fn apply(&mut self, outcome: Outcome, authenticated: bool) -> Vec<Effect> {
        match outcome {
            Outcome::MovieDetail { id, result } if id == self.id => {
                self.loading = false;
                match result {
                    Ok(movie) => {
                        self.error = None;
                        let effects = if authenticated {
                            self.status_loading = true;
                            vec![Effect::Run(Command::MovieStatus {
                                movie: Box::new(movie.clone()),
                            })]
                        } else {
                            Vec::new()
                        };
                        self.movie = Some(movie);
                        return effects;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, id, "movie detail failed");
                        self.error = Some(String::from(match ApiError::classify(&e) {
                            ErrorKind::NotFound => NOT_FOUND,
                            _ => LOAD_FAILED,
                        }));
                    }
                }
            }
            Outcome::MovieRecommendations { id, result } if id == self.id => match result {
                Ok(envelope) => {
                    self.recommendations = envelope.movies();
                    selection::reset(&mut self.table_state, self.recommendations.len());
                }
                Err(e) => tracing::warn!(error = %e, id, "similar movies unavailable"),
            },
            Outcome::MovieStatus { movie_id, result } if self.is_current(movie_id) => {
                self.status_loading = false;
                match result {
                    Ok(status) => {
                        // Changes made here are newer than the listings.
                        if !self.watchlist_touched {
                            self.status.watchlist_entry = status.watchlist_entry;
                        }
                        if !self.rating_touched {
                            self.status.rating = status.rating;
                        }
                        self.status_known = true;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, movie_id, "movie status unavailable");
                        self.notice = Some(String::from(STATUS_FAILED));
                    }
                }
            }
            Outcome::WatchlistAdded { movie_id, result } if self.is_current(movie_id) => {
                self.watchlist_pending = false;
                match result {
                    Ok(entry) => {
                        self.status.watchlist_entry = Some(entry.id);
                        self.watchlist_touched = true;
                        self.notice = Some(String::from("Added to watchlist."));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, movie_id, "add to watchlist failed");
                        self.error = Some(String::from(WATCHLIST_FAILED));
                    }
                }
            }
            Outcome::WatchlistRemoved { entry_id, result } => {
                self.watchlist_pending = false;
                match result {
                    Ok(()) => {
                        if self.status.watchlist_entry == Some(entry_id) {
                            self.status.watchlist_entry = None;
                            self.watchlist_touched = true;
                        }
                        self.notice = Some(String::from("Removed from watchlist."));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, entry_id, "remove from watchlist failed");
                        self.error = Some(String::from(WATCHLIST_FAILED));
                    }
                }
            }
            Outcome::Rated { movie_id, result } if self.is_current(movie_id) => {
                self.rating_pending = false;
                match result {
                    Ok(entry) => {
                        self.status.rating = Some(entry.rating);
                        self.rating_touched = true;
                        self.notice = Some(format!("Rated {}/10.", entry.rating));
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, movie_id, "rating failed");
                        self.error = Some(String::from(RATING_FAILED));
                    }
                }
            }
            other => tracing::trace!(?other, "outcome not handled by detail page"),
        }
        Vec::new()
    }
}
