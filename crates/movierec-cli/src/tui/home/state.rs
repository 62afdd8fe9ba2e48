//! Home page state: browse listing, search, genre filter, featured slider.

use movierec_api::{Genre, Movie, Pagination, Route};
use ratatui::widgets::TableState;

use crate::tui::command::{Command, Effect, Outcome};
use crate::tui::search::SearchBox;
use crate::tui::selection;
use crate::tui::slider::SliderState;

/// Shown when the browse listing cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load movies. Please try again later.";

/// Shown when a search request fails.
pub const SEARCH_FAILED: &str = "Failed to search movies. Please try again.";

/// Which result set the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeView {
    /// Paginated catalog listing.
    Browse,
    /// Search results for the active query.
    Search,
}

/// State for the home page.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct HomeState {
    /// Active result set.
    pub view: HomeView,
    /// Browse listing for the current page.
    pub browse: Vec<Movie>,
    /// Browse pagination.
    pub pagination: Pagination,
    /// Known genres.
    pub genres: Vec<Genre>,
    /// Index into `genres` of the active filter.
    pub genre_filter: Option<usize>,
    /// Search box.
    pub search: SearchBox,
    /// Query of the current search view.
    pub active_query: Option<String>,
    /// Search results.
    pub search_results: Vec<Movie>,
    /// Featured movies for the slider.
    pub featured: Vec<Movie>,
    /// Slider position.
    pub slider: SliderState,
    /// Whether a listing or search request is outstanding.
    pub loading: bool,
    /// Page-level error message.
    pub error: Option<String>,
    /// Table selection.
    pub table_state: TableState,
}

impl Default for HomeState {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeState {
    /// Creates an empty state; call [`HomeState::mount`] to load data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: HomeView::Browse,
            browse: Vec::new(),
            pagination: Pagination::default(),
            genres: Vec::new(),
            genre_filter: None,
            search: SearchBox::default(),
            active_query: None,
            search_results: Vec::new(),
            featured: Vec::new(),
            slider: SliderState::default(),
            loading: false,
            error: None,
            table_state: TableState::default(),
        }
    }

    /// Initial loads: first browse page, featured movies, genres.
    pub fn mount(&mut self) -> Vec<Effect> {
        self.loading = true;
        vec![
            Effect::Run(self.listing_command(1)),
            Effect::Run(Command::Featured),
            Effect::Run(Command::Genres),
        ]
    }

    /// Movies of the active view.
    #[must_use]
    pub fn visible_movies(&self) -> &[Movie] {
        match self.view {
            HomeView::Browse => &self.browse,
            HomeView::Search => &self.search_results,
        }
    }

    /// Pagination controls are shown only while browsing.
    #[must_use]
    pub fn pagination_visible(&self) -> bool {
        self.view == HomeView::Browse && self.pagination.controls_visible()
    }

    /// Name of the active genre filter.
    #[must_use]
    pub fn genre_name(&self) -> Option<&str> {
        self.genre_filter
            .and_then(|i| self.genres.get(i))
            .map(|g| g.name.as_str())
    }

    /// The featured movie currently on the slider.
    #[must_use]
    pub fn current_featured(&self) -> Option<&Movie> {
        self.featured.get(self.slider.index(self.featured.len()))
    }

    fn listing_command(&self, page: u32) -> Command {
        Command::ListMovies {
            page,
            genre: self.genre_name().map(String::from),
        }
    }

    /// Loads the next browse page when one exists.
    pub fn next_page(&mut self) -> Vec<Effect> {
        if !self.pagination_visible() {
            return Vec::new();
        }
        self.pagination.next_page().map_or_else(Vec::new, |page| {
            self.loading = true;
            vec![Effect::Run(self.listing_command(page))]
        })
    }

    /// Loads the previous browse page when one exists.
    pub fn previous_page(&mut self) -> Vec<Effect> {
        if !self.pagination_visible() {
            return Vec::new();
        }
        self.pagination.previous_page().map_or_else(Vec::new, |page| {
            self.loading = true;
            vec![Effect::Run(self.listing_command(page))]
        })
    }

    /// Cycles the genre filter (none, then each genre) and reloads page 1.
    pub fn cycle_genre(&mut self) -> Vec<Effect> {
        if self.genres.is_empty() || self.view != HomeView::Browse {
            return Vec::new();
        }
        self.genre_filter = match self.genre_filter {
            None => Some(0),
            Some(i) if i.saturating_add(1) < self.genres.len() => Some(i.saturating_add(1)),
            Some(_) => None,
        };
        self.loading = true;
        vec![Effect::Run(self.listing_command(1))]
    }

    /// Submits the search box.
    ///
    /// A non-empty query switches to the search view; an empty one restores
    /// the browse listing without any request.
    pub fn submit_search(&mut self) -> Vec<Effect> {
        let query = self.search.submit();
        if query.is_empty() {
            self.clear_search();
            return Vec::new();
        }
        self.view = HomeView::Search;
        self.active_query = Some(query.clone());
        self.loading = true;
        self.error = None;
        vec![Effect::Run(Command::Search { query, page: 1 })]
    }

    /// Drops search results and returns to the browse listing.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.active_query = None;
        self.search_results.clear();
        self.view = HomeView::Browse;
        self.loading = false;
        self.error = None;
        selection::reset(&mut self.table_state, self.browse.len());
    }

    /// Cursor down.
    pub fn move_down(&mut self) {
        let len = self.visible_movies().len();
        selection::move_down(&mut self.table_state, len);
    }

    /// Cursor up.
    pub fn move_up(&mut self) {
        let len = self.visible_movies().len();
        selection::move_up(&mut self.table_state, len);
    }

    /// Opens the selected movie's detail page.
    pub fn open_selected(&self) -> Vec<Effect> {
        let movies = self.visible_movies();
        selection::selected(&self.table_state, movies.len())
            .and_then(|i| movies.get(i))
            .map_or_else(Vec::new, |m| {
                vec![Effect::Navigate(Route::Movie(m.route_id()))]
            })
    }

    /// Opens the featured movie's detail page.
    pub fn open_featured(&self) -> Vec<Effect> {
        self.current_featured().map_or_else(Vec::new, |m| {
            vec![Effect::Navigate(Route::Movie(m.route_id()))]
        })
    }

    /// Advances the slider (timer tick).
    pub fn slider_tick(&mut self) {
        self.slider.advance(self.featured.len());
    }

    /// Applies a finished command.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::Listing { page, result } => {
                self.loading = false;
                match result {
                    Ok(envelope) => {
                        self.browse = envelope.movies();
                        self.pagination = envelope.pagination(page);
                        self.error = None;
                        if self.view == HomeView::Browse {
                            selection::reset(&mut self.table_state, self.browse.len());
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, page, "browse listing failed");
                        self.error = Some(String::from(LOAD_FAILED));
                    }
                }
            }
            Outcome::SearchResults { query, result, .. } => {
                if self.view != HomeView::Search {
                    tracing::debug!(query, "dropping results of a cleared search");
                    return Vec::new();
                }
                self.loading = false;
                match result {
                    Ok(envelope) => {
                        self.search_results = envelope.movies();
                        self.error = None;
                        selection::reset(&mut self.table_state, self.search_results.len());
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, query, "search failed");
                        self.error = Some(String::from(SEARCH_FAILED));
                    }
                }
            }
            Outcome::Featured(result) => match result {
                Ok(envelope) => {
                    self.featured = envelope.movies();
                    self.slider.reset();
                }
                Err(e) => tracing::warn!(error = %e, "featured movies unavailable"),
            },
            Outcome::Genres(result) => match result {
                Ok(genres) => self.genres = genres,
                Err(e) => tracing::warn!(error = %e, "genres unavailable"),
            },
            other => tracing::trace!(?other, "outcome not handled by home page"),
        }
        Vec::new()
    }
}
