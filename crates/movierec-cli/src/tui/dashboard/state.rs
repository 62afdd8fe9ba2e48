//! Dashboard state: recommendations, watchlist and search tabs.

use movierec_api::{Movie, Pagination, Route, WatchlistEntry};
use ratatui::widgets::TableState;

use crate::tui::command::{Command, Effect, Outcome};
use crate::tui::search::SearchBox;
use crate::tui::selection;

/// Shown when recommendations cannot be loaded.
pub const RECOMMENDATIONS_FAILED: &str = "Failed to load recommendations.";

/// Shown when the watchlist cannot be loaded.
pub const WATCHLIST_FAILED: &str = "Failed to load watchlist.";

/// Shown when removing a watchlist entry fails.
pub const REMOVE_FAILED: &str = "Failed to update watchlist.";

/// Shown when a dashboard search fails.
pub const SEARCH_FAILED: &str = "Failed to search movies. Please try again.";

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Personalized recommendations.
    Recommendations,
    /// The user's watchlist.
    Watchlist,
    /// Title search.
    Search,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Recommendations, Self::Watchlist, Self::Search];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommendations => "Recommendations",
            Self::Watchlist => "Watchlist",
            Self::Search => "Search",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Recommendations => Self::Watchlist,
            Self::Watchlist => Self::Search,
            Self::Search => Self::Recommendations,
        }
    }

    const fn previous(self) -> Self {
        match self {
            Self::Recommendations => Self::Search,
            Self::Watchlist => Self::Recommendations,
            Self::Search => Self::Watchlist,
        }
    }
}

/// State for the dashboard page.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct DashboardState {
    /// Active tab.
    pub tab: Tab,
    /// Personalized recommendations.
    pub recommendations: Vec<Movie>,
    /// Message sent with the recommendations (e.g. when nothing is rated yet).
    pub recommendations_message: Option<String>,
    /// Watchlist entries on the current page.
    pub watchlist: Vec<WatchlistEntry>,
    /// Watchlist pagination.
    pub watchlist_pagination: Pagination,
    /// Search box of the Search tab.
    pub search: SearchBox,
    /// Query of the shown search results.
    pub active_query: Option<String>,
    /// Search results.
    pub search_results: Vec<Movie>,
    /// Recommendations request outstanding.
    pub loading_recommendations: bool,
    /// Watchlist request outstanding.
    pub loading_watchlist: bool,
    /// Search request outstanding.
    pub searching: bool,
    /// Watchlist entry whose removal is in flight.
    pub removing: Option<u64>,
    /// Page-level error message.
    pub error: Option<String>,
    /// Table selection of the active tab.
    pub table_state: TableState,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    /// Creates an empty state on the Recommendations tab.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tab: Tab::Recommendations,
            recommendations: Vec::new(),
            recommendations_message: None,
            watchlist: Vec::new(),
            watchlist_pagination: Pagination::default(),
            search: SearchBox::default(),
            active_query: None,
            search_results: Vec::new(),
            loading_recommendations: false,
            loading_watchlist: false,
            searching: false,
            removing: None,
            error: None,
            table_state: TableState::default(),
        }
    }

    /// Loads recommendations and the watchlist, or redirects to login.
    pub fn mount(&mut self, authenticated: bool) -> Vec<Effect> {
        if !authenticated {
            return vec![Effect::Navigate(Route::Login)];
        }
        self.loading_recommendations = true;
        self.loading_watchlist = true;
        vec![
            Effect::Run(Command::UserRecommendations),
            Effect::Run(Command::Watchlist { page: 1 }),
        ]
    }

    /// Whether anything on the active tab is loading.
    #[must_use]
    pub const fn loading(&self) -> bool {
        match self.tab {
            Tab::Recommendations => self.loading_recommendations,
            Tab::Watchlist => self.loading_watchlist || self.removing.is_some(),
            Tab::Search => self.searching,
        }
    }

    /// Movies listed on the active tab.
    #[must_use]
    pub fn visible_movies(&self) -> Vec<Movie> {
        match self.tab {
            Tab::Recommendations => self.recommendations.clone(),
            Tab::Watchlist => self.watchlist.iter().map(|e| e.movie.clone()).collect(),
            Tab::Search => self.search_results.clone(),
        }
    }

    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Recommendations => self.recommendations.len(),
            Tab::Watchlist => self.watchlist.len(),
            Tab::Search => self.search_results.len(),
        }
    }

    /// Switches to `tab`. Leaving the Search tab drops its query and results.
    pub fn select_tab(&mut self, tab: Tab) {
        if tab == self.tab {
            return;
        }
        if self.tab == Tab::Search {
            self.search.clear();
            self.active_query = None;
            self.search_results.clear();
            self.searching = false;
        }
        self.tab = tab;
        self.error = None;
        let len = self.visible_len();
        selection::reset(&mut self.table_state, len);
    }

    /// Next tab, wrapping.
    pub fn next_tab(&mut self) {
        self.select_tab(self.tab.next());
    }

    /// Previous tab, wrapping.
    pub fn previous_tab(&mut self) {
        self.select_tab(self.tab.previous());
    }

    /// Jumps to the Search tab and focuses the search box.
    pub fn begin_search(&mut self) {
        self.select_tab(Tab::Search);
        self.search.begin();
    }

    /// Submits the search box. An empty query clears results without a request.
    pub fn submit_search(&mut self) -> Vec<Effect> {
        let query = self.search.submit();
        if query.is_empty() {
            self.active_query = None;
            self.search_results.clear();
            self.searching = false;
            selection::reset(&mut self.table_state, 0);
            return Vec::new();
        }
        self.active_query = Some(query.clone());
        self.searching = true;
        self.error = None;
        vec![Effect::Run(Command::Search { query, page: 1 })]
    }

    /// Cursor down.
    pub fn move_down(&mut self) {
        let len = self.visible_len();
        selection::move_down(&mut self.table_state, len);
    }

    /// Cursor up.
    pub fn move_up(&mut self) {
        let len = self.visible_len();
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

    /// Removes the selected watchlist entry. Ignored off the Watchlist tab
    /// and while another removal is in flight.
    pub fn remove_selected(&mut self) -> Vec<Effect> {
        if self.tab != Tab::Watchlist || self.removing.is_some() {
            return Vec::new();
        }
        let Some(entry_id) = selection::selected(&self.table_state, self.watchlist.len())
            .and_then(|i| self.watchlist.get(i))
            .map(|e| e.id)
        else {
            return Vec::new();
        };
        self.removing = Some(entry_id);
        vec![Effect::Run(Command::RemoveFromWatchlist { entry_id })]
    }

    /// Loads the next watchlist page.
    pub fn next_watchlist_page(&mut self) -> Vec<Effect> {
        if self.tab != Tab::Watchlist || self.loading_watchlist {
            return Vec::new();
        }
        self.watchlist_pagination
            .next_page()
            .map_or_else(Vec::new, |page| {
                self.loading_watchlist = true;
                vec![Effect::Run(Command::Watchlist { page })]
            })
    }

    /// Loads the previous watchlist page.
    pub fn previous_watchlist_page(&mut self) -> Vec<Effect> {
        if self.tab != Tab::Watchlist || self.loading_watchlist {
            return Vec::new();
        }
        self.watchlist_pagination
            .previous_page()
            .map_or_else(Vec::new, |page| {
                self.loading_watchlist = true;
                vec![Effect::Run(Command::Watchlist { page })]
            })
    }

    fn reselect(&mut self, tab: Tab) {
        if self.tab == tab {
            let len = self.visible_len();
            selection::reset(&mut self.table_state, len);
        }
    }

    /// Applies a finished command.
    pub fn apply(&mut self, outcome: Outcome) -> Vec<Effect> {
        match outcome {
            Outcome::UserRecommendations(result) => {
                self.loading_recommendations = false;
                match result {
                    Ok(envelope) => {
                        self.recommendations = envelope.movies();
                        self.recommendations_message = envelope.message().map(String::from);
                        self.reselect(Tab::Recommendations);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "recommendations failed");
                        self.error = Some(String::from(RECOMMENDATIONS_FAILED));
                    }
                }
            }
            Outcome::Watchlist { page, result } => {
                self.loading_watchlist = false;
                match result {
                    Ok(envelope) => {
                        self.watchlist = envelope.entries();
                        self.watchlist_pagination = envelope.pagination(page);
                        self.reselect(Tab::Watchlist);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, page, "watchlist failed");
                        self.error = Some(String::from(WATCHLIST_FAILED));
                    }
                }
            }
            Outcome::SearchResults { query, result, .. } => {
                if self.tab != Tab::Search || self.active_query.as_deref() != Some(&query) {
                    tracing::debug!(query, "dropping stale dashboard search results");
                    return Vec::new();
                }
                self.searching = false;
                match result {
                    Ok(envelope) => {
                        self.search_results = envelope.movies();
                        self.reselect(Tab::Search);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, query, "dashboard search failed");
                        self.error = Some(String::from(SEARCH_FAILED));
                    }
                }
            }
            Outcome::WatchlistRemoved { entry_id, result } => {
                self.removing = None;
                match result {
                    Ok(()) => {
                        self.watchlist.retain(|e| e.id != entry_id);
                        let len = self.watchlist.len();
                        if self.tab == Tab::Watchlist
                            && selection::selected(&self.table_state, len).is_none()
                        {
                            selection::reset(&mut self.table_state, len);
                            if len > 0 {
                                self.table_state.select(Some(len.saturating_sub(1)));
                            }
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, entry_id, "watchlist removal failed");
                        self.error = Some(String::from(REMOVE_FAILED));
                    }
                }
            }
            other => tracing::trace!(?other, "outcome not handled by dashboard"),
        }
        Vec::new()
    }
}
