//! Endpoint facades for [`ApiClient`] and the session-aware auth helpers.

use anyhow::{Context, Result};
use serde_json::{Value, json};
use tracing::instrument;

use crate::api::MovieApi;
use crate::client::ApiClient;
use crate::envelope::Envelope;
use crate::session::{Session, SessionContext};
use crate::types::{
    AuthResponse, AuthTokens, Genre, ListMoviesParams, LoginRequest, Movie, ProfileResponse,
    RatingEntry, RegisterRequest, User, WatchlistEntry,
};

/// Upper bound on listing pages walked when deriving a movie's status.
const MAX_STATUS_PAGES: u32 = 10;

fn page_query(page: u32) -> [(&'static str, String); 1] {
    [("page", page.to_string())]
}

impl MovieApi for ApiClient {
    #[instrument(skip_all)]
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let payload = serde_json::to_value(credentials).context("failed to encode login")?;
        self.post("auth/login/", &payload).await
    }

    #[instrument(skip_all)]
    async fn register(&self, form: &RegisterRequest) -> Result<AuthResponse> {
        let payload = serde_json::to_value(form).context("failed to encode registration")?;
        self.post("auth/register/", &payload).await
    }

    #[instrument(skip_all)]
    async fn logout(&self, refresh_token: Option<&str>) -> Result<()> {
        let _: Value = self
            .post("auth/logout/", &json!({ "refresh_token": refresh_token }))
            .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn refresh_token(&self, refresh: &str) -> Result<AuthTokens> {
        self.post("auth/refresh/", &json!({ "refresh_token": refresh }))
            .await
    }

    #[instrument(skip_all)]
    async fn profile(&self) -> Result<User> {
        let response: ProfileResponse = self.get("auth/profile/", &[]).await?;
        Ok(response.into_user())
    }

    #[instrument(skip_all)]
    async fn list_movies(&self, params: &ListMoviesParams) -> Result<Envelope> {
        self.get("movies/", &params.to_query()).await
    }

    #[instrument(skip_all)]
    async fn movie(&self, id: u64) -> Result<Movie> {
        let path = format!("movies/{id}/");
        self.get(&path, &[]).await
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &str, page: u32) -> Result<Envelope> {
        self.post("movies/search/", &json!({ "query": query, "page": page }))
            .await
    }

    #[instrument(skip_all)]
    async fn genres(&self) -> Result<Vec<Genre>> {
        let envelope: Envelope = self.get("movies/genres/", &[]).await?;
        Ok(envelope.entries())
    }

    #[instrument(skip_all)]
    async fn movie_recommendations(&self, id: u64, page: u32) -> Result<Envelope> {
        let path = format!("movies/{id}/recommendations/");
        self.get(&path, &page_query(page)).await
    }

    #[instrument(skip_all)]
    async fn user_recommendations(&self) -> Result<Envelope> {
        self.get("movies/user/recommendations/", &[]).await
    }

    #[instrument(skip_all)]
    async fn popular(&self, page: u32) -> Result<Envelope> {
        self.get("movies/popular/", &page_query(page)).await
    }

    #[instrument(skip_all)]
    async fn top_rated(&self, page: u32) -> Result<Envelope> {
        self.get("movies/top-rated/", &page_query(page)).await
    }

    #[instrument(skip_all)]
    async fn watchlist(&self, page: u32) -> Result<Envelope> {
        self.get("movies/watchlist/", &page_query(page)).await
    }

    #[instrument(skip_all)]
    async fn add_to_watchlist(&self, movie_id: u64) -> Result<WatchlistEntry> {
        self.post("movies/watchlist/", &json!({ "movie_id": movie_id }))
            .await
    }

    #[instrument(skip_all)]
    async fn remove_from_watchlist(&self, entry_id: u64) -> Result<()> {
        let path = format!("movies/watchlist/{entry_id}/");
        self.delete(&path).await
    }

    #[instrument(skip_all)]
    async fn rate_movie(&self, movie_id: u64, rating: u8) -> Result<RatingEntry> {
        self.post(
            "movies/ratings/",
            &json!({ "movie_id": movie_id, "rating": rating }),
        )
        .await
    }

    #[instrument(skip_all)]
    async fn ratings(&self, page: u32) -> Result<Envelope> {
        self.get("movies/ratings/", &page_query(page)).await
    }

    #[instrument(skip_all)]
    async fn delete_rating(&self, rating_id: u64) -> Result<()> {
        let path = format!("movies/ratings/{rating_id}/");
        self.delete(&path).await
    }
}

// --- Session-aware helpers ---

/// Builds the session persisted after a successful login or registration.
fn session_from(response: &AuthResponse) -> Result<Session> {
    let token = response
        .access_token()
        .context("auth response carried no access token")?;
    let session = Session::new(token, response.user.clone());
    Ok(match response.refresh_token() {
        Some(refresh) => session.with_refresh_token(refresh),
        None => session,
    })
}

/// Logs in and persists the returned token and user together.
///
/// # Errors
///
/// Returns an error if the request fails, the response has no access
/// token, or the session cannot be saved.
pub async fn login_and_persist<A: MovieApi + Sync>(
    api: &A,
    session: &SessionContext,
    credentials: &LoginRequest,
) -> Result<AuthResponse> {
    let response = api.login(credentials).await?;
    session.establish(session_from(&response)?)?;
    tracing::debug!(username = %response.user.username, "session established");
    Ok(response)
}

/// Registers and persists the returned token and user together.
///
/// # Errors
///
/// Returns an error if the request fails, the response has no access
/// token, or the session cannot be saved.
pub async fn register_and_persist<A: MovieApi + Sync>(
    api: &A,
    session: &SessionContext,
    form: &RegisterRequest,
) -> Result<AuthResponse> {
    let response = api.register(form).await?;
    session.establish(session_from(&response)?)?;
    tracing::debug!(username = %response.user.username, "session established");
    Ok(response)
}

/// Notifies the backend and clears the session.
///
/// The session is cleared even when the backend call fails; that failure
/// is only logged.
///
/// # Errors
///
/// Returns an error if the persisted session cannot be removed.
pub async fn logout_and_clear<A: MovieApi + Sync>(api: &A, session: &SessionContext) -> Result<()> {
    let refresh = session.refresh_token();
    if let Err(e) = api.logout(refresh.as_deref()).await {
        tracing::warn!(error = %e, "backend logout failed; clearing local session anyway");
    }
    session.clear()
}

/// Exchanges the stored refresh token for a new access token and persists it.
///
/// # Errors
///
/// Returns an error if there is no session or refresh token, the request
/// fails, or the session cannot be saved.
pub async fn refresh_and_persist<A: MovieApi + Sync>(
    api: &A,
    session: &SessionContext,
) -> Result<()> {
    let current = session.session().context("not logged in")?;
    let refresh = current
        .refresh_token
        .clone()
        .context("session has no refresh token")?;
    let tokens = api.refresh_token(&refresh).await?;
    let renewed = Session::new(tokens.access, current.user)
        .with_refresh_token(tokens.refresh.unwrap_or(refresh));
    session.establish(renewed)
}

/// The signed-in user's relation to one movie.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovieStatus {
    /// Watchlist entry ID when the movie is on the watchlist.
    pub watchlist_entry: Option<u64>,
    /// The user's rating, if any.
    pub rating: Option<f64>,
}

impl MovieStatus {
    /// Whether the movie is on the watchlist.
    #[must_use]
    pub const fn in_watchlist(&self) -> bool {
        self.watchlist_entry.is_some()
    }
}

/// Derives watchlist and rating status for `movie` from the user's listings.
///
/// Entries are matched on the backend primary key (`Movie::id`).
///
/// # Errors
///
/// Returns an error if either listing request fails.
#[instrument(skip_all, fields(movie_id = movie.id))]
pub async fn movie_status<A: MovieApi + Sync>(api: &A, movie: &Movie) -> Result<MovieStatus> {
    let (watchlist, ratings) =
        futures::future::try_join(all_watchlist_entries(api), all_ratings(api)).await?;

    Ok(MovieStatus {
        watchlist_entry: watchlist
            .iter()
            .find(|entry| entry.movie.id == movie.id)
            .map(|entry| entry.id),
        rating: ratings
            .iter()
            .find(|entry| entry.movie.id == movie.id)
            .map(|entry| entry.rating),
    })
}

async fn all_watchlist_entries<A: MovieApi + Sync>(api: &A) -> Result<Vec<WatchlistEntry>> {
    let mut entries = Vec::new();
    let mut page = 1;
    loop {
        let envelope = api.watchlist(page).await?;
        entries.extend(envelope.entries::<WatchlistEntry>());
        match envelope.pagination(page).next_page() {
            Some(next) if next <= MAX_STATUS_PAGES => page = next,
            _ => return Ok(entries),
        }
    }
}

async fn all_ratings<A: MovieApi + Sync>(api: &A) -> Result<Vec<RatingEntry>> {
    let mut entries = Vec::new();
    let mut page = 1;
    loop {
        let envelope = api.ratings(page).await?;
        entries.extend(envelope.entries::<RatingEntry>());
        match envelope.pagination(page).next_page() {
            Some(next) if next <= MAX_STATUS_PAGES => page = next,
            _ => return Ok(entries),
        }
    }
}
