//! Commands issued by page controllers and the outcomes fed back to them.
//!
//! Controllers never call the backend themselves: they return [`Effect`]s,
//! and the event loop spawns each [`Command`] on the runtime. The result
//! comes back as an [`Outcome`] through the app event channel. Requests
//! are never cancelled, so the last outcome to arrive wins.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;

use movierec_api::{
    AuthResponse, Envelope, Genre, ListMoviesParams, LoginRequest, Movie, MovieApi, MovieStatus,
    RatingEntry, RegisterRequest, Route, SessionContext, WatchlistEntry, login_and_persist,
    logout_and_clear, movie_status, register_and_persist,
};

/// A backend call requested by a controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Browse listing page, optionally filtered by genre name.
    ListMovies {
        /// Requested page.
        page: u32,
        /// Genre filter.
        genre: Option<String>,
    },
    /// Popular movies for the featured slider.
    Featured,
    /// Genre list for the browse filter.
    Genres,
    /// Search by title.
    Search {
        /// Normalized, non-empty query.
        query: String,
        /// Requested page.
        page: u32,
    },
    /// Personalized recommendations.
    UserRecommendations,
    /// Watchlist page.
    Watchlist {
        /// Requested page.
        page: u32,
    },
    /// One movie by route ID.
    MovieDetail {
        /// Route ID (TMDB ID when known).
        id: u64,
    },
    /// Movies similar to one movie.
    MovieRecommendations {
        /// Route ID.
        id: u64,
    },
    /// Watchlist/rating status of a loaded movie.
    MovieStatus {
        /// The loaded movie.
        movie: Box<Movie>,
    },
    /// Add a movie (backend primary key) to the watchlist.
    AddToWatchlist {
        /// Backend primary key.
        movie_id: u64,
    },
    /// Remove a watchlist entry.
    RemoveFromWatchlist {
        /// Watchlist entry ID.
        entry_id: u64,
    },
    /// Rate a movie (backend primary key) 1-10.
    RateMovie {
        /// Backend primary key.
        movie_id: u64,
        /// Rating value.
        rating: u8,
    },
    /// Log in and persist the session.
    Login(LoginRequest),
    /// Register and persist the session.
    Register(RegisterRequest),
    /// Log out and clear the session.
    Logout,
}

impl Command {
    /// Short name for logs; never includes credentials.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ListMovies { .. } => "list_movies",
            Self::Featured => "featured",
            Self::Genres => "genres",
            Self::Search { .. } => "search",
            Self::UserRecommendations => "user_recommendations",
            Self::Watchlist { .. } => "watchlist",
            Self::MovieDetail { .. } => "movie_detail",
            Self::MovieRecommendations { .. } => "movie_recommendations",
            Self::MovieStatus { .. } => "movie_status",
            Self::AddToWatchlist { .. } => "add_to_watchlist",
            Self::RemoveFromWatchlist { .. } => "remove_from_watchlist",
            Self::RateMovie { .. } => "rate_movie",
            Self::Login(_) => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
        }
    }
}

/// What a controller asks the shell to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Spawn a backend call.
    Run(Command),
    /// Switch to another route.
    Navigate(Route),
    /// Open a URL in the system browser.
    OpenUrl(String),
}

/// The result of one [`Command`].
#[derive(Debug)]
pub enum Outcome {
    /// Reply to [`Command::ListMovies`].
    Listing {
        /// Requested page.
        page: u32,
        /// Response.
        result: Result<Envelope>,
    },
    /// Reply to [`Command::Featured`].
    Featured(Result<Envelope>),
    /// Reply to [`Command::Genres`].
    Genres(Result<Vec<Genre>>),
    /// Reply to [`Command::Search`].
    SearchResults {
        /// The query that was sent.
        query: String,
        /// Requested page.
        page: u32,
        /// Response.
        result: Result<Envelope>,
    },
    /// Reply to [`Command::UserRecommendations`].
    UserRecommendations(Result<Envelope>),
    /// Reply to [`Command::Watchlist`].
    Watchlist {
        /// Requested page.
        page: u32,
        /// Response.
        result: Result<Envelope>,
    },
    /// Reply to [`Command::MovieDetail`].
    MovieDetail {
        /// Route ID that was requested.
        id: u64,
        /// Response.
        result: Result<Movie>,
    },
    /// Reply to [`Command::MovieRecommendations`].
    MovieRecommendations {
        /// Route ID that was requested.
        id: u64,
        /// Response.
        result: Result<Envelope>,
    },
    /// Reply to [`Command::MovieStatus`].
    MovieStatus {
        /// Backend primary key of the movie.
        movie_id: u64,
        /// Derived status.
        result: Result<MovieStatus>,
    },
    /// Reply to [`Command::AddToWatchlist`].
    WatchlistAdded {
        /// Backend primary key of the movie.
        movie_id: u64,
        /// Created entry.
        result: Result<WatchlistEntry>,
    },
    /// Reply to [`Command::RemoveFromWatchlist`].
    WatchlistRemoved {
        /// Removed entry ID.
        entry_id: u64,
        /// Response.
        result: Result<()>,
    },
    /// Reply to [`Command::RateMovie`].
    Rated {
        /// Backend primary key of the movie.
        movie_id: u64,
        /// Stored rating.
        result: Result<RatingEntry>,
    },
    /// Reply to [`Command::Login`].
    LoggedIn(Result<AuthResponse>),
    /// Reply to [`Command::Register`].
    Registered(Result<AuthResponse>),
    /// Reply to [`Command::Logout`].
    LoggedOut(Result<()>),
}

/// Events delivered to the event loop from background tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// A spawned command finished.
    Outcome(Box<Outcome>),
    /// The featured slider should advance.
    SliderTick,
}

/// Runs one command to completion.
pub async fn execute<A: MovieApi + Sync>(
    api: &A,
    session: &SessionContext,
    command: Command,
) -> Outcome {
    match command {
        Command::ListMovies { page, genre } => {
            let mut params = ListMoviesParams::new().page(page);
            if let Some(genre) = genre {
                params = params.genre(genre);
            }
            Outcome::Listing {
                page,
                result: api.list_movies(&params).await,
            }
        }
        Command::Featured => Outcome::Featured(api.popular(1).await),
        Command::Genres => Outcome::Genres(api.genres().await),
        Command::Search { query, page } => {
            let result = api.search(&query, page).await;
            Outcome::SearchResults {
                query,
                page,
                result,
            }
        }
        Command::UserRecommendations => {
            Outcome::UserRecommendations(api.user_recommendations().await)
        }
        Command::Watchlist { page } => Outcome::Watchlist {
            page,
            result: api.watchlist(page).await,
        },
        Command::MovieDetail { id } => Outcome::MovieDetail {
            id,
            result: api.movie(id).await,
        },
        Command::MovieRecommendations { id } => Outcome::MovieRecommendations {
            id,
            result: api.movie_recommendations(id, 1).await,
        },
        Command::MovieStatus { movie } => Outcome::MovieStatus {
            movie_id: movie.id,
            result: movie_status(api, &movie).await,
        },
        Command::AddToWatchlist { movie_id } => Outcome::WatchlistAdded {
            movie_id,
            result: api.add_to_watchlist(movie_id).await,
        },
        Command::RemoveFromWatchlist { entry_id } => Outcome::WatchlistRemoved {
            entry_id,
            result: api.remove_from_watchlist(entry_id).await,
        },
        Command::RateMovie { movie_id, rating } => Outcome::Rated {
            movie_id,
            result: api.rate_movie(movie_id, rating).await,
        },
        Command::Login(credentials) => {
            Outcome::LoggedIn(login_and_persist(api, session, &credentials).await)
        }
        Command::Register(form) => {
            Outcome::Registered(register_and_persist(api, session, &form).await)
        }
        Command::Logout => Outcome::LoggedOut(logout_and_clear(api, session).await),
    }
}

/// Spawns `command` and posts its outcome to `events`.
pub fn spawn<A>(
    api: &Arc<A>,
    session: &SessionContext,
    command: Command,
    events: &UnboundedSender<AppEvent>,
) where
    A: MovieApi + Sync + 'static,
{
    tracing::debug!(command = command.name(), "spawning command");
    let api = Arc::clone(api);
    let session = session.clone();
    let events = events.clone();
    tokio::spawn(async move {
        let outcome = execute(api.as_ref(), &session, command).await;
        if events.send(AppEvent::Outcome(Box::new(outcome))).is_err() {
            tracing::debug!("event loop closed before outcome was delivered");
        }
    });
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Mutex;

    use anyhow::bail;
    use movierec_api::{AuthTokens, User};
    use serde_json::json;
    use tokio::sync::mpsc;

    use super::*;

    /// In-memory backend that records every call.
    #[derive(Debug, Default)]
    struct FakeApi {
        calls: Mutex<Vec<String>>,
        fail_logout: bool,
    }

    impl FakeApi {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn movie_json(id: u64) -> serde_json::Value {
            json!({"id": id, "title": format!("Movie {id}")})
        }

        fn auth(username: &str) -> AuthResponse {
            serde_json::from_value(json!({
                "user": {"id": 1, "username": username},
                "tokens": {"access": "access-token", "refresh": "refresh-token"}
            }))
            .unwrap()
        }
    }

    impl MovieApi for FakeApi {
        async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
            self.record(format!("login {}", credentials.username));
            Ok(Self::auth(&credentials.username))
        }

        async fn register(&self, form: &RegisterRequest) -> Result<AuthResponse> {
            self.record(format!("register {}", form.username));
            Ok(Self::auth(&form.username))
        }

        async fn logout(&self, refresh_token: Option<&str>) -> Result<()> {
            self.record(format!("logout {refresh_token:?}"));
            if self.fail_logout {
                bail!("backend unavailable");
            }
            Ok(())
        }

        async fn refresh_token(&self, _refresh: &str) -> Result<AuthTokens> {
            bail!("not used")
        }

        async fn profile(&self) -> Result<User> {
            Ok(User::named(1, "neo"))
        }

        async fn list_movies(&self, params: &ListMoviesParams) -> Result<Envelope> {
            self.record(format!("list_movies {:?}", params.to_query()));
            Ok(Envelope::from_value(json!({
                "count": 1,
                "results": [Self::movie_json(1)]
            })))
        }

        async fn movie(&self, id: u64) -> Result<Movie> {
            self.record(format!("movie {id}"));
            Ok(serde_json::from_value(Self::movie_json(id))?)
        }

        async fn search(&self, query: &str, page: u32) -> Result<Envelope> {
            self.record(format!("search {query} {page}"));
            Ok(Envelope::from_value(json!([Self::movie_json(2)])))
        }

        async fn genres(&self) -> Result<Vec<Genre>> {
            Ok(Vec::new())
        }

        async fn movie_recommendations(&self, id: u64, _page: u32) -> Result<Envelope> {
            self.record(format!("movie_recommendations {id}"));
            Ok(Envelope::Empty)
        }

        async fn user_recommendations(&self) -> Result<Envelope> {
            Ok(Envelope::Empty)
        }

        async fn popular(&self, page: u32) -> Result<Envelope> {
            self.record(format!("popular {page}"));
            Ok(Envelope::Empty)
        }

        async fn top_rated(&self, _page: u32) -> Result<Envelope> {
            Ok(Envelope::Empty)
        }

        async fn watchlist(&self, page: u32) -> Result<Envelope> {
            self.record(format!("watchlist {page}"));
            Ok(Envelope::from_value(json!({
                "results": [{"id": 31, "movie": Self::movie_json(12)}]
            })))
        }

        async fn add_to_watchlist(&self, movie_id: u64) -> Result<WatchlistEntry> {
            self.record(format!("add_to_watchlist {movie_id}"));
            Ok(serde_json::from_value(json!({
                "id": 99,
                "movie": Self::movie_json(movie_id)
            }))?)
        }

        async fn remove_from_watchlist(&self, entry_id: u64) -> Result<()> {
            self.record(format!("remove_from_watchlist {entry_id}"));
            Ok(())
        }

        async fn rate_movie(&self, movie_id: u64, rating: u8) -> Result<RatingEntry> {
            self.record(format!("rate_movie {movie_id} {rating}"));
            Ok(serde_json::from_value(json!({
                "id": 5,
                "movie": Self::movie_json(movie_id),
                "rating": rating
            }))?)
        }

        async fn ratings(&self, page: u32) -> Result<Envelope> {
            self.record(format!("ratings {page}"));
            Ok(Envelope::from_value(json!({"results": []})))
        }

        async fn delete_rating(&self, rating_id: u64) -> Result<()> {
            self.record(format!("delete_rating {rating_id}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_list_movies_passes_page_and_genre() {
        // Arrange
        let api = FakeApi::default();
        let session = SessionContext::in_memory();

        // Act
        let outcome = execute(
            &api,
            &session,
            Command::ListMovies {
                page: 2,
                genre: Some(String::from("Action")),
            },
        )
        .await;

        // Assert
        let Outcome::Listing { page, result } = outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(page, 2);
        assert_eq!(result.unwrap().movies().len(), 1);
        assert_eq!(
            api.calls(),
            vec![r#"list_movies [("page", "2"), ("genre", "Action")]"#]
        );
    }

    #[tokio::test]
    async fn test_login_establishes_session() {
        // Arrange
        let api = FakeApi::default();
        let session = SessionContext::in_memory();

        // Act
        let outcome = execute(
            &api,
            &session,
            Command::Login(LoginRequest {
                username: String::from("neo"),
                password: String::from("redpill"),
            }),
        )
        .await;

        // Assert
        assert!(matches!(outcome, Outcome::LoggedIn(Ok(_))));
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("access-token"));
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_backend_fails() {
        // Arrange
        let api = FakeApi {
            fail_logout: true,
            ..FakeApi::default()
        };
        let session = SessionContext::in_memory();
        execute(
            &api,
            &session,
            Command::Register(RegisterRequest {
                username: String::from("trinity"),
                email: String::from("t@example.com"),
                password: String::from("pw"),
                first_name: String::new(),
                last_name: String::new(),
            }),
        )
        .await;

        // Act
        let outcome = execute(&api, &session, Command::Logout).await;

        // Assert
        assert!(matches!(outcome, Outcome::LoggedOut(Ok(()))));
        assert!(!session.is_authenticated());
        assert!(api.calls().contains(&String::from(r#"logout Some("refresh-token")"#)));
    }

    #[tokio::test]
    async fn test_movie_status_uses_listings() {
        // Arrange
        let api = FakeApi::default();
        let session = SessionContext::in_memory();
        let movie: Movie = serde_json::from_value(FakeApi::movie_json(12)).unwrap();

        // Act
        let outcome = execute(
            &api,
            &session,
            Command::MovieStatus {
                movie: Box::new(movie),
            },
        )
        .await;

        // Assert
        let Outcome::MovieStatus { movie_id, result } = outcome else {
            panic!("unexpected outcome");
        };
        assert_eq!(movie_id, 12);
        let status = result.unwrap();
        assert_eq!(status.watchlist_entry, Some(31));
        assert_eq!(status.rating, None);
    }

    #[tokio::test]
    async fn test_spawn_delivers_outcome() {
        // Arrange
        let api = Arc::new(FakeApi::default());
        let session = SessionContext::in_memory();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Act
        spawn(
            &api,
            &session,
            Command::RateMovie {
                movie_id: 12,
                rating: 8,
            },
            &tx,
        );
        let event = rx.recv().await.unwrap();

        // Assert
        let AppEvent::Outcome(outcome) = event else {
            panic!("unexpected event");
        };
        assert!(matches!(
            *outcome,
            Outcome::Rated { movie_id: 12, result: Ok(_) }
        ));
        assert_eq!(api.calls(), vec!["rate_movie 12 8"]);
    }

    #[test]
    fn test_name_never_contains_credentials() {
        // Arrange
        let command = Command::Login(LoginRequest {
            username: String::from("neo"),
            password: String::from("redpill"),
        });

        // Act & Assert
        assert_eq!(command.name(), "login");
    }
}
