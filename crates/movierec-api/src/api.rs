//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use crate::envelope::Envelope;
use crate::types::{
    AuthResponse, AuthTokens, Genre, ListMoviesParams, LoginRequest, Movie, RatingEntry,
    RegisterRequest, User, WatchlistEntry,
};

/// Movie backend API trait.
///
/// One method per endpoint, each a direct pass-through with no caching.
/// Abstracts the backend so page controllers can be tested against an
/// in-memory implementation. Uses `trait_variant::make` to generate a
/// `Send`-bound async trait for spawning on the runtime.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// `POST auth/login/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse>;

    /// `POST auth/register/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn register(&self, form: &RegisterRequest) -> Result<AuthResponse>;

    /// `POST auth/logout/`, blacklisting `refresh_token` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    async fn logout(&self, refresh_token: Option<&str>) -> Result<()>;

    /// `POST auth/refresh/`, exchanging a refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn refresh_token(&self, refresh: &str) -> Result<AuthTokens>;

    /// `GET auth/profile/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn profile(&self) -> Result<User>;

    /// `GET movies/` with filter and page query parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn list_movies(&self, params: &ListMoviesParams) -> Result<Envelope>;

    /// `GET movies/{id}/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie(&self, id: u64) -> Result<Movie>;

    /// `POST movies/search/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search(&self, query: &str, page: u32) -> Result<Envelope>;

    /// `GET movies/genres/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn genres(&self) -> Result<Vec<Genre>>;

    /// `GET movies/{id}/recommendations/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_recommendations(&self, id: u64, page: u32) -> Result<Envelope>;

    /// `GET movies/user/recommendations/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn user_recommendations(&self) -> Result<Envelope>;

    /// `GET movies/popular/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn popular(&self, page: u32) -> Result<Envelope>;

    /// `GET movies/top-rated/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn top_rated(&self, page: u32) -> Result<Envelope>;

    /// `GET movies/watchlist/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn watchlist(&self, page: u32) -> Result<Envelope>;

    /// `POST movies/watchlist/` with the backend primary key of the movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn add_to_watchlist(&self, movie_id: u64) -> Result<WatchlistEntry>;

    /// `DELETE movies/watchlist/{entry_id}/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    async fn remove_from_watchlist(&self, entry_id: u64) -> Result<()>;

    /// `POST movies/ratings/`; the backend creates or updates the rating.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn rate_movie(&self, movie_id: u64, rating: u8) -> Result<RatingEntry>;

    /// `GET movies/ratings/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn ratings(&self, page: u32) -> Result<Envelope>;

    /// `DELETE movies/ratings/{rating_id}/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails.
    async fn delete_rating(&self, rating_id: u64) -> Result<()>;
}
