//! API client library for movierec.
//!
//! Wraps the movie-recommendation REST backend: bearer-token session
//! handling, one facade function per endpoint, and normalization of the
//! differently shaped list responses into plain movie sequences.

mod api;
mod client;
mod envelope;
mod error;
mod facade;
mod pagination;
mod route;
/// Session persistence and the explicitly passed session context.
pub mod session;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
pub use client::{ApiClient, ApiClientBuilder, DEFAULT_BASE_URL, normalize_base_url};
pub use envelope::{Envelope, NESTED_KEYS, PageEnvelope};
pub use error::{ApiError, ErrorKind};
pub use facade::{
    MovieStatus, login_and_persist, logout_and_clear, movie_status, refresh_and_persist,
    register_and_persist,
};
pub use pagination::{PAGE_SIZE, Pagination};
pub use route::{Navigator, NoopNavigator, RecordingNavigator, Route};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionContext, SessionStore};
pub use types::{
    AuthResponse, AuthTokens, Genre, ListMoviesParams, LoginRequest, Movie, ProfileResponse,
    RatingEntry, RegisterRequest, User, WatchlistEntry,
};
