//! Backend record types and request payloads.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

// --- Movie ---

/// A movie record as served by the backend.
///
/// Only `id` is required; everything else falls back to `None`/empty so a
/// partially populated record from any endpoint still decodes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Movie {
    /// Backend primary key (used by watchlist and rating payloads).
    pub id: u64,
    /// TMDB ID (used by detail and recommendation paths).
    #[serde(default)]
    pub tmdb_id: Option<u64>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Original title.
    #[serde(default)]
    pub original_title: Option<String>,
    /// Plot overview.
    #[serde(default, alias = "description")]
    pub overview: Option<String>,
    /// Poster path relative to the image CDN.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Absolute poster URL.
    #[serde(default)]
    pub poster_url: Option<String>,
    /// Absolute backdrop URL.
    #[serde(default)]
    pub backdrop_url: Option<String>,
    /// Release date (`YYYY-MM-DD`).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Vote average (0-10).
    #[serde(default, deserialize_with = "flexible_f64")]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default)]
    pub vote_count: Option<u64>,
    /// Popularity score.
    #[serde(default, deserialize_with = "flexible_f64")]
    pub popularity: Option<f64>,
    /// Original language (ISO 639-1).
    #[serde(default)]
    pub original_language: Option<String>,
    /// Genre labels.
    #[serde(default, deserialize_with = "genre_labels")]
    pub genres: Vec<String>,
}

impl Movie {
    /// Id used in `/movie/{id}` routes and `movies/{id}/` paths.
    #[must_use]
    pub fn route_id(&self) -> u64 {
        self.tmdb_id.unwrap_or(self.id)
    }

    /// Release year, if the date parses.
    ///
    /// Accepts `YYYY-MM-DD` and RFC 3339 timestamps.
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let raw = self.release_date.as_deref()?.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.year());
        }
        DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.year())
    }

    /// Non-empty poster URL.
    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        self.poster_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Genre entry from `movies/genres/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Genre {
    /// Backend primary key.
    pub id: u64,
    /// TMDB genre ID.
    #[serde(default)]
    pub tmdb_id: Option<u64>,
    /// Genre name.
    pub name: String,
}

/// A genre reference inside a movie: either a label or a full object.
#[derive(Deserialize)]
#[serde(untagged)]
enum GenreRef {
    Label(String),
    Object { name: String },
}

/// Decodes `genres` as labels regardless of shape; `null` is empty.
fn genre_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs: Option<Vec<GenreRef>> = Option::deserialize(deserializer)?;
    Ok(refs
        .unwrap_or_default()
        .into_iter()
        .map(|r| match r {
            GenreRef::Label(name) | GenreRef::Object { name } => name,
        })
        .collect())
}

/// A number that may arrive as a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Decodes numbers, numeric strings and `null`; unparseable strings become `None`.
fn flexible_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrString> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match value {
        NumberOrString::Number(n) => Some(n),
        NumberOrString::Text(text) => text.trim().parse().ok(),
    }))
}

// --- Users & auth ---

/// A backend user record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    /// User ID.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Given name.
    #[serde(default)]
    pub first_name: String,
    /// Family name.
    #[serde(default)]
    pub last_name: String,
    /// Account creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_joined: Option<String>,
}

impl User {
    /// Creates a user with only an id and username.
    #[must_use]
    pub fn named(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            date_joined: None,
        }
    }

    /// Full name when known, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }
}

/// JWT pair issued on login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthTokens {
    /// Access token (sent as bearer).
    pub access: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Response body of `auth/login/` and `auth/register/`.
///
/// Tokens are usually nested under `tokens`; flat `access`/`token` fields
/// are accepted too.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Status message.
    #[serde(default)]
    pub message: Option<String>,
    /// Authenticated user.
    pub user: User,
    /// Nested token pair.
    #[serde(default)]
    pub tokens: Option<AuthTokens>,
    /// Flat access token.
    #[serde(default, alias = "token")]
    pub access: Option<String>,
    /// Flat refresh token.
    #[serde(default)]
    pub refresh: Option<String>,
}

impl AuthResponse {
    /// The bearer token, from whichever field carried it.
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .map(|t| t.access.as_str())
            .or(self.access.as_deref())
    }

    /// The refresh token, from whichever field carried it.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.tokens
            .as_ref()
            .and_then(|t| t.refresh.as_deref())
            .or(self.refresh.as_deref())
    }
}

/// Response body of `auth/profile/`: wrapped in `user` or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    /// `{"user": {...}}`
    Wrapped {
        /// The user record.
        user: User,
    },
    /// `{...}`
    Bare(User),
}

impl ProfileResponse {
    /// Unwraps the user record.
    #[must_use]
    pub fn into_user(self) -> User {
        match self {
            Self::Wrapped { user } | Self::Bare(user) => user,
        }
    }
}

/// Payload for `auth/login/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Payload for `auth/register/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

// --- User interactions ---

/// One watchlist row; the movie is nested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WatchlistEntry {
    /// Entry ID (used by `movies/watchlist/{id}/`).
    pub id: u64,
    /// The listed movie.
    pub movie: Movie,
    /// When the movie was added.
    #[serde(default)]
    pub added_at: Option<String>,
}

/// One rating row; the movie is nested.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RatingEntry {
    /// Rating ID.
    pub id: u64,
    /// The rated movie.
    pub movie: Movie,
    /// Rating value (1-10).
    #[serde(deserialize_with = "required_f64")]
    pub rating: f64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn required_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    flexible_f64(deserializer)?.ok_or_else(|| serde::de::Error::custom("rating is not a number"))
}

// --- Parameters ---

/// Query parameters for `movies/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListMoviesParams {
    /// Result page (1-based).
    pub page: u32,
    /// Genre name filter (substring match).
    pub genre: Option<String>,
    /// Release year filter.
    pub year: Option<u32>,
    /// Minimum vote average.
    pub min_rating: Option<f64>,
    /// Title substring filter.
    pub search: Option<String>,
    /// Ordering key, e.g. `-popularity`.
    pub ordering: Option<String>,
}

impl Default for ListMoviesParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ListMoviesParams {
    /// First page, no filters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 1,
            genre: None,
            year: None,
            min_rating: None,
            search: None,
            ordering: None,
        }
    }

    /// Sets the page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the genre filter.
    #[must_use]
    pub fn genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub const fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the minimum rating filter.
    #[must_use]
    pub const fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    /// Sets the title filter.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the ordering key.
    #[must_use]
    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Builds the query string pairs; unset filters are omitted.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("page", self.page.to_string())];
        if let Some(ref genre) = self.genre {
            query.push(("genre", genre.clone()));
        }
        if let Some(year) = self.year {
            query.push(("year", year.to_string()));
        }
        if let Some(rating) = self.min_rating {
            query.push(("min_rating", rating.to_string()));
        }
        if let Some(ref search) = self.search {
            query.push(("search", search.clone()));
        }
        if let Some(ref ordering) = self.ordering {
            query.push(("ordering", ordering.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_parse_movie_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/api/movie_detail_603.json");

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 12);
        assert_eq!(movie.tmdb_id, Some(603));
        assert_eq!(movie.route_id(), 603);
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.vote_average, Some(8.2));
        assert_eq!(movie.genres, vec!["Action", "Science Fiction"]);
        assert_eq!(movie.release_year(), Some(1999));
        assert!(movie.poster().is_some());
    }

    #[test]
    fn test_parse_minimal_movie() {
        // Arrange
        let json = r#"{"id": 5}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.route_id(), 5);
        assert!(movie.title.is_empty());
        assert!(movie.vote_average.is_none());
        assert!(movie.genres.is_empty());
        assert!(movie.poster().is_none());
        assert!(movie.release_year().is_none());
    }

    #[test]
    fn test_vote_average_as_string_and_null() {
        // Arrange
        let as_string = r#"{"id": 1, "vote_average": "7.5"}"#;
        let as_null = r#"{"id": 2, "vote_average": null, "genres": null}"#;

        // Act
        let a: Movie = serde_json::from_str(as_string).unwrap();
        let b: Movie = serde_json::from_str(as_null).unwrap();

        // Assert
        assert_eq!(a.vote_average, Some(7.5));
        assert!(b.vote_average.is_none());
        assert!(b.genres.is_empty());
    }

    #[test]
    fn test_genre_labels_accept_strings() {
        // Arrange
        let json = r#"{"id": 1, "genres": ["Drama", "Crime"]}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.genres, vec!["Drama", "Crime"]);
    }

    #[test]
    fn test_description_alias() {
        // Arrange
        let json = r#"{"id": 1, "description": "A hacker learns the truth."}"#;

        // Act
        let movie: Movie = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.overview.as_deref(), Some("A hacker learns the truth."));
    }

    #[test]
    fn test_release_year_invalid() {
        // Arrange
        let movie: Movie =
            serde_json::from_str(r#"{"id": 1, "release_date": "someday"}"#).unwrap();

        // Act & Assert
        assert!(movie.release_year().is_none());
    }

    #[test]
    fn test_blank_poster_url_is_absent() {
        // Arrange
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "poster_url": "  "}"#).unwrap();

        // Act & Assert
        assert!(movie.poster().is_none());
    }

    #[test]
    fn test_parse_login_fixture() {
        // Arrange
        let json = include_str!("../../../fixtures/api/login.json");

        // Act
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.user.username, "neo");
        assert_eq!(response.access_token(), Some("access.jwt.token"));
        assert_eq!(response.refresh_token(), Some("refresh.jwt.token"));
    }

    #[test]
    fn test_auth_response_flat_token() {
        // Arrange
        let json = r#"{"token": "flat", "user": {"id": 3, "username": "tank"}}"#;

        // Act
        let response: AuthResponse = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(response.access_token(), Some("flat"));
        assert!(response.refresh_token().is_none());
    }

    #[test]
    fn test_profile_wrapped_and_bare() {
        // Arrange
        let wrapped = r#"{"user": {"id": 1, "username": "neo", "is_active": true}}"#;
        let bare = r#"{"id": 2, "username": "trinity"}"#;

        // Act
        let a: ProfileResponse = serde_json::from_str(wrapped).unwrap();
        let b: ProfileResponse = serde_json::from_str(bare).unwrap();

        // Assert
        assert_eq!(a.into_user().username, "neo");
        assert_eq!(b.into_user().username, "trinity");
    }

    #[test]
    fn test_user_display_name() {
        // Arrange
        let mut user = User::named(1, "neo");

        // Act & Assert
        assert_eq!(user.display_name(), "neo");
        user.first_name = String::from("Thomas");
        user.last_name = String::from("Anderson");
        assert_eq!(user.display_name(), "Thomas Anderson");
    }

    #[test]
    fn test_rating_entry_string_rating() {
        // Arrange
        let json = r#"{"id": 9, "rating": "8", "movie": {"id": 12, "title": "The Matrix"}}"#;

        // Act
        let entry: RatingEntry = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(entry.rating, 8.0);
        assert_eq!(entry.movie.id, 12);
    }

    #[test]
    fn test_list_params_query() {
        // Arrange
        let params = ListMoviesParams::new()
            .page(3)
            .genre("Drama")
            .year(1999)
            .ordering("-vote_average");

        // Act
        let query = params.to_query();

        // Assert
        assert_eq!(
            query,
            vec![
                ("page", String::from("3")),
                ("genre", String::from("Drama")),
                ("year", String::from("1999")),
                ("ordering", String::from("-vote_average")),
            ]
        );
    }
}
