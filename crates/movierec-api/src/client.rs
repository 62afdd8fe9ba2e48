//! `ApiClient` - HTTP client wrapper for the movie backend.

use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use crate::error::{ApiError, extract_message};
use crate::route::{Navigator, NoopNavigator, Route};
use crate::session::SessionContext;

/// Local development API root.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/";

/// Parses `raw` as the API root, appending the trailing slash `Url::join`
/// needs to keep the last path segment.
///
/// # Errors
///
/// Returns an error if `raw` is not an absolute URL.
pub fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).with_context(|| format!("invalid API base URL: {raw}"))
}

/// HTTP client wrapper.
///
/// Every request goes through [`ApiClient::request`], which attaches the
/// session's bearer token and turns a 401 into a cleared session plus a
/// navigation to the login view.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiClient {
    /// HTTP client.
    http_client: Client,
    /// API root (always ends with `/`).
    base_url: Url,
    /// Session read before and cleared after requests.
    session: SessionContext,
    /// Receives the login redirect on authentication failure.
    navigator: Arc<dyn Navigator>,
}

/// Builder for `ApiClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ApiClientBuilder {
    base_url: Option<Url>,
    user_agent: Option<String>,
    session: Option<SessionContext>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            session: None,
            navigator: None,
        }
    }

    /// Overrides the API root (default: [`DEFAULT_BASE_URL`]).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the session context (required).
    #[must_use]
    pub fn session(mut self, session: SessionContext) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets the navigator notified on authentication failure
    /// (default: [`NoopNavigator`]).
    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `user_agent` is not set.
    /// - `session` is not set.
    /// - the base URL cannot be normalized.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<ApiClient> {
        let user_agent = self.user_agent.context("user_agent is required")?;
        let session = self.session.context("session is required")?;

        let base_url = match self.base_url {
            Some(url) => normalize_base_url(url.as_str())?,
            None => normalize_base_url(DEFAULT_BASE_URL)?,
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(ApiClient {
            http_client,
            base_url,
            session,
            navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
        })
    }
}

impl ApiClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    /// The API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The session context this client reads and clears.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Sends one request and decodes the JSON response.
    ///
    /// `path` is relative to the API root. An empty body decodes as JSON
    /// `null`, so `()` and `Value` work for bodiless responses. Failures
    /// are returned as-is: no retry, no backoff.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for transport failures, 401 (after clearing
    /// the session and redirecting to login), 404, other non-success
    /// statuses and undecodable bodies.
    #[instrument(skip_all, fields(%method, path = %path))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        query: &[(&str, String)],
    ) -> Result<T> {
        Ok(self.send(method, path, payload, query).await?)
    }

    /// GET shorthand.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        self.request(Method::GET, path, None, query).await
    }

    /// POST shorthand with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn post<T: DeserializeOwned>(&self, path: &str, payload: &Value) -> Result<T> {
        self.request(Method::POST, path, Some(payload), &[]).await
    }

    /// DELETE shorthand; the response body is discarded.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<()> {
        let _: Value = self.request(Method::DELETE, path, None, &[]).await?;
        Ok(())
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        query: &[(&str, String)],
    ) -> std::result::Result<T, ApiError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|source| ApiError::InvalidPath {
                path: path.to_owned(),
                source,
            })?;

        let mut builder = self.http_client.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = payload {
            builder = builder.json(body);
        }
        let request = builder.build().map_err(|source| ApiError::Transport {
            path: path.to_owned(),
            source,
        })?;

        tracing::debug!(method = %request.method(), url = %request.url(), "API request");

        let response =
            self.http_client
                .execute(request)
                .await
                .map_err(|source| ApiError::Transport {
                    path: path.to_owned(),
                    source,
                })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| ApiError::Transport {
            path: path.to_owned(),
            source,
        })?;

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized(path);
            return Err(ApiError::Unauthorized {
                message: extract_message(&body),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                path: path.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: extract_message(&body),
            });
        }

        let body = if body.trim().is_empty() { "null" } else { body.as_str() };
        serde_json::from_str(body).map_err(|source| ApiError::Decode {
            path: path.to_owned(),
            source,
        })
    }

    /// Clears token and user together and redirects to login.
    fn handle_unauthorized(&self, path: &str) {
        tracing::warn!(path, "API returned 401; clearing session");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
        self.navigator.navigate(Route::Login);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::route::RecordingNavigator;
    use crate::session::Session;
    use crate::types::User;

    fn client_for(server: &wiremock::MockServer, session: SessionContext) -> ApiClient {
        ApiClient::builder()
            .base_url(format!("{}/api", server.uri()).parse().unwrap())
            .user_agent("test/0.0.0")
            .session(session)
            .build()
            .unwrap()
    }

    fn logged_in() -> SessionContext {
        let ctx = SessionContext::in_memory();
        ctx.establish(Session::new("secret-token", User::named(1, "neo")))
            .unwrap();
        ctx
    }

    #[test]
    fn test_builder_requires_user_agent() {
        // Arrange & Act
        let result = ApiClient::builder()
            .session(SessionContext::in_memory())
            .build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("user_agent is required")
        );
    }

    #[test]
    fn test_builder_requires_session() {
        // Arrange & Act
        let result = ApiClient::builder().user_agent("test/0.0.0").build();

        // Assert
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("session is required")
        );
    }

    #[test]
    fn test_builder_default_base_url() {
        // Arrange & Act
        let client = ApiClient::builder()
            .user_agent("test/0.0.0")
            .session(SessionContext::in_memory())
            .build()
            .unwrap();

        // Assert
        assert_eq!(client.base_url().as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_normalize_base_url_appends_slash() {
        // Arrange & Act
        let url = normalize_base_url("https://movies.example.com/api").unwrap();

        // Assert
        assert_eq!(url.as_str(), "https://movies.example.com/api/");
        assert_eq!(
            url.join("movies/").unwrap().as_str(),
            "https://movies.example.com/api/movies/"
        );
    }

    #[test]
    fn test_normalize_base_url_keeps_existing_slash() {
        // Arrange & Act
        let url = normalize_base_url(" http://localhost:8000/api/ ").unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://localhost:8000/api/");
    }

    #[test]
    fn test_normalize_base_url_rejects_relative() {
        // Arrange & Act & Assert
        assert!(normalize_base_url("api/").is_err());
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/api/auth/profile/"))
            .and(wiremock::matchers::header(
                "Authorization",
                "Bearer secret-token",
            ))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(json!({"user": {"id": 1, "username": "neo"}})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server, logged_in());

        // Act
        let body: Value = client.get("auth/profile/", &[]).await.unwrap();

        // Assert
        assert_eq!(body["user"]["username"], "neo");
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::header_exists("Authorization"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&mock_server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server, SessionContext::in_memory());

        // Act
        let result: Result<Value> = client.get("movies/genres/", &[]).await;

        // Assert
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_redirects() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(401)
                    .set_body_json(json!({"detail": "Given token not valid for any token type"})),
            )
            .mount(&mock_server)
            .await;
        let session = logged_in();
        let navigator = RecordingNavigator::new();
        let client = ApiClient::builder()
            .base_url(format!("{}/api/", mock_server.uri()).parse().unwrap())
            .user_agent("test/0.0.0")
            .session(session.clone())
            .navigator(Arc::new(navigator.clone()))
            .build()
            .unwrap();

        // Act
        let result: Result<Value> = client.get("movies/watchlist/", &[]).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(ApiError::classify(&err), ErrorKind::Unauthorized);
        assert_eq!(
            ApiError::backend_message(&err),
            Some("Given token not valid for any token type")
        );
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert_eq!(navigator.take(), Some(Route::Login));
    }

    #[tokio::test]
    async fn test_not_found_is_classified() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})),
            )
            .mount(&mock_server)
            .await;
        let session = logged_in();
        let client = client_for(&mock_server, session.clone());

        // Act
        let result: Result<Value> = client.get("movies/999999/", &[]).await;

        // Assert
        assert_eq!(ApiError::classify(&result.unwrap_err()), ErrorKind::NotFound);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(503)
                    .set_body_json(json!({"error": "Failed to search movies"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server, logged_in());

        // Act
        let result: Result<Value> = client
            .post("movies/search/", &json!({"query": "matrix", "page": 1}))
            .await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(ApiError::classify(&err), ErrorKind::Other);
        assert!(err.to_string().contains("Failed to search movies"));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_json_payload_is_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/movies/ratings/"))
            .and(wiremock::matchers::body_json(json!({"movie_id": 12, "rating": 9})))
            .respond_with(wiremock::ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server, logged_in());

        // Act
        let body: Value = client
            .post("movies/ratings/", &json!({"movie_id": 12, "rating": 9}))
            .await
            .unwrap();

        // Assert
        assert_eq!(body["id"], 1);
    }

    #[tokio::test]
    async fn test_delete_with_empty_body() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("DELETE"))
            .and(wiremock::matchers::path("/api/movies/watchlist/31/"))
            .respond_with(wiremock::ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server, logged_in());

        // Act & Assert
        client.delete("movies/watchlist/31/").await.unwrap();
    }

    #[tokio::test]
    async fn test_query_params_are_sent() {
        // Arrange
        let mock_server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/api/movies/"))
            .and(wiremock::matchers::query_param("page", "2"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;
        let client = client_for(&mock_server, SessionContext::in_memory());

        // Act & Assert
        let _: Value = client
            .get("movies/", &[("page", String::from("2"))])
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Arrange: nothing listens on port 9
        let client = ApiClient::builder()
            .base_url("http://127.0.0.1:9/api/".parse().unwrap())
            .user_agent("test/0.0.0")
            .session(SessionContext::in_memory())
            .build()
            .unwrap();

        // Act
        let result: Result<Value> = client.get("movies/", &[]).await;

        // Assert
        let err = result.unwrap_err();
        assert_eq!(ApiError::classify(&err), ErrorKind::Other);
        assert!(err.to_string().contains("request failed"));
    }
}
