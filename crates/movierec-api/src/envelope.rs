//! Response envelopes.
//!
//! List endpoints answer in one of three shapes: a bare JSON array, a
//! paginated object with `results`, or an object nesting the list under a
//! named key (`recommendations`, `watchlist`, ...). Items are either movies
//! or entries that nest a movie under `movie`. [`Envelope`] captures the
//! shape once so call sites never probe optional fields themselves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::pagination::{PAGE_SIZE, Pagination};
use crate::types::Movie;

/// Keys that may hold a nested list, in lookup order.
pub const NESTED_KEYS: &[&str] = &["recommendations", "movies", "watchlist", "ratings", "data"];

/// A list response, classified by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `[...]`
    Bare(Vec<Value>),
    /// `{"results": [...], "count": .., "next": .., ...}`
    Paginated(PageEnvelope),
    /// `{"<key>": [...], "message": ..}`
    Nested {
        /// The key holding the list.
        key: String,
        /// The listed items.
        items: Vec<Value>,
        /// Optional message sent alongside (e.g. "rate some movies first").
        message: Option<String>,
    },
    /// Anything without a recognizable list.
    Empty,
}

/// The paginated variant's metadata and items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageEnvelope {
    /// Items on this page.
    pub results: Vec<Value>,
    /// Total item count (DRF style).
    pub count: Option<u64>,
    /// Total item count (TMDB style).
    pub total_results: Option<u64>,
    /// Next page link.
    pub next: Option<String>,
    /// Previous page link.
    pub previous: Option<String>,
    /// Current page number.
    pub page: Option<u32>,
    /// Total number of pages.
    pub total_pages: Option<u32>,
}

impl Envelope {
    /// Classifies a decoded JSON body.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Bare(items),
            Value::Object(map) => Self::from_object(map),
            _ => Self::Empty,
        }
    }

    fn from_object(mut map: Map<String, Value>) -> Self {
        if let Some(Value::Array(results)) = map.remove("results") {
            return Self::Paginated(PageEnvelope {
                results,
                count: map.get("count").and_then(Value::as_u64),
                total_results: map.get("total_results").and_then(Value::as_u64),
                next: non_empty_link(map.get("next")),
                previous: non_empty_link(map.get("previous")),
                page: map.get("page").and_then(as_u32),
                total_pages: map.get("total_pages").and_then(as_u32),
            });
        }

        let message = map
            .get("message")
            .and_then(Value::as_str)
            .map(String::from);
        for key in NESTED_KEYS {
            if let Some(Value::Array(items)) = map.remove(*key) {
                return Self::Nested {
                    key: (*key).to_owned(),
                    items,
                    message,
                };
            }
        }

        Self::Empty
    }

    /// Raw items regardless of shape.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        match self {
            Self::Bare(items) | Self::Nested { items, .. } => items,
            Self::Paginated(page) => &page.results,
            Self::Empty => &[],
        }
    }

    /// Whether the envelope holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Normalizes the items into movies.
    #[must_use]
    pub fn movies(&self) -> Vec<Movie> {
        match self {
            Self::Bare(items) => movies_from_bare(items),
            Self::Paginated(page) => movies_from_page(page),
            Self::Nested { key, items, .. } => movies_from_nested(key, items),
            Self::Empty => Vec::new(),
        }
    }

    /// Decodes every item as `T`, skipping items that do not match.
    #[must_use]
    pub fn entries<T: DeserializeOwned>(&self) -> Vec<T> {
        self.items()
            .iter()
            .filter_map(|item| match T::deserialize(item) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping undecodable entry");
                    None
                }
            })
            .collect()
    }

    /// Derives pagination for a response to a request for `requested_page`.
    ///
    /// Explicit `total_pages` wins; otherwise a total count is divided by
    /// [`PAGE_SIZE`]; otherwise next/previous links decide. Bare and nested
    /// lists are never paginated.
    #[must_use]
    pub fn pagination(&self, requested_page: u32) -> Pagination {
        let Self::Paginated(page) = self else {
            return Pagination::hidden(requested_page);
        };
        let current = page.page.unwrap_or(requested_page);
        if let Some(total) = page.total_pages {
            return Pagination::from_total_pages(current, total);
        }
        if let Some(count) = page.count.or(page.total_results) {
            return Pagination::from_count(current, count, PAGE_SIZE);
        }
        Pagination::from_links(current, page.next.is_some(), page.previous.is_some())
    }

    /// Total number of items known to the backend.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        let listed = u64::try_from(self.items().len()).unwrap_or(u64::MAX);
        match self {
            Self::Paginated(page) => page.count.or(page.total_results).unwrap_or(listed),
            _ => listed,
        }
    }

    /// Message sent alongside a nested list.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Nested { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

fn movies_from_bare(items: &[Value]) -> Vec<Movie> {
    items.iter().filter_map(extract_movie).collect()
}

fn movies_from_page(page: &PageEnvelope) -> Vec<Movie> {
    page.results.iter().filter_map(extract_movie).collect()
}

fn movies_from_nested(key: &str, items: &[Value]) -> Vec<Movie> {
    tracing::trace!(key, count = items.len(), "normalizing nested list");
    items.iter().filter_map(extract_movie).collect()
}

/// Decodes one item: a movie itself or an entry with a nested `movie`.
fn extract_movie(item: &Value) -> Option<Movie> {
    let candidate = match item.get("movie") {
        Some(nested @ Value::Object(_)) => nested,
        _ => item,
    };
    match Movie::deserialize(candidate) {
        Ok(movie) => Some(movie),
        Err(e) => {
            tracing::warn!(error = %e, "skipping undecodable movie record");
            None
        }
    }
}

fn non_empty_link(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|link| !link.is_empty())
        .map(String::from)
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|n| u32::try_from(n).ok())
}
