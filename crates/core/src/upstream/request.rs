//! Upstream operations and their wire mapping.

use std::fmt;

/// Page requested when a caller leaves it unspecified.
pub const DEFAULT_PAGE: &str = "1";

/// One read-only operation against the upstream metadata API.
///
/// Parameters are kept as the caller supplied them: the proxy relays whatever
/// the browser sent and lets the upstream decide what is valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UpstreamRequest {
    /// List all movie genres.
    Genres,
    /// Full record for one movie.
    Movie { id: String },
    /// Movies in a genre, paginated.
    Discover { genre_id: String, page: String },
    /// Free-text title search.
    Search { query: String },
    /// Movies similar to one movie (first page only).
    Similar { id: String },
}

impl UpstreamRequest {
    pub fn movie(id: impl Into<String>) -> Self {
        Self::Movie { id: id.into() }
    }

    /// Discover request; `page` defaults to 1.
    pub fn discover(genre_id: impl ToString, page: Option<u32>) -> Self {
        Self::Discover {
            genre_id: genre_id.to_string(),
            page: page
                .map(|p| p.to_string())
                .unwrap_or_else(|| DEFAULT_PAGE.to_string()),
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Self::Search {
            query: query.into(),
        }
    }

    pub fn similar(id: impl Into<String>) -> Self {
        Self::Similar { id: id.into() }
    }

    /// Short operation name, used for logs and metric labels.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Genres => "genres",
            Self::Movie { .. } => "movie",
            Self::Discover { .. } => "discover",
            Self::Search { .. } => "search",
            Self::Similar { .. } => "similar",
        }
    }

    /// Path relative to the upstream API base URL.
    pub fn path(&self) -> String {
        match self {
            Self::Genres => "/genre/movie/list".to_string(),
            Self::Movie { id } => format!("/movie/{}", urlencoding::encode(id)),
            Self::Discover { .. } => "/discover/movie".to_string(),
            Self::Search { .. } => "/search/movie".to_string(),
            Self::Similar { id } => format!("/movie/{}/similar", urlencoding::encode(id)),
        }
    }

    /// Operation-specific query parameters (credentials and language excluded).
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Genres | Self::Movie { .. } => vec![],
            Self::Discover { genre_id, page } => {
                vec![("with_genres", genre_id.clone()), ("page", page.clone())]
            }
            Self::Search { query } => vec![("query", query.clone())],
            Self::Similar { .. } => vec![("page", DEFAULT_PAGE.to_string())],
        }
    }
}

impl fmt::Display for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params();
        if params.is_empty() {
            return write!(f, "{}", self.path());
        }
        let query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        write!(f, "{}?{}", self.path(), query.join("&"))
    }
}
