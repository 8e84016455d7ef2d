//! Records returned by the upstream metadata API.
//!
//! Every field that TMDB may omit or null out is optional or defaulted, so a
//! sparse record still deserializes.

use serde::{Deserialize, Serialize};

/// TMDB status code meaning "the resource you requested could not be found".
pub const STATUS_CODE_NOT_FOUND: i64 = 34;

/// A movie genre.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Body of the genre-list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// A movie as it appears in listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
}

/// One page of a paginated listing (discover, search, similar).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

/// Production company credit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionCompany {
    pub name: String,
}

/// Spoken language entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpokenLanguage {
    pub english_name: String,
}

/// Full movie record from the movie-by-id endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub budget: Option<u64>,
    #[serde(default)]
    pub revenue: Option<u64>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    /// Error sentinel; TMDB sets this on failure bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<i64>,
}

impl MovieDetail {
    /// The listing view of this movie.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
        }
    }
}

/// The error envelope TMDB wraps failures in.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StatusEnvelope {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Build a full image URL for a poster path, e.g. `{base}/w500/abc.jpg`.
///
/// Returns `None` when the movie has no poster.
pub fn poster_url(image_base_url: &str, size: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path.filter(|p| !p.is_empty())?;
    Some(format!(
        "{}/{}{}",
        image_base_url.trim_end_matches('/'),
        size,
        path
    ))
}
