//! Movie detail page.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::DetailError;
use crate::config::CatalogConfig;
use crate::upstream::{poster_url, MovieDetail, MovieSource, MovieSummary};

/// Poster size used on detail and listing cards.
pub const POSTER_SIZE: &str = "w500";

/// What the detail page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieView {
    pub movie: MovieDetail,
    /// At most `similar_limit` entries.
    pub similar: Vec<MovieSummary>,
    pub poster_url: Option<String>,
    /// e.g. `"$63,000,000"`.
    pub budget: Option<String>,
    pub revenue: Option<String>,
    /// Comma-separated company names, absent when there are none.
    pub production_companies: Option<String>,
    /// Comma-separated language names, absent when there are none.
    pub spoken_languages: Option<String>,
}

impl MovieView {
    fn new(movie: MovieDetail, similar: Vec<MovieSummary>, image_base_url: &str) -> Self {
        let poster_url = poster_url(image_base_url, POSTER_SIZE, movie.poster_path.as_deref());
        let budget = movie.budget.map(|b| format!("${}", format_thousands(b)));
        let revenue = movie.revenue.map(|r| format!("${}", format_thousands(r)));
        let production_companies = join_non_empty(movie.production_companies.iter().map(|c| c.name.as_str()));
        let spoken_languages =
            join_non_empty(movie.spoken_languages.iter().map(|l| l.english_name.as_str()));

        Self {
            movie,
            similar,
            poster_url,
            budget,
            revenue,
            production_companies,
            spoken_languages,
        }
    }

    /// The "Similar Movies" section is hidden when there is nothing to show.
    pub fn show_similar(&self) -> bool {
        !self.similar.is_empty()
    }
}

fn join_non_empty<'a>(names: impl Iterator<Item = &'a str>) -> Option<String> {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Format an integer with `,` thousands separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Fetches a movie and its similar movies for the detail page.
pub struct DetailComposer<S: ?Sized> {
    source: Arc<S>,
    similar_limit: usize,
    image_base_url: String,
}

impl<S: MovieSource + ?Sized> DetailComposer<S> {
    pub fn new(source: Arc<S>, config: &CatalogConfig, image_base_url: impl Into<String>) -> Self {
        Self {
            source,
            similar_limit: config.similar_limit,
            image_base_url: image_base_url.into(),
        }
    }

    /// Fetch detail and similar movies concurrently.
    ///
    /// Any detail failure fails the whole page with `NotFound`; a similar
    /// list failure only hides that section.
    pub async fn compose(&self, id: &str) -> Result<MovieView, DetailError> {
        let (movie, mut similar) =
            tokio::join!(self.source.get_movie(id), self.source.get_similar(id));

        let movie = movie.map_err(|e| {
            debug!(movie_id = %id, error = %e, "Movie detail unavailable");
            DetailError::NotFound(id.to_string())
        })?;

        similar.truncate(self.similar_limit);
        Ok(MovieView::new(movie, similar, &self.image_base_url))
    }
}
