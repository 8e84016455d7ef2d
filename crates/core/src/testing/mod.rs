//! Testing utilities and mock implementations.
//!
//! This module provides a mock [`Upstream`](crate::upstream::Upstream),
//! allowing the catalog views and the proxy to be tested without reaching
//! TMDB.
//!
//! # Example
//!
//! ```rust,ignore
//! use reelview_core::testing::{fixtures, MockUpstream};
//!
//! let upstream = MockUpstream::new();
//! upstream.set_movie(fixtures::movie_detail(603, "The Matrix")).await;
//! upstream.set_similar(603, fixtures::movies(1000, 20)).await;
//! ```

mod mock_upstream;

pub use mock_upstream::MockUpstream;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::upstream::{
        Genre, MovieDetail, MovieSummary, ProductionCompany, SpokenLanguage,
    };

    /// Create a genre.
    pub fn genre(id: u32, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    /// Create a listing entry with reasonable defaults.
    pub fn movie(id: u32, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            release_date: Some("2020-06-15".to_string()),
            vote_average: Some(7.0),
        }
    }

    /// `count` listing entries with consecutive ids starting at `first_id`.
    pub fn movies(first_id: u32, count: u32) -> Vec<MovieSummary> {
        (first_id..first_id + count)
            .map(|id| movie(id, &format!("Movie {}", id)))
            .collect()
    }

    /// Create a full movie record.
    pub fn movie_detail(id: u32, title: &str) -> MovieDetail {
        MovieDetail {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/poster-{}.jpg", id)),
            release_date: Some("1999-03-30".to_string()),
            vote_average: Some(8.2),
            overview: Some(format!("A movie about {}.", title.to_lowercase())),
            tagline: Some("Welcome to the real world.".to_string()),
            genres: vec![genre(28, "Action"), genre(878, "Science Fiction")],
            runtime: Some(136),
            status: Some("Released".to_string()),
            homepage: Some("https://example.com".to_string()),
            budget: Some(63_000_000),
            revenue: Some(463_517_383),
            production_companies: vec![
                ProductionCompany {
                    name: "Village Roadshow Pictures".to_string(),
                },
                ProductionCompany {
                    name: "Groucho II Film Partnership".to_string(),
                },
            ],
            spoken_languages: vec![SpokenLanguage {
                english_name: "English".to_string(),
            }],
            status_code: None,
        }
    }
}
