pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod tmdb;
pub mod views;

use serde::Serialize;

pub use routes::create_router;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
