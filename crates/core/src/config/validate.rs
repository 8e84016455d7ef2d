use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - A TMDB API key is present
/// - Catalog sizes are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.tmdb.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "tmdb.api_key must be set (or TMDB_API_KEY in the environment)".to_string(),
        ));
    }

    if config.catalog.page_size == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.page_size cannot be 0".to_string(),
        ));
    }

    if config.catalog.max_concurrent_fetches == 0 {
        return Err(ConfigError::ValidationError(
            "catalog.max_concurrent_fetches cannot be 0".to_string(),
        ));
    }

    Ok(())
}
