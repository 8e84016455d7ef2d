use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable holding the TMDB API key, as the upstream docs name it.
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// Load configuration from file with environment variable overrides.
///
/// `REELVIEW_`-prefixed variables override file values, with `__` separating
/// nested keys (`REELVIEW_TMDB__API_KEY`). A bare `TMDB_API_KEY` is honoured
/// when no key was set otherwise.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let mut config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("REELVIEW_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    if config.tmdb.api_key.is_empty() {
        if let Ok(key) = std::env::var(TMDB_API_KEY_ENV) {
            config.tmdb.api_key = key;
        }
    }

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
