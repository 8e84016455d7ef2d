use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with prebuilt frontend assets, served as the router fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    3000
}

/// TMDB upstream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB API key. Never leaves the server.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Freshness window for upstream responses; 0 disables reuse.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_cache_ttl() -> u64 {
    3600
}

/// Landing page and detail page sizing
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Movies kept per genre on the initial load.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Upper bound on concurrent per-genre discover requests.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
    /// Similar movies shown on a detail page.
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            similar_limit: default_similar_limit(),
        }
    }
}

fn default_page_size() -> usize {
    8
}

fn default_max_concurrent_fetches() -> usize {
    32
}

fn default_similar_limit() -> usize {
    8
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub tmdb: SanitizedTmdbConfig,
    pub catalog: CatalogConfig,
}

/// Sanitized TMDB config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTmdbConfig {
    pub base_url: String,
    pub image_base_url: String,
    pub language: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
    pub cache_ttl_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            tmdb: SanitizedTmdbConfig {
                base_url: config.tmdb.base_url.clone(),
                image_base_url: config.tmdb.image_base_url.clone(),
                language: config.tmdb.language.clone(),
                api_key_configured: !config.tmdb.api_key.is_empty(),
                timeout_secs: config.tmdb.timeout_secs,
                cache_ttl_secs: config.tmdb.cache_ttl_secs,
            },
            catalog: config.catalog.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[tmdb]
api_key = "secret"
language = "it-IT"
cache_ttl_secs = 60

[catalog]
page_size = 12
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.tmdb.api_key, "secret");
        assert_eq!(config.tmdb.language, "it-IT");
        assert_eq!(config.tmdb.cache_ttl_secs, 60);
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.similar_limit, 8);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert!(config.tmdb.api_key.is_empty());
        assert_eq!(config.tmdb.cache_ttl_secs, 3600);
        assert_eq!(config.catalog, CatalogConfig::default());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let mut config = Config::default();
        config.tmdb.api_key = "super-secret".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.tmdb.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
