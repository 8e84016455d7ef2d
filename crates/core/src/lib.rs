pub mod catalog;
pub mod config;
pub mod metrics;
pub mod session;
pub mod testing;
pub mod upstream;

pub use catalog::{
    CatalogAggregator, CatalogError, CatalogState, DetailComposer, DetailError, LoadState,
    MovieView, SearchOutcome, SearchSession, SearchView,
};
pub use config::{
    load_config, load_config_from_str, validate_config, CatalogConfig, Config, ConfigError,
    SanitizedConfig, ServerConfig, TmdbConfig,
};
pub use session::{AppSession, FileStore, KeyValueStore, MemoryStore, ThemeMode, ThemeState};
pub use upstream::{
    MovieSource, ProxyClient, TmdbClient, Upstream, UpstreamError, UpstreamRequest,
    UpstreamResponse,
};
