//! Configuration for the article search service.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;

/// Search engine connection constants.
pub mod engine {
    use std::time::Duration;

    /// Index queried when none is configured.
    pub const DEFAULT_INDEX: &str = "article";

    /// Request timeout. The engine client owns timeouts; handlers never add their own.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Request limits.
pub mod limits {
    /// First page, used when `page` is omitted.
    pub const DEFAULT_PAGE: i64 = 1;

    /// Page size used when `size` is omitted.
    pub const DEFAULT_PAGE_SIZE: i64 = 100;

    /// Largest accepted page size.
    pub const MAX_PAGE_SIZE: i64 = 1000;

    /// Hits considered by a topic aggregation. Larger topics are undercounted.
    pub const AGGREGATION_WINDOW: u32 = 1000;
}

/// Article document fields.
pub mod fields {
    /// Fields matched by free-text search, in query order.
    pub const SEARCH: &[&str] = &["title", "authors", "journal", "keywords.russian", "annotation"];

    /// Exact-match field used to select a topic before aggregation.
    pub const TOPIC_NUMBER: &str = "topic_number";
}

/// Port used when `APP_PORT` is not set.
pub const DEFAULT_PORT: u16 = 8000;

/// Environment name used when `ENVIRONMENT` is not set.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Elasticsearch cluster.
    pub elasticsearch_url: String,

    /// Index holding the articles.
    pub index: String,

    /// Origins allowed by CORS. `*` mirrors the request origin.
    pub allowed_origins: Vec<String>,

    /// `Cache-Control` value for static visualization files.
    pub cache_control: Option<String>,

    /// HTTP listen port.
    pub port: u16,

    /// Deployment environment name, reported by `GET /`.
    pub environment: String,

    /// Directory served under `/visualizations`.
    pub visualizations_dir: PathBuf,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Config {
    /// Create a configuration for the given engine URL with defaults everywhere else.
    #[must_use]
    pub fn new(elasticsearch_url: impl Into<String>) -> Self {
        Self {
            elasticsearch_url: elasticsearch_url.into(),
            index: engine::DEFAULT_INDEX.to_string(),
            allowed_origins: Vec::new(),
            cache_control: None,
            port: DEFAULT_PORT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            visualizations_dir: PathBuf::from("visualizations"),
            request_timeout: engine::REQUEST_TIMEOUT,
            connect_timeout: engine::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            environment: "test".to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            ..Self::new(base_url)
        }
    }

    /// Create configuration from environment variables.
    ///
    /// A `.env` file in the working directory or a parent is loaded first. Variables
    /// already set in the process take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns error if `ELASTICSEARCH_URL` is missing or `APP_PORT` is not a port number.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::read_env()
    }

    /// Create configuration from a specific env file plus the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, or as [`Config::from_env`].
    pub fn from_env_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        dotenv::from_path(path)
            .with_context(|| format!("Failed to load env file {}", path.display()))?;
        Self::read_env()
    }

    fn read_env() -> anyhow::Result<Self> {
        let url = std::env::var("ELASTICSEARCH_URL")
            .context("ELASTICSEARCH_URL is not defined in the environment variables")?;
        let mut config = Self::new(url);

        if let Ok(index) = std::env::var("ELASTICSEARCH_INDEX") {
            config.index = index;
        }
        if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
            config.allowed_origins = parse_origins(&origins);
        }
        config.cache_control = std::env::var("CACHE_CONTROL").ok().filter(|v| !v.is_empty());
        if let Ok(port) = std::env::var("APP_PORT") {
            config.port =
                port.parse().with_context(|| format!("APP_PORT is not a valid port: {port}"))?;
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            config.environment = environment;
        }

        Ok(config)
    }
}

/// Split a comma separated origin list, dropping blanks.
#[must_use]
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|o| !o.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("http://localhost:9200");
        assert_eq!(config.index, "article");
        assert_eq!(config.port, 8000);
        assert_eq!(config.environment, "development");
        assert!(config.allowed_origins.is_empty());
        assert!(config.cache_control.is_none());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.example, http://b.example,,"),
            vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_fields() {
        assert_eq!(fields::SEARCH.len(), 5);
        assert_eq!(fields::SEARCH[3], "keywords.russian");
    }
}
