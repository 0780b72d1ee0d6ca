//! Article Search Service
//!
//! An HTTP façade over an Elasticsearch index of scientific articles. Translates free-text
//! queries into engine queries, pages and normalizes the hits, and renders per-topic charts
//! from aggregated hits.
//!
//! # Features
//!
//! - **Search**: AND-matching across title, authors, journal, Russian keywords and annotation
//! - **Stable schema**: every article field present in every result, defaulted when missing
//! - **Charts**: articles per year (bar) and per field of science (pie) for a topic
//! - **Stateless**: one engine round trip per request, no retries, no caching
//!
//! # Example
//!
//! ```no_run
//! use article_search::{config::Config, server::ArticleServer, ElasticsearchClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = ElasticsearchClient::new(&config)?;
//!     let server = ArticleServer::new(config, client);
//!
//!     server.check_engine().await?;
//!     server.run_http().await
//! }
//! ```

pub mod aggregate;
pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pagination;
pub mod query;
pub mod search;
pub mod server;

pub use client::ElasticsearchClient;
pub use config::Config;
pub use error::{ApiError, ClientError};
