//! Elasticsearch client.
//!
//! Provides async HTTP client with:
//! - Connection pooling via reqwest
//! - Request logging middleware
//! - Status code mapping onto [`ClientError`]
//!
//! Each call is exactly one round trip. Nothing is retried or cached.

mod middleware;

use anyhow::Context;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{Config, engine};
use crate::error::{ClientError, ClientResult};
use crate::models::{SearchHit, SearchResponse};
use crate::query::StructuredQuery;

pub use middleware::RequestLogging;

/// Elasticsearch REST client.
#[derive(Clone)]
pub struct ElasticsearchClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Cluster base URL without trailing slash.
    base_url: String,
}

/// Body of a `_search` request.
#[derive(Debug, Serialize)]
struct SearchBody<'a> {
    query: &'a StructuredQuery,
    from: u64,
    size: u32,
}

impl ElasticsearchClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the engine URL is invalid or HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let base_url = url::Url::parse(&config.elasticsearch_url)
            .with_context(|| format!("Invalid ELASTICSEARCH_URL: {}", config.elasticsearch_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(engine::MAX_KEEPALIVE)
            .pool_idle_timeout(engine::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let client = ClientBuilder::new(client).with(RequestLogging).build();

        Ok(Self { client, base_url: base_url.as_str().trim_end_matches('/').to_string() })
    }

    /// Cluster base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a query against `index` and return the hits in engine order.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or a malformed body.
    pub async fn search(
        &self,
        index: &str,
        query: &StructuredQuery,
        offset: u64,
        limit: u32,
    ) -> ClientResult<Vec<SearchHit>> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let body = SearchBody { query, from: offset, size: limit };

        let response: SearchResponse = self.post(&url, &body).await?;
        Ok(response.hits.hits)
    }

    /// Check that the cluster answers.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unreachable`] on a non-success status, or the transport error.
    pub async fn ping(&self) -> ClientResult<()> {
        let response = self.client.head(&self.base_url).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::unreachable(format!("ping returned {status}")))
        }
    }

    /// Make a POST request with a JSON body.
    async fn post<B, T>(&self, url: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body_str = serde_json::to_string(body)?;

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .body(body_str)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        let text = response.text().await?;

        serde_json::from_str(&text).map_err(ClientError::from)
    }

    /// Handle engine response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            429 => Err(ClientError::RateLimited { message: text }),
            404 => Err(ClientError::not_found(text)),
            400 => Err(ClientError::bad_request(text)),
            500..=599 => Err(ClientError::server(status.as_u16(), text)),
            _ => Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text }),
        }
    }
}

impl std::fmt::Debug for ElasticsearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElasticsearchClient").field("base_url", &self.base_url).finish()
    }
}
