//! Query-string parameters accepted by the HTTP endpoints.

use serde::Deserialize;

use crate::config::limits;

/// Parameters of `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    /// Free text; absent or empty selects every article.
    #[serde(default)]
    pub query: Option<String>,

    /// One-based page number.
    #[serde(default = "default_page")]
    pub page: i64,

    /// Results per page.
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    limits::DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    limits::DEFAULT_PAGE_SIZE
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { query: None, page: default_page(), size: default_page_size() }
    }
}

/// Parameters of the chart endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TopicParams {
    /// Topic selected for aggregation.
    pub topic_number: i64,
}
