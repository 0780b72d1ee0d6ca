//! Topic aggregations behind the chart endpoints.
//!
//! An aggregation reads at most [`limits::AGGREGATION_WINDOW`] hits for a topic. Topics with
//! more matching articles are undercounted and the caller is not told; the window being
//! full is only logged.

use std::collections::{BTreeMap, HashMap};

use crate::client::ElasticsearchClient;
use crate::config::limits;
use crate::error::{ApiError, ApiResult};
use crate::models::ArticleSource;
use crate::query;

/// Label used when an article has no value for the grouped attribute.
pub const UNKNOWN: &str = "Unknown";

/// `(label, count)` pairs in presentation order.
pub type Counts = Vec<(String, u64)>;

/// Count articles per year label, sorted ascending by label as a string.
///
/// Labels compare as opaque text, so `"Unknown"` lands after numeric years and `"999"`
/// after `"2020"`.
#[must_use]
pub fn count_by_year<'a>(sources: impl IntoIterator<Item = &'a ArticleSource>) -> Counts {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for source in sources {
        let label = source.year.as_ref().map_or_else(|| UNKNOWN.to_string(), ToString::to_string);
        *counts.entry(label).or_default() += 1;
    }

    counts.into_iter().collect()
}

/// Count articles per field of science, in order of first appearance.
#[must_use]
pub fn count_by_field<'a>(sources: impl IntoIterator<Item = &'a ArticleSource>) -> Counts {
    let mut counts: Counts = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for source in sources {
        let label = source.field_of_science.as_deref().unwrap_or(UNKNOWN);
        if let Some(&position) = positions.get(label) {
            counts[position].1 += 1;
        } else {
            positions.insert(label.to_string(), counts.len());
            counts.push((label.to_string(), 1));
        }
    }

    counts
}

/// Aggregations over one article index.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    client: &'a ElasticsearchClient,
    index: &'a str,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator bound to `index`.
    #[must_use]
    pub const fn new(client: &'a ElasticsearchClient, index: &'a str) -> Self {
        Self { client, index }
    }

    /// Article counts per year for a topic.
    ///
    /// # Errors
    ///
    /// Returns not found when the topic has no articles, or an engine error.
    pub async fn by_year(&self, topic_number: i64) -> ApiResult<Counts> {
        let sources = self.window(topic_number).await?;
        non_empty(count_by_year(&sources), topic_number)
    }

    /// Article counts per field of science for a topic.
    ///
    /// # Errors
    ///
    /// Returns not found when the topic has no articles, or an engine error.
    pub async fn by_field(&self, topic_number: i64) -> ApiResult<Counts> {
        let sources = self.window(topic_number).await?;
        non_empty(count_by_field(&sources), topic_number)
    }

    /// Fetch the capped hit window for a topic.
    async fn window(&self, topic_number: i64) -> ApiResult<Vec<ArticleSource>> {
        let query = query::topic_filter(topic_number);
        let window = limits::AGGREGATION_WINDOW;

        let hits = self.client.search(self.index, &query, 0, window).await?;
        if hits.is_empty() {
            return Err(no_data(topic_number));
        }
        if hits.len() >= window as usize {
            tracing::warn!(
                topic_number,
                window,
                "Aggregation window is full, counts may be truncated"
            );
        }

        Ok(hits.into_iter().map(|hit| hit.source).collect())
    }
}

fn non_empty(counts: Counts, topic_number: i64) -> ApiResult<Counts> {
    if counts.is_empty() { Err(no_data(topic_number)) } else { Ok(counts) }
}

fn no_data(topic_number: i64) -> ApiError {
    ApiError::not_found(format!("No data found for topic number {topic_number}"))
}
