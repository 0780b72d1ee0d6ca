//! Paginated free-text article search.

use crate::client::ElasticsearchClient;
use crate::error::ApiResult;
use crate::models::{ArticleRecord, SearchParams, normalize_hits};
use crate::{pagination, query};

/// Search over one article index.
#[derive(Debug, Clone, Copy)]
pub struct ArticleSearch<'a> {
    client: &'a ElasticsearchClient,
    index: &'a str,
}

impl<'a> ArticleSearch<'a> {
    /// Create a search bound to `index`.
    #[must_use]
    pub const fn new(client: &'a ElasticsearchClient, index: &'a str) -> Self {
        Self { client, index }
    }

    /// Run one page of a search.
    ///
    /// Parameters are validated before the engine is contacted.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad paging, or an engine error.
    pub async fn search(&self, params: &SearchParams) -> ApiResult<Vec<ArticleRecord>> {
        let page = pagination::resolve(params.page, params.size)?;
        let query = query::build(params.query.as_deref());

        tracing::debug!(
            index = self.index,
            match_all = query.is_match_all(),
            offset = page.offset,
            limit = page.limit,
            "Searching articles"
        );

        let hits = self.client.search(self.index, &query, page.offset, page.limit).await?;
        let records = normalize_hits(hits)?;

        tracing::debug!(results = records.len(), "Search complete");
        Ok(records)
    }
}
