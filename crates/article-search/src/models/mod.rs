//! Data models for Elasticsearch responses and the public article schema.
//!
//! Engine payloads are read into typed structs with optional fields; defaults are
//! resolved once, when a hit becomes an [`ArticleRecord`].

mod article;
mod hit;
mod inputs;

pub use article::{ArticleRecord, Year, normalize_hits};
pub use hit::{ArticleSource, HitsEnvelope, SearchHit, SearchResponse};
pub use inputs::{SearchParams, TopicParams};
