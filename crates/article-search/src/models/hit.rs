//! Elasticsearch `_search` response payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Year;

/// Top level of a `_search` response. Only the hits are read.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsEnvelope,
}

/// The `hits` object of a `_search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct HitsEnvelope {
    pub hits: Vec<SearchHit>,
}

/// One retrieved document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Document id. Required by the output schema; absence is an engine fault.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,

    /// Stored document.
    #[serde(rename = "_source", default)]
    pub source: ArticleSource,
}

/// Stored article document.
///
/// Every attribute is optional. `null`, or a value of an unexpected JSON type, reads as
/// absent, so one odd document never fails the hits around it. Attributes outside the
/// output schema are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub authors: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub journal: Option<String>,

    /// Publication year, stored either as text or as a number.
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<Year>,

    #[serde(default, deserialize_with = "lenient")]
    pub field_of_science: Option<String>,

    /// Keyword lists keyed by language (e.g. `russian`).
    #[serde(default, deserialize_with = "lenient")]
    pub keywords: Option<Map<String, Value>>,

    #[serde(default, deserialize_with = "lenient")]
    pub annotation: Option<String>,

    /// Citation counts keyed by source database.
    #[serde(default, deserialize_with = "lenient")]
    pub citations: Option<Map<String, Value>>,

    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
}

/// Read any JSON value and keep it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
