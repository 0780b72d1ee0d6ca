//! Article record returned by `GET /search`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::SearchHit;
use crate::error::{ClientError, ClientResult};

/// Publication year as stored in the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Number(Number),
    Text(String),
}

impl Default for Year {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A search result in the public schema.
///
/// Every field is always serialized, in declaration order. Attributes missing from the
/// stored document take their empty default independently of each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub journal: String,
    pub year: Year,
    pub field_of_science: String,
    pub keywords: Map<String, Value>,
    pub annotation: String,
    pub citations: Map<String, Value>,
    pub link: String,
}

impl TryFrom<SearchHit> for ArticleRecord {
    type Error = ClientError;

    fn try_from(hit: SearchHit) -> ClientResult<Self> {
        let id = hit.id.ok_or(ClientError::MissingId)?;
        let source = hit.source;

        Ok(Self {
            id,
            title: source.title.unwrap_or_default(),
            authors: source.authors.unwrap_or_default(),
            journal: source.journal.unwrap_or_default(),
            year: source.year.unwrap_or_default(),
            field_of_science: source.field_of_science.unwrap_or_default(),
            keywords: source.keywords.unwrap_or_default(),
            annotation: source.annotation.unwrap_or_default(),
            citations: source.citations.unwrap_or_default(),
            link: source.link.unwrap_or_default(),
        })
    }
}

/// Normalize hits in engine order.
///
/// # Errors
///
/// Fails with [`ClientError::MissingId`] on the first hit without an id.
pub fn normalize_hits(hits: Vec<SearchHit>) -> ClientResult<Vec<ArticleRecord>> {
    hits.into_iter().map(ArticleRecord::try_from).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn hit(value: Value) -> SearchHit {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_missing_fields_default_independently() {
        let record = ArticleRecord::try_from(hit(json!({
            "_id": "a1",
            "_source": {"title": "Quantum dots", "journal": "JETP"}
        })))
        .unwrap();

        assert_eq!(record.id, "a1");
        assert_eq!(record.title, "Quantum dots");
        assert_eq!(record.journal, "JETP");
        assert_eq!(record.year, Year::Text(String::new()));
        assert_eq!(record.link, "");
        assert!(record.keywords.is_empty());
        assert!(record.citations.is_empty());
    }

    #[test]
    fn test_null_reads_as_absent() {
        let record =
            ArticleRecord::try_from(hit(json!({"_id": "a2", "_source": {"authors": null}})))
                .unwrap();
        assert_eq!(record.authors, "");
    }

    #[test]
    fn test_numeric_year_is_kept_numeric() {
        let record =
            ArticleRecord::try_from(hit(json!({"_id": "a3", "_source": {"year": 2019}}))).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap()["year"], json!(2019));
        assert_eq!(record.year.to_string(), "2019");
    }

    #[test]
    fn test_missing_id_is_an_engine_fault() {
        let result = ArticleRecord::try_from(hit(json!({"_source": {"title": "x"}})));
        assert!(matches!(result, Err(ClientError::MissingId)));
    }

    #[test]
    fn test_normalize_preserves_order() {
        let hits = vec![
            hit(json!({"_id": "z"})),
            hit(json!({"_id": "a"})),
            hit(json!({"_id": "m"})),
        ];
        let ids: Vec<_> = normalize_hits(hits).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["z", "a", "m"]);
    }
}
