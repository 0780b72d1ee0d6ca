//! Translation of free-text input into Elasticsearch query DSL.
//!
//! Tokenizing, scoring and the OR across fields belong to the engine. This module only
//! decides which fields are queried and that every token must match.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::fields;

/// Engine-level query expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuredQuery {
    /// Selects the whole index.
    MatchAll(MatchAll),
    /// Free text matched across several fields.
    MultiMatch(MultiMatch),
    /// Exact value on a single field.
    Term(Term),
}

/// Body of a `match_all` query; always `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchAll {}

/// Body of a `multi_match` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiMatch {
    /// User text, tokenized by the engine.
    pub query: String,
    /// Fields searched, in order.
    pub fields: &'static [&'static str],
    /// How tokens combine.
    pub operator: Operator,
}

/// Token combination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Every token must match.
    And,
    /// Any token may match.
    Or,
}

/// Exact-match filter, serialized as `{"<field>": <value>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub field: &'static str,
    pub value: i64,
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field, &self.value)?;
        map.end()
    }
}

impl StructuredQuery {
    /// Returns true for the select-everything variant.
    #[must_use]
    pub const fn is_match_all(&self) -> bool {
        matches!(self, Self::MatchAll(_))
    }
}

/// Build the search query for optional user text.
///
/// Absent or empty text selects the whole index. Anything else becomes an AND
/// `multi_match` over [`fields::SEARCH`].
#[must_use]
pub fn build(text: Option<&str>) -> StructuredQuery {
    match text {
        Some(text) if !text.is_empty() => StructuredQuery::MultiMatch(MultiMatch {
            query: text.to_string(),
            fields: fields::SEARCH,
            operator: Operator::And,
        }),
        _ => StructuredQuery::MatchAll(MatchAll {}),
    }
}

/// Exact-match query selecting one topic.
#[must_use]
pub fn topic_filter(topic_number: i64) -> StructuredQuery {
    StructuredQuery::Term(Term { field: fields::TOPIC_NUMBER, value: topic_number })
}
