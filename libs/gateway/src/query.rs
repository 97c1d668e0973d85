//! Query predicates for document listing
//!
//! The backend accepts repeated `queries[]` parameters, each a JSON-encoded
//! predicate. Equality, descending order, limit, and full-text search are
//! the only shapes the gateway needs; match semantics beyond that are
//! defined by the backend.

use serde::Serialize;

/// A single query predicate sent to the document database
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum DocumentQuery {
    /// Attribute equals the given value
    Equal {
        attribute: String,
        value: serde_json::Value,
    },
    /// Order results by the given attribute, newest first
    OrderDesc { attribute: String },
    /// Return at most `count` documents
    Limit { count: u32 },
    /// Full-text match on the given attribute
    Search { attribute: String, term: String },
}

impl DocumentQuery {
    pub fn equal(attribute: &str, value: impl Into<serde_json::Value>) -> Self {
        DocumentQuery::Equal {
            attribute: attribute.to_string(),
            value: value.into(),
        }
    }

    pub fn order_desc(attribute: &str) -> Self {
        DocumentQuery::OrderDesc {
            attribute: attribute.to_string(),
        }
    }

    pub fn limit(count: u32) -> Self {
        DocumentQuery::Limit { count }
    }

    pub fn search(attribute: &str, term: &str) -> Self {
        DocumentQuery::Search {
            attribute: attribute.to_string(),
            term: term.to_string(),
        }
    }

    /// JSON encoding used as the `queries[]` parameter value
    pub fn to_param(&self) -> String {
        serde_json::to_string(self).expect("serializing a query predicate cannot fail")
    }
}
