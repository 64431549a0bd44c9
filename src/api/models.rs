use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response as seen by the caller: status code plus the decoded body.
///
/// Non-JSON bodies are carried as a JSON string; an empty body is `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub data: Value,
}

impl RawResponse {
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        let data = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
        };
        Self { status, data }
    }

    /// Take the `data` field out of a `{ "data": ... }` envelope.
    pub fn into_envelope_data(self) -> Option<Value> {
        match self.data {
            Value::Object(mut map) => map.remove("data"),
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct ReloadPathRequest<'a> {
    pub path: &'a str,
}

#[derive(Serialize)]
pub struct DeleteSourcesRequest<'a> {
    pub sources: Vec<&'a str>,
}

/// Knowledge search as callers describe it.
///
/// Every field is optional; unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchQuery {
    pub search_term: Option<String>,
    pub search_type: Option<String>,
    pub document_search_type: Option<String>,
    pub cutoff_score: Option<f64>,
    pub document_count: Option<u32>,
}

impl SearchQuery {
    pub fn new(search_term: impl Into<String>, search_type: impl Into<String>) -> Self {
        Self {
            search_term: Some(search_term.into()),
            search_type: Some(search_type.into()),
            ..Default::default()
        }
    }

    pub fn document_search_type(mut self, kind: impl Into<String>) -> Self {
        self.document_search_type = Some(kind.into());
        self
    }

    pub fn cutoff_score(mut self, score: f64) -> Self {
        self.cutoff_score = Some(score);
        self
    }

    pub fn document_count(mut self, count: u32) -> Self {
        self.document_count = Some(count);
        self
    }
}

/// Wire form of [`SearchQuery`].
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_term: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_search_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_cutoff_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_count: Option<u32>,
}

impl<'a> From<&'a SearchQuery> for SearchRequest<'a> {
    fn from(query: &'a SearchQuery) -> Self {
        Self {
            search_term: query.search_term.as_deref(),
            search_type: query.search_type.as_deref(),
            document_search_type: query.document_search_type.as_deref(),
            document_cutoff_score: query.cutoff_score,
            document_count: query.document_count,
        }
    }
}
