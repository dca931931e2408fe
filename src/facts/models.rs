//! Data models for the facts pipeline

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Body text when the fact table is empty
pub const NO_FACTS_AVAILABLE: &str = "No facts available in DynamoDB.";

/// Stand-in for a record without a `FactText` attribute
pub const MISSING_FACT_TEXT: &str = "No FactText found";

/// Headers attached to every handler response
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

/// A stored cloud fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactRecord {
    #[serde(rename = "FactID")]
    pub fact_id: String,
    #[serde(rename = "FactText", default, skip_serializing_if = "Option::is_none")]
    pub fact_text: Option<String>,
}

impl FactRecord {
    pub fn new(fact_id: impl Into<String>, fact_text: impl Into<String>) -> Self {
        Self {
            fact_id: fact_id.into(),
            fact_text: Some(fact_text.into()),
        }
    }

    /// A record whose text attribute is absent
    pub fn without_text(fact_id: impl Into<String>) -> Self {
        Self {
            fact_id: fact_id.into(),
            fact_text: None,
        }
    }

    /// The fact text, or the placeholder when the attribute is missing
    pub fn text_or_placeholder(&self) -> &str {
        self.fact_text.as_deref().unwrap_or(MISSING_FACT_TEXT)
    }
}

/// Response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactResponse {
    pub fact: String,
}

impl FactResponse {
    pub fn new(fact: impl Into<String>) -> Self {
        Self { fact: fact.into() }
    }
}

/// Incoming trigger event in the API gateway proxy shape
///
/// Nothing in here influences the fact that gets served.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
}

/// Handler return value in the API gateway proxy shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HandlerResponse {
    /// 200 carrying `fact` as JSON
    pub fn ok(fact: &FactResponse) -> Result<Self> {
        Ok(Self {
            status_code: 200,
            headers: response_headers(),
            body: serde_json::to_string(fact)?,
        })
    }

    /// 200 with an empty body, for CORS preflight
    pub fn preflight() -> Self {
        Self {
            status_code: 200,
            headers: response_headers(),
            body: String::new(),
        }
    }
}

pub fn response_headers() -> BTreeMap<String, String> {
    RESPONSE_HEADERS
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
