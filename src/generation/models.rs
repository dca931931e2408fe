//! Request and response types for the Bedrock messages API

use crate::config::GenerationConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role tag for the single prompt message
pub const ROLE_USER: &str = "user";

/// Content block kind that carries text
pub const TEXT_BLOCK: &str = "text";

/// Build the instruction that asks the model for a witty rendering
pub fn witty_prompt(fact: &str) -> String {
    format!(
        "Take this cloud computing fact and make it fun and engaging in 1–2 sentences maximum. \
         Keep it short and witty: {}",
        fact
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Outbound invocation body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl GenerationRequest {
    /// Request a witty rendering of `fact`
    pub fn witty_fact(fact: &str, config: &GenerationConfig) -> Self {
        Self {
            anthropic_version: config.anthropic_version.clone(),
            max_tokens: config.max_tokens,
            messages: vec![ChatMessage {
                role: ROLE_USER.to_string(),
                content: witty_prompt(fact),
            }],
            temperature: config.temperature,
        }
    }
}

/// One typed unit of model output
///
/// Both fields are optional on the wire and `text` may be any JSON value;
/// `GenerationResult::first_text` decides what is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub text: Value,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: TEXT_BLOCK.to_string(),
            text: Value::String(text.into()),
        }
    }

    /// A block of some other kind, with no text
    pub fn other(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: Value::Null,
        }
    }
}

/// Inbound invocation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl GenerationResult {
    pub fn from_blocks(content: Vec<ContentBlock>) -> Self {
        Self { content }
    }

    /// First non-blank text block, trimmed
    ///
    /// Blocks of other kinds are skipped. A text block whose `text` is
    /// missing or not a string makes the whole result unusable.
    pub fn first_text(&self) -> Option<&str> {
        for block in self.content.iter().filter(|block| block.kind == TEXT_BLOCK) {
            let text = block.text.as_str()?.trim();
            if !text.is_empty() {
                return Some(text);
            }
        }
        None
    }
}
