//! Text generation through Amazon Bedrock
//!
//! Speaks the Anthropic messages protocol used by Claude models hosted on
//! Bedrock Runtime. Only a single synchronous invocation is supported.

pub mod client;
pub mod models;

pub use client::{BedrockClient, GenerationError, TextGenerator};
pub use models::{ChatMessage, ContentBlock, GenerationRequest, GenerationResult};
