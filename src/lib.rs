//! Cloud facts service
//!
//! Pulls a random cloud computing fact out of a DynamoDB table, has a
//! Bedrock-hosted model rewrite it to be a little funnier, and serves it as
//! JSON with permissive CORS headers.

pub mod api;
pub mod aws;
pub mod config;
pub mod error;
pub mod facts;
pub mod generation;
pub mod logging;
pub mod metrics;

pub use config::Config;
pub use error::{Error, Result};
pub use facts::{FactService, FactsState};
