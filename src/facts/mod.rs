//! Cloud facts
//!
//! Serves one fact per request:
//! - full scan of the fact table
//! - uniform random pick
//! - best-effort witty rewrite by the text model, original text on failure
//! - JSON body with fixed CORS headers, always 200

pub mod handlers;
pub mod models;
pub mod selector;
pub mod service;
pub mod store;

pub use handlers::{get_fact, invoke, preflight, FactsState};
pub use models::{FactRecord, FactResponse, HandlerResponse, TriggerEvent};
pub use selector::{FactSelector, FnSelector, RandomSelector};
pub use service::FactService;
pub use store::{DynamoFactStore, FactSource};
