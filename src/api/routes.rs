//! Router assembly

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers::{health, metrics};
use crate::facts::{handlers as fact_handlers, FactsState};

/// Build the application router
pub fn build_router(facts_state: FactsState) -> Router {
    Router::new()
        .route(
            "/fact",
            get(fact_handlers::get_fact).options(fact_handlers::preflight),
        )
        .route("/invoke", post(fact_handlers::invoke))
        .with_state(facts_state)
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
}
