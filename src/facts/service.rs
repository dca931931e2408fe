//! The fact pipeline: load, select, rephrase, respond

use super::models::{FactRecord, FactResponse, HandlerResponse, TriggerEvent, NO_FACTS_AVAILABLE};
use super::selector::{FactSelector, RandomSelector};
use super::store::FactSource;
use crate::config::GenerationConfig;
use crate::error::Result;
use crate::generation::{GenerationError, GenerationRequest, GenerationResult, TextGenerator};
use crate::metrics::{FactOutcome, GenerationOutcome, METRICS};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Serves one fact per invocation
///
/// Collaborators are injected so each can be swapped for a test double.
pub struct FactService {
    source: Arc<dyn FactSource>,
    generator: Arc<dyn TextGenerator>,
    selector: Arc<dyn FactSelector>,
    generation: GenerationConfig,
}

impl FactService {
    /// Create a service that picks facts at random
    pub fn new(
        source: Arc<dyn FactSource>,
        generator: Arc<dyn TextGenerator>,
        generation: GenerationConfig,
    ) -> Self {
        Self {
            source,
            generator,
            selector: Arc::new(RandomSelector),
            generation,
        }
    }

    /// Replace the selection strategy
    pub fn with_selector(mut self, selector: Arc<dyn FactSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Handle one trigger event
    ///
    /// Always a 200 unless the fact store cannot be read, in which case the
    /// store error is returned to the caller.
    pub async fn handle(&self, event: &TriggerEvent) -> Result<HandlerResponse> {
        debug!(
            method = event.http_method.as_deref().unwrap_or("-"),
            path = event.path.as_deref().unwrap_or("-"),
            "Fact requested"
        );

        let fact = self.next_fact().await?;
        HandlerResponse::ok(&fact)
    }

    /// Run the pipeline and return the response body
    pub async fn next_fact(&self) -> Result<FactResponse> {
        let records = self.load_facts().await?;

        let base_fact = match self.selector.select(&records) {
            Some(record) => record.text_or_placeholder().to_string(),
            None => {
                info!("No facts available");
                METRICS.record_fact_request(FactOutcome::Empty);
                return Ok(FactResponse::new(NO_FACTS_AVAILABLE));
            }
        };

        let fact = self.rephrase(base_fact).await;
        METRICS.record_fact_request(FactOutcome::Served);
        Ok(FactResponse::new(fact))
    }

    async fn load_facts(&self) -> Result<Vec<FactRecord>> {
        let start = Instant::now();
        let result = self.source.scan_all().await;
        METRICS.store_scan_duration.observe(start.elapsed().as_secs_f64());

        result.map_err(|e| {
            error!("Fact store read failed: {}", e);
            METRICS.record_fact_request(FactOutcome::StoreError);
            e
        })
    }

    /// Ask the model for a witty version, falling back to `base_fact`
    async fn rephrase(&self, base_fact: String) -> String {
        let request = GenerationRequest::witty_fact(&base_fact, &self.generation);

        let start = Instant::now();
        let outcome = self.generator.generate(&request).await;
        METRICS.generation_duration.observe(start.elapsed().as_secs_f64());

        match &outcome {
            Ok(result) if result.first_text().is_some() => {
                METRICS.record_generation(GenerationOutcome::Success)
            }
            Ok(_) => {
                debug!("Model returned no usable text block");
                METRICS.record_generation(GenerationOutcome::NoText)
            }
            Err(e) => {
                warn!("Text generation failed, serving original fact: {}", e);
                METRICS.record_generation(GenerationOutcome::Error)
            }
        }

        witty_or_original(outcome, base_fact)
    }
}

/// The first usable text block of a successful generation, else `original`
pub fn witty_or_original(
    outcome: std::result::Result<GenerationResult, GenerationError>,
    original: String,
) -> String {
    match outcome {
        Ok(result) => result.first_text().map(str::to_string).unwrap_or(original),
        Err(_) => original,
    }
}
