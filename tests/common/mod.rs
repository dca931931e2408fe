//! Test doubles shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use cloud_facts::config::GenerationConfig;
use cloud_facts::error::{Error, Result};
use cloud_facts::facts::{FactRecord, FactService, FactSource, FnSelector};
use cloud_facts::generation::{GenerationError, GenerationRequest, GenerationResult, TextGenerator};
use std::sync::{Arc, Mutex};

/// In-memory fact table
pub struct StubSource {
    records: Option<Vec<FactRecord>>,
}

impl StubSource {
    pub fn with(records: Vec<FactRecord>) -> Self {
        Self { records: Some(records) }
    }

    pub fn failing() -> Self {
        Self { records: None }
    }
}

#[async_trait]
impl FactSource for StubSource {
    async fn scan_all(&self) -> Result<Vec<FactRecord>> {
        self.records
            .clone()
            .ok_or_else(|| Error::Store("Status 400: ResourceNotFoundException".to_string()))
    }
}

/// Scripted text generator that records every request
pub struct StubGenerator {
    reply: Option<GenerationResult>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl StubGenerator {
    pub fn replying(result: GenerationResult) -> Self {
        Self {
            reply: Some(result),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &GenerationRequest) -> std::result::Result<GenerationResult, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| GenerationError::UpstreamError("Status 503: unavailable".to_string()))
    }
}

/// Service over the given doubles, always picking the record at `index`
pub fn service(source: StubSource, generator: Arc<StubGenerator>, index: usize) -> FactService {
    FactService::new(Arc::new(source), generator, GenerationConfig::default())
        .with_selector(Arc::new(FnSelector::new(move |_| index)))
}

pub fn sample_facts() -> Vec<FactRecord> {
    vec![
        FactRecord::new("1", "Clouds store data."),
        FactRecord::new("2", "S3 launched in 2006."),
        FactRecord::without_text("3"),
    ]
}
