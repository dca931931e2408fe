//! Bedrock Runtime client

use super::models::{GenerationRequest, GenerationResult};
use crate::aws::sigv4::uri_encode;
use crate::aws::{service_endpoint, AwsCredentials, SigV4Signer};
use crate::config::GenerationConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

/// Text generation error types
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// A hosted text-generation model
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one generation; no retries
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError>;
}

/// Bedrock `InvokeModel` client
pub struct BedrockClient {
    http: Client,
    signer: SigV4Signer,
    endpoint: String,
    model_id: String,
}

impl BedrockClient {
    /// Create a new Bedrock client
    pub fn new(
        config: &GenerationConfig,
        region: &str,
        credentials: AwsCredentials,
    ) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            signer: SigV4Signer::new(credentials, region, "bedrock"),
            endpoint: service_endpoint(config.endpoint.as_deref(), "bedrock-runtime", region),
            model_id: config.model_id.clone(),
        })
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    fn invoke_url(&self) -> Result<Url, GenerationError> {
        let url = format!("{}/model/{}/invoke", self.endpoint, uri_encode(&self.model_id));
        Url::parse(&url).map_err(|e| GenerationError::RequestFailed(format!("Bad URL {}: {}", url, e)))
    }
}

#[async_trait]
impl TextGenerator for BedrockClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerationError> {
        let url = self.invoke_url()?;
        let body = serde_json::to_vec(request)
            .map_err(|e| GenerationError::RequestFailed(e.to_string()))?;

        debug!("Invoking model {}: {} byte body", self.model_id, body.len());

        let content_headers = [("content-type", "application/json"), ("accept", "application/json")];
        let auth_headers = self
            .signer
            .sign("POST", &url, &content_headers, &body, chrono::Utc::now())
            .map_err(|e| GenerationError::Signing(e.to_string()))?;

        let mut req = self.http.post(url).body(body);
        for (name, value) in content_headers {
            req = req.header(name, value);
        }
        for (name, value) in auth_headers {
            req = req.header(name, value);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(e.to_string())
            } else {
                GenerationError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenerationError::UpstreamError(format!(
                "Status {}: {}",
                status, error_text
            )));
        }

        response
            .json::<GenerationResult>()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_url_encodes_model_id() {
        let client = BedrockClient::new(
            &GenerationConfig::default(),
            "us-east-1",
            AwsCredentials::new("AKID", "secret"),
        )
        .unwrap();

        assert_eq!(
            client.invoke_url().unwrap().as_str(),
            "https://bedrock-runtime.us-east-1.amazonaws.com/model/anthropic.claude-3-5-sonnet-20240620-v1%3A0/invoke"
        );
    }
}
