//! Fact store backed by a DynamoDB table

use super::models::FactRecord;
use crate::aws::{service_endpoint, AwsCredentials, SigV4Signer};
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

const SCAN_TARGET: &str = "DynamoDB_20120810.Scan";
const AMZ_JSON: &str = "application/x-amz-json-1.0";

/// Read access to the full fact collection
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Read every record; no filtering, no pagination
    async fn scan_all(&self) -> Result<Vec<FactRecord>>;
}

/// DynamoDB `Scan` over the fact table
pub struct DynamoFactStore {
    http: Client,
    signer: SigV4Signer,
    endpoint: String,
    config: StoreConfig,
}

impl DynamoFactStore {
    /// Create a new fact store client
    pub fn new(config: &StoreConfig, region: &str, credentials: AwsCredentials) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            signer: SigV4Signer::new(credentials, region, "dynamodb"),
            endpoint: service_endpoint(config.endpoint.as_deref(), "dynamodb", region),
            config: config.clone(),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[async_trait]
impl FactSource for DynamoFactStore {
    async fn scan_all(&self) -> Result<Vec<FactRecord>> {
        let url = Url::parse(&format!("{}/", self.endpoint))
            .map_err(|e| Error::Store(format!("Bad endpoint {}: {}", self.endpoint, e)))?;
        let body = serde_json::to_vec(&serde_json::json!({ "TableName": self.config.table_name }))
            .map_err(|e| Error::Store(format!("Failed to encode scan request: {}", e)))?;

        debug!("Scanning fact table {}", self.config.table_name);

        let content_headers = [("content-type", AMZ_JSON), ("x-amz-target", SCAN_TARGET)];
        let auth_headers = self
            .signer
            .sign("POST", &url, &content_headers, &body, chrono::Utc::now())
            .map_err(|e| Error::Store(format!("Failed to sign scan request: {}", e)))?;

        let mut req = self.http.post(url).body(body);
        for (name, value) in content_headers {
            req = req.header(name, value);
        }
        for (name, value) in auth_headers {
            req = req.header(name, value);
        }

        let response = req
            .send()
            .await
            .map_err(|e| Error::Store(format!("Scan request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Store(format!("Status {}: {}", status, error_text)));
        }

        let output: ScanOutput = response
            .json()
            .await
            .map_err(|e| Error::Store(format!("Failed to decode scan output: {}", e)))?;

        if output.last_evaluated_key.is_some() {
            warn!(
                "Fact table {} has more items than one scan page; only the first page is used",
                self.config.table_name
            );
        }

        let facts = output.into_records();
        info!("Scan returned {} facts", facts.len());
        Ok(facts)
    }
}

/// DynamoDB attribute value; only the scalar kinds a fact uses are read
#[derive(Debug, Default, Deserialize)]
struct AttributeValue {
    #[serde(rename = "S")]
    s: Option<String>,
    #[serde(rename = "N")]
    n: Option<String>,
}

impl AttributeValue {
    fn into_string(self) -> Option<String> {
        self.s.or(self.n)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ScanOutput {
    #[serde(default)]
    items: Vec<HashMap<String, AttributeValue>>,
    #[serde(default)]
    last_evaluated_key: Option<serde_json::Value>,
}

impl ScanOutput {
    fn into_records(self) -> Vec<FactRecord> {
        self.items.into_iter().map(record_from_item).collect()
    }
}

fn record_from_item(mut item: HashMap<String, AttributeValue>) -> FactRecord {
    let fact_id = item
        .remove("FactID")
        .and_then(AttributeValue::into_string)
        .unwrap_or_default();
    let fact_text = item.remove("FactText").and_then(AttributeValue::into_string);

    FactRecord { fact_id, fact_text }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_scan_output() {
        let output: ScanOutput = serde_json::from_value(json!({
            "Count": 3,
            "ScannedCount": 3,
            "Items": [
                {"FactID": {"S": "1"}, "FactText": {"S": "Clouds store data."}},
                {"FactID": {"N": "2"}, "FactText": {"S": "S3 launched in 2006."}, "Tags": {"L": []}},
                {"FactID": {"S": "3"}}
            ]
        }))
        .unwrap();

        assert!(output.last_evaluated_key.is_none());
        let records = output.into_records();
        assert_eq!(
            records,
            vec![
                FactRecord::new("1", "Clouds store data."),
                FactRecord::new("2", "S3 launched in 2006."),
                FactRecord::without_text("3"),
            ]
        );
    }

    #[test]
    fn test_decode_empty_scan() {
        let output: ScanOutput = serde_json::from_value(json!({"Count": 0, "ScannedCount": 0})).unwrap();
        assert!(output.into_records().is_empty());
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let output: ScanOutput = serde_json::from_value(json!({
            "Items": [{"FactID": {"S": "9"}, "FactText": {"N": "42"}}],
            "LastEvaluatedKey": {"FactID": {"S": "9"}}
        }))
        .unwrap();

        assert!(output.last_evaluated_key.is_some());
        assert_eq!(output.into_records(), vec![FactRecord::new("9", "42")]);
    }

    #[test]
    fn test_list_text_counts_as_missing() {
        let output: ScanOutput = serde_json::from_value(json!({
            "Items": [{"FactID": {"S": "4"}, "FactText": {"L": [{"S": "nested"}]}}]
        }))
        .unwrap();

        assert_eq!(output.into_records(), vec![FactRecord::without_text("4")]);
    }

    #[tokio::test]
    async fn test_signing_failure_is_a_store_error() {
        let config = StoreConfig {
            endpoint: Some("file:///tmp".to_string()),
            ..StoreConfig::default()
        };
        let store = DynamoFactStore::new(&config, "us-east-1", AwsCredentials::new("AKID", "secret")).unwrap();

        let err = store.scan_all().await.unwrap_err();

        assert!(matches!(err, Error::Store(_)), "unexpected error: {:?}", err);
        assert!(err.to_string().contains("sign"));
    }
}
