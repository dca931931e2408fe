//! Layered configuration
//!
//! Values are resolved in order: built-in defaults, an optional TOML file,
//! `CLOUD_FACTS__<SECTION>__<KEY>` environment variables, and finally the
//! standard `AWS_*` variables.

use crate::error::Result;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "CLOUD_FACTS_CONFIG";

/// Config file used when `CLOUD_FACTS_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// AWS region and static credentials
#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<SecretString>,
    #[serde(default)]
    pub session_token: Option<SecretString>,
}

/// DynamoDB fact table
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Override for the regional endpoint (LocalStack, tests)
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Bedrock text generation
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model_id")]
    pub model_id: String,
    #[serde(default = "default_anthropic_version")]
    pub anthropic_version: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Region for the model runtime; `aws.region` when unset
    #[serde(default)]
    pub region: Option<String>,
    /// Request timeout; the HTTP client default applies when unset
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }
fn default_region() -> String { "us-east-1".to_string() }
fn default_table_name() -> String { "CloudFacts".to_string() }
fn default_model_id() -> String { "anthropic.claude-3-5-sonnet-20240620-v1:0".to_string() }
fn default_anthropic_version() -> String { "bedrock-2023-05-31".to_string() }
fn default_max_tokens() -> u32 { 100 }
fn default_temperature() -> f32 { 0.7 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
            endpoint: None,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            anthropic_version: default_anthropic_version(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            endpoint: None,
            region: None,
            timeout_ms: None,
        }
    }
}

impl Config {
    /// Load configuration from the default file location and the environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::from_file(&path)
    }

    /// Load configuration from `path` (missing file is fine) and the environment
    pub fn from_file(path: &str) -> Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("CLOUD_FACTS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config.from_env())
    }

    /// Parse configuration from a TOML string, without consulting the environment
    pub fn from_toml(source: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Apply the standard AWS environment variables
    pub fn from_env(mut self) -> Self {
        if let Ok(val) = std::env::var("AWS_DEFAULT_REGION") {
            self.aws.region = val;
        }

        // AWS_REGION wins over AWS_DEFAULT_REGION
        if let Ok(val) = std::env::var("AWS_REGION") {
            self.aws.region = val;
        }

        if let Ok(val) = std::env::var("AWS_ACCESS_KEY_ID") {
            self.aws.access_key_id = Some(val);
        }

        if let Ok(val) = std::env::var("AWS_SECRET_ACCESS_KEY") {
            self.aws.secret_access_key = Some(SecretString::new(val));
        }

        if let Ok(val) = std::env::var("AWS_SESSION_TOKEN") {
            self.aws.session_token = Some(SecretString::new(val));
        }

        self
    }
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// The model runtime region, or `fallback` when none is configured
    pub fn region_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.region.as_deref().unwrap_or(fallback)
    }
}
