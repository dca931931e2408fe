use crate::config::AwsConfig;
use crate::error::{Error, Result};
use secrecy::SecretString;

/// Static AWS credentials
#[derive(Debug, Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub session_token: Option<SecretString>,
}

impl AwsCredentials {
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: SecretString::new(secret_access_key.into()),
            session_token: None,
        }
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(SecretString::new(token.into()));
        self
    }

    /// Build credentials from the resolved AWS configuration
    pub fn from_config(config: &AwsConfig) -> Result<Self> {
        let access_key_id = config
            .access_key_id
            .clone()
            .ok_or_else(|| Error::Config("AWS access key id is not set".to_string()))?;
        let secret_access_key = config
            .secret_access_key
            .clone()
            .ok_or_else(|| Error::Config("AWS secret access key is not set".to_string()))?;

        Ok(Self {
            access_key_id,
            secret_access_key,
            session_token: config.session_token.clone(),
        })
    }
}
