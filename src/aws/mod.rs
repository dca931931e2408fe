//! AWS credentials and Signature Version 4 request signing
//!
//! Both upstreams (DynamoDB and Bedrock Runtime) are plain JSON-over-HTTPS
//! APIs, so requests are built with reqwest and signed here.

pub mod credentials;
pub mod sigv4;

pub use credentials::AwsCredentials;
pub use sigv4::SigV4Signer;

/// Resolve a service endpoint, honouring an explicit override
pub fn service_endpoint(override_url: Option<&str>, service_host: &str, region: &str) -> String {
    match override_url {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => format!("https://{}.{}.amazonaws.com", service_host, region),
    }
}
