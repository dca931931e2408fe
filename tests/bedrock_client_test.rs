//! Bedrock client against a mock Bedrock Runtime endpoint

use cloud_facts::aws::AwsCredentials;
use cloud_facts::config::GenerationConfig;
use cloud_facts::generation::{BedrockClient, GenerationError, GenerationRequest, TextGenerator};
use mockito::Matcher;
use serde_json::json;

const INVOKE_PATH: &str = r"^/model/anthropic\.claude-3-5-sonnet-20240620-v1(%3A|:)0/invoke$";

fn client_for(server: &mockito::ServerGuard) -> BedrockClient {
    let config = GenerationConfig {
        endpoint: Some(server.url()),
        ..GenerationConfig::default()
    };
    BedrockClient::new(&config, "us-east-1", AwsCredentials::new("AKIDEXAMPLE", "secret")).unwrap()
}

fn request() -> GenerationRequest {
    GenerationRequest::witty_fact("Clouds store data.", &GenerationConfig::default())
}

#[tokio::test]
async fn test_invoke_sends_signed_messages_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(INVOKE_PATH.to_string()))
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_header("x-amz-date", Matcher::Regex(r"^\d{8}T\d{6}Z$".to_string()))
        .match_header(
            "authorization",
            Matcher::Regex(r"^AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/\d{8}/us-east-1/bedrock/aws4_request, ".to_string()),
        )
        .match_body(Matcher::PartialJson(json!({
            "anthropic_version": "bedrock-2023-05-31",
            "max_tokens": 100
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "Clouds: where your data parties 24/7."}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 40, "output_tokens": 12}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let result = client_for(&server).generate(&request()).await.unwrap();

    assert_eq!(result.first_text(), Some("Clouds: where your data parties 24/7."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Regex(INVOKE_PATH.to_string()))
        .with_status(503)
        .with_body(r#"{"message":"ServiceUnavailableException"}"#)
        .create_async()
        .await;

    let err = client_for(&server).generate(&request()).await.unwrap_err();

    match err {
        GenerationError::UpstreamError(message) => {
            assert!(message.contains("503"));
            assert!(message.contains("ServiceUnavailableException"));
        }
        other => panic!("Expected UpstreamError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_body_is_invalid_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Regex(INVOKE_PATH.to_string()))
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = client_for(&server).generate(&request()).await.unwrap_err();

    assert!(matches!(err, GenerationError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_request_failure() {
    let config = GenerationConfig {
        endpoint: Some("http://127.0.0.1:1".to_string()),
        ..GenerationConfig::default()
    };
    let client = BedrockClient::new(&config, "us-east-1", AwsCredentials::new("AKID", "secret")).unwrap();

    let err = client.generate(&request()).await.unwrap_err();

    assert!(matches!(
        err,
        GenerationError::RequestFailed(_) | GenerationError::Timeout(_)
    ));
}
