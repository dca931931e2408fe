//! Facts API handlers

use super::models::{HandlerResponse, TriggerEvent};
use super::service::FactService;
use crate::error::Error;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Application state for facts handlers
#[derive(Clone)]
pub struct FactsState {
    pub service: Arc<FactService>,
}

/// API error for facts endpoints
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct FactsApiError {
    pub code: String,
    pub message: String,
}

impl FactsApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

fn error_response(e: Error) -> (StatusCode, Json<FactsApiError>) {
    let code = match e {
        Error::Store(_) => "STORE_UNAVAILABLE",
        _ => "INTERNAL_ERROR",
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FactsApiError::new(code, e.to_string())),
    )
}

impl IntoResponse for HandlerResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = status;

        let headers = response.headers_mut();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}

/// Serve a fact
///
/// GET /fact
pub async fn get_fact(
    State(state): State<FactsState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Result<HandlerResponse, (StatusCode, Json<FactsApiError>)> {
    let event = TriggerEvent {
        http_method: Some(method.to_string()),
        path: Some(uri.path().to_string()),
        headers: Some(
            headers
                .iter()
                .filter_map(|(name, value)| {
                    value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
                })
                .collect::<HashMap<_, _>>(),
        ),
        body: None,
    };

    state.service.handle(&event).await.map_err(|e| {
        error!("Fact request failed: {}", e);
        error_response(e)
    })
}

/// CORS preflight
///
/// OPTIONS /fact
pub async fn preflight() -> HandlerResponse {
    HandlerResponse::preflight()
}

/// Gateway proxy integration: event in, proxy response out
///
/// POST /invoke
pub async fn invoke(
    State(state): State<FactsState>,
    Json(event): Json<TriggerEvent>,
) -> Result<Json<HandlerResponse>, (StatusCode, Json<FactsApiError>)> {
    info!("Proxy invocation");

    match state.service.handle(&event).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!("Proxy invocation failed: {}", e);
            Err(error_response(e))
        }
    }
}
