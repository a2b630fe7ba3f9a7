//! Response handling shared by the backend clients.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Builds the HTTP client shared by both service adapters.
pub fn build_client(request_timeout_secs: Option<u64>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();
    if let Some(secs) = request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

/// Sends the request and maps non-success statuses to errors.
///
/// A 404 becomes `CoreError::NotFound(not_found)` when a message is given,
/// a `Transport` error otherwise.
pub(crate) async fn execute(
    request: RequestBuilder,
    not_found: Option<String>,
) -> Result<Response, CoreError> {
    let response = request.send().await.map_err(|e| {
        error!("Backend request failed: {}", e);
        CoreError::Connection(e.to_string())
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            error!("Failed to read backend error body: {}", e);
            String::new()
        }
    };

    if status == StatusCode::NOT_FOUND
        && let Some(message) = not_found
    {
        return Err(CoreError::NotFound(message));
    }

    let message = error_message(&body);
    error!("Backend returned error: {} - {}", status, message);

    Err(CoreError::Transport {
        status: status.as_u16(),
        message,
    })
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CoreError> {
    response.json::<T>().await.map_err(|e| {
        error!("Failed to parse backend response: {}", e);
        CoreError::InvalidResponse(e.to_string())
    })
}

/// Server-provided message: the JSON `message` field when present, the raw body otherwise.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| body.trim().to_string())
}
