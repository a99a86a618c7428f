//! Request helper shared by the JSON providers.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ProviderError;

/// Longest slice of an error body kept in an error message.
const MAX_ERROR_BODY: usize = 300;

/// Send a request and decode a JSON success body.
///
/// Non-2xx responses become `ProviderError::Api` carrying the provider's
/// own message when one can be found in the body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::Unauthorized { provider });
    }

    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| ProviderError::Json {
        message: e.to_string(),
    })
}

/// Pull a human-readable message out of an error body.
///
/// Providers disagree on the shape: `{"message": ..}`, `{"error": ..}`,
/// `{"error": {"message": ..}}`, `{"status": {"message": ..}}` or plain text.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let candidates = [
            value.get("message"),
            value.get("error").and_then(|e| e.get("message")),
            value.get("error"),
            value.get("status").and_then(|s| s.get("message")),
        ];
        if let Some(msg) = candidates.into_iter().flatten().find_map(Value::as_str) {
            return msg.to_string();
        }
    }
    body.trim().chars().take(MAX_ERROR_BODY).collect()
}
