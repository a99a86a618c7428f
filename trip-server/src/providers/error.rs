//! Provider error types.

use std::sync::Arc;

/// Errors that can occur when talking to an external provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials rejected
    #[error("unauthorized by {provider}: check API credentials")]
    Unauthorized { provider: &'static str },

    /// Provider returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Request succeeded but matched nothing
    #[error("no results for {query}")]
    NoResults { query: String },

    /// One failure handed to every caller waiting on the same request
    #[error(transparent)]
    Shared(Arc<ProviderError>),
}

impl ProviderError {
    /// The upstream HTTP status, when the provider answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            ProviderError::Http(e) => e.status().map(|s| s.as_u16()),
            ProviderError::Shared(inner) => inner.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProviderError::Api {
            status: 429,
            message: "API key limit reached".into(),
        };
        assert_eq!(err.to_string(), "API error 429: API key limit reached");
        assert_eq!(err.status(), Some(429));

        let err = ProviderError::Unauthorized {
            provider: "weatherbit",
        };
        assert_eq!(
            err.to_string(),
            "unauthorized by weatherbit: check API credentials"
        );
        assert_eq!(err.status(), None);

        let err = ProviderError::NoResults {
            query: "Atlantis".into(),
        };
        assert_eq!(err.to_string(), "no results for Atlantis");
    }

    #[test]
    fn shared_error_looks_like_the_original() {
        let err = ProviderError::Shared(Arc::new(ProviderError::Api {
            status: 503,
            message: "maintenance".into(),
        }));
        assert_eq!(err.to_string(), "API error 503: maintenance");
        assert_eq!(err.status(), Some(503));
    }
}
