//! LLM types — the provider-neutral generation boundary and its errors.

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The required API key environment variable is not set.
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The LLM provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The LLM provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for LlmError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingApiKey { .. } => "E_MISSING_API_KEY",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// GENERATION TRAIT
// =============================================================================

/// Provider-neutral async boundary to the generation capability: instruction
/// text plus user context in, free-form text out, no guarantee of
/// well-formedness. Trait object in `AppState` enables mocking in tests.
#[async_trait::async_trait]
pub trait GenerateText: Send + Sync {
    /// Run one generation call.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails, the response is
    /// malformed at the transport level, or the provider rejects the call.
    async fn generate(&self, system: &str, context: &str) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_covers_transient_failures_only() {
        assert!(LlmError::ApiRequest("timeout".into()).retryable());
        assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
        assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
        assert!(!LlmError::ApiResponse { status: 400, body: String::new() }.retryable());
        assert!(!LlmError::MissingApiKey { var: "X".into() }.retryable());
        assert!(!LlmError::ApiParse("bad".into()).retryable());
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(LlmError::ConfigParse(String::new()).error_code(), "E_CONFIG_PARSE");
        assert_eq!(
            LlmError::ApiResponse { status: 500, body: String::new() }.error_code(),
            "E_API_RESPONSE"
        );
    }
}
