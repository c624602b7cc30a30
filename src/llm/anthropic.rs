//! Anthropic Messages API client.
//!
//! Thin HTTP wrapper for `/v1/messages`: system instructions plus one user
//! message, text blocks out. Pure parsing in `parse_response` for
//! testability.

use std::time::Duration;

use super::config::LlmTimeouts;
use super::types::LlmError;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

// =============================================================================
// CLIENT
// =============================================================================

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(api_key: String, max_tokens: u32, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key, max_tokens })
    }

    pub async fn generate(
        &self,
        model: &str,
        system: &str,
        context: &str,
    ) -> Result<String, LlmError> {
        let body = ApiRequest {
            model,
            max_tokens: self.max_tokens,
            system,
            messages: [MessageBody { role: "user", content: context }],
        };

        let response = self
            .http
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [MessageBody<'a>; 1],
}

#[derive(serde::Serialize)]
struct MessageBody<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(serde::Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Unknown,
}

// =============================================================================
// PARSING
// =============================================================================

/// Join the response's text blocks, ignoring anything else (thinking blocks
/// and future block types).
fn parse_response(json: &str) -> Result<String, LlmError> {
    let api: ApiResponse =
        serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text: String = api
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Unknown => None,
        })
        .collect();

    if text.is_empty() {
        return Err(LlmError::ApiParse("no text blocks in response".into()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_joins_text_blocks() {
        let json = r#"{"content":[{"type":"text","text":"{\"canvas_"},{"type":"text","text":"objects\":[]}"}],"model":"claude","stop_reason":"end_turn"}"#;
        assert_eq!(parse_response(json).unwrap(), r#"{"canvas_objects":[]}"#);
    }

    #[test]
    fn parse_skips_unknown_blocks() {
        let json = r#"{"content":[{"type":"thinking","thinking":"hmm"},{"type":"text","text":"ok"}]}"#;
        assert_eq!(parse_response(json).unwrap(), "ok");
    }

    #[test]
    fn parse_no_text_is_an_error() {
        let json = r#"{"content":[{"type":"thinking","thinking":"only"}]}"#;
        assert!(matches!(parse_response(json), Err(LlmError::ApiParse(_))));
    }

    #[test]
    fn parse_invalid_json_is_an_error() {
        assert!(matches!(parse_response("nope"), Err(LlmError::ApiParse(_))));
    }
}
