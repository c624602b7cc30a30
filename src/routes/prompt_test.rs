use super::*;
use crate::llm::types::LlmError;

fn status_of(err: &AiError) -> StatusCode {
    error_response(err).status()
}

#[test]
fn generation_failure_maps_to_bad_gateway() {
    let err = AiError::Generation(LlmError::ApiRequest("timeout".into()));
    assert_eq!(status_of(&err), StatusCode::BAD_GATEWAY);
}

#[test]
fn malformed_output_maps_to_bad_gateway() {
    let err = AiError::Validate(ValidateError::MalformedOutput("not json".into()));
    assert_eq!(status_of(&err), StatusCode::BAD_GATEWAY);
}

#[test]
fn schema_errors_map_to_unprocessable() {
    let unknown = AiError::Validate(ValidateError::UnknownTool { index: 0, tool: "Triangle".into() });
    assert_eq!(status_of(&unknown), StatusCode::UNPROCESSABLE_ENTITY);

    let violation = AiError::Validate(ValidateError::SchemaViolation {
        index: 0,
        tool: "InfoBox".into(),
        detail: "missing required fields: height".into(),
    });
    assert_eq!(status_of(&violation), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn request_body_defaults_to_empty_canvas() {
    let req: PromptRequest = serde_json::from_str(r#"{"prompt":"draw a cat"}"#).unwrap();
    assert_eq!(req.prompt, "draw a cat");
    assert!(req.current_objects.is_empty());
}

#[test]
fn request_body_accepts_arbitrary_snapshot_records() {
    let req: PromptRequest = serde_json::from_str(
        r#"{"prompt":"move it","current_objects":[{"tool":"InfoBox","anything":true}]}"#,
    )
    .unwrap();
    assert_eq!(req.current_objects.len(), 1);
    assert_eq!(req.current_objects[0]["anything"], true);
}

#[test]
fn response_body_uses_the_canvas_objects_key() {
    let response = PromptResponse { canvas_objects: Vec::new() };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json, serde_json::json!({"canvas_objects": []}));
}

#[tokio::test]
async fn error_body_carries_code_and_retryable() {
    let err = AiError::Generation(LlmError::ApiResponse { status: 503, body: "overloaded".into() });
    let response = error_response(&err);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"]["code"], "E_GENERATION_FAILURE");
    assert_eq!(body["error"]["retryable"], true);
    assert!(body["error"]["message"].as_str().unwrap().contains("503"));
}
