//! The prompt route — HTTP face of the AI service.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ErrorCode;
use crate::services::ai::{self, AiError};
use crate::services::validate::ValidateError;
use crate::state::{AppState, CanvasObject};

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
    /// Current canvas contents, passed through verbatim as model context.
    #[serde(default)]
    pub current_objects: Vec<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub canvas_objects: Vec<CanvasObject>,
}

/// `POST /prompt` — generate an updated canvas from a natural-language request.
pub async fn handle(State(state): State<AppState>, Json(body): Json<PromptRequest>) -> Response {
    match ai::handle_prompt(&state, &body.prompt, &body.current_objects).await {
        Ok(canvas_objects) => Json(PromptResponse { canvas_objects }).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Map a service error onto a status plus a structured error body. 502 means
/// "try again shortly" (upstream trouble, unusable model text); 422 means
/// the model drifted from the schema and the user should rephrase.
fn error_response(err: &AiError) -> Response {
    let status = match err {
        AiError::Generation(_) | AiError::Validate(ValidateError::MalformedOutput(_)) => {
            StatusCode::BAD_GATEWAY
        }
        AiError::Validate(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let body = json!({
        "error": {
            "code": err.error_code(),
            "message": err.to_string(),
            "retryable": err.retryable(),
        }
    });
    (status, Json(body)).into_response()
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
