//! AI service — prompt + canvas snapshot → validated canvas objects.
//!
//! DESIGN
//! ======
//! One request, one pass: compile the registry into instruction text,
//! serialize the caller's prompt and current canvas into the model context,
//! invoke the generation capability once, and run the validator over
//! whatever came back. No retry lives here — the error body tells the
//! caller whether retrying is worth it.
//!
//! `build_system_prompt` is a pure function of the registry, so its output
//! is byte-identical across calls. It is cheap enough to re-run per request.

use std::fmt::Write;

use tracing::{info, warn};

use super::validate::{self, ValidateError};
use crate::error::ErrorCode;
use crate::llm::types::LlmError;
use crate::state::{AppState, CanvasObject};
use crate::tools::ToolRegistry;

/// Logical canvas dimensions the model lays objects out against.
pub const CANVAS_WIDTH: u32 = 1920;
pub const CANVAS_HEIGHT: u32 = 1080;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The external generation capability failed, timed out, or errored.
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    /// The model responded, but its output failed validation.
    #[error(transparent)]
    Validate(#[from] ValidateError),
}

impl ErrorCode for AiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Generation(_) => "E_GENERATION_FAILURE",
            Self::Validate(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Generation(e) if e.retryable())
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Handle one prompt request end to end.
///
/// # Errors
///
/// Returns [`AiError::Generation`] when the external capability fails and
/// [`AiError::Validate`] when its output doesn't satisfy the tool schemas.
/// Never returns a partially validated object list.
pub async fn handle_prompt(
    state: &AppState,
    prompt: &str,
    current_objects: &[serde_json::Value],
) -> Result<Vec<CanvasObject>, AiError> {
    info!(prompt_len = prompt.len(), objects = current_objects.len(), "ai: prompt received");

    let system = build_system_prompt(&state.registry);
    let context = build_user_context(prompt, current_objects);

    let raw = state.llm.generate(&system, &context).await?;
    info!(raw_len = raw.len(), "ai: model response received");

    match validate::validate_response(&state.registry, &raw) {
        Ok(objects) => {
            info!(objects = objects.len(), "ai: canvas validated");
            Ok(objects)
        }
        Err(e) => {
            warn!(error = %e, "ai: model response rejected");
            Err(e.into())
        }
    }
}

// =============================================================================
// INSTRUCTION COMPILER
// =============================================================================

/// Compile the registry into the model-facing instruction block.
///
/// Deterministic: registry order drives the tool list, everything else is
/// fixed text. The contrast and layout rules are advisory — the validator
/// enforces schema closure, the rest is trusted to the model.
pub(crate) fn build_system_prompt(registry: &ToolRegistry) -> String {
    let mut prompt = format!(
        "You are an expert UI/UX designer and system architect.\n\
         Your goal is to create a dynamic, non-linear visual display on a canvas.\n\n\
         PRIMARY DIRECTIVE: provide a clear textual answer to the user's request, typically \
         within an InfoBox. Generate drawings only when they meaningfully complement the \
         answer or are explicitly requested.\n\n\
         CRITICAL RULES:\n\
         1. The canvas background is black. All elements MUST be high-contrast. All text MUST \
         be futuristic blue (#4dc3ff).\n\
         2. You MUST use the exact field names defined by each tool.\n\
         3. Do NOT invent new fields. Fields outside a tool's schema are rejected.\n\
         4. When generating DrawAscii content, escape every backslash in text_content as a \
         double backslash so the JSON stays valid.\n\n\
         Manage the canvas: you may add, remove, or modify objects from the current object \
         list. Keep an object's id unchanged when you move or modify it; omit id for new \
         objects. Re-evaluate the entire layout instead of stacking new elements vertically, \
         and use the full {CANVAS_WIDTH}x{CANVAS_HEIGHT} canvas.\n\n\
         Available tools:\n"
    );

    for def in registry.list() {
        let _ = writeln!(prompt, "- {}: {}", def.name, def.description);
    }

    prompt.push_str(
        "\nRespond ONLY with a valid JSON object in the format: {\"canvas_objects\": [...]}.",
    );
    prompt
}

// =============================================================================
// CONTEXT SERIALIZER
// =============================================================================

/// Serialize the literal user request and the current canvas snapshot.
///
/// The snapshot is re-serialized verbatim — same order, same fields — so the
/// model can reference or preserve existing objects by identity. Truncation
/// of oversized snapshots is a caller concern.
pub(crate) fn build_user_context(prompt: &str, current_objects: &[serde_json::Value]) -> String {
    let snapshot = serde_json::Value::Array(current_objects.to_vec()).to_string();
    format!("User Prompt: \"{prompt}\"\n\nCurrent Canvas Objects: {snapshot}\n")
}

#[cfg(test)]
#[path = "ai_test.rs"]
mod tests;
