//! Response Validator — untrusted model text in, renderer-ready objects out.
//!
//! DESIGN
//! ======
//! The model's output is hostile input: the prompt asks for raw JSON with
//! exact field names, but nothing enforces that request. This module is the
//! actual contract enforcement. Pipeline: strip a stray markdown fence,
//! decode as JSON, check the top-level `canvas_objects` shape, then validate
//! every element against its tool's registry schema.
//!
//! Validation is all-or-nothing per response. A renderer consuming a
//! half-valid canvas produces a visibly broken screen, so the first bad
//! element rejects the whole batch and nothing is coerced or invented —
//! the only values ever filled in are defaults the schema itself declares.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::state::CanvasObject;
use crate::tools::{FieldKind, ToolDefinition, ToolRegistry};

/// Top-level key the model must wrap its object array in.
pub const RESPONSE_KEY: &str = "canvas_objects";

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    /// The text is not valid JSON, or not the expected top-level shape.
    #[error("model output is not a valid canvas response: {0}")]
    MalformedOutput(String),

    /// An element names a tool absent from the registry.
    #[error("unknown tool \"{tool}\" at element {index}")]
    UnknownTool { index: usize, tool: String },

    /// An element's fields don't match its tool's declared schema.
    #[error("tool \"{tool}\" at element {index}: {detail}")]
    SchemaViolation { index: usize, tool: String, detail: String },
}

impl ErrorCode for ValidateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedOutput(_) => "E_MALFORMED_OUTPUT",
            Self::UnknownTool { .. } => "E_UNKNOWN_TOOL",
            Self::SchemaViolation { .. } => "E_SCHEMA_VIOLATION",
        }
    }
}

// =============================================================================
// ENTRY POINT
// =============================================================================

/// Validate raw model text into an ordered object list.
///
/// Order is preserved — it encodes the model's intended rendering sequence.
/// An empty `canvas_objects` array is a valid success (the model cleared the
/// canvas).
///
/// # Errors
///
/// Returns the first failure encountered; the whole response is rejected.
pub fn validate_response(
    registry: &ToolRegistry,
    raw: &str,
) -> Result<Vec<CanvasObject>, ValidateError> {
    let unwrapped = strip_code_fence(raw);
    let value: Value = serde_json::from_str(unwrapped)
        .map_err(|e| ValidateError::MalformedOutput(e.to_string()))?;

    let Some(entries) = value.get(RESPONSE_KEY).and_then(Value::as_array) else {
        return Err(ValidateError::MalformedOutput(format!(
            "missing array-valued \"{RESPONSE_KEY}\" field"
        )));
    };

    let mut objects = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        objects.push(validate_entry(registry, index, entry)?);
    }
    Ok(objects)
}

// =============================================================================
// UNWRAP
// =============================================================================

/// Strip one surrounding markdown code fence, with or without a `json`
/// language tag. Tolerance for models that ignore the raw-JSON instruction;
/// anything else passes through untouched and fails at the decode step.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(rest) = rest.strip_suffix("```") else {
        return trimmed;
    };
    rest.strip_prefix("json").unwrap_or(rest).trim()
}

// =============================================================================
// PER-ELEMENT VALIDATION
// =============================================================================

fn validate_entry(
    registry: &ToolRegistry,
    index: usize,
    entry: &Value,
) -> Result<CanvasObject, ValidateError> {
    let Some(map) = entry.as_object() else {
        return Err(ValidateError::MalformedOutput(format!(
            "element {index} is not an object"
        )));
    };

    // Without a string discriminator the element can't be dispatched to any
    // schema, which is a shape problem rather than a tool problem.
    let Some(tool_name) = map.get("tool").and_then(Value::as_str) else {
        return Err(ValidateError::MalformedOutput(format!(
            "element {index} is missing a string \"tool\" field"
        )));
    };

    let Some(def) = registry.resolve(tool_name) else {
        return Err(ValidateError::UnknownTool { index, tool: tool_name.to_string() });
    };

    let id = extract_id(map, index, def)?;
    let fields = validate_fields(map, index, def)?;

    Ok(CanvasObject { id, tool: def.name.to_string(), fields })
}

/// Preserve a supplied id (so the model can move or modify an existing object
/// by reference), or mint a fresh one. An empty string counts as absent.
fn extract_id(
    map: &Map<String, Value>,
    index: usize,
    def: &ToolDefinition,
) -> Result<String, ValidateError> {
    match map.get("id") {
        None => Ok(Uuid::new_v4().to_string()),
        Some(Value::String(s)) if s.is_empty() => Ok(Uuid::new_v4().to_string()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidateError::SchemaViolation {
            index,
            tool: def.name.to_string(),
            detail: "field \"id\" must be a string".into(),
        }),
    }
}

fn validate_fields(
    map: &Map<String, Value>,
    index: usize,
    def: &ToolDefinition,
) -> Result<Map<String, Value>, ValidateError> {
    let violation = |detail: String| ValidateError::SchemaViolation {
        index,
        tool: def.name.to_string(),
        detail,
    };

    // Closed world: the model must not invent fields.
    for key in map.keys() {
        if key == "id" || key == "tool" {
            continue;
        }
        if def.field(key).is_none() {
            return Err(violation(format!("undeclared field \"{key}\"")));
        }
    }

    let mut fields = Map::new();
    let mut missing: Vec<&str> = Vec::new();
    for (name, spec) in &def.schema {
        match map.get(*name) {
            Some(value) => {
                if !matches_kind(value, spec.kind) {
                    return Err(violation(format!(
                        "field \"{name}\" must be {}",
                        spec.kind.expected()
                    )));
                }
                fields.insert((*name).to_string(), value.clone());
            }
            None if spec.required => missing.push(name),
            None => {
                if let Some(default) = &spec.default {
                    fields.insert((*name).to_string(), default.clone());
                }
            }
        }
    }

    if !missing.is_empty() {
        return Err(violation(format!("missing required fields: {}", missing.join(", "))));
    }
    Ok(fields)
}

// =============================================================================
// FIELD KINDS
// =============================================================================

fn matches_kind(value: &Value, kind: FieldKind) -> bool {
    match kind {
        FieldKind::Number => value.is_number(),
        FieldKind::Text => value.is_string(),
        FieldKind::DataMap => value.is_object(),
        FieldKind::Series => is_series(value),
    }
}

/// A series is homogeneous: all numbers, or all `[x, y]` pairs of numbers.
fn is_series(value: &Value) -> bool {
    let Some(items) = value.as_array() else {
        return false;
    };
    match items.first() {
        None => true,
        Some(first) if first.is_number() => items.iter().all(Value::is_number),
        Some(_) => items.iter().all(is_point_pair),
    }
}

fn is_point_pair(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|pair| pair.len() == 2 && pair.iter().all(Value::is_number))
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
