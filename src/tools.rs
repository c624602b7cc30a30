//! Tool Schema Registry — the closed set of visual objects the model may emit.
//!
//! DESIGN
//! ======
//! Every visual kind the renderer understands is declared here once, and only
//! here: the instruction compiler derives the model-facing tool list from
//! `list()`, and the response validator checks every element against the
//! schema returned by `resolve()`. Adding a visual kind means adding one
//! entry to `builtin()` — no other module hardcodes tool names.
//!
//! Fields that share a semantic role use the same name and kind in every
//! tool (`x`/`y` anchor, `width`/`height`, `label`, `color`), so the model
//! is told the vocabulary once rather than per tool.

use serde_json::{Value, json};

// =============================================================================
// FIELD SCHEMA
// =============================================================================

/// Value shape a declared field must decode as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any JSON number.
    Number,
    /// A JSON string.
    Text,
    /// A free-form key/value object.
    DataMap,
    /// A numeric series: all numbers, or all `[x, y]` pairs of numbers.
    Series,
}

impl FieldKind {
    /// Human phrasing used in violation messages.
    #[must_use]
    pub fn expected(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::Text => "a string",
            Self::DataMap => "a key/value object",
            Self::Series => "a numeric series",
        }
    }
}

/// Schema entry for one field of one tool.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub required: bool,
    /// Filled in by the validator when an optional field is absent.
    pub default: Option<Value>,
}

impl FieldSpec {
    fn required(kind: FieldKind) -> Self {
        Self { kind, required: true, default: None }
    }

    fn optional(kind: FieldKind) -> Self {
        Self { kind, required: false, default: None }
    }

    fn with_default(kind: FieldKind, default: Value) -> Self {
        Self { kind, required: false, default: Some(default) }
    }
}

// =============================================================================
// TOOL DEFINITION
// =============================================================================

/// One registry entry: a named visual kind and its field schema.
///
/// `schema` order is stable and flows through to serialized output fields.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub name: &'static str,
    /// Used verbatim in the compiled instructions.
    pub description: &'static str,
    pub schema: Vec<(&'static str, FieldSpec)>,
}

impl ToolDefinition {
    /// Look up one declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.schema
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, spec)| spec)
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Mapping from tool name to definition, fixed at process start.
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// The builtin tool set. Registration order is instruction order and
    /// must stay stable — the compiled instruction text depends on it.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn builtin() -> Self {
        let tools = vec![
            ToolDefinition {
                name: "InfoBox",
                description: "Use for displaying key-value pairs or simple text statements.",
                schema: vec![
                    ("x", FieldSpec::required(FieldKind::Number)),
                    ("y", FieldSpec::required(FieldKind::Number)),
                    ("width", FieldSpec::required(FieldKind::Number)),
                    ("height", FieldSpec::required(FieldKind::Number)),
                    ("label", FieldSpec::optional(FieldKind::Text)),
                    ("data", FieldSpec::required(FieldKind::DataMap)),
                ],
            },
            ToolDefinition {
                name: "LineGraph",
                description: "Use to display time-series data or show the relationship between two \
                              variables. series_data is a list of numbers or of [x, y] pairs; \
                              include a label.",
                schema: vec![
                    ("x", FieldSpec::required(FieldKind::Number)),
                    ("y", FieldSpec::required(FieldKind::Number)),
                    ("width", FieldSpec::required(FieldKind::Number)),
                    ("height", FieldSpec::required(FieldKind::Number)),
                    ("label", FieldSpec::optional(FieldKind::Text)),
                    ("series_data", FieldSpec::required(FieldKind::Series)),
                ],
            },
            ToolDefinition {
                name: "DrawRectangle",
                description: "Draw a rectangle outline at (x, y) with the given width, height and \
                              color.",
                schema: vec![
                    ("x", FieldSpec::required(FieldKind::Number)),
                    ("y", FieldSpec::required(FieldKind::Number)),
                    ("width", FieldSpec::required(FieldKind::Number)),
                    ("height", FieldSpec::required(FieldKind::Number)),
                    ("color", FieldSpec::required(FieldKind::Text)),
                ],
            },
            ToolDefinition {
                name: "DrawCircle",
                description: "Draw a circle centered at (x, y) with the given radius and color.",
                schema: vec![
                    ("x", FieldSpec::required(FieldKind::Number)),
                    ("y", FieldSpec::required(FieldKind::Number)),
                    ("radius", FieldSpec::required(FieldKind::Number)),
                    ("color", FieldSpec::required(FieldKind::Text)),
                ],
            },
            ToolDefinition {
                name: "DrawLine",
                description: "Draw a straight line from (x, y) to (x2, y2) with the given color.",
                schema: vec![
                    ("x", FieldSpec::required(FieldKind::Number)),
                    ("y", FieldSpec::required(FieldKind::Number)),
                    ("x2", FieldSpec::required(FieldKind::Number)),
                    ("y2", FieldSpec::required(FieldKind::Number)),
                    ("color", FieldSpec::required(FieldKind::Text)),
                ],
            },
            ToolDefinition {
                name: "DrawAscii",
                description: "Render multi-line ASCII art anchored at (x, y). Preferred for general \
                              drawing requests; compose complex visuals from characters in \
                              text_content.",
                schema: vec![
                    ("x", FieldSpec::required(FieldKind::Number)),
                    ("y", FieldSpec::required(FieldKind::Number)),
                    ("text_content", FieldSpec::required(FieldKind::Text)),
                    ("font_size", FieldSpec::with_default(FieldKind::Number, json!(16))),
                    ("color", FieldSpec::with_default(FieldKind::Text, json!("#4dc3ff"))),
                ],
            },
        ];
        Self { tools }
    }

    /// All definitions in registration order. Stable across calls.
    #[must_use]
    pub fn list(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Exact-match lookup by tool name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|def| def.name == name)
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
