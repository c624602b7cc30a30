//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the read-only tool registry and the generation capability as a trait
//! object. Neither is mutated after startup, so handlers can read them
//! concurrently without locks. Canvas contents are NOT held here: the caller
//! supplies the prior canvas with every request and receives a fresh one
//! back, so the service stays stateless between requests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::llm::GenerateText;
use crate::tools::ToolRegistry;

// =============================================================================
// CANVAS OBJECT
// =============================================================================

/// One validated visual object, ready for the renderer.
///
/// `tool` names a registry entry and `fields` carries exactly that tool's
/// declared fields — the validator rejects anything else. Serializes flat:
/// `{"id": ..., "tool": ..., <declared fields>}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasObject {
    pub id: String,
    pub tool: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// Closed set of visual tools the model may emit. Immutable after startup.
    pub registry: Arc<ToolRegistry>,
    /// External generation capability. Trait object so tests can mock it.
    pub llm: Arc<dyn GenerateText>,
}

impl AppState {
    #[must_use]
    pub fn new(registry: Arc<ToolRegistry>, llm: Arc<dyn GenerateText>) -> Self {
        Self { registry, llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// Create a test `AppState` around a mock generation capability.
    #[must_use]
    pub fn test_app_state(llm: Arc<dyn GenerateText>) -> AppState {
        AppState::new(Arc::new(ToolRegistry::builtin()), llm)
    }

    /// A snapshot record shaped like a rendered `InfoBox`.
    #[must_use]
    pub fn dummy_snapshot_object(id: &str) -> Value {
        serde_json::json!({
            "id": id,
            "tool": "InfoBox",
            "x": 100,
            "y": 200,
            "width": 300,
            "height": 120,
            "data": {"status": "ok"}
        })
    }
}
