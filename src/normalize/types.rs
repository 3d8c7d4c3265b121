//! Schema-agnostic step shape shared by both workflow adapters.
//!
//! The graph builder reads only these types; it never looks at the original
//! document or at which schema produced the step.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One workflow step after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedStep {
    pub id: u64,
    /// Step type as declared. `None` is treated as `"tool"` by the builder.
    pub kind: Option<String>,
    pub label: Option<String>,
    pub doc: Option<String>,
    pub tool_id: Option<String>,
    pub inputs: Vec<StepInput>,
    pub raw: RawStepFields,
}

/// A declared input connection: `source_step_label`'s `source_output_name`
/// feeds this step's `input_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInput {
    pub input_name: String,
    /// Id of the producing step, rendered as a string.
    pub source_step_label: String,
    pub source_output_name: String,
}

/// Fields carried over from the original step record for the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawStepFields {
    pub position: Option<RawPosition>,
    pub tool_shed_repository: Option<ToolShedRepository>,
    pub input_connections: Connections,
}

/// Layout coordinates exactly as found in the document. Coercion to integers
/// happens in the builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    pub left: Option<Value>,
    pub top: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolShedRepository {
    pub tool_shed: String,
    pub owner: String,
    pub name: String,
    pub changeset_revision: String,
}

/// Whether the step record declared `input_connections`, and how many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connections {
    #[default]
    Absent,
    Empty,
    Declared(usize),
}

impl Connections {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            Connections::Empty
        } else {
            Connections::Declared(count)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Connections::Empty)
    }
}

impl RawPosition {
    pub fn new(left: impl Into<Value>, top: impl Into<Value>) -> Self {
        RawPosition {
            left: Some(left.into()),
            top: Some(top.into()),
        }
    }
}
