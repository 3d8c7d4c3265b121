//! Normalize phase: workflow document → ordered `NormalizedStep`s.
//!
//! Two schemas are supported. A document without a `class` field is a native
//! Galaxy workflow (`.ga`); `class: GalaxyWorkflow` selects Format2.

pub mod format2;
pub mod native;
pub mod types;

pub use types::*;

use serde_json::{Map, Value};

use crate::error::ConvertError;

pub const TRACING_TARGET: &str = "gxgraph::normalize";

const FORMAT2_CLASS: &str = "GalaxyWorkflow";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowSchema {
    Native,
    Format2,
}

impl WorkflowSchema {
    /// Pick the schema from the `class` discriminator.
    pub fn detect(doc: &Value) -> Result<Self, ConvertError> {
        let object = as_document(doc)?;
        match object.get("class") {
            None | Some(Value::Null) => Ok(WorkflowSchema::Native),
            Some(Value::String(class)) if class == FORMAT2_CLASS => Ok(WorkflowSchema::Format2),
            Some(other) => Err(ConvertError::normalize(
                "F001",
                format!("Unknown workflow class {}, expected '{}'", other, FORMAT2_CLASS),
                None,
            )),
        }
    }

    pub fn normalize(self, doc: &Value) -> Result<Vec<NormalizedStep>, ConvertError> {
        let object = as_document(doc)?;
        match self {
            WorkflowSchema::Native => native::normalize(object),
            WorkflowSchema::Format2 => format2::normalize(object),
        }
    }
}

/// Detect the schema and normalize in one step.
pub fn normalize(doc: &Value) -> Result<Vec<NormalizedStep>, ConvertError> {
    let schema = WorkflowSchema::detect(doc)?;
    let steps = schema.normalize(doc)?;
    tracing::debug!(
        target: TRACING_TARGET,
        schema = ?schema,
        steps = steps.len(),
        "Normalized workflow steps"
    );
    Ok(steps)
}

fn as_document(doc: &Value) -> Result<&Map<String, Value>, ConvertError> {
    doc.as_object().ok_or_else(|| {
        ConvertError::normalize("F001", "Workflow document must be a mapping", None)
    })
}

// ---------------------------------------------------------------------------
// Field readers shared by both adapters
// ---------------------------------------------------------------------------

/// Optional string field; `null` counts as absent, non-strings are rejected.
pub(crate) fn optional_str(
    object: &Map<String, Value>,
    key: &str,
    step_id: Option<&str>,
) -> Result<Option<String>, ConvertError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        // Labels and types occasionally show up as bare numbers in YAML.
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(ConvertError::normalize(
            "F002",
            format!("Field '{}' must be a string, found {}", key, other),
            step_id.map(str::to_string),
        )),
    }
}

/// `position` as written. Absent or `null` is `None`; anything other than a
/// mapping is `F011`.
pub(crate) fn raw_position(
    object: &Map<String, Value>,
    step_id: &str,
) -> Result<Option<RawPosition>, ConvertError> {
    match object.get("position") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(p)) => Ok(Some(RawPosition {
            left: p.get("left").cloned(),
            top: p.get("top").cloned(),
        })),
        Some(other) => Err(ConvertError::normalize(
            "F011",
            format!("Step position must be a mapping, found {}", other),
            Some(step_id.to_string()),
        )),
    }
}

pub(crate) fn tool_shed_repository(
    object: &Map<String, Value>,
    step_id: &str,
) -> Result<Option<ToolShedRepository>, ConvertError> {
    match object.get("tool_shed_repository") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value::<ToolShedRepository>(value.clone())
            .map(Some)
            .map_err(|e| {
                ConvertError::normalize(
                    "F007",
                    format!("Malformed tool_shed_repository: {}", e),
                    Some(step_id.to_string()),
                )
            }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn detect_native_without_class() {
        let doc = json!({"a_galaxy_workflow": "true", "steps": {}});
        assert_eq!(WorkflowSchema::detect(&doc).unwrap(), WorkflowSchema::Native);
    }

    #[test]
    fn detect_format2_class() {
        let doc = json!({"class": "GalaxyWorkflow", "steps": {}});
        assert_eq!(WorkflowSchema::detect(&doc).unwrap(), WorkflowSchema::Format2);
    }

    #[test]
    fn unknown_class_rejected() {
        let err = WorkflowSchema::detect(&json!({"class": "Workflow"})).unwrap_err();
        assert_eq!(err.code, "F001");
    }

    #[test]
    fn position_shapes() {
        let absent = json!({});
        assert_eq!(raw_position(absent.as_object().unwrap(), "0").unwrap(), None);

        let listed = json!({"position": [1, 2]});
        let err = raw_position(listed.as_object().unwrap(), "0").unwrap_err();
        assert_eq!(err.code, "F011");
        assert_eq!(err.step_id.as_deref(), Some("0"));
    }

    #[test]
    fn non_mapping_rejected() {
        let err = normalize(&json!(["steps"])).unwrap_err();
        assert_eq!(err.code, "F001");
        assert!(err.is_format());
    }
}
