//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::error::ConvertError;
use crate::graph::Graph;

/// Convert a workflow (JSON or YAML text, either schema) to Cytoscape elements.
/// Returns a JSON object with either `elements` (success) or `errors` (failure).
#[wasm_bindgen]
pub fn workflow_elements(text: &str) -> JsValue {
    let result = workflow_elements_inner(text);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn workflow_elements_inner(text: &str) -> ElementsResult {
    match convert(text) {
        Ok(elements) => ElementsResult::Success { elements },
        Err(e) => ElementsResult::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    }
}

/// Convert, then run structural validation over the elements.
/// Returns a JSON array of error objects; empty when the workflow is clean.
#[wasm_bindgen]
pub fn validate_workflow(text: &str) -> JsValue {
    let result = validate_workflow_inner(text);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn validate_workflow_inner(text: &str) -> Vec<ErrorDto> {
    match convert(text) {
        Ok(elements) => crate::validate::validate_elements(&elements)
            .into_iter()
            .map(ErrorDto::from)
            .collect(),
        Err(e) => vec![ErrorDto::from(e)],
    }
}

fn convert(text: &str) -> Result<Graph, ConvertError> {
    // The YAML parser also accepts JSON, so either schema can be pasted in.
    let doc = crate::load::from_yaml_str(text)?;
    crate::elements(&doc)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize)]
struct ErrorDto {
    kind: String,
    code: String,
    phase: String,
    message: String,
    step_id: Option<String>,
}

impl From<ConvertError> for ErrorDto {
    fn from(e: ConvertError) -> Self {
        ErrorDto {
            kind: format!("{:?}", e.kind),
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            step_id: e.step_id,
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status")]
enum ElementsResult {
    #[serde(rename = "success")]
    Success { elements: Graph },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
