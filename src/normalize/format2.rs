//! Format2 (`class: GalaxyWorkflow`) adapter.
//!
//! Format2 addresses steps by label and lists workflow inputs separately from
//! steps. Inputs are turned into input steps first so that every connection
//! source resolves to a numeric step id, matching the native layout.

use std::collections::HashMap;

use serde_json::{Map, Value};

use super::types::*;
use super::{optional_str, raw_position, tool_shed_repository};
use crate::error::ConvertError;

/// Output name used when a source references a workflow input by label alone.
const DEFAULT_OUTPUT: &str = "output";

/// Grid spacing for steps that declare no layout.
const DEFAULT_POSITION_STEP: u64 = 10;

pub fn normalize(doc: &Map<String, Value>) -> Result<Vec<NormalizedStep>, ConvertError> {
    let inputs = entries(doc.get("inputs"), "inputs")?;
    let steps = entries(doc.get("steps"), "steps")?;

    let mut ids: HashMap<&str, u64> = HashMap::new();
    for (order_index, (label, _)) in inputs.iter().chain(steps.iter()).enumerate() {
        let Some(label) = label else { continue };
        if ids.insert(label.as_str(), order_index as u64).is_some() {
            return Err(ConvertError::normalize(
                "F004",
                format!("Duplicate step label '{}'", label),
                Some(order_index.to_string()),
            ));
        }
    }

    let mut normalized = Vec::with_capacity(inputs.len() + steps.len());
    for (label, body) in &inputs {
        let id = normalized.len() as u64;
        normalized.push(input_step(id, label.clone(), body)?);
    }
    for (label, body) in &steps {
        let id = normalized.len() as u64;
        normalized.push(tool_step(id, label.clone(), body, &ids)?);
    }

    Ok(normalized)
}

/// Accepts both the mapping form (`label: body`) and the list form
/// (`- id: label` / `- label: label`).
fn entries<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> Result<Vec<(Option<String>, &'a Value)>, ConvertError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.iter().map(|(k, v)| (Some(k.clone()), v)).collect()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| -> Result<_, ConvertError> {
                let label = match item.as_object() {
                    Some(object) => match optional_str(object, "label", None)? {
                        Some(label) => Some(label),
                        None => optional_str(object, "id", None)?,
                    },
                    None => None,
                };
                Ok((label, item))
            })
            .collect(),
        Some(other) => Err(ConvertError::normalize(
            "F002",
            format!("Format2 '{}' must be a mapping or a list, found {}", field, other),
            None,
        )),
    }
}

fn input_step(id: u64, label: Option<String>, body: &Value) -> Result<NormalizedStep, ConvertError> {
    let step_id = id.to_string();
    let (declared_type, doc, position) = match body {
        Value::String(t) => (Some(t.clone()), None, None),
        Value::Object(object) => (
            optional_str(object, "type", Some(&step_id))?,
            optional_str(object, "doc", Some(&step_id))?,
            raw_position(object, &step_id)?,
        ),
        _ => (None, None, None),
    };

    let kind = match declared_type.as_deref() {
        None | Some("data") | Some("File") => "data_input",
        Some("collection") => "data_collection_input",
        Some(_) => "parameter_input",
    };

    Ok(NormalizedStep {
        id,
        kind: Some(kind.to_string()),
        label,
        doc,
        tool_id: None,
        inputs: Vec::new(),
        raw: RawStepFields {
            position: Some(position.unwrap_or_else(|| default_position(id))),
            tool_shed_repository: None,
            input_connections: Connections::Empty,
        },
    })
}

fn tool_step(
    id: u64,
    label: Option<String>,
    body: &Value,
    ids: &HashMap<&str, u64>,
) -> Result<NormalizedStep, ConvertError> {
    let step_id = id.to_string();
    let Some(step) = body.as_object() else {
        return Err(ConvertError::normalize(
            "F002",
            format!("Step '{}' must be a mapping", label.as_deref().unwrap_or(&step_id)),
            Some(step_id),
        ));
    };

    let kind = match optional_str(step, "type", Some(&step_id))? {
        Some(kind) => Some(kind),
        None if step.get("run").is_some_and(Value::is_object) => Some("subworkflow".to_string()),
        None => None,
    };

    let (inputs, declared) = step_inputs(step, &step_id, ids)?;

    Ok(NormalizedStep {
        id,
        kind,
        label,
        doc: optional_str(step, "doc", Some(&step_id))?,
        tool_id: optional_str(step, "tool_id", Some(&step_id))?,
        inputs,
        raw: RawStepFields {
            position: Some(raw_position(step, &step_id)?.unwrap_or_else(|| default_position(id))),
            tool_shed_repository: tool_shed_repository(step, &step_id)?,
            input_connections: Connections::from_count(declared),
        },
    })
}

/// Returns the connections and the number of declared input names.
fn step_inputs(
    step: &Map<String, Value>,
    step_id: &str,
    ids: &HashMap<&str, u64>,
) -> Result<(Vec<StepInput>, usize), ConvertError> {
    let declared: Vec<(String, &Value)> = match step.get("in") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| -> Result<_, ConvertError> {
                let object = item.as_object().ok_or_else(|| {
                    ConvertError::normalize(
                        "F006",
                        "Entries of a list-form 'in' must be mappings",
                        Some(step_id.to_string()),
                    )
                })?;
                let name = optional_str(object, "id", Some(step_id))?.ok_or_else(|| {
                    ConvertError::normalize(
                        "F006",
                        "Entry of a list-form 'in' has no 'id'",
                        Some(step_id.to_string()),
                    )
                })?;
                Ok((name, item))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(ConvertError::normalize(
                "F006",
                format!("'in' must be a mapping or a list, found {}", other),
                Some(step_id.to_string()),
            ));
        }
    };

    let mut inputs = Vec::new();
    for (input_name, value) in &declared {
        for source in sources(value, input_name, step_id)? {
            let (source_id, output) = resolve_source(source, ids).ok_or_else(|| {
                ConvertError::normalize(
                    "F005",
                    format!("Input '{}' references unknown source '{}'", input_name, source),
                    Some(step_id.to_string()),
                )
            })?;
            inputs.push(StepInput {
                input_name: input_name.clone(),
                source_step_label: source_id.to_string(),
                source_output_name: output.to_string(),
            });
        }
    }

    Ok((inputs, declared.len()))
}

fn sources<'a>(value: &'a Value, input_name: &str, step_id: &str) -> Result<Vec<&'a str>, ConvertError> {
    let malformed = || {
        ConvertError::normalize(
            "F006",
            format!("Input '{}' has a malformed source", input_name),
            Some(step_id.to_string()),
        )
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s.as_str()]),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(malformed))
            .collect(),
        Value::Object(object) => match object.get("source") {
            // A mapping without `source` only sets defaults; no connection.
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(source) => sources(source, input_name, step_id),
        },
        _ => Err(malformed()),
    }
}

/// `label` refers to an input's default output; `label/output` to a step output.
fn resolve_source<'a>(source: &'a str, ids: &HashMap<&str, u64>) -> Option<(u64, &'a str)> {
    if let Some(&id) = ids.get(source) {
        return Some((id, DEFAULT_OUTPUT));
    }
    let (label, output) = source.split_once('/')?;
    ids.get(label).map(|&id| (id, output))
}

fn default_position(order_index: u64) -> RawPosition {
    let offset = DEFAULT_POSITION_STEP * order_index;
    RawPosition::new(offset, offset)
}
