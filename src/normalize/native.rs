//! Native (`.ga`) workflow adapter.
//!
//! `steps` is a mapping keyed by order index. Each step already carries its
//! integer `id`, and `input_connections` points at producers by that id.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::types::*;
use super::{optional_str, raw_position, tool_shed_repository};
use crate::error::ConvertError;

pub fn normalize(doc: &Map<String, Value>) -> Result<Vec<NormalizedStep>, ConvertError> {
    let steps = match doc.get("steps") {
        Some(Value::Object(steps)) => steps,
        Some(other) => {
            return Err(ConvertError::normalize(
                "F002",
                format!("Native workflow 'steps' must be a mapping, found {}", other),
                None,
            ));
        }
        None => {
            return Err(ConvertError::normalize(
                "F002",
                "Native workflow has no 'steps' field",
                None,
            ));
        }
    };

    let mut ordered: Vec<(&String, &Value)> = steps.iter().collect();
    ordered.sort_by(|(a, _), (b, _)| order_key(a).cmp(&order_key(b)));

    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(ordered.len());

    for (key, value) in ordered {
        let step = normalize_step(key, value)?;
        if !seen.insert(step.id) {
            return Err(ConvertError::normalize(
                "F004",
                format!("Duplicate step id {}", step.id),
                Some(step.id.to_string()),
            ));
        }
        normalized.push(step);
    }

    Ok(normalized)
}

/// Numeric keys first, in numeric order; anything else after, lexically.
fn order_key(key: &str) -> (bool, u64, &str) {
    match key.parse::<u64>() {
        Ok(n) => (false, n, key),
        Err(_) => (true, 0, key),
    }
}

fn normalize_step(key: &str, value: &Value) -> Result<NormalizedStep, ConvertError> {
    let Some(step) = value.as_object() else {
        return Err(ConvertError::normalize(
            "F002",
            format!("Step '{}' must be a mapping", key),
            Some(key.to_string()),
        ));
    };

    let id = step.get("id").and_then(Value::as_u64).ok_or_else(|| {
        ConvertError::normalize(
            "F003",
            format!("Step '{}' has no integer 'id'", key),
            Some(key.to_string()),
        )
    })?;
    let step_id = id.to_string();

    let (inputs, input_connections) = input_connections(step, &step_id)?;

    Ok(NormalizedStep {
        id,
        kind: optional_str(step, "type", Some(&step_id))?,
        label: optional_str(step, "label", Some(&step_id))?,
        doc: optional_str(step, "annotation", Some(&step_id))?,
        tool_id: optional_str(step, "tool_id", Some(&step_id))?,
        inputs,
        raw: RawStepFields {
            position: raw_position(step, &step_id)?,
            tool_shed_repository: tool_shed_repository(step, &step_id)?,
            input_connections,
        },
    })
}

fn input_connections(
    step: &Map<String, Value>,
    step_id: &str,
) -> Result<(Vec<StepInput>, Connections), ConvertError> {
    let connections = match step.get("input_connections") {
        None | Some(Value::Null) => return Ok((Vec::new(), Connections::Absent)),
        Some(Value::Object(connections)) => connections,
        Some(other) => {
            return Err(ConvertError::normalize(
                "F006",
                format!("'input_connections' must be a mapping, found {}", other),
                Some(step_id.to_string()),
            ));
        }
    };

    let mut inputs = Vec::new();
    for (input_name, value) in connections {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    inputs.push(connection(input_name, item, step_id)?);
                }
            }
            item => inputs.push(connection(input_name, item, step_id)?),
        }
    }

    Ok((inputs, Connections::from_count(connections.len())))
}

fn connection(input_name: &str, value: &Value, step_id: &str) -> Result<StepInput, ConvertError> {
    let malformed = |what: &str| {
        ConvertError::normalize(
            "F006",
            format!("Connection for input '{}' {}", input_name, what),
            Some(step_id.to_string()),
        )
    };

    let object = value.as_object().ok_or_else(|| malformed("must be a mapping"))?;
    let source = match object.get("id") {
        Some(Value::Number(n)) if n.is_u64() => n.to_string(),
        Some(Value::String(s)) => match s.parse::<u64>() {
            Ok(n) => n.to_string(),
            Err(_) => return Err(malformed("has no integer source 'id'")),
        },
        _ => return Err(malformed("has no integer source 'id'")),
    };
    let output_name = object
        .get("output_name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("has no 'output_name'"))?;

    Ok(StepInput {
        input_name: input_name.to_string(),
        source_step_label: source,
        source_output_name: output_name.to_string(),
    })
}
