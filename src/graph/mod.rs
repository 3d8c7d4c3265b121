//! Build phase: normalized steps → Cytoscape elements.
//!
//! Every step becomes a node. Declared inputs become edges from the producing
//! step. Two sentinel nodes frame the graph: steps that declare empty
//! `input_connections` hang off `BEGIN_ID`, and steps that feed no other step
//! point at `END_ID`.

pub mod ids;
pub mod types;
pub mod view;

pub use types::*;
pub use view::ElementGraph;

use std::collections::HashSet;

use serde_json::Value;

use crate::error::ConvertError;
use crate::normalize::{NormalizedStep, StepInput};

pub const TRACING_TARGET: &str = "gxgraph::graph";

const DEFAULT_STEP_TYPE: &str = "tool";
const RUNNABLE_STEP_TYPES: [&str; 2] = ["tool", "subworkflow"];

/// Build the element graph for one workflow. Fails on the first malformed step.
pub fn build(steps: &[NormalizedStep]) -> Result<Graph, ConvertError> {
    let step_ids = unique_step_ids(steps)?;
    let known: HashSet<&str> = step_ids.iter().map(String::as_str).collect();

    // A step named as a source by any input is not terminal.
    let sources: HashSet<&str> = steps
        .iter()
        .flat_map(|s| s.inputs.iter().map(|i| i.source_step_label.as_str()))
        .collect();

    let mut graph = Graph {
        nodes: Vec::with_capacity(steps.len() + 2),
        edges: Vec::new(),
    };
    graph.nodes.push(NodeElement::sentinel(BEGIN_ID));
    graph.nodes.push(NodeElement::sentinel(END_ID));

    let mut edge_ids = EdgeIds::default();

    for (step, id) in steps.iter().zip(&step_ids) {
        graph.nodes.push(step_node(step, id)?);

        if step.inputs.is_empty() && step.raw.input_connections.is_empty() {
            graph.edges.push(sentinel_edge(&mut edge_ids, BEGIN_ID, id));
        }

        for input in &step.inputs {
            if !known.contains(input.source_step_label.as_str()) {
                return Err(ConvertError::build(
                    "F008",
                    format!(
                        "Input '{}' references unknown step '{}'",
                        input.input_name, input.source_step_label
                    ),
                    Some(id.clone()),
                ));
            }
            graph.edges.push(connection_edge(&mut edge_ids, input, id));
        }

        tracing::trace!(
            target: TRACING_TARGET,
            step_id = %id,
            inputs = step.inputs.len(),
            "Added step node"
        );
    }

    for id in &step_ids {
        if !sources.contains(id.as_str()) {
            graph.edges.push(sentinel_edge(&mut edge_ids, id, END_ID));
        }
    }

    tracing::debug!(
        target: TRACING_TARGET,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "Built workflow elements"
    );

    Ok(graph)
}

fn unique_step_ids(steps: &[NormalizedStep]) -> Result<Vec<String>, ConvertError> {
    let mut seen = HashSet::with_capacity(steps.len());
    steps
        .iter()
        .map(|step| {
            let id = step.id.to_string();
            if seen.insert(step.id) {
                Ok(id)
            } else {
                Err(ConvertError::build(
                    "F004",
                    format!("Duplicate step id {}", id),
                    Some(id),
                ))
            }
        })
        .collect()
}

fn step_node(step: &NormalizedStep, id: &str) -> Result<NodeElement, ConvertError> {
    let step_type = step.kind.as_deref().unwrap_or(DEFAULT_STEP_TYPE);
    let role = if RUNNABLE_STEP_TYPES.contains(&step_type) {
        "runnable"
    } else {
        "input"
    };
    let label = ids::display_label(step.label.as_deref(), step.tool_id.as_deref());

    Ok(NodeElement {
        group: Group::Nodes,
        data: NodeData::Step(StepData {
            id: id.to_string(),
            name: label.clone(),
            label,
            docker: TBD.to_string(),
            run: TBD.to_string(),
            tool_id: step.tool_id.clone(),
            doc: step.doc.clone(),
            repo_link: step.raw.tool_shed_repository.as_ref().map(ids::repo_link),
            step_type: step_type.to_string(),
        }),
        classes: Some(vec![format!("type_{}", step_type), role.to_string()]),
        position: Some(position(step, id)?),
    })
}

fn position(step: &NormalizedStep, id: &str) -> Result<Position, ConvertError> {
    let Some(raw) = &step.raw.position else {
        return Err(ConvertError::build(
            "F010",
            "Step has no position",
            Some(id.to_string()),
        ));
    };
    Ok(Position {
        x: coordinate(raw.left.as_ref(), "left", id)?,
        y: coordinate(raw.top.as_ref(), "top", id)?,
    })
}

fn coordinate(value: Option<&Value>, axis: &str, id: &str) -> Result<i64, ConvertError> {
    match value {
        None | Some(Value::Null) => Err(ConvertError::build(
            "F010",
            format!("Step position has no '{}'", axis),
            Some(id.to_string()),
        )),
        Some(v) => ids::coerce_integer(v).ok_or_else(|| {
            ConvertError::build(
                "F011",
                format!("Step position '{}' is not numeric: {}", axis, v),
                Some(id.to_string()),
            )
        }),
    }
}

fn sentinel_edge(edge_ids: &mut EdgeIds, source: &str, target: &str) -> EdgeElement {
    EdgeElement::new(EdgeData {
        id: edge_ids.assign(source, target, None),
        source: source.to_string(),
        target: target.to_string(),
        input: None,
        output: None,
    })
}

fn connection_edge(edge_ids: &mut EdgeIds, input: &StepInput, target: &str) -> EdgeElement {
    let source = input.source_step_label.as_str();
    EdgeElement::new(EdgeData {
        id: edge_ids.assign(source, target, Some(&input.input_name)),
        source: source.to_string(),
        target: target.to_string(),
        input: Some(input.input_name.clone()),
        output: Some(input.source_output_name.clone()),
    })
}

/// Hands out `<source>__to__<target>` ids. A step consuming several outputs
/// of the same producer repeats the pair; later edges get `__<input>` and, if
/// that is taken too, a counter.
#[derive(Default)]
struct EdgeIds {
    taken: HashSet<String>,
}

impl EdgeIds {
    fn assign(&mut self, source: &str, target: &str, input: Option<&str>) -> String {
        let base = ids::edge_id(source, target);
        if self.taken.insert(base.clone()) {
            return base;
        }

        let qualified = match input {
            Some(input) => format!("{}__{}", base, input),
            None => base,
        };
        let mut candidate = qualified.clone();
        let mut n = 2;
        while !self.taken.insert(candidate.clone()) {
            candidate = format!("{}__{}", qualified, n);
            n += 1;
        }
        candidate
    }
}
