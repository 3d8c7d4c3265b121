//! Structural rules over built elements (V001–V007).

use std::collections::HashSet;

use petgraph::algo::is_cyclic_directed;

use crate::error::ConvertError;
use crate::graph::{BEGIN_ID, ElementGraph, END_ID, Graph};

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(elements: &Graph, view: &ElementGraph<'_>) -> Vec<ConvertError> {
    let mut errors = Vec::new();

    v001_edges_reference_existing_nodes(view, &mut errors);
    v002_no_duplicate_node_ids(elements, &mut errors);
    v003_no_duplicate_edge_ids(elements, &mut errors);
    v004_no_cycles(view, &mut errors);
    v005_sentinels_frame_the_graph(view, &mut errors);
    v006_no_self_loops(elements, &mut errors);
    v007_single_sentinel_edge_per_step(elements, &mut errors);

    errors
}

fn v001_edges_reference_existing_nodes(view: &ElementGraph<'_>, errors: &mut Vec<ConvertError>) {
    for edge in &view.dangling {
        for (end, id) in [("source", &edge.source), ("target", &edge.target)] {
            if !view.node_indices.contains_key(id.as_str()) {
                errors.push(ConvertError::validate(
                    "V001",
                    format!("Edge '{}' references unknown {} node '{}'", edge.id, end, id),
                    None,
                ));
            }
        }
    }
}

fn v002_no_duplicate_node_ids(elements: &Graph, errors: &mut Vec<ConvertError>) {
    let mut seen = HashSet::new();
    for node in &elements.nodes {
        if !seen.insert(node.id()) {
            errors.push(ConvertError::validate(
                "V002",
                format!("Duplicate node id '{}'", node.id()),
                Some(node.id().to_string()),
            ));
        }
    }
}

fn v003_no_duplicate_edge_ids(elements: &Graph, errors: &mut Vec<ConvertError>) {
    let mut seen = HashSet::new();
    for edge in &elements.edges {
        if !seen.insert(edge.data.id.as_str()) {
            errors.push(ConvertError::validate(
                "V003",
                format!("Duplicate edge id '{}'", edge.data.id),
                None,
            ));
        }
    }
}

fn v004_no_cycles(view: &ElementGraph<'_>, errors: &mut Vec<ConvertError>) {
    if is_cyclic_directed(&view.graph) {
        errors.push(ConvertError::validate(
            "V004",
            "Workflow graph contains a cycle",
            None,
        ));
    }
}

fn v005_sentinels_frame_the_graph(view: &ElementGraph<'_>, errors: &mut Vec<ConvertError>) {
    if view.incoming_count(BEGIN_ID) > 0 {
        errors.push(ConvertError::validate(
            "V005",
            format!("Begin node '{}' must not have incoming edges", BEGIN_ID),
            None,
        ));
    }
    if view.outgoing_count(END_ID) > 0 {
        errors.push(ConvertError::validate(
            "V005",
            format!("End node '{}' must not have outgoing edges", END_ID),
            None,
        ));
    }
}

fn v006_no_self_loops(elements: &Graph, errors: &mut Vec<ConvertError>) {
    for edge in &elements.edges {
        if edge.data.source == edge.data.target {
            errors.push(ConvertError::validate(
                "V006",
                format!("Self-loop detected on node '{}'", edge.data.source),
                Some(edge.data.source.clone()),
            ));
        }
    }
}

fn v007_single_sentinel_edge_per_step(elements: &Graph, errors: &mut Vec<ConvertError>) {
    for node in elements.step_nodes() {
        let id = node.id();
        let from_begin = elements
            .edges_to(id)
            .filter(|e| e.data.source == BEGIN_ID)
            .count();
        let to_end = elements
            .edges_from(id)
            .filter(|e| e.data.target == END_ID)
            .count();
        if from_begin > 1 || to_end > 1 {
            errors.push(ConvertError::validate(
                "V007",
                format!(
                    "Step '{}' has {} begin edges and {} end edges, expected at most one each",
                    id, from_begin, to_end
                ),
                Some(id.to_string()),
            ));
        }
    }
}
