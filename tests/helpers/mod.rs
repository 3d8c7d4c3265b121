use gxgraph::graph::Graph;
use gxgraph::normalize::*;

// =============================================================================
// Normalized step builders
// =============================================================================

/// A tool step at `(left, top)` with empty `input_connections` and no inputs.
pub fn tool_step(id: u64, tool_id: &str) -> NormalizedStep {
    NormalizedStep {
        id,
        kind: None,
        label: None,
        doc: None,
        tool_id: Some(tool_id.into()),
        inputs: vec![],
        raw: RawStepFields {
            position: Some(RawPosition::new(id * 100, 0)),
            tool_shed_repository: None,
            input_connections: Connections::Empty,
        },
    }
}

/// A data input step labelled `label`.
pub fn input_step(id: u64, label: &str) -> NormalizedStep {
    NormalizedStep {
        kind: Some("data_input".into()),
        label: Some(label.into()),
        tool_id: None,
        ..tool_step(id, "unused")
    }
}

/// Add a connection `source.output → step.input_name`.
pub fn connect(mut step: NormalizedStep, input_name: &str, source: u64, output: &str) -> NormalizedStep {
    step.inputs.push(StepInput {
        input_name: input_name.into(),
        source_step_label: source.to_string(),
        source_output_name: output.into(),
    });
    step.raw.input_connections = Connections::from_count(step.inputs.len());
    step
}

/// `1 → 2 → 3`: step 2 reads step 1's output, step 3 reads step 2's.
pub fn linear_chain() -> Vec<NormalizedStep> {
    vec![
        input_step(1, "reads"),
        connect(tool_step(2, "cat1"), "input1", 1, "output"),
        connect(tool_step(3, "sort1"), "input", 2, "out_file1"),
    ]
}

// =============================================================================
// Graph queries
// =============================================================================

/// `(source, target)` pairs of every edge, in creation order.
pub fn edge_pairs(graph: &Graph) -> Vec<(String, String)> {
    graph
        .edges
        .iter()
        .map(|e| (e.data.source.clone(), e.data.target.clone()))
        .collect()
}

pub fn pair(source: &str, target: &str) -> (String, String) {
    (source.to_string(), target.to_string())
}
