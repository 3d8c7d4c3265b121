//! Integration tests for the Normalize phase on full workflow documents.

use gxgraph::load;
use gxgraph::normalize::{self, Connections, RawPosition, WorkflowSchema};

#[test]
fn native_fixture_normalizes() {
    let doc = load::from_json_str(include_str!("fixtures/qc_concat.ga")).expect("Should load");
    assert_eq!(WorkflowSchema::detect(&doc).unwrap(), WorkflowSchema::Native);

    let steps = normalize::normalize(&doc).expect("Should normalize");
    assert_eq!(steps.len(), 3);

    let reads = &steps[0];
    assert_eq!(reads.kind.as_deref(), Some("data_input"));
    assert_eq!(reads.label.as_deref(), Some("reads"));
    assert_eq!(reads.doc.as_deref(), Some("Raw reads"));
    assert_eq!(reads.tool_id, None);
    assert_eq!(reads.raw.input_connections, Connections::Empty);
    assert_eq!(reads.raw.position, Some(RawPosition::new(10.5, 200.25)));

    let fastqc = &steps[1];
    assert_eq!(fastqc.label, None);
    let repo = fastqc.raw.tool_shed_repository.as_ref().expect("Repository metadata");
    assert_eq!(repo.owner, "devteam");
    assert_eq!(repo.changeset_revision, "e7b2202befea");

    let cat = &steps[2];
    let sources: Vec<(&str, &str, &str)> = cat
        .inputs
        .iter()
        .map(|i| {
            (
                i.input_name.as_str(),
                i.source_step_label.as_str(),
                i.source_output_name.as_str(),
            )
        })
        .collect();
    assert_eq!(
        sources,
        vec![("input1", "0", "output"), ("queries_0|input2", "1", "text_file")]
    );
    assert_eq!(cat.raw.input_connections, Connections::Declared(2));
}

#[test]
fn format2_fixture_normalizes() {
    let doc = load::from_yaml_str(include_str!("fixtures/concat_sort.gxwf.yml")).expect("Should load");
    assert_eq!(WorkflowSchema::detect(&doc).unwrap(), WorkflowSchema::Format2);

    let steps = normalize::normalize(&doc).expect("Should normalize");
    let labels: Vec<Option<&str>> = steps.iter().map(|s| s.label.as_deref()).collect();
    assert_eq!(
        labels,
        vec![
            Some("the_input"),
            Some("sort_column"),
            Some("cat"),
            Some("sort"),
            Some("nested"),
        ]
    );
    let ids: Vec<u64> = steps.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);

    assert_eq!(steps[0].doc.as_deref(), Some("Dataset to process"));
    assert_eq!(steps[1].kind.as_deref(), Some("parameter_input"));
    assert_eq!(steps[1].raw.position, Some(RawPosition::new(10, 10)));
    assert_eq!(steps[2].raw.position, Some(RawPosition::new(200.6, 15.2)));

    let cat = &steps[2];
    assert_eq!(cat.inputs.len(), 2);
    assert!(cat.inputs.iter().all(|i| i.source_step_label == "0" && i.source_output_name == "output"));

    let sort = &steps[3];
    assert_eq!(sort.doc.as_deref(), Some("Sort by a column"));
    assert_eq!(sort.inputs[0].source_step_label, "2");
    assert_eq!(sort.inputs[0].source_output_name, "out_file1");
    assert_eq!(sort.inputs[1].source_step_label, "1");
    assert!(sort.raw.tool_shed_repository.is_some());

    let nested = &steps[4];
    assert_eq!(nested.kind.as_deref(), Some("subworkflow"));
    assert_eq!(nested.inputs[0].source_output_name, "outfile");
}

#[test]
fn json_format2_is_accepted() {
    let doc = load::from_json_str(
        r#"{"class": "GalaxyWorkflow", "inputs": [{"id": "x"}], "steps": [{"tool_id": "cat1", "in": {"input1": "x"}}]}"#,
    )
    .unwrap();
    let steps = normalize::normalize(&doc).unwrap();
    assert_eq!(steps.len(), 2);
    // List-form step without label or id.
    assert_eq!(steps[1].label, None);
    assert_eq!(steps[1].inputs[0].source_step_label, "0");
}

#[test]
fn native_without_steps_is_format_error() {
    let doc = load::from_json_str(r#"{"a_galaxy_workflow": "true"}"#).unwrap();
    let err = normalize::normalize(&doc).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.code, "F002");
}

#[test]
fn malformed_repository_is_format_error() {
    let doc = load::from_json_str(
        r#"{"steps": {"0": {"id": 0, "tool_shed_repository": {"owner": "a"}}}}"#,
    )
    .unwrap();
    let err = normalize::normalize(&doc).unwrap_err();
    assert_eq!(err.code, "F007");
    assert_eq!(err.step_id.as_deref(), Some("0"));
}
