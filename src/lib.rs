//! Galaxy workflow → Cytoscape element conversion.
//!
//! Pipeline: [`load`] → [`normalize`] → [`graph::build`], with
//! [`validate::validate_elements`] as an optional structural check.

pub mod error;
pub mod graph;
pub mod load;
pub mod normalize;
pub mod validate;
pub mod wasm;

use std::path::Path;

use serde_json::Value;

use crate::error::ConvertError;
use crate::graph::Graph;

/// Normalize a loaded workflow document of either schema and build its elements.
pub fn elements(doc: &Value) -> Result<Graph, ConvertError> {
    let steps = normalize::normalize(doc)?;
    graph::build(&steps)
}

/// Load a workflow from disk and build its elements.
pub fn elements_from_path(path: impl AsRef<Path>) -> Result<Graph, ConvertError> {
    let doc = load::from_path(path)?;
    elements(&doc)
}
