//! Load phase: text → `serde_json::Value`.
//!
//! Native workflows are JSON (`.ga`); Format2 workflows are usually YAML.
//! Both end up as a JSON value so the normalizer only deals with one tree type.

use std::path::Path;

use serde_json::Value;

use crate::error::{ConvertError, LoadError};

pub const TRACING_TARGET: &str = "gxgraph::load";

/// Deserialize a JSON workflow document.
pub fn from_json_str(text: &str) -> Result<Value, ConvertError> {
    serde_json::from_str::<Value>(text).map_err(|e| LoadError::from(e).into())
}

/// Deserialize a YAML workflow document. JSON input is accepted as well.
pub fn from_yaml_str(text: &str) -> Result<Value, ConvertError> {
    serde_yaml::from_str::<Value>(text).map_err(|e| LoadError::from(e).into())
}

/// Read a workflow from disk, picking the parser from the file extension.
pub fn from_path(path: impl AsRef<Path>) -> Result<Value, ConvertError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ga") || ext.eq_ignore_ascii_case("json"));

    let syntax = if is_json { "json" } else { "yaml" };
    tracing::debug!(
        target: TRACING_TARGET,
        path = %path.display(),
        syntax,
        "Loading workflow document"
    );

    if is_json {
        from_json_str(&text)
    } else {
        from_yaml_str(&text)
    }
}
