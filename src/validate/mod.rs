//! Element validation phase (post-build).
//!
//! Checks a built `Graph` against the structural rules renderers rely on.
//! Unlike conversion, validation collects every violation.

pub mod structural;

use crate::error::ConvertError;
use crate::graph::{ElementGraph, Graph};

/// Validate built elements. Returns all errors found.
pub fn validate_elements(elements: &Graph) -> Vec<ConvertError> {
    let view = ElementGraph::build(elements);
    structural::validate_structural(elements, &view)
}
