//! Unified conversion error type used across all phases.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Normalize,
    Build,
    Validate,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Load => write!(f, "Load"),
            Phase::Normalize => write!(f, "Normalize"),
            Phase::Build => write!(f, "Build"),
            Phase::Validate => write!(f, "Validate"),
        }
    }
}

/// `Format` means the input document is unusable; `Validation` means a built
/// graph breaks a structural rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Format,
    Validation,
}

#[derive(Debug, Clone)]
pub struct ConvertError {
    pub kind: ErrorKind,
    pub code: String,
    pub phase: Phase,
    pub message: String,
    pub step_id: Option<String>,
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.step_id {
            Some(id) => write!(
                f,
                "[{}:{}] {} (step '{}')",
                self.phase, self.code, self.message, id
            ),
            None => write!(f, "[{}:{}] {}", self.phase, self.code, self.message),
        }
    }
}

impl std::error::Error for ConvertError {}

impl ConvertError {
    pub fn normalize(code: &str, message: impl Into<String>, step_id: Option<String>) -> Self {
        ConvertError {
            kind: ErrorKind::Format,
            code: code.into(),
            phase: Phase::Normalize,
            message: message.into(),
            step_id,
        }
    }

    pub fn build(code: &str, message: impl Into<String>, step_id: Option<String>) -> Self {
        ConvertError {
            kind: ErrorKind::Format,
            code: code.into(),
            phase: Phase::Build,
            message: message.into(),
            step_id,
        }
    }

    pub fn validate(code: &str, message: impl Into<String>, step_id: Option<String>) -> Self {
        ConvertError {
            kind: ErrorKind::Validation,
            code: code.into(),
            phase: Phase::Validate,
            message: message.into(),
            step_id,
        }
    }

    pub fn is_format(&self) -> bool {
        self.kind == ErrorKind::Format
    }
}

/// Failures while turning bytes into a document value.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse workflow JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse workflow YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<LoadError> for ConvertError {
    fn from(e: LoadError) -> Self {
        let code = match &e {
            LoadError::Io { .. } => "L001",
            LoadError::Json(_) | LoadError::Yaml(_) => "L002",
        };
        ConvertError {
            kind: ErrorKind::Format,
            code: code.into(),
            phase: Phase::Load,
            message: e.to_string(),
            step_id: None,
        }
    }
}
