//! Error taxonomy for the reception core.
//!
//! Three kinds only: field validation failures, missing records, and
//! collaborator failures. Collaborator errors are never swallowed; they are
//! wrapped once at the port boundary and propagated whole.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The external collaborator a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    IdentitySearch,
    RecordStore,
    ScanCountSource,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IdentitySearch => "identity-search",
            Self::RecordStore => "record-store",
            Self::ScanCountSource => "scan-count-source",
        }
    }
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ReceptionError {
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("{collaborator} failed: {source}")]
    Upstream {
        collaborator: Collaborator,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReceptionError>;

impl ReceptionError {
    pub fn upstream(collaborator: Collaborator, source: impl Into<anyhow::Error>) -> Self {
        Self::Upstream {
            collaborator,
            source: source.into(),
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::Upstream { .. } => 502,
        }
    }

    /// Stable machine-readable kind, used in error response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failure",
            Self::NotFound(_) => "not_found",
            Self::Upstream { .. } => "upstream_failure",
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
