//! Non-fatal findings produced while compiling a configuration.
//!
//! The engine never aborts on semantically incomplete input. Anything that
//! would otherwise be an error is recorded here and returned alongside the BOM.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of non-fatal finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    /// An identifier could not be mapped; the raw value was passed through.
    ResolutionWarning,
    /// The rule engine changed the configuration (placement reassignment,
    /// mandatory injection, ceiling enforcement).
    RuleRepair,
}

/// A single diagnostic tied to the configuration facet that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Facet tag, e.g. `basin[2]` or `pegboard`
    pub facet: String,
    pub message: String,
}

impl Diagnostic {
    pub fn resolution(facet: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::ResolutionWarning,
            facet: facet.into(),
            message: message.into(),
        }
    }

    pub fn repair(facet: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::RuleRepair,
            facet: facet.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.kind {
            DiagnosticKind::ResolutionWarning => "unresolved",
            DiagnosticKind::RuleRepair => "repaired",
        };
        write!(f, "[{}] {}: {}", label, self.facet, self.message)
    }
}

/// A mandatory facet that is absent, reported to the caller for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingField {
    /// Field name as it appears in the configuration JSON
    pub field: String,
    pub description: String,
}

impl MissingField {
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.description)
    }
}
