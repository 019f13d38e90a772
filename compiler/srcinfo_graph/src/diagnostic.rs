//! Non-fatal conditions met while building a graph.
//!
//! None of these stop the session. The affected relation is skipped or
//! replaced by a best-effort entry and the rest of the declaration is still
//! processed.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    /// A type shape with no structured form, recorded as opaque.
    UnsupportedType,
    /// A template argument kind with no linking strategy.
    DroppedTemplateArg,
    /// A referenced declaration (base class, owner) could not be resolved.
    MissingReference,
    /// A declaration kind the graph has no node for.
    UnsupportedDecl,
}

impl DiagnosticKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticKind::UnsupportedType => "unsupported type",
            DiagnosticKind::DroppedTemplateArg => "dropped template argument",
            DiagnosticKind::MissingReference => "missing reference",
            DiagnosticKind::UnsupportedDecl => "unsupported declaration",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.message)
    }
}
