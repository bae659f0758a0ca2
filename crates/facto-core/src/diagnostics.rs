//! Reporting of generation failures back to the host build.

use crate::error::ProcessingError;
use crate::model::QualifiedName;
use serde::Serialize;
use tracing::error;

/// One build-time error message, optionally anchored to a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The declaration the message is tied to; `None` for failures with
    /// no anchor element (e.g. artifact writes).
    pub element: Option<QualifiedName>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic anchored to a declaration.
    #[must_use]
    pub fn on_element(element: QualifiedName, message: impl Into<String>) -> Self {
        Self {
            element: Some(element),
            message: message.into(),
        }
    }

    /// Creates a diagnostic with no anchor element.
    #[must_use]
    pub fn unanchored(message: impl Into<String>) -> Self {
        Self {
            element: None,
            message: message.into(),
        }
    }
}

impl From<&ProcessingError> for Diagnostic {
    fn from(err: &ProcessingError) -> Self {
        Self {
            element: err.element().cloned(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.element {
            Some(element) => write!(f, "{element}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Receives diagnostics and renders them as build errors.
///
/// The host decides how a diagnostic reaches the user; the core only
/// guarantees that every failure is reported, none silently dropped.
pub trait DiagnosticSink {
    /// Reports one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that buffers diagnostics for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All reported diagnostics, in report order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Whether anything was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of reported diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

/// A sink that forwards every diagnostic to `tracing::error!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic.element {
            Some(element) => error!(element = %element, "{}", diagnostic.message),
            None => error!("{}", diagnostic.message),
        }
    }
}
