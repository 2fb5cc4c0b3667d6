//! Diagnostics: problems found while resolving models.
//!
//! Nothing found in model sources is fatal. Lookup failures, version
//! conflicts and repository misses are collected here and handed back to the
//! caller next to the resolved environment.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{Position, Span};

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file containing this diagnostic, if it came from a file.
    pub uri: Option<SmolStr>,
    /// Source range the diagnostic points at.
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(uri: Option<SmolStr>, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self {
            uri,
            span,
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(uri: Option<SmolStr>, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self {
            uri,
            span,
            severity: Severity::Warning,
            code: None,
            message: message.into(),
        }
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    fn sort_key(&self) -> (&Option<SmolStr>, Position, Position, &Option<Arc<str>>, &str) {
        (
            &self.uri,
            self.span.start,
            self.span.end,
            &self.code,
            &self.message,
        )
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Resolution errors
/// - **W0001-W0099**: Repository warnings
pub mod codes {
    /// A path that names nothing.
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
    /// A path that names a definition of the wrong kind.
    pub const WRONG_KIND: &str = "E0002";
    /// A fetched model written for another schema language version.
    pub const VERSION_MISMATCH: &str = "E0003";

    /// An imported model the repository does not know.
    pub const MODEL_NOT_FOUND: &str = "W0001";
    /// An imported model the repository knows more than once.
    pub const AMBIGUOUS_MODEL: &str = "W0002";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during resolution.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add an unresolved reference error.
    pub fn unresolved_reference(&mut self, uri: Option<SmolStr>, span: Span, path: &str) {
        self.add(
            Diagnostic::error(uri, span, format!("unresolved reference: '{path}'"))
                .with_code(codes::UNRESOLVED_REFERENCE),
        );
    }

    /// Add an error for a reference whose target has the wrong kind.
    pub fn wrong_kind(
        &mut self,
        uri: Option<SmolStr>,
        span: Span,
        path: &str,
        expected: &str,
        found: &str,
    ) {
        self.add(
            Diagnostic::error(
                uri,
                span,
                format!("wrong kind: '{path}' is a {found}, expected {expected}"),
            )
            .with_code(codes::WRONG_KIND),
        );
    }

    /// Add an error for an import rejected because of its schema version.
    pub fn version_mismatch(
        &mut self,
        uri: Option<SmolStr>,
        span: Span,
        model: &str,
        found: Option<&str>,
        expected: Option<&str>,
    ) {
        self.add(
            Diagnostic::error(
                uri,
                span,
                format!(
                    "version mismatch: model '{model}' has {}, expected {}",
                    describe_version(found),
                    describe_version(expected)
                ),
            )
            .with_code(codes::VERSION_MISMATCH),
        );
    }

    /// Add a warning for an import the repository does not know.
    pub fn model_not_found(&mut self, uri: Option<SmolStr>, span: Span, model: &str) {
        self.add(
            Diagnostic::warning(uri, span, format!("model not found: '{model}'"))
                .with_code(codes::MODEL_NOT_FOUND),
        );
    }

    /// Add a warning for an import with several repository candidates.
    pub fn ambiguous_model(
        &mut self,
        uri: Option<SmolStr>,
        span: Span,
        model: &str,
        candidates: &[SmolStr],
    ) {
        self.add(
            Diagnostic::warning(
                uri,
                span,
                format!(
                    "ambiguous model: '{model}' could be: {}",
                    candidates.join(", ")
                ),
            )
            .with_code(codes::AMBIGUOUS_MODEL),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Take all diagnostics, ordered by file and position.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        self.diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self.diagnostics
    }
}

fn describe_version(version: Option<&str>) -> String {
    match version {
        Some(version) => format!("INTERLIS {version}"),
        None => "no INTERLIS header".to_string(),
    }
}
