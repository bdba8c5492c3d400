//! Diagnostic queue with error limits and deduplication.
//!
//! Unlike a source-level compiler queue, type-core diagnostics often have no
//! span, so the queue keeps report order and only drops an error that
//! repeats the previous one exactly: same primary span and same message.
//!
//! Once the error limit is hit, a single `E9002` summary is appended and
//! everything after it is dropped.

use quill_ir::Span;

use crate::{Diagnostic, ErrorCode, ErrorGuaranteed};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors recorded (0 = unlimited).
    pub error_limit: usize,
    /// Drop an error repeating the previous one at the same location.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

impl DiagnosticConfig {
    /// Record everything.
    pub fn unlimited() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: false,
        }
    }
}

/// Ordered collection of reported diagnostics.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    /// Primary span and message of the last recorded error.
    last_error: Option<(Option<Span>, String)>,
    /// The limit summary has been appended.
    truncated: bool,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Record a diagnostic.
    ///
    /// Returns `false` if it was dropped by the limit or as a duplicate.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        if self.limit_reached() {
            if !self.truncated {
                self.truncated = true;
                self.diagnostics.push(too_many_errors(self.config.error_limit));
            }
            return false;
        }

        if diag.is_error() {
            if self.config.deduplicate && self.repeats_last_error(&diag) {
                return false;
            }
            self.last_error = Some((diag.span(), diag.message.clone()));
            self.error_count += 1;
        }

        self.diagnostics.push(diag);
        true
    }

    fn repeats_last_error(&self, diag: &Diagnostic) -> bool {
        self.last_error
            .as_ref()
            .is_some_and(|(span, message)| *span == diag.span() && *message == diag.message)
    }

    /// The limit was hit and later errors were dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Record an error and get proof that it was recorded.
    ///
    /// A dropped duplicate still proves an error exists: the earlier copy.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.push(diag);
        ErrorGuaranteed::new()
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take every recorded diagnostic in report order and reset the queue.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.last_error = None;
        self.truncated = false;
        std::mem::take(&mut self.diagnostics)
    }

    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

/// Summary diagnostic for a queue that hit its limit.
#[cold]
pub fn too_many_errors(limit: usize) -> Diagnostic {
    Diagnostic::error(ErrorCode::E9002)
        .with_message(format!("aborting after {limit} type errors"))
        .with_note("raise the error limit to see more")
}
