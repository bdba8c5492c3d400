//! Conditions reported by the type core.

use std::fmt;

use quill_diagnostic::{Diagnostic, ErrorCode};
use quill_ir::{Span, SymbolUrl, TypeDef};

/// Class of a recoverable failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// A dependency was never interned.
    MissingType,
    /// A referenced symbol is not declared.
    MissingSymbol,
    /// A referenced template is not registered.
    MissingTemplate,
    /// Bound violation, arity mismatch, or an argument that is not assignable.
    IncompatibleType,
    /// Union or intersection members that overlap or cannot be combined.
    TypeError,
    /// More call arguments than declared parameters.
    UnexpectedArgument,
}

impl ConditionKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ConditionKind::MissingType => ErrorCode::E1001,
            ConditionKind::MissingSymbol => ErrorCode::E1002,
            ConditionKind::MissingTemplate => ErrorCode::E1003,
            ConditionKind::IncompatibleType => ErrorCode::E2001,
            ConditionKind::TypeError => ErrorCode::E2002,
            ConditionKind::UnexpectedArgument => ErrorCode::E2003,
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().description())
    }
}

/// A recoverable failure with its message and, when known, where it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    pub kind: ConditionKind,
    pub message: String,
    pub span: Option<Span>,
}

pub type TypeResult<T> = Result<T, Condition>;

impl Condition {
    #[cold]
    pub fn new(kind: ConditionKind, message: impl Into<String>) -> Self {
        Condition {
            kind,
            message: message.into(),
            span: None,
        }
    }

    #[cold]
    pub fn missing_type(type_def: &TypeDef) -> Self {
        Self::new(ConditionKind::MissingType, format!("missing type {type_def}"))
    }

    #[cold]
    pub fn missing_symbol(url: &SymbolUrl) -> Self {
        Self::new(ConditionKind::MissingSymbol, format!("missing symbol {url}"))
    }

    #[cold]
    pub fn missing_template(url: &SymbolUrl) -> Self {
        Self::new(
            ConditionKind::MissingTemplate,
            format!("missing template {url}"),
        )
    }

    #[cold]
    pub fn incompatible(message: impl Into<String>) -> Self {
        Self::new(ConditionKind::IncompatibleType, message)
    }

    #[cold]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ConditionKind::TypeError, message)
    }

    #[cold]
    pub fn unexpected_argument(message: impl Into<String>) -> Self {
        Self::new(ConditionKind::UnexpectedArgument, message)
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.kind.code()).with_message(self.message.clone());
        match self.span {
            Some(span) => diag.at(span, self.kind.to_string()),
            None => diag,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Condition {}

/// Abort on a broken type-core invariant.
///
/// Use through [`invariant!`](crate::invariant).
#[doc(hidden)]
#[cold]
#[track_caller]
pub fn invariant_violation(message: fmt::Arguments<'_>) -> ! {
    tracing::error!(code = %ErrorCode::E9001, %message, "type core invariant violated");
    panic!("{}: {message}", ErrorCode::E9001.description());
}

/// Panic with an internal compiler error after logging it.
#[macro_export]
macro_rules! invariant {
    ($($arg:tt)*) => {
        $crate::error::invariant_violation(format_args!($($arg)*))
    };
}
