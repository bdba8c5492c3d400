//! Diagnostics for the Quill type core.
//!
//! Every user-facing condition the type cache or a reifier detects becomes a
//! [`Diagnostic`] with an [`ErrorCode`], a message, and, when the caller
//! supplied one, a primary span. Diagnostics are collected in a
//! [`DiagnosticQueue`] which applies the error limit and drops repeats.
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] can only be obtained from the queue after an error was
//! recorded, so a function returning `Result<T, ErrorGuaranteed>` proves it
//! reported something before failing.

mod diagnostic;
mod error_code;
mod guarantee;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use guarantee::ErrorGuaranteed;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
