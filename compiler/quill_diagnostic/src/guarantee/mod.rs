//! Proof that an error diagnostic was recorded.

use std::fmt;

/// Zero-sized token handed out only by [`DiagnosticQueue`](crate::DiagnosticQueue)
/// once it holds at least one error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// `Some` iff `count` errors is at least one.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(ErrorGuaranteed::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error(s) emitted")
    }
}

impl std::error::Error for ErrorGuaranteed {}
