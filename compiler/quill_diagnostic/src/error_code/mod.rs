//! Error codes for type-core diagnostics.
//!
//! Format: E#### where the first digit names the class of failure:
//! - E1xxx: a dependency was never declared or interned
//! - E2xxx: type errors in user code
//! - E9xxx: internal compiler errors

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Missing dependencies (E1xxx)
    /// Type referenced before it was interned
    E1001,
    /// Symbol not declared
    E1002,
    /// Template not registered
    E1003,

    // Type errors (E2xxx)
    /// Incompatible type: bound violation, arity mismatch, not assignable
    E2001,
    /// Invalid union or intersection
    E2002,
    /// More arguments than parameters
    E2003,

    // Internal errors (E9xxx)
    /// Internal compiler error
    E9001,
    /// Too many errors
    E9002,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E9001,
        ErrorCode::E9002,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
        }
    }

    /// Short description, used as the default diagnostic title.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "missing type",
            ErrorCode::E1002 => "missing symbol",
            ErrorCode::E1003 => "missing template",
            ErrorCode::E2001 => "incompatible type",
            ErrorCode::E2002 => "invalid type",
            ErrorCode::E2003 => "unexpected argument",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::E9002 => "too many errors",
        }
    }

    /// Check if this is a missing-dependency error (E1xxx range).
    pub fn is_missing_error(&self) -> bool {
        matches!(self, ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003)
    }

    /// Check if this is a type error (E2xxx range).
    pub fn is_type_error(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    /// Check if this is an internal compiler error (E9xxx range).
    pub fn is_internal_error(&self) -> bool {
        matches!(self, ErrorCode::E9001 | ErrorCode::E9002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an error code string such as `"E2001"`, case-insensitively.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
