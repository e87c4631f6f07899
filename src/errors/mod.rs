//! Builtin errors - closed taxonomy of the failures a builtin can raise
//!
//! Every error carries the Python exception it stands for, so callers can
//! report `ValueError: invalid literal ...` exactly the way Python would.

use std::fmt;
use thiserror::Error;

/// Kind of failure, mapped 1:1 to a Python exception class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong type where a specific type is required (`TypeError`)
    InvalidArgumentType,
    /// Right type, out-of-domain value (`ValueError`)
    InvalidArgumentValue,
    /// Divisor of a modulo or divmod is zero (`ZeroDivisionError`)
    DivisionByZero,
    /// Magnitude cannot be represented as an exact integer (`OverflowError`)
    Overflow,
    /// Feature path that is explicitly not implemented (`NotImplementedError`)
    Unsupported,
}

impl ErrorKind {
    /// Name of the Python exception class for this kind
    pub const fn exception_name(self) -> &'static str {
        match self {
            Self::InvalidArgumentType => "TypeError",
            Self::InvalidArgumentValue => "ValueError",
            Self::DivisionByZero => "ZeroDivisionError",
            Self::Overflow => "OverflowError",
            Self::Unsupported => "NotImplementedError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.exception_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}", .kind.exception_name(), .message)]
pub struct BuiltinError {
    pub kind: ErrorKind,
    pub message: String,
}

pub type Result<T> = std::result::Result<T, BuiltinError>;

impl BuiltinError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgumentType, message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgumentValue, message)
    }

    pub fn zero_division() -> Self {
        Self::new(ErrorKind::DivisionByZero, "integer division or modulo by zero")
    }

    pub fn overflow(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Overflow, message)
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported, message)
    }

    /// `'<type>' object cannot be interpreted as an integer`
    pub fn not_an_integer(type_name: &str) -> Self {
        Self::type_error(format!("'{}' object cannot be interpreted as an integer", type_name))
    }

    /// `invalid literal for int() with base <b>: '<s>'`
    pub fn invalid_literal(literal: &str, base: u32) -> Self {
        Self::value_error(format!(
            "invalid literal for int() with base {}: '{}'",
            base, literal
        ))
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}
