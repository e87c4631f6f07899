//! Character codec - chr() and ord()
//!
//! Code points, not code units: a character outside the Basic Multilingual
//! Plane is still one character.

use crate::errors::{BuiltinError, Result};
use crate::logging::trace;
use crate::objects::{PyObject, Value};

/// One past the largest Unicode code point
pub const MAX_CODE_POINT: i64 = 0x11_0000;

/// chr() - single-character string for a code point
///
/// # Errors
/// - `TypeError` if `code` is not an integer
/// - `ValueError` if `code` is outside `[0, 0x110000)` or a surrogate
pub fn chr(code: &Value) -> Result<char> {
    trace!(builtin = "chr", type_name = code.type_name(), "chr() called");

    let code = match code {
        Value::Int(i) => *i,
        Value::Float(_) => {
            return Err(BuiltinError::type_error("integer argument expected, got float"))
        }
        other => {
            return Err(BuiltinError::type_error(format!(
                "an integer is required (got type {})",
                other.type_name()
            )))
        }
    };

    char_from_code_point(code)
}

/// Typed form of `chr` for callers that already hold an integer
pub fn char_from_code_point(code: i64) -> Result<char> {
    if !(0..MAX_CODE_POINT).contains(&code) {
        return Err(BuiltinError::value_error("chr() arg not in range(0x110000)"));
    }

    // The range check above guarantees the value fits in u32
    char::from_u32(code as u32)
        .ok_or_else(|| BuiltinError::value_error("chr() arg is a surrogate code point"))
}

/// ord() - code point of a one-character string
///
/// # Errors
/// `TypeError` if `ch` is not a string or does not hold exactly one code point
pub fn ord(ch: &Value) -> Result<u32> {
    trace!(builtin = "ord", type_name = ch.type_name(), "ord() called");

    match ch {
        Value::Str(s) => code_point_of(s),
        other => Err(BuiltinError::type_error(format!(
            "ord() expected string of length 1, but {} found",
            other.type_name()
        ))),
    }
}

/// Typed form of `ord` for string slices
pub fn code_point_of(s: &str) -> Result<u32> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(u32::from(c)),
        _ => Err(BuiltinError::type_error(format!(
            "ord() expected a character, but string of length {} found",
            s.chars().count()
        ))),
    }
}
