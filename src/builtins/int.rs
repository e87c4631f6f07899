//! Integer conversion - int() with strict multi-base literal parsing
//!
//! Design: Validation happens before any digit is consumed, in the order
//! Python applies it: explicit base on a non-string, base 0, base bounds.
//! String literals are parsed strictly; a `0b`/`0o`/`0x` marker must agree
//! with the declared base. Results are exact `i64` values.

use crate::errors::{BuiltinError, Result};
use crate::logging::{debug, log_type_conversion, trace};
use crate::objects::{PyObject, Value};

use super::numeric::Radix;

const MIN_BASE: i64 = 2;
const MAX_BASE: i64 = 36;

/// int() - convert a value to an exact integer.
///
/// `base` is only meaningful for strings and defaults to 10.
///
/// # Errors
/// - `TypeError` for an explicit base on a non-string, or an unsupported type
/// - `NotImplementedError` for base 0
/// - `ValueError` for a base outside `[2, 36]`, NaN, or a malformed literal
/// - `OverflowError` for infinities and magnitudes beyond `i64`
pub fn int(value: &Value, base: Option<i64>) -> Result<i64> {
    trace!(builtin = "int", type_name = value.type_name(), ?base, "int() called");

    if base.is_some() && !matches!(value, Value::Str(_)) {
        return Err(BuiltinError::type_error(
            "int() can't convert non-string with explicit base",
        ));
    }

    let base = validate_base(base.unwrap_or(10))?;

    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(x) => float_to_int(*x),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Str(s) => parse_int(s, base),
        Value::Object(obj) => match obj.index() {
            Some(i) => {
                log_type_conversion(obj.type_name(), "int");
                Ok(i)
            }
            None => Err(unsupported_type(obj.type_name())),
        },
        other => Err(unsupported_type(other.type_name())),
    }
}

/// Parse a string literal in `base` (2..=36).
///
/// Surrounding whitespace is ignored, case is ignored, a single leading
/// sign is accepted and leading zeros carry no meaning. A base marker must
/// match `base` exactly (`0x` only in base 16).
pub fn parse_int(text: &str, base: u32) -> Result<i64> {
    let base = validate_base(i64::from(base))?;
    let invalid = || BuiltinError::invalid_literal(text, base);

    let literal = text.trim();
    let (negative, unsigned) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    let digits = match split_marker(unsigned) {
        Some((radix, rest)) => {
            if radix.base() != base {
                debug!(builtin = "int", base, marker = %radix.prefix(), "base marker mismatch");
                return Err(invalid());
            }
            rest
        }
        None => unsigned,
    };

    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(base)) {
        return Err(invalid());
    }

    apply_sign(parse_magnitude(digits, base)?, negative)
}

fn validate_base(base: i64) -> Result<u32> {
    if base == 0 {
        return Err(BuiltinError::unsupported(
            "interpretation as a code literal not supported yet",
        ));
    }

    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(BuiltinError::value_error("int() base must be >= 2 and <= 36"));
    }

    Ok(base as u32)
}

/// Split a `0b`/`0o`/`0x` marker (any case) off the front of a literal
fn split_marker(unsigned: &str) -> Option<(Radix, &str)> {
    let mut chars = unsigned.chars();
    if chars.next() != Some('0') {
        return None;
    }

    let radix = Radix::from_prefix(chars.next()?)?;
    Some((radix, &unsigned[2..]))
}

/// Accumulate validated digits
fn parse_magnitude(digits: &str, base: u32) -> Result<u64> {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(base))
        .try_fold(0u64, |acc, digit| {
            acc.checked_mul(u64::from(base))?.checked_add(u64::from(digit))
        })
        .ok_or_else(too_large)
}

fn too_large() -> BuiltinError {
    BuiltinError::overflow("int too large to convert to i64")
}

fn apply_sign(magnitude: u64, negative: bool) -> Result<i64> {
    if negative {
        if magnitude == i64::MIN.unsigned_abs() {
            return Ok(i64::MIN);
        }
        i64::try_from(magnitude).map(|m| -m).map_err(|_| too_large())
    } else {
        i64::try_from(magnitude).map_err(|_| too_large())
    }
}

/// Truncate a float toward zero
fn float_to_int(x: f64) -> Result<i64> {
    if x.is_infinite() {
        return Err(BuiltinError::overflow(
            "cannot convert float infinity to integer",
        ));
    }

    if x.is_nan() {
        return Err(BuiltinError::value_error(
            "cannot convert float NaN to integer",
        ));
    }

    let truncated = x.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is already out of range
    if truncated >= i64::MAX as f64 || truncated < i64::MIN as f64 {
        return Err(BuiltinError::overflow("float too large to convert to i64"));
    }

    log_type_conversion("float", "int");
    Ok(truncated as i64)
}

fn unsupported_type(type_name: &str) -> BuiltinError {
    BuiltinError::type_error(format!(
        "int() argument must be a string, a bytes-like object or a number, not '{}'",
        type_name
    ))
}
