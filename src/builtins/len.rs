//! Length operations - collection size queries
//!
//! Design: Generic trait for statically typed collections plus a dynamic
//! `len()` over `Value`. Strings count code points, as Python does.

use crate::errors::{BuiltinError, Result};
use crate::objects::{PyObject, Value};

/// Trait for types with computable length
pub trait HasLen {
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// len() over a dynamic value
///
/// # Errors
/// `TypeError` for values without a length
pub fn len(obj: &Value) -> Result<usize> {
    match obj {
        Value::Str(s) => Ok(HasLen::len(s.as_str())),
        Value::List(items) | Value::Tuple(items) => Ok(items.len()),
        Value::Range(range) => Ok(range.len()),
        other => Err(BuiltinError::type_error(format!(
            "object of type '{}' has no len()",
            other.type_name()
        ))),
    }
}

/// Safe Rust API - length of any `HasLen`
#[inline]
pub fn len_of<T: HasLen + ?Sized>(obj: &T) -> usize {
    obj.len()
}

impl<T> HasLen for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }
}

impl<T> HasLen for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T, const N: usize> HasLen for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }
}

impl HasLen for str {
    #[inline]
    fn len(&self) -> usize {
        self.chars().count()
    }
}
