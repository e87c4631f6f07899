//! Range - immutable arithmetic progression with lazy iteration
//!
//! Design: The progression is a value type. `stop` is clamped toward
//! `start` at construction, so a wrong-direction step is simply empty.
//! Traversal state lives in `RangeIter`, never in the `Range`, which
//! makes every traversal independent and restartable.

use std::fmt;
use std::iter::FusedIterator;

use serde::Serialize;

use crate::errors::{BuiltinError, Result};
use crate::logging::trace;
use crate::objects::{PyIter, PyObject, Value};

use super::len::HasLen;
use super::numeric::divmod;

/// Python's range()
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    start: i64,
    stop: i64,
    step: i64,
    #[serde(skip)]
    length: u64,
}

impl Range {
    /// Create a new progression.
    ///
    /// # Errors
    /// `ValueError` when `step` is zero
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self> {
        if step == 0 {
            return Err(BuiltinError::value_error("range() arg 3 must not be zero"));
        }

        let stop = if step < 0 { stop.min(start) } else { stop.max(start) };

        let span = i128::from(stop) - i128::from(start);
        let step_wide = i128::from(step);
        // span and step share a sign here, so truncation equals flooring
        let length = span / step_wide + i128::from(span % step_wide != 0);
        // At most 2^64 - 1, reached by range(i64::MIN, i64::MAX)
        let length = u64::try_from(length).unwrap_or(u64::MAX);

        trace!(start, stop, step, length, "range created");
        Ok(Self { start, stop, step, length })
    }

    /// `range(stop)`
    #[inline]
    pub fn to(stop: i64) -> Self {
        Self::between(0, stop)
    }

    /// `range(start, stop)`
    #[inline]
    pub fn between(start: i64, stop: i64) -> Self {
        let stop = stop.max(start);
        let length = stop.abs_diff(start);
        Self { start, stop, step: 1, length }
    }

    #[inline]
    pub const fn start(&self) -> i64 {
        self.start
    }

    /// Normalized stop (never on the wrong side of `start`)
    #[inline]
    pub const fn stop(&self) -> i64 {
        self.stop
    }

    #[inline]
    pub const fn step(&self) -> i64 {
        self.step
    }

    /// Number of elements, saturating at `usize::MAX` on narrow targets
    #[inline]
    pub fn len(&self) -> usize {
        usize::try_from(self.length).unwrap_or(usize::MAX)
    }

    /// Exact number of elements
    #[inline]
    pub const fn len_u64(&self) -> u64 {
        self.length
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Fresh traversal from `start`
    #[inline]
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: i128::from(self.start),
            step: i128::from(self.step),
            remaining: self.length,
        }
    }

    /// Number of occurrences of `value`: 1 on the progression, 0 otherwise.
    ///
    /// Constant time; no traversal.
    pub fn count(&self, value: i64) -> usize {
        let offset = i128::from(value) - i128::from(self.start);

        match divmod(offset, i128::from(self.step)) {
            Ok((q, 0)) if q >= 0 && q < i128::from(self.length) => 1,
            _ => 0,
        }
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.count(value) == 1
    }
}

/// Python repr: `range(0, 10)` / `range(0, 10, 2)`
impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.step == 1 {
            write!(f, "range({}, {})", self.start, self.stop)
        } else {
            write!(f, "range({}, {}, {})", self.start, self.stop, self.step)
        }
    }
}

impl HasLen for Range {
    #[inline]
    fn len(&self) -> usize {
        Range::len(self)
    }
}

impl PyObject for Range {
    fn type_name(&self) -> &str {
        "range"
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        Some(Box::new(self.iter().map(Value::Int)))
    }
}

impl<'a> IntoIterator for &'a Range {
    type Item = i64;
    type IntoIter = RangeIter;

    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl IntoIterator for Range {
    type Item = i64;
    type IntoIter = RangeIter;

    #[inline]
    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

/// Single-pass cursor over a `Range`
#[derive(Debug, Clone)]
pub struct RangeIter {
    // Widened so stepping past the last element never overflows
    next: i128,
    step: i128,
    remaining: u64,
}

impl Iterator for RangeIter {
    type Item = i64;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let val = self.next;
        self.next += self.step;
        self.remaining -= 1;
        // Every element lies between start and stop, both i64
        Some(val as i64)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for RangeIter {}

impl FusedIterator for RangeIter {}

impl DoubleEndedIterator for RangeIter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some((self.next + self.step * i128::from(self.remaining)) as i64)
    }
}

/// range(start, stop, step)
#[inline]
pub fn range(start: i64, stop: i64, step: i64) -> Result<Range> {
    Range::new(start, stop, step)
}
