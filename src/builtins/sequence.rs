//! Iteration utilities - iter(), list(), zip(), enumerate(), sum()
//!
//! Design: Anything exposing `PyObject::iterate` is iterable. Cursors are
//! created fresh on every call and borrow their source, so two cursors over
//! the same object never interfere. `zip` and `enumerate` are generic
//! adapters and work equally on native iterators and on `PyIter`.

use std::fmt;
use std::iter::FusedIterator;

use smallvec::SmallVec;

use crate::errors::{BuiltinError, Result};
use crate::logging::{debug, trace};
use crate::objects::{PyIter, PyObject, Value};

/// iter() - fresh single-pass cursor
///
/// # Errors
/// `TypeError` if the object exposes no iteration capability
pub fn iter<T: PyObject + ?Sized>(obj: &T) -> Result<PyIter<'_>> {
    trace!(builtin = "iter", type_name = obj.type_name(), "iter() called");

    obj.iterate().ok_or_else(|| {
        debug!(builtin = "iter", type_name = obj.type_name(), "object is not iterable");
        BuiltinError::type_error(format!("'{}' object is not iterable", obj.type_name()))
    })
}

/// list() - drain `iter(obj)` into a vector
pub fn list<T: PyObject + ?Sized>(obj: &T) -> Result<Vec<Value>> {
    Ok(iter(obj)?.collect())
}

/// Lock-step iterator over several cursors.
///
/// Stops for good at the first exhausted cursor, even if the inputs are
/// not fused themselves.
#[derive(Debug, Clone)]
pub struct Zip<I> {
    cursors: SmallVec<[I; 4]>,
    done: bool,
}

impl<I: Iterator> Iterator for Zip<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursors.is_empty() {
            return None;
        }

        let mut row = Vec::with_capacity(self.cursors.len());
        for cursor in &mut self.cursors {
            match cursor.next() {
                Some(item) => row.push(item),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done || self.cursors.is_empty() {
            return (0, Some(0));
        }

        self.cursors
            .iter()
            .map(Iterator::size_hint)
            .fold((usize::MAX, None), |(lo, hi), (l, h)| {
                let hi = match (hi, h) {
                    (Some(a), Some(b)) => Some(usize::min(a, b)),
                    (a, b) => a.or(b),
                };
                (lo.min(l), hi)
            })
    }
}

impl<I: Iterator> FusedIterator for Zip<I> {}

/// zip() - one row per position until any input is exhausted.
///
/// With no inputs the result is empty.
pub fn zip<I>(iterables: impl IntoIterator<Item = I>) -> Zip<I::IntoIter>
where
    I: IntoIterator,
{
    Zip {
        cursors: iterables.into_iter().map(IntoIterator::into_iter).collect(),
        done: false,
    }
}

/// zip() over dynamic values, producing tuples
///
/// # Errors
/// `TypeError` if any argument is not iterable
pub fn zip_values(values: &[Value]) -> Result<impl Iterator<Item = Value> + '_> {
    let cursors = values.iter().map(iter).collect::<Result<Vec<_>>>()?;
    Ok(zip(cursors).map(Value::Tuple))
}

/// Counter-tagged iterator with an arbitrary (possibly negative) start.
///
/// Indices are exact `i64`s. Once `i64::MAX` has been handed out the
/// iterator ends without pulling another item; `is_index_exhausted` tells
/// that apart from the input running dry.
#[derive(Debug, Clone)]
pub struct Enumerate<I> {
    inner: I,
    // None once the counter has passed i64::MAX
    next_index: Option<i64>,
}

impl<I> Enumerate<I> {
    /// `true` when iteration stopped because the index left `i64`
    #[inline]
    pub fn is_index_exhausted(&self) -> bool {
        self.next_index.is_none()
    }

    /// The wrapped iterator, positioned after the last yielded item
    #[inline]
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator> Iterator for Enumerate<I> {
    type Item = (i64, I::Item);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index?;
        let item = self.inner.next()?;
        self.next_index = index.checked_add(1);
        Some((index, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(index) = self.next_index else {
            return (0, Some(0));
        };

        let room = i128::from(i64::MAX) - i128::from(index) + 1;
        let room = usize::try_from(room).unwrap_or(usize::MAX);
        let (lo, hi) = self.inner.size_hint();
        (lo.min(room), Some(hi.map_or(room, |h| h.min(room))))
    }
}

impl<I: FusedIterator> FusedIterator for Enumerate<I> {}

/// enumerate() - `(index, item)` pairs, index counting up from `start`
#[inline]
pub fn enumerate<I: IntoIterator>(iterable: I, start: i64) -> Enumerate<I::IntoIter> {
    Enumerate {
        inner: iterable.into_iter(),
        next_index: Some(start),
    }
}

/// sum() - `start + x0 + x1 + ...`
///
/// Integers stay integers; a float anywhere promotes the total to float.
///
/// # Errors
/// - `TypeError` if the object is not iterable or holds non-numbers
/// - `OverflowError` if the integer total leaves `i64`
pub fn sum<T: PyObject + ?Sized>(obj: &T, start: Value) -> Result<Value> {
    iter(obj)?.try_fold(start, add_numbers)
}

fn add_numbers(acc: Value, item: Value) -> Result<Value> {
    match (as_int(&acc), as_int(&item)) {
        (Some(a), Some(b)) => a
            .checked_add(b)
            .map(Value::Int)
            .ok_or_else(|| BuiltinError::overflow("integer sum out of range")),
        _ => match (as_number(&acc), as_number(&item)) {
            (Some(a), Some(b)) => Ok(Value::Float(a + b)),
            _ => Err(BuiltinError::type_error(format!(
                "unsupported operand type(s) for +: '{}' and '{}'",
                acc.type_name(),
                item.type_name()
            ))),
        },
    }
}

fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Float(x) => Some(*x),
        other => as_int(other).map(|i| i as f64),
    }
}

/// Generator-backed iterable: each `iter()` calls the factory again
pub struct Generator<F> {
    factory: F,
}

impl<F, I> Generator<F>
where
    F: Fn() -> I,
    I: Iterator<Item = Value>,
{
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F> fmt::Debug for Generator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<generator object>")
    }
}

impl<F, I> PyObject for Generator<F>
where
    F: Fn() -> I,
    I: Iterator<Item = Value> + 'static,
{
    fn type_name(&self) -> &str {
        "generator"
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        Some(Box::new((self.factory)()))
    }
}
