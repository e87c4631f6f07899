//! Object system - dynamic values crossing the builtin boundary
//!
//! Design: Builtins are dynamically typed, so their arguments travel as a
//! closed `Value` enum. Optional behavior (index conversion, iteration) is
//! exposed through the `PyObject` capability trait instead of probing for
//! methods at runtime:
//! - Primitive variants answer the capabilities directly
//! - `Value::Object` delegates to a caller-supplied `Rc<dyn PyObject>`
//! - Type names follow Python (`int`, `str`, `NoneType`, ...) for error text

use std::fmt;
use std::rc::Rc;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::builtins::Range;
use crate::errors::{BuiltinError, Result};

/// Fresh single-pass cursor over a sequence of values
pub type PyIter<'a> = Box<dyn Iterator<Item = Value> + 'a>;

/// Capabilities an object may expose to the builtins.
///
/// Only `type_name` is mandatory; the defaults report the capability as
/// absent, which the builtins turn into a `TypeError` naming the type.
pub trait PyObject: fmt::Debug {
    /// Python-visible type name used in error messages
    fn type_name(&self) -> &str;

    /// Index conversion (`__index__`), consulted by `hex`/`oct`/`bin`
    fn index(&self) -> Option<i64> {
        None
    }

    /// Produce a fresh cursor (`__iter__`); every call starts over
    fn iterate(&self) -> Option<PyIter<'_>> {
        None
    }
}

/// Type tag of a `Value`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Range,
    Object,
}

impl ObjectType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::List => "list",
            Self::Tuple => "tuple",
            Self::Range => "range",
            Self::Object => "object",
        }
    }
}

/// Universal dynamic value
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Range(Range),
    Object(Rc<dyn PyObject>),
}

impl Value {
    /// Wrap a caller-defined object
    pub fn object<T: PyObject + 'static>(obj: T) -> Self {
        Value::Object(Rc::new(obj))
    }

    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(items.into_iter().collect())
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    pub fn get_type(&self) -> ObjectType {
        match self {
            Value::None => ObjectType::None,
            Value::Bool(_) => ObjectType::Bool,
            Value::Int(_) => ObjectType::Int,
            Value::Float(_) => ObjectType::Float,
            Value::Str(_) => ObjectType::Str,
            Value::List(_) => ObjectType::List,
            Value::Tuple(_) => ObjectType::Tuple,
            Value::Range(_) => ObjectType::Range,
            Value::Object(_) => ObjectType::Object,
        }
    }

    #[inline]
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a command-line argument.
    ///
    /// JSON literals map onto their natural variant, `inf`/`-inf`/`nan`
    /// become floats and anything else is kept as a plain string.
    pub fn from_cli_arg(arg: &str) -> Result<Self> {
        match arg {
            "inf" | "+inf" => return Ok(Value::Float(f64::INFINITY)),
            "-inf" => return Ok(Value::Float(f64::NEG_INFINITY)),
            "nan" => return Ok(Value::Float(f64::NAN)),
            _ => {}
        }

        match serde_json::from_str::<serde_json::Value>(arg) {
            Ok(json) => Value::try_from(json),
            Err(_) => Ok(Value::Str(arg.to_string())),
        }
    }
}

impl PyObject for Value {
    fn type_name(&self) -> &str {
        match self {
            Value::Object(obj) => obj.type_name(),
            other => other.get_type().name(),
        }
    }

    fn index(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Object(obj) => obj.index(),
            _ => None,
        }
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        match self {
            Value::Str(s) => s.iterate(),
            Value::List(items) | Value::Tuple(items) => Some(Box::new(items.iter().cloned())),
            Value::Range(range) => range.iterate(),
            Value::Object(obj) => obj.iterate(),
            _ => None,
        }
    }
}

impl PyObject for i64 {
    fn type_name(&self) -> &str {
        "int"
    }

    fn index(&self) -> Option<i64> {
        Some(*self)
    }
}

impl PyObject for f64 {
    fn type_name(&self) -> &str {
        "float"
    }
}

impl PyObject for bool {
    fn type_name(&self) -> &str {
        "bool"
    }
}

impl PyObject for str {
    fn type_name(&self) -> &str {
        "str"
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        Some(Box::new(self.chars().map(Value::from)))
    }
}

impl PyObject for String {
    fn type_name(&self) -> &str {
        "str"
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        self.as_str().iterate()
    }
}

impl PyObject for [Value] {
    fn type_name(&self) -> &str {
        "list"
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        Some(Box::new(self.iter().cloned()))
    }
}

impl PyObject for Vec<Value> {
    fn type_name(&self) -> &str {
        "list"
    }

    fn iterate(&self) -> Option<PyIter<'_>> {
        self.as_slice().iterate()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            // Numeric coercion
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => *a as f64 == *b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            // Identity comparison for opaque objects
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Python `repr()`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => fmt_float(*x, f),
            Value::Str(s) => fmt_str(s, f),
            Value::List(items) => {
                f.write_str("[")?;
                fmt_items(items, f)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                fmt_items(items, f)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Range(range) => write!(f, "{}", range),
            Value::Object(obj) => write!(f, "<{} object>", obj.type_name()),
        }
    }
}

fn fmt_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{:.1}", x)
    } else {
        write!(f, "{}", x)
    }
}

fn fmt_str(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("'")?;
    for ch in s.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\'' => f.write_str("\\'")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c => write!(f, "{}", c)?,
        }
    }
    f.write_str("'")
}

fn fmt_items(items: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) | Value::Tuple(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Range(range) => range.serialize(serializer),
            Value::Object(_) => serializer.collect_str(self),
        }
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = BuiltinError;

    fn try_from(json: serde_json::Value) -> Result<Self> {
        use serde_json::Value as Json;

        Ok(match json {
            Json::Null => Value::None,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Json::Object(_) => {
                return Err(BuiltinError::unsupported("dict values are not supported"))
            }
        })
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Str(c.to_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Range> for Value {
    fn from(range: Range) -> Self {
        Value::Range(range)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}
