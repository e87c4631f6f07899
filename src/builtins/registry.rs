//! Builtin dispatch - call a builtin by name with positional arguments
//!
//! Design: Thin adapters from `&[Value]` onto the typed builtins. Arity
//! and argument-type checks live here, with Python's wording, so the
//! typed APIs stay free of argument-count concerns.

use crate::errors::{BuiltinError, Result};
use crate::logging::{log_builtin_call, log_builtin_error};
use crate::objects::{PyObject, Value};

use super::{chars, int, len, numeric, range, sequence};

/// Names accepted by `call`
pub const BUILTINS: &[&str] = &[
    "bin", "chr", "divmod", "enumerate", "hex", "int", "iter", "len", "list", "oct", "ord",
    "range", "sum", "zip",
];

#[inline]
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Invoke the builtin `name`.
///
/// Lazy results (`iter`, `zip`, `enumerate`) are materialized into lists.
pub fn call(name: &str, args: &[Value]) -> Result<Value> {
    log_builtin_call(name, args.len());

    let result = match name {
        "int" => call_int(args),
        "divmod" => call_divmod(args),
        "hex" => single(name, args).and_then(numeric::hex).map(Value::Str),
        "oct" => single(name, args).and_then(numeric::oct).map(Value::Str),
        "bin" => single(name, args).and_then(numeric::bin).map(Value::Str),
        "chr" => single(name, args).and_then(chars::chr).map(Value::from),
        "ord" => single(name, args)
            .and_then(chars::ord)
            .map(|code| Value::Int(i64::from(code))),
        "range" => call_range(args),
        "iter" | "list" => single(name, args).and_then(sequence::list).map(Value::List),
        "zip" => sequence::zip_values(args).map(|rows| Value::List(rows.collect())),
        "enumerate" => call_enumerate(args),
        "sum" => call_sum(args),
        "len" => single(name, args).and_then(len::len).and_then(length_value),
        other => Err(BuiltinError::unsupported(format!(
            "builtin '{}' is not supported",
            other
        ))),
    };

    if let Err(err) = &result {
        log_builtin_error(name, err);
    }
    result
}

fn expect_args(name: &str, args: &[Value], min: usize, max: usize) -> Result<()> {
    let given = args.len();
    if min == 1 && max == 1 && given != 1 {
        return Err(BuiltinError::type_error(format!(
            "{}() takes exactly one argument ({} given)",
            name, given
        )));
    }

    if given > max {
        return Err(BuiltinError::type_error(format!(
            "{}() takes at most {} arguments ({} given)",
            name, max, given
        )));
    }

    if given < min {
        let plural = if min == 1 { "" } else { "s" };
        return Err(BuiltinError::type_error(format!(
            "{}() takes at least {} argument{} ({} given)",
            name, min, plural, given
        )));
    }

    Ok(())
}

fn single<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value> {
    expect_args(name, args, 1, 1)?;
    Ok(&args[0])
}

/// Integer argument via index conversion
fn index_arg(value: &Value) -> Result<i64> {
    value
        .index()
        .ok_or_else(|| BuiltinError::not_an_integer(value.type_name()))
}

fn call_int(args: &[Value]) -> Result<Value> {
    match args {
        [] => Ok(Value::Int(0)),
        [value] => int::int(value, None).map(Value::Int),
        [value, base] => int::int(value, Some(index_arg(base)?)).map(Value::Int),
        _ => Err(BuiltinError::type_error(format!(
            "int() takes at most 2 arguments ({} given)",
            args.len()
        ))),
    }
}

fn call_divmod(args: &[Value]) -> Result<Value> {
    let [a, b] = args else {
        return Err(BuiltinError::type_error(format!(
            "divmod expected 2 arguments, got {}",
            args.len()
        )));
    };

    if let (Some(x), Some(y)) = (integral(a), integral(b)) {
        let (q, r) = numeric::divmod(x, y)?;
        return Ok(Value::tuple([Value::Int(q), Value::Int(r)]));
    }

    match (real(a), real(b)) {
        (Some(x), Some(y)) => {
            let (q, r) = numeric::divmod(x, y)?;
            Ok(Value::tuple([Value::Float(q), Value::Float(r)]))
        }
        _ => Err(BuiltinError::type_error(format!(
            "unsupported operand type(s) for divmod(): '{}' and '{}'",
            a.type_name(),
            b.type_name()
        ))),
    }
}

fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    }
}

fn real(value: &Value) -> Option<f64> {
    match value {
        Value::Float(x) => Some(*x),
        other => integral(other).map(|i| i as f64),
    }
}

fn call_range(args: &[Value]) -> Result<Value> {
    let progression = match args {
        [] => {
            return Err(BuiltinError::type_error(
                "range expected at least 1 argument, got 0",
            ))
        }
        [stop] => range::Range::to(index_arg(stop)?),
        [start, stop] => range::Range::between(index_arg(start)?, index_arg(stop)?),
        [start, stop, step] => range::range(index_arg(start)?, index_arg(stop)?, index_arg(step)?)?,
        _ => {
            return Err(BuiltinError::type_error(format!(
                "range expected at most 3 arguments, got {}",
                args.len()
            )))
        }
    };

    Ok(Value::Range(progression))
}

fn call_enumerate(args: &[Value]) -> Result<Value> {
    let (iterable, start) = match args {
        [] => {
            return Err(BuiltinError::type_error(
                "enumerate() missing required argument 'iterable'",
            ))
        }
        [iterable] => (iterable, 0),
        [iterable, start] => (iterable, index_arg(start)?),
        _ => {
            return Err(BuiltinError::type_error(format!(
                "enumerate() takes at most 2 arguments ({} given)",
                args.len()
            )))
        }
    };

    let mut pairs = sequence::enumerate(sequence::iter(iterable)?, start);
    let rows = pairs
        .by_ref()
        .map(|(index, item)| Value::tuple([Value::Int(index), item]))
        .collect();

    // The counter ran out before the input did
    if pairs.is_index_exhausted() && pairs.into_inner().next().is_some() {
        return Err(BuiltinError::overflow(
            "enumerate() index too large to convert to i64",
        ));
    }

    Ok(Value::List(rows))
}

fn length_value(n: usize) -> Result<Value> {
    i64::try_from(n)
        .map(Value::Int)
        .map_err(|_| BuiltinError::overflow("Python int too large to convert to C ssize_t"))
}

fn call_sum(args: &[Value]) -> Result<Value> {
    expect_args("sum", args, 1, 2)?;
    let start = args.get(1).cloned().unwrap_or(Value::Int(0));
    sequence::sum(&args[0], start)
}
