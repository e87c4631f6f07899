//! pycompat - Python builtin semantics for Rust
//!
//! Integer parsing with bases, floored `divmod`, radix formatting,
//! `chr`/`ord`, a lazy constant-time `range`, and the iteration helpers
//! `iter`, `list`, `zip`, `enumerate` and `sum`. Failures are reported as
//! `BuiltinError`s carrying the Python exception kind and message.
//!
//! ```
//! use pycompat::{divmod, hex, int, range, Value};
//!
//! assert_eq!(divmod(-7, 2).unwrap(), (-4, 1));
//! assert_eq!(hex(&255i64).unwrap(), "0xff");
//! assert_eq!(int(&Value::from("0b101"), Some(0)).unwrap_err().to_string(),
//!            "NotImplementedError: interpretation as a code literal not supported yet");
//! assert_eq!(range(0, 100, 3).unwrap().count(99), 1);
//! ```

pub mod builtins;
pub mod config;
pub mod errors;
pub mod logging;
pub mod objects;

pub use builtins::{
    bin, call, chr, divmod, enumerate, floor_mod, hex, int, iter, len, list, oct, ord, range,
    sum, zip, zip_values, Range, RangeIter,
};
pub use config::{Config, ConfigError};
pub use errors::{BuiltinError, ErrorKind, Result};
pub use objects::{ObjectType, PyIter, PyObject, Value};
