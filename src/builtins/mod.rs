//! Built-in functions - Python builtins with matching observable behavior
//!
//! Design: Each builtin is in a focused module and exposes a typed Rust
//! API; `registry` adds name-based dispatch over dynamic `Value`s.

mod chars;
mod int;
mod len;
mod numeric;
mod range;
pub mod registry;
mod sequence;

#[cfg(test)]
mod tests;

pub use chars::{char_from_code_point, chr, code_point_of, ord, MAX_CODE_POINT};
pub use int::{int, parse_int};
pub use len::{len, len_of, HasLen};
pub use numeric::{bin, divmod, floor_mod, hex, oct, radix_format, FloorDivMod, Radix};
pub use range::{range, Range, RangeIter};
pub use registry::{call, is_builtin, BUILTINS};
pub use sequence::{enumerate, iter, list, sum, zip, zip_values, Enumerate, Generator, Zip};
