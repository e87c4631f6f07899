//! Numeric primitives - floor division, modulo and radix formatting
//!
//! Design: Python floors where Rust truncates. `FloorDivMod` gives every
//! primitive numeric type the floor semantics:
//! - The remainder always carries the sign of the divisor
//! - Integer paths never overflow in intermediate steps
//! - Float paths follow `((a % b) + b) % b`

use num_traits::Zero;

use crate::errors::{BuiltinError, Result};
use crate::logging::{debug, trace};
use crate::objects::PyObject;

/// Floor division and floor modulo for a numeric type.
pub trait FloorDivMod: Copy + PartialEq + Zero {
    /// Remainder with the sign of `rhs`
    fn floor_mod(self, rhs: Self) -> Self;

    /// Quotient rounded toward negative infinity, `None` on overflow
    fn floor_div(self, rhs: Self) -> Option<Self>;
}

macro_rules! floor_int_impl {
    ($($t:ty),*) => {$(
        impl FloorDivMod for $t {
            #[inline]
            fn floor_mod(self, rhs: $t) -> $t {
                let r = self.wrapping_rem(rhs);
                if r != 0 && ((r < 0) != (rhs < 0)) {
                    r + rhs
                } else {
                    r
                }
            }

            #[inline]
            fn floor_div(self, rhs: $t) -> Option<$t> {
                let q = self.checked_div(rhs)?;
                let r = self.wrapping_rem(rhs);
                if r != 0 && ((r < 0) != (rhs < 0)) {
                    Some(q - 1)
                } else {
                    Some(q)
                }
            }
        }
    )*};
}

macro_rules! floor_float_impl {
    ($($t:ty),*) => {$(
        impl FloorDivMod for $t {
            #[inline]
            fn floor_mod(self, rhs: $t) -> $t {
                ((self % rhs) + rhs) % rhs
            }

            #[inline]
            fn floor_div(self, rhs: $t) -> Option<$t> {
                Some((self / rhs).floor())
            }
        }
    )*};
}

floor_int_impl!(i8, i16, i32, i64, i128, isize);
floor_float_impl!(f32, f64);

/// Modulo with the sign of the divisor (`-7 mod 3 == 2`).
///
/// The divisor must be non-zero; use `divmod` when it may not be.
#[inline]
pub fn floor_mod<T: FloorDivMod>(a: T, b: T) -> T {
    a.floor_mod(b)
}

/// divmod() - `(floor(a / b), floor_mod(a, b))`
///
/// # Errors
/// - `DivisionByZero` when `b` is zero
/// - `Overflow` when the integer quotient is not representable (`MIN / -1`)
pub fn divmod<T: FloorDivMod>(a: T, b: T) -> Result<(T, T)> {
    if b.is_zero() {
        debug!(builtin = "divmod", "division by zero");
        return Err(BuiltinError::zero_division());
    }

    let quotient = a
        .floor_div(b)
        .ok_or_else(|| BuiltinError::overflow("integer division result too large"))?;

    Ok((quotient, a.floor_mod(b)))
}

/// Radix supported by the integer formatters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Radix {
    Binary,
    Octal,
    Hex,
}

impl Radix {
    pub const fn base(self) -> u32 {
        match self {
            Self::Binary => 2,
            Self::Octal => 8,
            Self::Hex => 16,
        }
    }

    /// Letter following the `0` of the literal prefix
    pub const fn prefix(self) -> char {
        match self {
            Self::Binary => 'b',
            Self::Octal => 'o',
            Self::Hex => 'x',
        }
    }

    /// Name of the builtin producing this radix
    pub const fn builtin(self) -> &'static str {
        match self {
            Self::Binary => "bin",
            Self::Octal => "oct",
            Self::Hex => "hex",
        }
    }

    /// Radix announced by a literal prefix letter (`b`, `o`, `x`)
    pub fn from_prefix(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'b' => Some(Self::Binary),
            'o' => Some(Self::Octal),
            'x' => Some(Self::Hex),
            _ => None,
        }
    }
}

/// Format an integer as a prefixed literal, sign first (`-0x2a`).
///
/// Objects that are not integers are converted through their index
/// capability; without one the call fails with a `TypeError`.
pub fn radix_format<T: PyObject + ?Sized>(n: &T, radix: Radix) -> Result<String> {
    trace!(builtin = radix.builtin(), "formatting integer");

    let n = n
        .index()
        .ok_or_else(|| BuiltinError::not_an_integer(n.type_name()))?;

    let magnitude = n.unsigned_abs();
    let digits = match radix {
        Radix::Binary => format!("{:b}", magnitude),
        Radix::Octal => format!("{:o}", magnitude),
        Radix::Hex => format!("{:x}", magnitude),
    };

    let sign = if n < 0 { "-" } else { "" };
    Ok(format!("{}0{}{}", sign, radix.prefix(), digits))
}

/// hex() - `0x` literal
#[inline]
pub fn hex<T: PyObject + ?Sized>(n: &T) -> Result<String> {
    radix_format(n, Radix::Hex)
}

/// oct() - `0o` literal
#[inline]
pub fn oct<T: PyObject + ?Sized>(n: &T) -> Result<String> {
    radix_format(n, Radix::Octal)
}

/// bin() - `0b` literal
#[inline]
pub fn bin<T: PyObject + ?Sized>(n: &T) -> Result<String> {
    radix_format(n, Radix::Binary)
}
