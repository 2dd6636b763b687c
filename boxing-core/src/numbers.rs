//! Numeric, character and boolean functions for the built-in scalars.
//!
//! With numeric overrides on, every integer and float compares equal to
//! every other numeric box of the same value, whatever the width or
//! signedness. Floats compare with an absolute tolerance. Hash codes are
//! computed from the value as `f32`, so that boxes that compare equal
//! usually hash equal; see [`FLOAT_TOLERANCE`] for the exception. Ordering
//! is exact and total, with NaN after every other number.

use core::cmp::Ordering;
use core::fmt::{self, Write};

use crate::registry::register_in;
use crate::{
    Boxable, Boxed, Category, FAppend, FEquals, FFormat, FHashcode, FIsLess, FIsNotNull, Mapping,
    VTable,
};

/// Largest difference at which two floats still compare equal.
///
/// Equality within the tolerance is not transitive, and hash codes cannot
/// follow it: numbers hash by their value rounded to `f32`, so two floats
/// equal only through the tolerance may hash differently. Hashed
/// collections of floats should hold values that are equal exactly or not
/// at all. Ordering ignores the tolerance.
///
/// ```
/// use boxing_core::{Boxed, FLOAT_TOLERANCE};
///
/// boxing_core::ensure_bootstrapped();
/// let one = Boxed::new(1.0f64);
/// let near = Boxed::new(1.0 + FLOAT_TOLERANCE);
/// assert_eq!(one, near);
/// assert_ne!(one.hashcode(), near.hashcode());
///
/// assert_eq!(Boxed::new(0.5f32).hashcode(), Boxed::new(0.5f64).hashcode());
/// ```
pub const FLOAT_TOLERANCE: f64 = 2.0 * f32::EPSILON as f64;

const NUMBER_SEED: usize = 0x3b9a_4d27;
const NUMBER_FACTOR: usize = 32_194_735;

#[derive(Clone, Copy, Debug)]
enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
}

impl Number {
    fn of(boxed: &Boxed) -> Option<Number> {
        if boxed.vtable().mapping != Mapping::Value {
            return None;
        }
        match boxed.vtable().category {
            Category::SignedIntegral => Some(Number::Signed(boxed.unbox_signed_integral())),
            Category::UnsignedIntegral => Some(Number::Unsigned(boxed.unbox_unsigned_integral())),
            Category::FloatingPoint => Some(Number::Float(boxed.unbox_floating_point())),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Signed(v) => v as f64,
            Number::Unsigned(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    fn as_i128(self) -> i128 {
        match self {
            Number::Signed(v) => i128::from(v),
            Number::Unsigned(v) => i128::from(v),
            Number::Float(v) => v as i128,
        }
    }
}

/// Install the numeric functions on the built-in integer and float tables.
pub(crate) fn register_numeric(tables: &[&'static VTable]) {
    for &vtable in tables {
        register_in::<FEquals>(vtable, numeric_equals);
        register_in::<FHashcode>(vtable, numeric_hashcode);
        register_in::<FIsLess>(vtable, numeric_is_less);
        register_in::<FIsNotNull>(vtable, |_| true);
        register_in::<FAppend>(vtable, numeric_append);
        register_in::<FFormat>(vtable, numeric_format);
    }
    debug!("installed numeric functions on {} tables", tables.len());
}

/// Install the functions of `char`, `bool` and `()`. These stay in place
/// even without numeric overrides, as they only affect their own type.
pub(crate) fn register_scalars() {
    let character = <char as Boxable>::vtable();
    register_in::<FEquals>(character, |lhs, rhs| {
        rhs.is_character() && lhs.unbox_character() == rhs.unbox_character()
    });
    register_in::<FIsLess>(character, |lhs, rhs| {
        if rhs.is_character() {
            lhs.unbox_character() < rhs.unbox_character()
        } else {
            lhs.vtable().type_order(rhs.vtable()) == Ordering::Less
        }
    });
    register_in::<FAppend>(character, |boxed, out| out.write_char(boxed.unbox_character()));
    register_in::<FIsNotNull>(character, |_| true);

    let boolean = <bool as Boxable>::vtable();
    register_in::<FIsNotNull>(boolean, |_| true);
    register_in::<FAppend>(boolean, |boxed, out| {
        out.write_str(if boxed.unbox::<bool>() { "true" } else { "false" })
    });

    register_in::<FAppend>(<() as Boxable>::vtable(), |_, out| out.write_str("()"));

    #[cfg(target_pointer_width = "64")]
    {
        register_in::<FIsLess>(<i128 as Boxable>::vtable(), wide_is_less::<i128>);
        register_in::<FIsLess>(<u128 as Boxable>::vtable(), wide_is_less::<u128>);
    }
}

/// The 128-bit integers span both placeholder words.
#[cfg(target_pointer_width = "64")]
fn wide_is_less<T: crate::Unboxable + Ord>(lhs: &Boxed, rhs: &Boxed) -> bool {
    if lhs.vtable().id == rhs.vtable().id {
        lhs.unbox::<T>() < rhs.unbox::<T>()
    } else {
        lhs.vtable().type_order(rhs.vtable()) == Ordering::Less
    }
}

fn numeric_equals(lhs: &Boxed, rhs: &Boxed) -> bool {
    let (Some(a), Some(b)) = (Number::of(lhs), Number::of(rhs)) else {
        return false;
    };
    match (a, b) {
        (Number::Float(x), Number::Float(y)) => {
            x.to_bits() == y.to_bits() || (x - y).abs() <= FLOAT_TOLERANCE
        }
        (Number::Float(x), other) | (other, Number::Float(x)) => {
            (x - other.as_f64()).abs() <= FLOAT_TOLERANCE
        }
        (a, b) => a.as_i128() == b.as_i128(),
    }
}

fn numeric_hashcode(boxed: &Boxed) -> usize {
    let value = Number::of(boxed).map_or(0.0, Number::as_f64) as f32;
    // +0.0 and -0.0 compare equal
    let bits = if value == 0.0 { 0 } else { value.to_bits() };
    NUMBER_SEED.wrapping_add((bits as usize).wrapping_mul(NUMBER_FACTOR))
}

fn numeric_is_less(lhs: &Boxed, rhs: &Boxed) -> bool {
    match (Number::of(lhs), Number::of(rhs)) {
        (Some(a), Some(b)) => compare_numbers(a, b) == Ordering::Less,
        _ => lhs.vtable().type_order(rhs.vtable()) == Ordering::Less,
    }
}

/// Total order over all numbers. NaN sorts after every other number and
/// equal to itself. Integers never pass through a float.
fn compare_numbers(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Float(x), Number::Float(y)) => compare_floats(x, y),
        (Number::Float(x), int) => compare_integer_to_float(int.as_i128(), x).reverse(),
        (int, Number::Float(y)) => compare_integer_to_float(int.as_i128(), y),
        (a, b) => a.as_i128().cmp(&b.as_i128()),
    }
}

fn compare_floats(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}

fn compare_integer_to_float(int: i128, float: f64) -> Ordering {
    // 2^127, outside every i64 and u64
    const LIMIT: f64 = i128::MAX as f64;

    if float.is_nan() || float >= LIMIT {
        return Ordering::Less;
    }
    if float < -LIMIT {
        return Ordering::Greater;
    }
    let whole = float.trunc();
    int.cmp(&(whole as i128)).then_with(|| {
        let fraction = float - whole;
        if fraction > 0.0 {
            Ordering::Less
        } else if fraction < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

fn numeric_append(boxed: &Boxed, out: &mut dyn fmt::Write) -> fmt::Result {
    match boxed.vtable().category {
        Category::SignedIntegral => write!(out, "{}", boxed.unbox_signed_integral()),
        Category::UnsignedIntegral => write!(out, "{}", boxed.unbox_unsigned_integral()),
        _ if boxed.vtable().usage_length == 4 => write!(out, "{}", boxed.unbox::<f32>()),
        _ => write!(out, "{}", boxed.unbox_floating_point()),
    }
}

/// Integers accept `x`, `X`, `o` and `b`, optionally prefixed by `#`.
/// Floats accept `e` and `.N` for a fixed number of decimals. Anything else
/// appends.
fn numeric_format(boxed: &Boxed, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
    let (alternate, radix) = match spec.strip_prefix('#') {
        Some(rest) => (true, rest),
        None => (false, spec),
    };
    let bits = match boxed.vtable().category {
        Category::SignedIntegral => Some(boxed.unbox_signed_integral() as u64 & width_mask(boxed)),
        Category::UnsignedIntegral => Some(boxed.unbox_unsigned_integral()),
        _ => None,
    };

    if let Some(bits) = bits {
        return match (radix, alternate) {
            ("x", false) => write!(out, "{bits:x}"),
            ("x", true) => write!(out, "{bits:#x}"),
            ("X", false) => write!(out, "{bits:X}"),
            ("X", true) => write!(out, "{bits:#X}"),
            ("o", false) => write!(out, "{bits:o}"),
            ("o", true) => write!(out, "{bits:#o}"),
            ("b", false) => write!(out, "{bits:b}"),
            ("b", true) => write!(out, "{bits:#b}"),
            _ => numeric_append(boxed, out),
        };
    }

    let value = boxed.unbox_floating_point();
    if spec == "e" {
        return write!(out, "{value:e}");
    }
    match spec.strip_prefix('.').and_then(|digits| digits.parse::<usize>().ok()) {
        Some(precision) => write!(out, "{value:.precision$}"),
        None => numeric_append(boxed, out),
    }
}

/// Keeps the two's complement bits of the stored width only.
fn width_mask(boxed: &Boxed) -> u64 {
    match boxed.vtable().usage_length {
        1 => 0xff,
        2 => 0xffff,
        4 => 0xffff_ffff,
        _ => u64::MAX,
    }
}
