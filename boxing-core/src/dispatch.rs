//! Invoking operations on boxes.
//!
//! Each function resolves the operation on the box's own table (falling back
//! to the defaults) and calls it. An operation with neither a type function
//! nor a default asserts in debug builds and returns a neutral result.

use alloc::string::String;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::registry::resolve;
use crate::{
    Boxed, FAppend, FClone, FEquals, FFormat, FHashcode, FIsEmpty, FIsLess, FIsNotNull, FIsTrue,
    Function, MonoAllocator,
};

#[cold]
fn missing<F: Function>(boxed: &Boxed) {
    if cfg!(debug_assertions) {
        panic!(
            "no {} registered for `{}` and no default",
            F::NAME,
            boxed.vtable().type_name()
        );
    }
}

/// Whether `lhs` equals `rhs`, as decided by `lhs`'s type.
pub fn equals(lhs: &Boxed, rhs: &Boxed) -> bool {
    match resolve::<FEquals>(lhs) {
        Some(f) => f(lhs, rhs),
        None => {
            missing::<FEquals>(lhs);
            false
        }
    }
}

/// Hash code of `boxed`, consistent with [`equals`].
pub fn hashcode(boxed: &Boxed) -> usize {
    match resolve::<FHashcode>(boxed) {
        Some(f) => f(boxed),
        None => {
            missing::<FHashcode>(boxed);
            0
        }
    }
}

/// Whether `lhs` sorts before `rhs`, as decided by `lhs`'s type.
pub fn is_less(lhs: &Boxed, rhs: &Boxed) -> bool {
    match resolve::<FIsLess>(lhs) {
        Some(f) => f(lhs, rhs),
        None => {
            missing::<FIsLess>(lhs);
            false
        }
    }
}

/// Truthiness of `boxed`.
pub fn is_true(boxed: &Boxed) -> bool {
    match resolve::<FIsTrue>(boxed) {
        Some(f) => f(boxed),
        None => {
            missing::<FIsTrue>(boxed);
            false
        }
    }
}

/// False for null pointers and empty arrays.
pub fn is_not_null(boxed: &Boxed) -> bool {
    match resolve::<FIsNotNull>(boxed) {
        Some(f) => f(boxed),
        None => {
            missing::<FIsNotNull>(boxed);
            true
        }
    }
}

/// True for empty arrays.
pub fn is_empty(boxed: &Boxed) -> bool {
    match resolve::<FIsEmpty>(boxed) {
        Some(f) => f(boxed),
        None => {
            missing::<FIsEmpty>(boxed);
            false
        }
    }
}

/// Copy the array contents of `boxed` into `allocator` and point the box at
/// the copy. A no-op for everything that is not an array.
pub fn clone_contents(boxed: &mut Boxed, allocator: &MonoAllocator) {
    match resolve::<FClone>(boxed) {
        Some(f) => f(boxed, allocator),
        None => missing::<FClone>(boxed),
    }
}

/// Write the textual representation of `boxed` to `out`.
pub fn append_to(boxed: &Boxed, out: &mut dyn fmt::Write) -> fmt::Result {
    match resolve::<FAppend>(boxed) {
        Some(f) => f(boxed, out),
        None => {
            missing::<FAppend>(boxed);
            Ok(())
        }
    }
}

/// Write `boxed` to `out` following the type-specific `spec`.
pub fn format_to(boxed: &Boxed, spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
    match resolve::<FFormat>(boxed) {
        Some(f) => f(boxed, spec, out),
        None => {
            missing::<FFormat>(boxed);
            append_to(boxed, out)
        }
    }
}

impl Boxed {
    /// See [`equals`].
    #[inline]
    pub fn equals(&self, other: &Boxed) -> bool {
        equals(self, other)
    }

    /// See [`hashcode`].
    #[inline]
    pub fn hashcode(&self) -> usize {
        hashcode(self)
    }

    /// See [`is_less`].
    #[inline]
    pub fn is_less(&self, other: &Boxed) -> bool {
        is_less(self, other)
    }

    /// See [`is_true`].
    #[inline]
    pub fn is_true(&self) -> bool {
        is_true(self)
    }

    /// See [`is_not_null`].
    #[inline]
    pub fn is_not_null(&self) -> bool {
        is_not_null(self)
    }

    /// See [`is_empty`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        is_empty(self)
    }

    /// See [`clone_contents`].
    #[inline]
    pub fn clone_contents(&mut self, allocator: &MonoAllocator) {
        clone_contents(self, allocator);
    }

    /// The textual representation as a new string.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing to a `String` cannot fail.
        let _ = append_to(self, &mut out);
        out
    }

    /// The representation for `spec` as a new string.
    pub fn format(&self, spec: &str) -> String {
        let mut out = String::new();
        let _ = format_to(self, spec, &mut out);
        out
    }
}

impl PartialEq for Boxed {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

impl Eq for Boxed {}

impl Hash for Boxed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(hashcode(self));
    }
}

impl PartialOrd for Boxed {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Boxed {
    fn cmp(&self, other: &Self) -> Ordering {
        if is_less(self, other) {
            Ordering::Less
        } else if is_less(other, self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl fmt::Display for Boxed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        append_to(self, f)
    }
}
