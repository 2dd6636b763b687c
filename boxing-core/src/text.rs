use core::cmp::Ordering;
use core::fmt;

use crate::registry::register_in;
use crate::{Boxable, Boxed, FAppend, FIsLess, VTable};

/// Install the functions that present strings and character arrays as text.
pub(crate) fn register_text() {
    let string = <&str as Boxable>::vtable();
    register_in::<FAppend>(string, |boxed, out| {
        // SAFETY: boxed arrays must outlive the operations on their boxes.
        out.write_str(unsafe { boxed.unbox_str() })
    });
    register_in::<FIsLess>(string, |lhs, rhs| {
        if !lhs.is_same_type(rhs) {
            return lhs.vtable().type_order(rhs.vtable()) == Ordering::Less;
        }
        // SAFETY: as above.
        unsafe { lhs.unbox_str() < rhs.unbox_str() }
    });

    let chars = <&[char] as Boxable>::vtable();
    register_in::<FAppend>(chars, |boxed, out| {
        // SAFETY: as above.
        unsafe { boxed.unbox_slice::<char>() }
            .iter()
            .try_for_each(|&c| out.write_char(c))
    });

    debug!("installed text functions");
}

/// Total order of array elements. Elements compare equal exactly when
/// their bytes do, so the order agrees with the default array equality.
pub(crate) trait ElementOrder: Copy {
    fn order(&self, other: &Self) -> Ordering;
}

macro_rules! ordered_elements {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ElementOrder for $ty {
                #[inline]
                fn order(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

ordered_elements!(bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl ElementOrder for f32 {
    #[inline]
    fn order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl ElementOrder for f64 {
    #[inline]
    fn order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

/// Element-wise comparison of two arrays of `T`, a strict prefix sorting
/// first. Arrays of other types sort by type.
fn lexicographic_is_less<T: ElementOrder>(lhs: &Boxed, rhs: &Boxed) -> bool {
    if !lhs.is_same_type(rhs) {
        return lhs.vtable().type_order(rhs.vtable()) == Ordering::Less;
    }
    // SAFETY: boxed arrays must outlive the operations on their boxes.
    let (left, right) = unsafe { (lhs.unbox_slice::<T>(), rhs.unbox_slice::<T>()) };
    let order = left
        .iter()
        .zip(right)
        .map(|(l, r)| l.order(r))
        .find(|order| order.is_ne())
        .unwrap_or_else(|| lhs.data().length().cmp(&rhs.data().length()));
    order == Ordering::Less
}

/// Install [`lexicographic_is_less`] on an array table.
pub(crate) fn register_element_order<T: ElementOrder>(vtable: &'static VTable) {
    register_in::<FIsLess>(vtable, lexicographic_is_less::<T>);
}

/// `[a, b, c]` for arrays of displayable elements.
pub(crate) fn append_elements<T: fmt::Display>(boxed: &Boxed, out: &mut dyn fmt::Write) -> fmt::Result {
    out.write_char('[')?;
    // SAFETY: boxed arrays must outlive the operations on their boxes.
    for (i, element) in unsafe { boxed.unbox_slice::<T>() }.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{element}")?;
    }
    out.write_char(']')
}

/// Install [`append_elements`] on an array table.
pub(crate) fn register_element_append<T: fmt::Display>(vtable: &'static VTable) {
    register_in::<FAppend>(vtable, append_elements::<T>);
}
