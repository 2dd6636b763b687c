//! Boxable implementations for the language's own types.

use alloc::string::String;
use alloc::vec::Vec;

use crate::{Boxable, Category, ConstTypeId, Placeholder, VTable, text};

macro_rules! impl_boxable_scalars {
    ($category:ident: $($ty:ty),* $(,)?) => {
        $(
            crate::boxable!(value $ty, Category::$category);
        )*
    };
}

impl_boxable_scalars!(SignedIntegral: i8, i16, i32, i64, isize);
impl_boxable_scalars!(UnsignedIntegral: u8, u16, u32, u64, usize);
impl_boxable_scalars!(FloatingPoint: f32, f64);
impl_boxable_scalars!(Character: char);
impl_boxable_scalars!(Boolean: bool);
impl_boxable_scalars!(Other: ());

// Two words only hold 128 bits on 64-bit targets.
#[cfg(target_pointer_width = "64")]
impl_boxable_scalars!(Other: i128, u128);

unsafe impl<'a, T> Boxable for &'a [T] {
    const TYPE_ID: ConstTypeId = ConstTypeId::of::<[T]>();

    #[inline]
    fn vtable() -> &'static VTable {
        crate::array_vtable::<T>()
    }

    #[inline]
    fn to_placeholder(&self) -> Placeholder {
        Placeholder::from_array(self.as_ptr(), self.len())
    }
}

unsafe impl<'a, T, const N: usize> Boxable for &'a [T; N] {
    const TYPE_ID: ConstTypeId = ConstTypeId::of::<[T]>();

    #[inline]
    fn vtable() -> &'static VTable {
        crate::array_vtable::<T>()
    }

    #[inline]
    fn to_placeholder(&self) -> Placeholder {
        Placeholder::from_array(self.as_ptr(), N)
    }
}

unsafe impl<'a, T> Boxable for &'a Vec<T> {
    const TYPE_ID: ConstTypeId = ConstTypeId::of::<[T]>();

    #[inline]
    fn vtable() -> &'static VTable {
        crate::array_vtable::<T>()
    }

    #[inline]
    fn to_placeholder(&self) -> Placeholder {
        Placeholder::from_array(self.as_ptr(), self.len())
    }
}

static STR_VTABLE: VTable = VTable::array_with_id::<u8>(ConstTypeId::of::<str>());

unsafe impl<'a> Boxable for &'a str {
    const TYPE_ID: ConstTypeId = ConstTypeId::of::<str>();

    #[inline]
    fn vtable() -> &'static VTable {
        &STR_VTABLE
    }

    #[inline]
    fn to_placeholder(&self) -> Placeholder {
        Placeholder::from_array(self.as_ptr(), self.len())
    }
}

unsafe impl<'a> Boxable for &'a String {
    const TYPE_ID: ConstTypeId = ConstTypeId::of::<str>();

    #[inline]
    fn vtable() -> &'static VTable {
        &STR_VTABLE
    }

    #[inline]
    fn to_placeholder(&self) -> Placeholder {
        Placeholder::from_array(self.as_ptr(), self.len())
    }
}

macro_rules! static_tables {
    (
        values: [$($value:ty),* $(,)?],
        arrays: [$($element:ty),* $(,)?],
    ) => {
        /// Every table declared in this crate, in registration order.
        pub(crate) fn static_vtables() -> Vec<&'static VTable> {
            let mut tables = vec![$(<$value as Boxable>::vtable(),)* &STR_VTABLE];
            $(
                tables.push({
                    static ARRAY: VTable = VTable::array_of::<$element>();
                    &ARRAY
                });
            )*
            tables
        }

        /// Element-wise order for the arrays of built-in scalars, and
        /// `[a, b, c]` for all but the character arrays which append as text.
        pub(crate) fn register_array_functions() {
            $(
                let vtable = crate::array_vtable::<$element>();
                text::register_element_order::<$element>(vtable);
                if ConstTypeId::of::<$element>() != ConstTypeId::of::<char>() {
                    text::register_element_append::<$element>(vtable);
                }
            )*
        }
    };
}

#[cfg(target_pointer_width = "64")]
static_tables! {
    values: [(), bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, i128, u128],
    arrays: [bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64],
}

#[cfg(not(target_pointer_width = "64"))]
static_tables! {
    values: [(), bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64],
    arrays: [bool, char, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64],
}

/// The tables of the integer and float types.
pub(crate) fn numeric_vtables() -> [&'static VTable; 12] {
    [
        <i8 as Boxable>::vtable(),
        <i16 as Boxable>::vtable(),
        <i32 as Boxable>::vtable(),
        <i64 as Boxable>::vtable(),
        <isize as Boxable>::vtable(),
        <u8 as Boxable>::vtable(),
        <u16 as Boxable>::vtable(),
        <u32 as Boxable>::vtable(),
        <u64 as Boxable>::vtable(),
        <usize as Boxable>::vtable(),
        <f32 as Boxable>::vtable(),
        <f64 as Boxable>::vtable(),
    ]
}
