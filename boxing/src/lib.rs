#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

pub use boxing_core::*;

pub use static_assertions;

/// Assert at compile time that a boxable value type fits into a
/// [`Placeholder`] and is `Copy`.
///
/// ```
/// #[derive(Clone, Copy)]
/// struct Rgb(u8, u8, u8);
/// boxing::assert_boxable_value!(Rgb);
/// ```
#[macro_export]
macro_rules! assert_boxable_value {
    ($ty:ty) => {
        $crate::static_assertions::assert_impl_all!($ty: ::core::marker::Copy);
        $crate::static_assertions::const_assert!(
            ::core::mem::size_of::<$ty>() <= $crate::Placeholder::SIZE
        );
    };
}
