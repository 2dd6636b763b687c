/// Make a type boxable.
///
/// - `boxable!(value T)` stores a `Copy` type of at most two words by value.
///   An optional second argument gives its [`Category`](crate::Category).
/// - `boxable!(enum T)` does the same for a fieldless enum.
/// - `boxable!(pointer T)` boxes `&T` and `Option<&T>` by address, for types
///   too large for the placeholder or boxed by identity.
///
/// Each invocation declares one static, unregistered function table. It is
/// registered by [`bootstrap`](crate::bootstrap) if built in, and otherwise
/// with [`register_vtable`](crate::register_vtable), which must happen before
/// any operation is invoked on a box of that type.
///
/// ```
/// use boxing_core::{boxable, Boxable, Boxed};
///
/// #[derive(Clone, Copy)]
/// struct Point { x: i32, y: i32 }
/// boxable!(value Point);
///
/// boxing_core::ensure_bootstrapped();
/// boxing_core::register_vtable(<Point as Boxable>::vtable());
/// let b = Boxed::new(Point { x: 1, y: 2 });
/// assert_eq!(b.unbox::<Point>().y, 2);
/// ```
#[macro_export]
macro_rules! boxable {
    (value $ty:ty) => {
        $crate::boxable!(value $ty, $crate::Category::Other);
    };
    (value $ty:ty, $category:expr) => {
        const _: () = ::core::assert!(
            ::core::mem::size_of::<$ty>() <= $crate::Placeholder::SIZE,
            "type is too large to be boxed by value, use `boxable!(pointer ..)`"
        );

        unsafe impl $crate::Boxable for $ty {
            const TYPE_ID: $crate::ConstTypeId = $crate::ConstTypeId::of::<$ty>();

            #[inline]
            fn vtable() -> &'static $crate::VTable {
                static VTABLE: $crate::VTable = $crate::VTable::value::<$ty>($category);
                &VTABLE
            }

            #[inline]
            fn to_placeholder(&self) -> $crate::Placeholder {
                $crate::Placeholder::from_value(*self)
            }
        }

        unsafe impl $crate::Unboxable for $ty {}
    };
    (enum $ty:ty) => {
        const _: () = ::core::assert!(
            ::core::mem::size_of::<$ty>() <= $crate::Placeholder::SIZE,
            "enum is too large to be boxed by value"
        );

        unsafe impl $crate::Boxable for $ty {
            const TYPE_ID: $crate::ConstTypeId = $crate::ConstTypeId::of::<$ty>();

            #[inline]
            fn vtable() -> &'static $crate::VTable {
                static VTABLE: $crate::VTable = $crate::VTable::enumeration::<$ty>();
                &VTABLE
            }

            #[inline]
            fn to_placeholder(&self) -> $crate::Placeholder {
                $crate::Placeholder::from_value(*self)
            }
        }

        unsafe impl $crate::Unboxable for $ty {}
    };
    (pointer $ty:ty) => {
        unsafe impl<'a> $crate::Boxable for &'a $ty {
            const TYPE_ID: $crate::ConstTypeId = $crate::ConstTypeId::of::<*const $ty>();

            #[inline]
            fn vtable() -> &'static $crate::VTable {
                static VTABLE: $crate::VTable = $crate::VTable::pointer::<$ty>();
                &VTABLE
            }

            #[inline]
            fn to_placeholder(&self) -> $crate::Placeholder {
                $crate::Placeholder::from_pointer::<$ty>(*self)
            }
        }

        unsafe impl<'a> $crate::Boxable for ::core::option::Option<&'a $ty> {
            const TYPE_ID: $crate::ConstTypeId = $crate::ConstTypeId::of::<*const $ty>();

            #[inline]
            fn vtable() -> &'static $crate::VTable {
                <&'a $ty as $crate::Boxable>::vtable()
            }

            #[inline]
            fn to_placeholder(&self) -> $crate::Placeholder {
                match *self {
                    ::core::option::Option::Some(target) => $crate::Placeholder::from_pointer::<$ty>(target),
                    ::core::option::Option::None => $crate::Placeholder::from_pointer::<$ty>(::core::ptr::null::<$ty>()),
                }
            }
        }
    };
}
