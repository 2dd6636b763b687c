//! Forked from <https://github.com/dtolnay/typeid>

#![allow(clippy::doc_markdown, clippy::inline_always)]

use core::any::TypeId;
use core::cmp::Ordering;
use core::fmt::{self, Debug};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::mem;
use std::hash::DefaultHasher;

/// Type identity usable in const contexts, for any type (`'static` or not).
///
/// This is the token the boxing engine keys function tables by. Two boxed
/// values are of the same type exactly when their `ConstTypeId`s are equal.
/// The ordering is the one of [`TypeId`]: stable within one process run,
/// meaningless across runs or builds.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct ConstTypeId {
    pub(crate) type_id_fn: fn() -> TypeId,
    pub(crate) type_name_fn: fn() -> &'static str,
}

impl ConstTypeId {
    /// Create a [`ConstTypeId`] for a type.
    #[must_use]
    pub const fn of<T>() -> Self
    where
        T: ?Sized,
    {
        ConstTypeId {
            type_id_fn: of::<T>,
            type_name_fn: core::any::type_name::<T>,
        }
    }

    /// Get the underlying [`TypeId`] for this `ConstTypeId`.
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }

    /// The type name, as reported by [`core::any::type_name`].
    ///
    /// Only meant for diagnostics: it is neither unique nor stable.
    #[inline]
    pub fn name(self) -> &'static str {
        (self.type_name_fn)()
    }

    /// A hash of the type identity, used as seed by the hashing algorithms.
    ///
    /// Deterministic within one process run.
    pub fn hash_code(self) -> usize {
        let mut hasher = DefaultHasher::new();
        self.get().hash(&mut hasher);
        hasher.finish() as usize
    }
}

impl Debug for ConstTypeId {
    #[inline]
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl PartialEq for ConstTypeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl PartialEq<TypeId> for ConstTypeId {
    #[inline]
    fn eq(&self, other: &TypeId) -> bool {
        self.get() == *other
    }
}

impl Eq for ConstTypeId {}

impl PartialOrd for ConstTypeId {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl Ord for ConstTypeId {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        Ord::cmp(&self.get(), &other.get())
    }
}

impl Hash for ConstTypeId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Function pointers may be merged or duplicated by the linker, so
        // only the TypeId itself is a sound hash input.
        self.get().hash(state);
    }
}

/// Create a [`TypeId`] for a type.
#[must_use]
#[inline(always)]
pub fn of<T>() -> TypeId
where
    T: ?Sized,
{
    trait NonStaticAny {
        fn get_type_id(&self) -> TypeId
        where
            Self: 'static;
    }

    impl<T: ?Sized> NonStaticAny for PhantomData<T> {
        #[inline(always)]
        fn get_type_id(&self) -> TypeId
        where
            Self: 'static,
        {
            TypeId::of::<T>()
        }
    }

    let phantom_data = PhantomData::<T>;
    NonStaticAny::get_type_id(unsafe {
        mem::transmute::<&dyn NonStaticAny, &(dyn NonStaticAny + 'static)>(&phantom_data)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_of_non_static_types() {
        fn id_of_ref<'a>(_: &'a str) -> ConstTypeId {
            ConstTypeId::of::<&'a str>()
        }
        let s = alloc::string::String::from("local");
        assert_eq!(id_of_ref(&s), ConstTypeId::of::<&'static str>());
    }

    #[test]
    fn arrays_and_elements_differ() {
        assert_ne!(ConstTypeId::of::<[u8]>(), ConstTypeId::of::<u8>());
        assert_ne!(ConstTypeId::of::<str>(), ConstTypeId::of::<[u8]>());
    }

    #[test]
    fn hash_code_is_stable_within_a_run() {
        let a = ConstTypeId::of::<i32>();
        assert_eq!(a.hash_code(), ConstTypeId::of::<i32>().hash_code());
        assert_ne!(a.hash_code(), ConstTypeId::of::<u32>().hash_code());
    }

    #[test]
    fn debug_prints_type_name() {
        assert_eq!(format!("{:?}", ConstTypeId::of::<u16>()), "u16");
    }
}
