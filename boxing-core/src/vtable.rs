//////////////////////////////////////////////////////////////////////
// VTable types
//////////////////////////////////////////////////////////////////////

use core::cmp::Ordering;
use core::fmt;
use core::mem::{align_of, size_of};
use core::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
#[cfg(debug_assertions)]
use core::sync::atomic::AtomicUsize;
use std::sync::OnceLock;

use crate::{Boxed, ConstTypeId, MonoAllocator, Placeholder, WORD};

//////////////////////////////////////////////////////////////////////
// Classification
//////////////////////////////////////////////////////////////////////

/// How values of a type are laid out in the [`Placeholder`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Mapping {
    /// The value itself is copied into the leading bytes.
    Value,
    /// The first word is the address of the value.
    Pointer,
    /// Like [`Mapping::Value`], for fieldless enums.
    Enum,
    /// The pointer/length pair of a contiguous sequence.
    Array,
}

/// Numeric family of a value type, consulted by cross-type algorithms.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Category {
    /// `i8`, `i16`, `i32`, `i64`, `isize`.
    SignedIntegral,
    /// `u8`, `u16`, `u32`, `u64`, `usize`.
    UnsignedIntegral,
    /// `f32`, `f64`.
    FloatingPoint,
    /// `char`.
    Character,
    /// `bool`.
    Boolean,
    /// Anything else.
    Other,
}

impl Category {
    /// Whether this is one of the three numeric families.
    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Category::SignedIntegral | Category::UnsignedIntegral | Category::FloatingPoint
        )
    }
}

/// Where a function table came from.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Provenance {
    /// Declared at compile time, registered during bootstrap.
    Static,
    /// Created the first time an array of a new element type was boxed.
    Dynamic,
}

//////////////////////////////////////////////////////////////////////
// Operation kinds
//////////////////////////////////////////////////////////////////////

/// Compares two boxes for equality.
pub type EqualsFn = fn(&Boxed, &Boxed) -> bool;
/// Computes the hash code of a box.
pub type HashcodeFn = fn(&Boxed) -> usize;
/// Strict ordering between two boxes.
pub type IsLessFn = fn(&Boxed, &Boxed) -> bool;
/// A boolean query on one box.
pub type PredicateFn = fn(&Boxed) -> bool;
/// Copies the data a box points to into allocator-owned memory.
pub type CloneFn = fn(&mut Boxed, &MonoAllocator);
/// Writes a textual representation of a box.
pub type AppendFn = fn(&Boxed, &mut dyn fmt::Write) -> fmt::Result;
/// Writes a representation of a box according to a format spec.
pub type FormatFn = fn(&Boxed, &str, &mut dyn fmt::Write) -> fmt::Result;

/// An operation kind that can be registered per type and dispatched on boxes.
///
/// Implemented by uninhabited marker types such as [`FEquals`]; the marker
/// selects the slot in a [`FunctionTable`] and fixes the signature of the
/// function stored there.
pub trait Function: 'static {
    /// The function pointer type stored in the slot.
    type Signature: Copy + Send + Sync + 'static;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// The slot for this operation in `functions`.
    fn slot(functions: &FunctionTable) -> &OnceLock<Self::Signature>;
}

macro_rules! declare_functions {
    ($($(#[$meta:meta])* $marker:ident => $field:ident: $sig:ty;)*) => {
        /// One slot per operation kind, each set at most once.
        pub struct FunctionTable {
            $($field: OnceLock<$sig>,)*
        }

        impl FunctionTable {
            /// A table with every slot unpopulated.
            pub const fn new() -> Self {
                Self {
                    $($field: OnceLock::new(),)*
                }
            }

            /// `(operation name, populated)` for every slot, in declaration order.
            pub fn slots(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
                [$((stringify!($marker), self.$field.get().is_some()),)*].into_iter()
            }
        }

        $(
            $(#[$meta])*
            #[derive(Debug)]
            pub enum $marker {}

            impl Function for $marker {
                type Signature = $sig;
                const NAME: &'static str = stringify!($marker);

                #[inline]
                fn slot(functions: &FunctionTable) -> &OnceLock<$sig> {
                    &functions.$field
                }
            }
        )*
    };
}

declare_functions! {
    /// Equality. The default requires identical types.
    FEquals => equals: EqualsFn;
    /// Hash code, consistent with [`FEquals`].
    FHashcode => hashcode: HashcodeFn;
    /// Strict ordering, total across all boxed types.
    FIsLess => is_less: IsLessFn;
    /// Truthiness.
    FIsTrue => is_true: PredicateFn;
    /// False for null pointers and empty arrays.
    FIsNotNull => is_not_null: PredicateFn;
    /// True for empty arrays.
    FIsEmpty => is_empty: PredicateFn;
    /// Deep copy of array contents into a [`MonoAllocator`].
    FClone => clone: CloneFn;
    /// Textual representation.
    FAppend => append: AppendFn;
    /// Textual representation with a format spec.
    FFormat => format: FormatFn;
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::new()
    }
}

//////////////////////////////////////////////////////////////////////
// VTable
//////////////////////////////////////////////////////////////////////

/// The function table of one boxed type.
///
/// Statically declared tables live in `static`s created by
/// [`boxable!`](crate::boxable) and start out unregistered; bootstrap (or
/// [`register_vtable`](crate::register_vtable)) registers them. Tables for
/// arrays of element types nobody declared are created by the registry on
/// first use and registered right away.
pub struct VTable {
    /// Identity of the boxed type.
    pub id: ConstTypeId,

    /// Identity of the element type, for arrays.
    pub element_id: Option<ConstTypeId>,

    /// Placeholder interpretation.
    pub mapping: Mapping,

    /// Numeric family.
    pub category: Category,

    /// Size of one element in bytes, for arrays.
    pub element_size: usize,

    /// Alignment of one element, for arrays.
    pub element_align: usize,

    /// Number of meaningful placeholder bytes.
    pub usage_length: usize,

    /// Static or dynamic.
    pub provenance: Provenance,

    registered: AtomicBool,

    #[cfg(debug_assertions)]
    usage: AtomicUsize,

    pub(crate) functions: FunctionTable,
}

impl VTable {
    const fn new(
        id: ConstTypeId,
        element_id: Option<ConstTypeId>,
        mapping: Mapping,
        category: Category,
        element_size: usize,
        element_align: usize,
        usage_length: usize,
    ) -> Self {
        Self {
            id,
            element_id,
            mapping,
            category,
            element_size,
            element_align,
            usage_length,
            provenance: Provenance::Static,
            registered: AtomicBool::new(false),
            #[cfg(debug_assertions)]
            usage: AtomicUsize::new(0),
            functions: FunctionTable::new(),
        }
    }

    /// Table for a type stored by value.
    pub const fn value<T: Copy>(category: Category) -> Self {
        assert!(size_of::<T>() <= Placeholder::SIZE, "value type does not fit into a placeholder");
        Self::new(ConstTypeId::of::<T>(), None, Mapping::Value, category, 0, 0, size_of::<T>())
    }

    /// Table for a fieldless enum stored by value.
    pub const fn enumeration<T: Copy>() -> Self {
        assert!(size_of::<T>() <= Placeholder::SIZE, "enum type does not fit into a placeholder");
        Self::new(ConstTypeId::of::<T>(), None, Mapping::Enum, Category::Other, 0, 0, size_of::<T>())
    }

    /// Table for `&T`, identified as `*const T`.
    pub const fn pointer<T: ?Sized>() -> Self {
        Self::new(ConstTypeId::of::<*const T>(), None, Mapping::Pointer, Category::Other, 0, 0, WORD)
    }

    /// Table for `&[T]`, identified as `[T]`.
    pub const fn array_of<T>() -> Self {
        Self::array_with_id::<T>(ConstTypeId::of::<[T]>())
    }

    /// Table for a sequence of `T` with its own identity, such as `str`.
    pub const fn array_with_id<T>(id: ConstTypeId) -> Self {
        Self::new(
            id,
            Some(ConstTypeId::of::<T>()),
            Mapping::Array,
            Category::Other,
            size_of::<T>(),
            align_of::<T>(),
            Placeholder::SIZE,
        )
    }

    /// Same table, marked as created on first encounter.
    pub(crate) fn dynamic(mut self) -> Self {
        self.provenance = Provenance::Dynamic;
        self
    }

    /// Name of the boxed type, for diagnostics.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.id.name()
    }

    /// Whether the table went through registration.
    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registered.load(AtomicOrdering::Acquire)
    }

    /// Unregistered → Registered. Returns `false` if it already was.
    pub(crate) fn mark_registered(&self) -> bool {
        !self.registered.swap(true, AtomicOrdering::AcqRel)
    }

    /// Registered → Unregistered, only at shutdown.
    pub(crate) fn mark_unregistered(&self) {
        self.registered.store(false, AtomicOrdering::Release);
    }

    /// How many boxes were created with this table. Always zero in release builds.
    #[inline]
    pub fn usage_count(&self) -> usize {
        #[cfg(debug_assertions)]
        {
            self.usage.load(AtomicOrdering::Relaxed)
        }
        #[cfg(not(debug_assertions))]
        {
            0
        }
    }

    #[inline]
    pub(crate) fn count_usage(&self) {
        #[cfg(debug_assertions)]
        self.usage.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// The function table slots.
    #[inline]
    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Ordering of types used whenever two boxes of different types are
    /// compared: numeric types first, then everything else by identity.
    pub fn type_order(&self, other: &VTable) -> Ordering {
        let rank = |vt: &VTable| !(vt.mapping == Mapping::Value && vt.category.is_numeric());
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Debug for VTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("VTable");
        s.field("type", &self.id)
            .field("mapping", &self.mapping)
            .field("category", &self.category);
        if let Some(element_id) = self.element_id {
            s.field("element", &element_id)
                .field("element_size", &self.element_size);
        }
        s.field("provenance", &self.provenance)
            .field("registered", &self.is_registered())
            .finish_non_exhaustive()
    }
}
