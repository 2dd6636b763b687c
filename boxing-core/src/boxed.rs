use core::fmt;
use core::ptr;
use core::slice;

use crate::{Category, ConstTypeId, Mapping, Placeholder, VTable};

/// A type that can be put into a [`Boxed`].
///
/// Implement it through [`boxable!`](crate::boxable) rather than by hand.
///
/// # Safety
///
/// `vtable()` must describe the placeholder produced by `to_placeholder`:
/// its `id` must equal `TYPE_ID`, its mapping must match how the value was
/// stored, and for [`Mapping::Value`] and [`Mapping::Enum`] the stored bytes
/// must be a valid value of the type named by `TYPE_ID`.
pub unsafe trait Boxable {
    /// Identity of the boxed type. Arrays and strings report `[T]` and `str`.
    const TYPE_ID: ConstTypeId;

    /// The function table boxes of this type carry.
    fn vtable() -> &'static VTable;

    /// Store `self` into a placeholder.
    fn to_placeholder(&self) -> Placeholder;
}

/// A value type that can be read back out of a box by copy.
///
/// # Safety
///
/// The type must be stored with [`Mapping::Value`] or [`Mapping::Enum`], byte
/// for byte, starting at offset 0 of the placeholder.
pub unsafe trait Unboxable: Boxable + Copy {}

/// A type-erased value: a function table plus two words of storage.
///
/// Boxes are cheap to copy. Boxes of pointers and arrays borrow their
/// target without tracking its lifetime: whoever creates such a box must
/// keep the target alive while the box is inspected.
#[derive(Clone, Copy)]
pub struct Boxed {
    vtable: &'static VTable,
    data: Placeholder,
}

// SAFETY: the function table is immutable apart from its atomics and
// once-cells. The placeholder is plain data; dereferencing its pointer is
// an unsafe operation in its own right.
unsafe impl Send for Boxed {}
unsafe impl Sync for Boxed {}

static_assertions::assert_impl_all!(Boxed: Copy, Send, Sync);

impl Boxed {
    /// Box `value`.
    #[inline]
    pub fn new<T: Boxable>(value: T) -> Self {
        let vtable = T::vtable();
        vtable.count_usage();
        Self {
            vtable,
            data: value.to_placeholder(),
        }
    }

    /// Assemble a box from a table and a placeholder written by hand.
    ///
    /// # Safety
    ///
    /// `data` must be laid out as `vtable.mapping` prescribes, holding a
    /// valid value of the type the table describes.
    #[inline]
    pub unsafe fn from_raw_parts(vtable: &'static VTable, data: Placeholder) -> Self {
        vtable.count_usage();
        Self { vtable, data }
    }

    /// The function table.
    #[inline]
    pub fn vtable(&self) -> &'static VTable {
        self.vtable
    }

    /// The raw storage.
    #[inline]
    pub fn data(&self) -> &Placeholder {
        &self.data
    }

    /// The raw storage, mutable. Used by clone operations to redirect an
    /// array to its copy.
    #[inline]
    pub fn data_mut(&mut self) -> &mut Placeholder {
        &mut self.data
    }

    /// Size in bytes of one array element.
    #[inline]
    pub fn array_element_size(&self) -> usize {
        debug_assert!(self.is_array(), "`{}` is not an array", self.vtable.type_name());
        self.vtable.element_size
    }

    /// Number of meaningful placeholder bytes.
    #[inline]
    pub fn placeholder_usage_length(&self) -> usize {
        self.vtable.usage_length
    }

    //////////////////////////////////////////////////////////////////////
    // Type queries
    //////////////////////////////////////////////////////////////////////

    /// Identity of the boxed type.
    #[inline]
    pub fn type_id(&self) -> ConstTypeId {
        self.vtable.id
    }

    /// Identity of the element type. Only meaningful for arrays; for anything
    /// else this asserts in debug builds and returns the box's own type.
    #[inline]
    pub fn element_type_id(&self) -> ConstTypeId {
        debug_assert!(
            self.is_array(),
            "`{}` is not an array and has no element type",
            self.vtable.type_name()
        );
        match self.vtable.element_id {
            Some(id) => id,
            None => self.vtable.id,
        }
    }

    /// Whether the box holds a `T` (for arrays and strings: a `&[T]`/`&str`).
    #[inline]
    pub fn is_type<T: Boxable>(&self) -> bool {
        self.vtable.id == T::TYPE_ID
    }

    /// Whether both boxes hold the same type.
    #[inline]
    pub fn is_same_type(&self, other: &Boxed) -> bool {
        ptr::eq(self.vtable, other.vtable) || self.vtable.id == other.vtable.id
    }

    /// Whether the box holds a pointer.
    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.vtable.mapping == Mapping::Pointer
    }

    /// Whether the box holds a fieldless enum.
    #[inline]
    pub fn is_enum(&self) -> bool {
        self.vtable.mapping == Mapping::Enum
    }

    /// Whether the box holds a contiguous sequence.
    #[inline]
    pub fn is_array(&self) -> bool {
        self.vtable.mapping == Mapping::Array
    }

    /// Whether the box holds an array whose elements are `T`.
    #[inline]
    pub fn is_array_of<T>(&self) -> bool {
        self.is_array() && self.vtable.element_id == Some(ConstTypeId::of::<T>())
    }

    /// Whether the box holds one of the signed integer types.
    #[inline]
    pub fn is_signed_integral(&self) -> bool {
        self.is_value_of(Category::SignedIntegral)
    }

    /// Whether the box holds one of the unsigned integer types.
    #[inline]
    pub fn is_unsigned_integral(&self) -> bool {
        self.is_value_of(Category::UnsignedIntegral)
    }

    /// Whether the box holds `f32` or `f64`.
    #[inline]
    pub fn is_floating_point(&self) -> bool {
        self.is_value_of(Category::FloatingPoint)
    }

    /// Whether the box holds a `char`.
    #[inline]
    pub fn is_character(&self) -> bool {
        self.is_value_of(Category::Character)
    }

    /// Whether the box holds any integer or floating point type.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.vtable.mapping == Mapping::Value && self.vtable.category.is_numeric()
    }

    #[inline]
    fn is_value_of(&self, category: Category) -> bool {
        self.vtable.mapping == Mapping::Value && self.vtable.category == category
    }

    //////////////////////////////////////////////////////////////////////
    // Unboxing
    //////////////////////////////////////////////////////////////////////

    /// Copy the value out. Asserts the type in debug builds.
    #[inline]
    pub fn unbox<T: Unboxable>(&self) -> T {
        debug_assert!(
            self.is_type::<T>(),
            "unboxing `{}` as `{}`",
            self.vtable.type_name(),
            T::TYPE_ID.name()
        );
        // SAFETY: `Unboxable` types are stored byte for byte at offset 0.
        // A mismatching type is a caller bug caught by the assertion above.
        unsafe { self.data.read_value::<T>() }
    }

    /// Copy the value out if the box holds a `T`.
    #[inline]
    pub fn try_unbox<T: Unboxable>(&self) -> Result<T, crate::UnboxError> {
        if self.is_type::<T>() {
            // SAFETY: the type was just checked.
            Ok(unsafe { self.data.read_value::<T>() })
        } else {
            Err(crate::UnboxError::TypeMismatch {
                expected: T::TYPE_ID,
                actual: self.vtable.id,
            })
        }
    }

    /// The stored address of a box created from `&T`.
    #[inline]
    pub fn unbox_pointer<T: ?Sized>(&self) -> *const () {
        debug_assert!(
            self.is_pointer() && self.vtable.id == ConstTypeId::of::<*const T>(),
            "unboxing `{}` as `&{}`",
            self.vtable.type_name(),
            core::any::type_name::<T>()
        );
        self.data.pointer()
    }

    /// Pointer to the first element of an array of `T`.
    #[inline]
    pub fn unbox_array<T>(&self) -> *const T {
        debug_assert!(
            self.is_array_of::<T>(),
            "unboxing `{}` as an array of `{}`",
            self.vtable.type_name(),
            core::any::type_name::<T>()
        );
        self.data.pointer().cast::<T>()
    }

    /// Element count of an array.
    #[inline]
    pub fn unbox_length(&self) -> usize {
        debug_assert!(self.is_array(), "`{}` is not an array", self.vtable.type_name());
        self.data.length()
    }

    /// The array as a slice.
    ///
    /// # Safety
    ///
    /// The array the box was created from must still be alive for `'a`, and
    /// must not be mutated during `'a`.
    #[inline]
    pub unsafe fn unbox_slice<'a, T>(&self) -> &'a [T] {
        let data = self.unbox_array::<T>();
        let length = self.data.length();
        if data.is_null() || length == 0 {
            return &[];
        }
        // SAFETY: upheld by the caller.
        unsafe { slice::from_raw_parts(data, length) }
    }

    /// The string the box was created from.
    ///
    /// # Safety
    ///
    /// As for [`Boxed::unbox_slice`]. Boxes of `str` are only created from
    /// valid UTF-8.
    #[inline]
    pub unsafe fn unbox_str<'a>(&self) -> &'a str {
        debug_assert!(self.is_type::<&str>(), "`{}` is not a string", self.vtable.type_name());
        // SAFETY: upheld by the caller.
        let bytes = unsafe { self.unbox_slice::<u8>() };
        // SAFETY: boxes of `str` store the bytes of a `&str`.
        unsafe { core::str::from_utf8_unchecked(bytes) }
    }

    /// A slice of an array of `T`, if the box holds one.
    ///
    /// # Safety
    ///
    /// As for [`Boxed::unbox_slice`].
    pub unsafe fn try_unbox_slice<'a, T>(&self) -> Result<&'a [T], crate::UnboxError> {
        if !self.is_array() {
            return Err(crate::UnboxError::NotAnArray {
                actual: self.vtable.id,
            });
        }
        if !self.is_array_of::<T>() {
            return Err(crate::UnboxError::TypeMismatch {
                expected: ConstTypeId::of::<[T]>(),
                actual: self.vtable.id,
            });
        }
        // SAFETY: upheld by the caller, the type was just checked.
        Ok(unsafe { self.unbox_slice::<T>() })
    }

    //////////////////////////////////////////////////////////////////////
    // Numeric accessors
    //////////////////////////////////////////////////////////////////////

    /// Any signed integer, widened to `i64`.
    pub fn unbox_signed_integral(&self) -> i64 {
        debug_assert!(self.is_signed_integral(), "`{}` is not a signed integer", self.vtable.type_name());
        // SAFETY: the usage length tells which signed type was stored.
        unsafe {
            match self.vtable.usage_length {
                1 => i64::from(self.data.read_value::<i8>()),
                2 => i64::from(self.data.read_value::<i16>()),
                4 => i64::from(self.data.read_value::<i32>()),
                _ => self.data.read_value::<i64>(),
            }
        }
    }

    /// Any unsigned integer, widened to `u64`.
    pub fn unbox_unsigned_integral(&self) -> u64 {
        debug_assert!(self.is_unsigned_integral(), "`{}` is not an unsigned integer", self.vtable.type_name());
        // SAFETY: the usage length tells which unsigned type was stored.
        unsafe {
            match self.vtable.usage_length {
                1 => u64::from(self.data.read_value::<u8>()),
                2 => u64::from(self.data.read_value::<u16>()),
                4 => u64::from(self.data.read_value::<u32>()),
                _ => self.data.read_value::<u64>(),
            }
        }
    }

    /// `f32` or `f64`, widened to `f64`.
    pub fn unbox_floating_point(&self) -> f64 {
        debug_assert!(self.is_floating_point(), "`{}` is not a float", self.vtable.type_name());
        // SAFETY: the usage length tells which float type was stored.
        unsafe {
            match self.vtable.usage_length {
                4 => f64::from(self.data.read_value::<f32>()),
                _ => self.data.read_value::<f64>(),
            }
        }
    }

    /// The stored `char`.
    pub fn unbox_character(&self) -> char {
        self.unbox::<char>()
    }
}

impl<T: Boxable> From<T> for Boxed {
    #[inline]
    fn from(value: T) -> Self {
        Boxed::new(value)
    }
}

impl fmt::Debug for Boxed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Boxed<{}>(", self.vtable.type_name())?;
        crate::append_to(self, f)?;
        f.write_str(")")
    }
}
