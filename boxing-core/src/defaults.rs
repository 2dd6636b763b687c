//! The fallback algorithms, registered as defaults by bootstrap.
//!
//! They only look at the placeholder and the table's classification, so they
//! work for every type. Type-specific functions may call them to handle the
//! cases they do not care about.

use core::alloc::Layout;
use core::cmp::Ordering;
use core::fmt;
use core::ptr;
use core::slice;

use crate::registry::register_default;
use crate::{
    Boxed, FAppend, FClone, FEquals, FFormat, FHashcode, FIsEmpty, FIsLess, FIsNotNull, FIsTrue,
    Mapping, MonoAllocator, VTable, WORD,
};

const POINTER_SEED: usize = 0xa814_e72c;
const ENUM_SEED: usize = 0x49a0_24ef;
const ARRAY_SEED: usize = 0xa925_eb91;
const VALUE_SEED: usize = 0xcf67_0957;

const POINTER_FACTOR: usize = 89_047_023;
const ENUM_FACTOR: usize = 79_204_799;
const WORD0_FACTOR: usize = 32_194_735;
const WORD1_FACTOR: usize = 321_947;
const ELEMENT_FACTOR: usize = 67;

pub(crate) fn register_all() {
    register_default::<FEquals>(equals);
    register_default::<FHashcode>(hashcode);
    register_default::<FIsLess>(is_less);
    register_default::<FIsTrue>(is_true);
    register_default::<FIsNotNull>(is_not_null);
    register_default::<FIsEmpty>(is_empty);
    register_default::<FClone>(clone);
    register_default::<FAppend>(append);
    register_default::<FFormat>(format);
}

/// The bytes of an array box. Empty for null or empty arrays.
///
/// # Safety
///
/// The array the box was created from must still be alive.
unsafe fn array_bytes<'a>(boxed: &Boxed) -> &'a [u8] {
    let vtable = boxed.vtable();
    let data = boxed.data().pointer().cast::<u8>();
    let length = boxed.data().length();
    if data.is_null() || length == 0 || vtable.element_size == 0 {
        return &[];
    }
    // SAFETY: the box was created from a live slice of `length` elements.
    unsafe { slice::from_raw_parts(data, length * vtable.element_size) }
}

/// Same type, and equal contents.
///
/// Scalars compare the used placeholder bytes, pointers compare addresses.
/// Arrays compare lengths, then contents byte by byte; arrays of length
/// zero are equal whatever their data pointer.
pub fn equals(lhs: &Boxed, rhs: &Boxed) -> bool {
    if !lhs.is_same_type(rhs) {
        return false;
    }
    let vtable = lhs.vtable();
    if vtable.mapping != Mapping::Array {
        return lhs.data().masked_words(vtable.usage_length)
            == rhs.data().masked_words(vtable.usage_length);
    }

    let length = lhs.data().length();
    if length != rhs.data().length() {
        return false;
    }
    if length == 0 {
        return true;
    }
    let (left, right) = (lhs.data().pointer(), rhs.data().pointer());
    if left.is_null() != right.is_null() {
        return false;
    }
    if ptr::eq(left, right) {
        return true;
    }
    // SAFETY: boxed arrays must outlive the operations on their boxes.
    unsafe { array_bytes(lhs) == array_bytes(rhs) }
}

/// Hash seeded by the type, mixed with the used bytes (scalars), the
/// address (pointers), or every element (arrays).
pub fn hashcode(boxed: &Boxed) -> usize {
    let vtable = boxed.vtable();
    match vtable.mapping {
        Mapping::Pointer => POINTER_SEED
            .wrapping_add(vtable.id.hash_code())
            .wrapping_add(boxed.data().pointer().addr().wrapping_mul(POINTER_FACTOR)),
        Mapping::Enum => {
            let [word, _] = boxed.data().masked_words(vtable.usage_length);
            ENUM_SEED
                .wrapping_add(vtable.id.hash_code())
                .wrapping_add(word.wrapping_mul(ENUM_FACTOR))
        }
        Mapping::Array => {
            let seed = ARRAY_SEED.wrapping_add(boxed.element_type_id().hash_code());
            // SAFETY: boxed arrays must outlive the operations on their boxes.
            let bytes = unsafe { array_bytes(boxed) };
            hash_elements(seed, bytes, vtable.element_size)
        }
        Mapping::Value => {
            let [w0, w1] = boxed.data().masked_words(vtable.usage_length);
            let mut hash = VALUE_SEED
                .wrapping_add(vtable.id.hash_code())
                .wrapping_add(w0.wrapping_mul(WORD0_FACTOR));
            if vtable.usage_length > WORD {
                hash = hash.wrapping_add(w1.wrapping_mul(WORD1_FACTOR));
            }
            hash
        }
    }
}

/// `hash = 67 * hash + element`, element by element for sizes 2, 4 and 8,
/// in 16-bit steps for size 6, byte by byte otherwise.
fn hash_elements(seed: usize, bytes: &[u8], element_size: usize) -> usize {
    let mix = |hash: usize, element: usize| {
        hash.wrapping_mul(ELEMENT_FACTOR).wrapping_add(element)
    };
    match element_size {
        2 | 6 => bytes.chunks_exact(2).fold(seed, |hash, c| {
            mix(hash, usize::from(u16::from_ne_bytes([c[0], c[1]])))
        }),
        4 => bytes.chunks_exact(4).fold(seed, |hash, c| {
            mix(hash, u32::from_ne_bytes([c[0], c[1], c[2], c[3]]) as usize)
        }),
        8 => bytes.chunks_exact(8).fold(seed, |hash, c| {
            let mut word = [0u8; 8];
            word.copy_from_slice(c);
            mix(hash, u64::from_ne_bytes(word) as usize)
        }),
        _ => bytes
            .iter()
            .fold(seed, |hash, &byte| mix(hash, usize::from(byte))),
    }
}

/// Different types sort by [`VTable::type_order`]. Arrays of the same type
/// compare their bytes lexicographically, everything else the used
/// placeholder words as unsigned integers, first word first. Boxes order
/// as equal exactly when [`equals`] holds.
pub fn is_less(lhs: &Boxed, rhs: &Boxed) -> bool {
    let (left, right) = (lhs.vtable(), rhs.vtable());
    if !lhs.is_same_type(rhs) {
        return left.type_order(right) == Ordering::Less;
    }
    if left.mapping == Mapping::Array {
        // SAFETY: boxed arrays must outlive the operations on their boxes.
        return unsafe { array_order(lhs) < array_order(rhs) };
    }
    lhs.data().masked_words(left.usage_length) < rhs.data().masked_words(right.usage_length)
}

/// Contents, then length, then whether a non-empty array has data.
///
/// # Safety
///
/// As for [`array_bytes`].
unsafe fn array_order<'a>(boxed: &Boxed) -> (&'a [u8], usize, bool) {
    let length = boxed.data().length();
    let has_data = length != 0 && !boxed.data().pointer().is_null();
    // SAFETY: upheld by the caller.
    (unsafe { array_bytes(boxed) }, length, has_data)
}

/// Arrays are true when non-empty; everything else when any used byte is
/// non-zero.
pub fn is_true(boxed: &Boxed) -> bool {
    let vtable = boxed.vtable();
    if vtable.mapping == Mapping::Array {
        return boxed.data().length() != 0;
    }
    boxed.data().masked_words(vtable.usage_length) != [0, 0]
}

/// False for empty arrays and null pointers.
pub fn is_not_null(boxed: &Boxed) -> bool {
    match boxed.vtable().mapping {
        Mapping::Array => boxed.data().length() != 0,
        Mapping::Pointer => !boxed.data().pointer().is_null(),
        Mapping::Value | Mapping::Enum => true,
    }
}

/// True for arrays of length zero.
pub fn is_empty(boxed: &Boxed) -> bool {
    boxed.vtable().mapping == Mapping::Array && boxed.data().length() == 0
}

/// Copy a non-empty array into `allocator` and redirect the box to the copy.
/// Everything else is left alone.
pub fn clone(boxed: &mut Boxed, allocator: &MonoAllocator) {
    let vtable = boxed.vtable();
    if vtable.mapping != Mapping::Array {
        return;
    }
    // SAFETY: boxed arrays must outlive the operations on their boxes.
    let source = unsafe { array_bytes(boxed) };
    if source.is_empty() {
        return;
    }
    let Ok(layout) = Layout::from_size_align(source.len(), clone_alignment(vtable)) else {
        return;
    };
    let target = allocator.allocate(layout);
    // SAFETY: the arena handed out `source.len()` fresh bytes.
    unsafe { ptr::copy_nonoverlapping(source.as_ptr(), target.as_ptr(), source.len()) };
    trace!("cloned {} bytes of `{}`", source.len(), vtable.type_name());
    boxed.data_mut().set_pointer(target.as_ptr().cast_const().cast());
}

/// The largest power of two dividing the element size, capped at a word,
/// and never below the element's own alignment.
fn clone_alignment(vtable: &VTable) -> usize {
    let by_size = 1usize << vtable.element_size.trailing_zeros().min(WORD.trailing_zeros());
    by_size.max(vtable.element_align).max(1)
}

/// `TypeName[length]` for arrays, `TypeName@address` for pointers and
/// `TypeName(0x…)` with the used bytes in memory order for the rest.
pub fn append(boxed: &Boxed, out: &mut dyn fmt::Write) -> fmt::Result {
    let vtable = boxed.vtable();
    match vtable.mapping {
        Mapping::Array => write!(
            out,
            "{}[{}]",
            boxed.element_type_id().name(),
            boxed.data().length()
        ),
        Mapping::Pointer => {
            let address = boxed.data().pointer();
            if address.is_null() {
                write!(out, "{}@null", vtable.type_name())
            } else {
                write!(out, "{}@{:p}", vtable.type_name(), address)
            }
        }
        Mapping::Value | Mapping::Enum => {
            write!(out, "{}(0x", vtable.type_name())?;
            let bytes = boxed.data().bytes();
            for byte in &bytes[..vtable.usage_length.min(bytes.len())] {
                write!(out, "{byte:02x}")?;
            }
            out.write_char(')')
        }
    }
}

/// Ignores the spec and appends.
pub fn format(boxed: &Boxed, _spec: &str, out: &mut dyn fmt::Write) -> fmt::Result {
    crate::append_to(boxed, out)
}
