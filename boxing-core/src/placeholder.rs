//! The fixed-size storage of a boxed value.
//!
//! # Memory Layout
//!
//! ```text
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │            word 0            │            word 1            │
//! ├──────────────────────────────┼──────────────────────────────┤
//! │ scalar bytes 0..W            │ scalar bytes W..2W           │
//! │ p1: pointer / array data     │ p2: array length             │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! The placeholder carries no tag. Which interpretation is valid is decided
//! by the [`VTable`](crate::VTable) stored next to it in a
//! [`Boxed`](crate::Boxed). For scalars, only the first
//! [`usage_length`](crate::VTable::usage_length) bytes are meaningful; the
//! rest must be masked out before comparing or hashing.

use core::fmt;
use core::mem::{align_of, size_of};
use core::ptr;

/// Size of one machine word in bytes.
pub const WORD: usize = size_of::<usize>();

/// A pointer and an integer, the interpretation used for pointers and arrays.
#[derive(Clone, Copy)]
#[repr(C)]
pub struct PointerPair {
    /// Pointer to the value (pointer types) or to the first element (arrays).
    pub p1: *const (),
    /// Element count for arrays, unused for pointers.
    pub p2: usize,
}

/// Two machine words of untagged storage.
#[derive(Clone, Copy)]
#[repr(C)]
pub union Placeholder {
    words: [usize; 2],
    bytes: [u8; 2 * WORD],
    pair: PointerPair,
}

static_assertions::const_assert_eq!(size_of::<Placeholder>(), 2 * WORD);
static_assertions::const_assert_eq!(align_of::<Placeholder>(), align_of::<usize>());
static_assertions::const_assert_eq!(size_of::<PointerPair>(), 2 * WORD);

impl Placeholder {
    /// Total size of the storage in bytes.
    pub const SIZE: usize = 2 * WORD;

    /// All bits zero.
    #[inline]
    pub const fn zeroed() -> Self {
        Placeholder { words: [0; 2] }
    }

    /// Both words as given.
    #[inline]
    pub const fn from_words(w0: usize, w1: usize) -> Self {
        Placeholder { words: [w0, w1] }
    }

    /// Copy `value` into the leading bytes; the remaining bytes are zero.
    ///
    /// # Panics
    ///
    /// If `T` does not fit into [`Placeholder::SIZE`] bytes. Boxable types
    /// check this at compile time, so this only fires on direct misuse.
    #[inline]
    pub const fn from_value<T: Copy>(value: T) -> Self {
        assert!(size_of::<T>() <= Self::SIZE, "value does not fit into a placeholder");
        let mut this = Self::zeroed();
        // SAFETY: the size was checked above and the write is unaligned-safe.
        unsafe { ptr::write_unaligned(ptr::addr_of_mut!(this).cast::<T>(), value) };
        this
    }

    /// A plain pointer; the second word is zero.
    #[inline]
    pub const fn from_pointer<T: ?Sized>(pointer: *const T) -> Self {
        Placeholder {
            pair: PointerPair {
                p1: pointer.cast::<()>(),
                p2: 0,
            },
        }
    }

    /// An array given by its first element and its element count.
    #[inline]
    pub const fn from_array<T>(data: *const T, length: usize) -> Self {
        Placeholder {
            pair: PointerPair {
                p1: data.cast::<()>(),
                p2: length,
            },
        }
    }

    /// Read the leading bytes back as a `T`.
    ///
    /// # Safety
    ///
    /// The placeholder must have been written with a value of type `T`.
    #[inline]
    pub const unsafe fn read_value<T: Copy>(&self) -> T {
        debug_assert!(size_of::<T>() <= Self::SIZE);
        unsafe { ptr::read_unaligned(ptr::from_ref(self).cast::<T>()) }
    }

    /// The integral word at `index` (0 or 1).
    #[inline]
    pub const fn word(&self, index: usize) -> usize {
        // SAFETY: every bit pattern is a valid `usize`.
        unsafe { self.words[index] }
    }

    /// Overwrite the integral word at `index` (0 or 1).
    #[inline]
    pub const fn set_word(&mut self, index: usize, value: usize) {
        let mut words = unsafe { self.words };
        words[index] = value;
        self.words = words;
    }

    /// The byte at `index`, in memory order.
    #[inline]
    pub const fn byte(&self, index: usize) -> u8 {
        unsafe { self.bytes[index] }
    }

    /// Overwrite the byte at `index`, in memory order.
    #[inline]
    pub const fn set_byte(&mut self, index: usize, value: u8) {
        let mut bytes = unsafe { self.bytes };
        bytes[index] = value;
        self.bytes = bytes;
    }

    /// All bytes, in memory order.
    #[inline]
    pub const fn bytes(&self) -> [u8; 2 * WORD] {
        unsafe { self.bytes }
    }

    /// The pointer/length interpretation.
    #[inline]
    pub const fn pair(&self) -> PointerPair {
        unsafe { self.pair }
    }

    /// The first field of the pointer/length interpretation.
    #[inline]
    pub const fn pointer(&self) -> *const () {
        unsafe { self.pair.p1 }
    }

    /// Replace the pointer, keeping the length.
    #[inline]
    pub const fn set_pointer(&mut self, pointer: *const ()) {
        let mut pair = unsafe { self.pair };
        pair.p1 = pointer;
        self.pair = pair;
    }

    /// The second field of the pointer/length interpretation.
    #[inline]
    pub const fn length(&self) -> usize {
        unsafe { self.pair.p2 }
    }

    /// Both words with every byte at or beyond `usage_length` cleared.
    ///
    /// Works on bytes rather than shifting words so that the result is the
    /// same on little- and big-endian targets.
    pub fn masked_words(&self, usage_length: usize) -> [usize; 2] {
        if usage_length >= Self::SIZE {
            return [self.word(0), self.word(1)];
        }
        let mut masked = Self::zeroed();
        for i in 0..usage_length {
            masked.set_byte(i, self.byte(i));
        }
        [masked.word(0), masked.word(1)]
    }
}

impl Default for Placeholder {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placeholder({:#x}, {:#x})", self.word(0), self.word(1))
    }
}
