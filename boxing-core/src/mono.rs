use core::alloc::Layout;
use core::fmt;
use core::ptr::NonNull;

use bumpalo::Bump;

/// A monotonic arena that cloned boxes copy their array contents into.
///
/// Memory is handed out by bumping a pointer and only returned all at once,
/// by [`MonoAllocator::reset`] or by dropping the allocator. Boxes cloned into
/// an allocator must not be inspected after either happens.
pub struct MonoAllocator {
    bump: Bump,
}

impl MonoAllocator {
    /// An empty arena. The first chunk is allocated lazily.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// An arena with room for `bytes` bytes before it needs another chunk.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Uninitialized memory for `layout`, valid until reset or drop.
    ///
    /// # Panics
    ///
    /// If the system allocator fails.
    #[inline]
    pub fn allocate(&self, layout: Layout) -> NonNull<u8> {
        self.bump.alloc_layout(layout)
    }

    /// Bytes held by the arena's chunks, including unused room.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Release everything at once, keeping the largest chunk for reuse.
    pub fn reset(&mut self) {
        trace!("resetting mono allocator holding {} bytes", self.allocated_bytes());
        self.bump.reset();
    }
}

impl Default for MonoAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MonoAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonoAllocator")
            .field("allocated_bytes", &self.allocated_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocations_honor_alignment() {
        let arena = MonoAllocator::new();
        let _ = arena.allocate(Layout::from_size_align(3, 1).unwrap());
        let p = arena.allocate(Layout::from_size_align(16, 8).unwrap());
        assert_eq!(p.as_ptr() as usize % 8, 0);
        assert!(arena.allocated_bytes() >= 19);
    }

    #[test]
    fn reset_keeps_the_arena_usable() {
        let mut arena = MonoAllocator::with_capacity(64);
        let _ = arena.allocate(Layout::from_size_align(32, 4).unwrap());
        arena.reset();
        let p = arena.allocate(Layout::from_size_align(4, 4).unwrap());
        assert_eq!(p.as_ptr() as usize % 4, 0);
    }
}
