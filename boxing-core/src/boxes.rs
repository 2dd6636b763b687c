use alloc::vec::Vec;
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::{Boxable, Boxed, MonoAllocator};

/// An ordered list of boxes, as used for heterogeneous argument lists.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Boxes {
    items: Vec<Boxed>,
}

impl Boxes {
    /// An empty list.
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// An empty list with room for `capacity` boxes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Box `value` and append it.
    pub fn add<T: Boxable>(&mut self, value: T) -> &mut Self {
        self.items.push(Boxed::new(value));
        self
    }

    /// Append every box of `other`, flattening it.
    pub fn add_all(&mut self, other: &Boxes) -> &mut Self {
        self.items.extend_from_slice(&other.items);
        self
    }

    /// Sort by [`Boxed::is_less`].
    pub fn sort(&mut self) {
        self.items.sort();
    }

    /// Copy the contents of every array box into `allocator`.
    pub fn clone_contents(&mut self, allocator: &MonoAllocator) {
        for boxed in &mut self.items {
            boxed.clone_contents(allocator);
        }
    }

    /// The boxes as a vector.
    pub fn into_vec(self) -> Vec<Boxed> {
        self.items
    }
}

impl Deref for Boxes {
    type Target = Vec<Boxed>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl DerefMut for Boxes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl FromIterator<Boxed> for Boxes {
    fn from_iter<I: IntoIterator<Item = Boxed>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Extend<Boxed> for Boxes {
    fn extend<I: IntoIterator<Item = Boxed>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl IntoIterator for Boxes {
    type Item = Boxed;
    type IntoIter = alloc::vec::IntoIter<Boxed>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Boxes {
    type Item = &'a Boxed;
    type IntoIter = core::slice::Iter<'a, Boxed>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Debug for Boxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

/// `[a, b, c]` using each box's append function.
impl fmt::Display for Boxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, boxed) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            crate::append_to(boxed, f)?;
        }
        f.write_str("]")
    }
}

/// Build a [`Boxes`] from heterogeneous values.
///
/// ```
/// boxing_core::ensure_bootstrapped();
/// let args = boxing_core::boxes![1u8, "two", 3.0f64];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args.to_string(), "[1, two, 3]");
/// ```
#[macro_export]
macro_rules! boxes {
    ($($value:expr),* $(,)?) => {{
        let mut boxes = $crate::Boxes::new();
        $( boxes.add($value); )*
        boxes
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorting_puts_numbers_first() {
        crate::ensure_bootstrapped();
        let mut list = crate::boxes!["b", 2u8, 'c', -1i32, "a"];
        list.sort();
        assert_eq!(list[0], Boxed::new(-1i64));
        assert_eq!(list[1], Boxed::new(2u64));
        // Non-numeric types group by type; strings order by content.
        let a = list.iter().position(|b| *b == Boxed::new("a")).unwrap();
        let b = list.iter().position(|b| *b == Boxed::new("b")).unwrap();
        assert!(a < b);
    }

    #[test]
    fn lists_flatten_and_display() {
        crate::ensure_bootstrapped();
        let inner = crate::boxes![true, 'x'];
        let mut outer = Boxes::with_capacity(3);
        outer.add(1u16).add_all(&inner);
        assert_eq!(outer.len(), 3);
        assert_eq!(outer.to_string(), "[1, true, x]");
    }

    #[test]
    fn cloned_lists_outlive_their_sources() {
        crate::ensure_bootstrapped();
        let arena = MonoAllocator::new();
        let mut list = Boxes::new();
        {
            let text = String::from("temporary");
            list.add(&text);
            list.clone_contents(&arena);
        }
        assert_eq!(list[0].to_text(), "temporary");
    }
}
