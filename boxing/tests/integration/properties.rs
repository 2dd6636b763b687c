use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashSet};
use std::hash::{Hash, Hasher};

use boxing::{Boxed, Boxes, MonoAllocator, boxes};

fn sample() -> Vec<Boxed> {
    static WORDS: [&str; 2] = ["abc", "abd"];
    static CHARS: [char; 3] = ['x', 'y', 'z'];
    static BYTES: [u8; 4] = [0, 1, 2, 255];
    vec![
        Boxed::new(0u8),
        Boxed::new(-7i16),
        Boxed::new(7u32),
        Boxed::new(7i64),
        Boxed::new(2.5f32),
        Boxed::new(2.5f64),
        Boxed::new(f64::NAN),
        Boxed::new(true),
        Boxed::new(false),
        Boxed::new('x'),
        Boxed::new(()),
        Boxed::new(WORDS[0]),
        Boxed::new(WORDS[1]),
        Boxed::new(&CHARS),
        Boxed::new(&CHARS[..0]),
        Boxed::new(&BYTES),
        Boxed::new(&BYTES[1..]),
    ]
}

fn std_hash(boxed: &Boxed) -> u64 {
    let mut hasher = DefaultHasher::new();
    boxed.hash(&mut hasher);
    hasher.finish()
}

#[boxing_testhelpers::test]
fn equality_is_reflexive_and_symmetric() {
    let values = sample();
    for a in &values {
        assert!(a.equals(a), "{a:?} is not equal to itself");
        for b in &values {
            assert_eq!(a.equals(b), b.equals(a), "{a:?} vs {b:?}");
        }
    }
}

#[boxing_testhelpers::test]
fn equal_boxes_hash_alike() {
    let values = sample();
    for a in &values {
        for b in &values {
            if a.equals(b) {
                assert_eq!(a.hashcode(), b.hashcode(), "{a:?} vs {b:?}");
                assert_eq!(std_hash(a), std_hash(b));
            }
        }
    }
}

#[boxing_testhelpers::test]
fn unused_placeholder_bytes_are_masked() {
    let canonical = Boxed::new(true);
    let mut noisy = Boxed::new(true);
    for i in 1..boxing::Placeholder::SIZE {
        noisy.data_mut().set_byte(i, 0xa5);
    }
    assert!(noisy.is_true());
    assert!(noisy.equals(&canonical));
    assert!(canonical.equals(&noisy));
    assert_eq!(noisy.hashcode(), canonical.hashcode());

    let mut noisy_false = Boxed::new(false);
    noisy_false.data_mut().set_word(1, usize::MAX);
    assert!(!noisy_false.is_true());
}

#[boxing_testhelpers::test]
fn zero_length_arrays_are_equal_whatever_their_pointer() {
    let first = ['a', 'b'];
    let second = ['c'];
    let a = Boxed::new(&first[..0]);
    let b = Boxed::new(&second[..0]);
    assert_ne!(a.data().pointer(), b.data().pointer());
    assert_eq!(a, b);
    assert_eq!(a.hashcode(), b.hashcode());
}

#[boxing_testhelpers::test]
fn arrays_compare_by_bytes_not_address() {
    let first = vec!['h', 'i'];
    let second = vec!['h', 'i'];
    let longer = vec!['h', 'i', '!'];
    let a = Boxed::new(&first);
    let b = Boxed::new(&second);
    assert_ne!(a.data().pointer(), b.data().pointer());
    assert_eq!(a, b);
    assert_ne!(a, Boxed::new(&longer));
    assert_ne!(Boxed::new(&longer), a);
}

#[boxing_testhelpers::test]
fn clones_are_independent_of_their_source() {
    let arena = MonoAllocator::new();
    let mut buffer = vec![10u16, 20, 30];
    let original = Boxed::new(&buffer);
    let mut copy = original;
    copy.clone_contents(&arena);

    assert_ne!(copy.data().pointer(), original.data().pointer());
    assert_eq!(copy, original);

    buffer[1] = 99;
    let contents = unsafe { copy.unbox_slice::<u16>() };
    assert_eq!(contents, &[10, 20, 30]);
}

#[boxing_testhelpers::test]
fn cloning_leaves_scalars_and_empty_arrays_alone() {
    let arena = MonoAllocator::new();
    let mut number = Boxed::new(5u8);
    number.clone_contents(&arena);
    assert_eq!(number, Boxed::new(5u8));

    let empty: &[u32] = &[];
    let mut empty = Boxed::new(empty);
    let before = empty.data().pointer();
    empty.clone_contents(&arena);
    assert_eq!(empty.data().pointer(), before);
}

#[boxing_testhelpers::test]
fn mixed_sets_sort_reproducibly() {
    let mut first = boxes![1i32, "abc", 2.5f64, 2i32];
    let mut second = boxes![2i32, 2.5f64, "abc", 1i32];
    first.sort();
    second.sort();
    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(first.to_string(), "[1, 2, 2.5, abc]");
}

#[boxing_testhelpers::test]
fn ordering_is_a_strict_weak_order() {
    let values = sample();
    let incomparable = |a: &Boxed, b: &Boxed| !a.is_less(b) && !b.is_less(a);
    for a in &values {
        assert!(!a.is_less(a), "{a:?} < itself");
        for b in &values {
            assert!(!(a.is_less(b) && b.is_less(a)), "{a:?} and {b:?} both less");
            for c in &values {
                if a.is_less(b) && b.is_less(c) {
                    assert!(a.is_less(c), "{a:?} < {b:?} < {c:?} but not {a:?} < {c:?}");
                }
                if incomparable(a, b) && incomparable(b, c) {
                    assert!(incomparable(a, c), "{a:?} ~ {b:?} ~ {c:?} but not {a:?} ~ {c:?}");
                }
            }
        }
    }
}

#[boxing_testhelpers::test]
fn nan_does_not_break_sorting() {
    let mut values = Boxes::new();
    for i in 0..200i32 {
        if i % 10 == 0 {
            values.add(f64::NAN);
        } else {
            values.add((i * 73) % 200 - 100);
        }
    }
    values.sort();

    let numbers: Vec<i32> = values
        .iter()
        .filter(|b| !b.is_floating_point())
        .map(|b| b.unbox::<i32>())
        .collect();
    assert_eq!(numbers.len(), 180);
    assert!(numbers.windows(2).all(|w| w[0] <= w[1]), "{numbers:?}");
    assert!(values[180..].iter().all(Boxed::is_floating_point));
}

#[boxing_testhelpers::test]
fn order_agrees_with_equality_for_exact_values() {
    let first = vec![5u32, 6];
    let second = vec![5u32, 6];
    let pairs = [
        (Boxed::new(&first), Boxed::new(&second)),
        (Boxed::new(3i8), Boxed::new(3u64)),
        (Boxed::new(-0.0f64), Boxed::new(0.0f32)),
        (Boxed::new(f64::NAN), Boxed::new(f32::NAN)),
    ];
    for (a, b) in &pairs {
        assert_eq!(a, b);
        assert_eq!(a.cmp(b), Ordering::Equal, "{a:?} vs {b:?}");
    }
    for a in sample() {
        for b in sample() {
            if a.is_floating_point() || b.is_floating_point() {
                continue;
            }
            assert_eq!(a == b, a.cmp(&b) == Ordering::Equal, "{a:?} vs {b:?}");
        }
    }
}

#[boxing_testhelpers::test]
fn boxes_work_as_set_keys() {
    let hashed: HashSet<Boxed> = sample().into_iter().collect();
    assert!(hashed.contains(&Boxed::new("abc")));
    assert!(hashed.contains(&Boxed::new(7u8)));

    let ordered: BTreeSet<Boxed> = boxes![3u8, "b", "a", 1u8].into_iter().collect();
    let rendered: Vec<String> = ordered.iter().map(Boxed::to_text).collect();
    assert_eq!(rendered, ["1", "3", "a", "b"]);
}
