//! Snapshot of the tables bootstrap registers. Own process, so that no
//! user or dynamic tables show up.

#![cfg(target_pointer_width = "64")]

use boxing_core::Provenance;
use boxing_core::debug::{check_consistency, vtable_report};

#[test]
fn builtin_tables() {
    boxing_core::ensure_bootstrapped();
    assert_eq!(check_consistency(), Vec::new());

    let rendered: Vec<String> = vtable_report()
        .into_iter()
        .filter(|info| info.provenance == Provenance::Static)
        .map(|info| format!("{} {:?} {:?}", info.type_name, info.mapping, info.category))
        .collect();

    insta::assert_snapshot!(rendered.join("\n"), @r"
    () Value Other
    [bool] Array Other
    [char] Array Other
    [f32] Array Other
    [f64] Array Other
    [i16] Array Other
    [i32] Array Other
    [i64] Array Other
    [i8] Array Other
    [isize] Array Other
    [u16] Array Other
    [u32] Array Other
    [u64] Array Other
    [u8] Array Other
    [usize] Array Other
    bool Value Boolean
    char Value Character
    f32 Value FloatingPoint
    f64 Value FloatingPoint
    i128 Value Other
    i16 Value SignedIntegral
    i32 Value SignedIntegral
    i64 Value SignedIntegral
    i8 Value SignedIntegral
    isize Value SignedIntegral
    str Array Other
    u128 Value Other
    u16 Value UnsignedIntegral
    u32 Value UnsignedIntegral
    u64 Value UnsignedIntegral
    u8 Value UnsignedIntegral
    usize Value UnsignedIntegral
    ");
}
