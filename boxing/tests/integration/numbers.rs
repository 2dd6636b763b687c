use boxing::Boxed;

#[boxing_testhelpers::test]
fn integers_of_any_width_and_sign_compare_by_value() {
    assert_eq!(Boxed::new(5i32), Boxed::new(5u64));
    assert_eq!(Boxed::new(5u64), Boxed::new(5i32));
    assert_ne!(Boxed::new(-1i64), Boxed::new(u64::MAX));
    assert_eq!(Boxed::new(u8::MAX), Boxed::new(255i16));
    assert_eq!(Boxed::new(5i32).hashcode(), Boxed::new(5u64).hashcode());
}

#[boxing_testhelpers::test]
fn integers_order_against_floats() {
    assert!(Boxed::new(3i32).is_less(&Boxed::new(3.5f64)));
    assert!(!Boxed::new(3.5f64).is_less(&Boxed::new(3i32)));
    assert!(Boxed::new(-1i8).is_less(&Boxed::new(0u64)));
    assert!(Boxed::new(u64::MAX - 1).is_less(&Boxed::new(u64::MAX)));
}

#[boxing_testhelpers::test]
fn floats_compare_within_tolerance() {
    assert_eq!(Boxed::new(1.0f32), Boxed::new(1.0f64 + 1e-9));
    assert_eq!(Boxed::new(1.0f64 + 1e-9), Boxed::new(1.0f32));
    assert_ne!(Boxed::new(1.0f32), Boxed::new(2.0f64));
    // Also between two doubles.
    assert_eq!(Boxed::new(0.1f64 + 0.2), Boxed::new(0.3f64));
    assert_eq!(Boxed::new(1.0f64), Boxed::new(1.0 + boxing::FLOAT_TOLERANCE));
    assert_ne!(Boxed::new(1.0f64), Boxed::new(1.0 + 4.0 * boxing::FLOAT_TOLERANCE));
}

#[boxing_testhelpers::test]
fn numbers_never_equal_other_types() {
    assert_ne!(Boxed::new(1u8), Boxed::new(true));
    assert_ne!(Boxed::new(97u32), Boxed::new('a'));
    assert_ne!(Boxed::new(0i32), Boxed::new(""));
    assert!(Boxed::new(1u8).is_not_null());
    assert!(Boxed::new(0u8).is_not_null());
    assert!(!Boxed::new(0u8).is_true());
}

#[boxing_testhelpers::test]
fn numbers_format_with_a_spec() {
    assert_eq!(Boxed::new(48879u32).format("#x"), "0xbeef");
    assert_eq!(Boxed::new(-2i16).format("X"), "FFFE");
    assert_eq!(Boxed::new(8u8).format("o"), "10");
    assert_eq!(Boxed::new(2.0f64 / 3.0).format(".3"), "0.667");
    assert_eq!(Boxed::new(1500.0f64).format("e"), "1.5e3");
    assert_eq!(Boxed::new(12i64).format(""), "12");
    assert_eq!(format!("{}", Boxed::new(0.25f32)), "0.25");
}
