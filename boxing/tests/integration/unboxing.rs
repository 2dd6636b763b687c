use boxing::{Boxed, ConstTypeId, UnboxError};
use boxing_testhelpers::IPanic;

#[boxing_testhelpers::test]
fn scalars_come_back_unchanged() -> Result<(), IPanic> {
    assert_eq!(Boxed::new(-12345i32).try_unbox::<i32>()?, -12345);
    assert_eq!(Boxed::new('ß').try_unbox::<char>()?, 'ß');
    assert_eq!(Boxed::new(f64::MIN_POSITIVE).try_unbox::<f64>()?, f64::MIN_POSITIVE);
    assert!(Boxed::new(true).try_unbox::<bool>()?);
    Ok(())
}

#[boxing_testhelpers::test]
fn wrong_types_are_reported() {
    let b = Boxed::new(1u16);
    assert_eq!(
        b.try_unbox::<i16>(),
        Err(UnboxError::TypeMismatch {
            expected: ConstTypeId::of::<i16>(),
            actual: ConstTypeId::of::<u16>(),
        })
    );
    assert_eq!(
        unsafe { b.try_unbox_slice::<u16>() },
        Err(UnboxError::NotAnArray {
            actual: ConstTypeId::of::<u16>(),
        })
    );
}

#[boxing_testhelpers::test]
fn classification_queries() {
    assert!(Boxed::new(-1i8).is_signed_integral());
    assert!(Boxed::new(1usize).is_unsigned_integral());
    assert!(Boxed::new(1.0f32).is_floating_point());
    assert!(Boxed::new('c').is_character());
    assert!(!Boxed::new(true).is_numeric());
    assert!(Boxed::new("s").is_array());
    assert!(Boxed::new("s").is_type::<&str>());
    assert!(Boxed::new(&String::new()).is_type::<&str>());
    assert!(Boxed::new(&[1u64][..]).is_array_of::<u64>());
    assert!(!Boxed::new(&[1u64][..]).is_array_of::<i64>());
    assert!(Boxed::new(2u8).is_same_type(&Boxed::new(9u8)));
    assert!(!Boxed::new(2u8).is_same_type(&Boxed::new(2i8)));
}

#[boxing_testhelpers::test]
fn numeric_family_accessors_widen() {
    assert_eq!(Boxed::new(-3i8).unbox_signed_integral(), -3);
    assert_eq!(Boxed::new(i32::MIN).unbox_signed_integral(), i64::from(i32::MIN));
    assert_eq!(Boxed::new(u16::MAX).unbox_unsigned_integral(), 65535);
    assert_eq!(Boxed::new(0.5f32).unbox_floating_point(), 0.5);
    assert_eq!(Boxed::new('q').unbox_character(), 'q');
}

#[boxing_testhelpers::test]
fn arrays_expose_pointer_length_and_element() {
    let data = [3i32, 1, 4, 1, 5];
    let b = Boxed::new(&data);
    assert_eq!(b.unbox_array::<i32>(), data.as_ptr());
    assert_eq!(b.unbox_length(), 5);
    assert_eq!(b.array_element_size(), 4);
    assert_eq!(b.element_type_id(), ConstTypeId::of::<i32>());
    assert_eq!(b.type_id(), ConstTypeId::of::<[i32]>());
    assert_eq!(b.placeholder_usage_length(), boxing::Placeholder::SIZE);
    assert_eq!(unsafe { b.try_unbox_slice::<i32>() }, Ok(&data[..]));

    let text = String::from("grüße");
    let b = Boxed::new(&text);
    assert_eq!(b.element_type_id(), ConstTypeId::of::<u8>());
    assert_eq!(b.unbox_length(), text.len());
    assert_eq!(unsafe { b.unbox_str() }, "grüße");
}

#[boxing_testhelpers::test]
fn usage_length_follows_the_type() {
    assert_eq!(Boxed::new(1u8).placeholder_usage_length(), 1);
    assert_eq!(Boxed::new('x').placeholder_usage_length(), 4);
    assert_eq!(Boxed::new(()).placeholder_usage_length(), 0);
    assert_eq!(Boxed::new(1.0f64).placeholder_usage_length(), 8);
}

#[cfg(debug_assertions)]
#[boxing_testhelpers::test]
#[should_panic(expected = "`u16` is not an array")]
fn length_of_a_scalar_panics_in_debug() {
    Boxed::new(1u16).unbox_length();
}

#[cfg(debug_assertions)]
#[boxing_testhelpers::test]
#[should_panic(expected = "unboxing `u16` as `i16`")]
fn unboxing_as_another_type_panics_in_debug() {
    Boxed::new(1u16).unbox::<i16>();
}
