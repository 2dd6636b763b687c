use std::fmt::Write;
use std::sync::Once;

use boxing::{
    Boxable, Boxed, FAppend, FEquals, FFormat, FHashcode, Mapping, boxable, register,
    register_vtable,
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}
boxable!(value Point);
boxing::assert_boxable_value!(Point);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
enum Color {
    Red = 1,
    Green = 2,
    Blue = 3,
}
boxable!(enum Color);

/// Too large to be stored by value.
#[derive(Debug)]
struct Matrix {
    cells: [[f64; 4]; 4],
}
boxable!(pointer Matrix);

fn register_user_types() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        register_vtable(<Point as Boxable>::vtable());
        register_vtable(<Color as Boxable>::vtable());
        register_vtable(<&Matrix as Boxable>::vtable());

        register::<FAppend, Point>(|boxed, out| {
            let p = boxed.unbox::<Point>();
            write!(out, "({}, {})", p.x, p.y)
        });
        register::<FFormat, Point>(|boxed, spec, out| {
            let p = boxed.unbox::<Point>();
            match spec {
                "x" => write!(out, "{}", p.x),
                "y" => write!(out, "{}", p.y),
                _ => boxing::append_to(boxed, out),
            }
        });

        // Compare matrices by content rather than by address.
        register::<FEquals, &Matrix>(|lhs, rhs| {
            if !lhs.is_same_type(rhs) {
                return false;
            }
            let (a, b) = (lhs.unbox_pointer::<Matrix>(), rhs.unbox_pointer::<Matrix>());
            if a.is_null() || b.is_null() {
                return a.is_null() && b.is_null();
            }
            unsafe { (*a.cast::<Matrix>()).cells == (*b.cast::<Matrix>()).cells }
        });
        register::<FHashcode, &Matrix>(|boxed| {
            let m = boxed.unbox_pointer::<Matrix>();
            if m.is_null() {
                return 0;
            }
            let cells = unsafe { &(*m.cast::<Matrix>()).cells };
            cells.iter().flatten().map(|c| c.to_bits() as usize).sum()
        });
    });
}

#[boxing_testhelpers::test]
fn value_types_round_trip_and_use_the_defaults() {
    register_user_types();
    let a = Boxed::new(Point { x: 1, y: -1 });
    assert_eq!(a.unbox::<Point>(), Point { x: 1, y: -1 });
    assert_eq!(a.vtable().mapping, Mapping::Value);
    assert_eq!(a, Boxed::new(Point { x: 1, y: -1 }));
    assert_ne!(a, Boxed::new(Point { x: 1, y: 1 }));
    assert_eq!(a.hashcode(), Boxed::new(Point { x: 1, y: -1 }).hashcode());
    assert!(a.is_true());
    assert!(!Boxed::new(Point { x: 0, y: 0 }).is_true());
}

#[boxing_testhelpers::test]
fn registered_functions_replace_the_defaults() {
    register_user_types();
    let p = Boxed::new(Point { x: 3, y: 4 });
    assert_eq!(p.to_text(), "(3, 4)");
    assert_eq!(p.format("y"), "4");
    assert_eq!(p.format("?"), "(3, 4)");
    assert_eq!(format!("{p}"), "(3, 4)");
}

#[boxing_testhelpers::test]
fn enums_compare_and_order_by_discriminant() {
    register_user_types();
    let red = Boxed::new(Color::Red);
    assert!(red.is_enum());
    assert_eq!(red.unbox::<Color>(), Color::Red);
    assert_eq!(red, Boxed::new(Color::Red));
    assert_ne!(red, Boxed::new(Color::Blue));
    assert!(red.is_less(&Boxed::new(Color::Green)));
    assert!(Boxed::new(Color::Green).is_less(&Boxed::new(Color::Blue)));
    assert_eq!(red.hashcode(), Boxed::new(Color::Red).hashcode());
}

#[boxing_testhelpers::test]
fn pointers_box_by_address() {
    register_user_types();
    let identity = Matrix {
        cells: [[1.0, 0.0, 0.0, 0.0], [0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 1.0, 0.0], [0.0, 0.0, 0.0, 1.0]],
    };
    let copy = Matrix { cells: identity.cells };
    let a = Boxed::new(&identity);
    let b = Boxed::new(&copy);
    assert!(a.is_pointer());
    assert_eq!(a.unbox_pointer::<Matrix>(), (&raw const identity).cast::<()>());
    assert_eq!(a, b);
    assert_eq!(a.hashcode(), b.hashcode());
    assert!(a.is_not_null());
    assert!(a.to_text().contains("@0x"), "{}", a.to_text());
}

#[boxing_testhelpers::test]
fn absent_pointers_are_null() {
    register_user_types();
    let none: Option<&Matrix> = None;
    let null = Boxed::new(none);
    assert!(null.is_type::<&Matrix>());
    assert!(!null.is_not_null());
    assert!(null.to_text().ends_with("@null"));
    assert_eq!(null, Boxed::new(Option::<&Matrix>::None));
}

#[boxing_testhelpers::test]
fn arrays_of_user_types_get_a_dynamic_table() {
    register_user_types();
    let points = [Point { x: 1, y: 2 }, Point { x: 3, y: 4 }];
    let same = points;
    let a = Boxed::new(&points);
    assert_eq!(a.vtable().provenance, boxing::Provenance::Dynamic);
    assert!(a.is_array_of::<Point>());
    assert_eq!(a, Boxed::new(&same));
    assert_eq!(a.to_text(), format!("{}[2]", std::any::type_name::<Point>()));
    let mut text = String::new();
    boxing::append_to(&a, &mut text).unwrap();
    assert_eq!(text, a.to_text());
}
