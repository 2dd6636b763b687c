use std::sync::Barrier;
use std::thread;

use boxing::{Boxed, VTable};

#[derive(Clone, Copy)]
struct Sample(#[allow(dead_code)] u32);

#[boxing_testhelpers::test]
fn first_encounters_race_to_a_single_table() {
    const THREADS: usize = 8;
    let barrier = Barrier::new(THREADS);
    let tables: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let barrier = &barrier;
                scope.spawn(move || {
                    let data = [Sample(i as u32); 3];
                    barrier.wait();
                    let b = Boxed::new(&data);
                    assert!(b.equals(&Boxed::new(&data)));
                    core::ptr::from_ref::<VTable>(b.vtable()) as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(tables.windows(2).all(|w| w[0] == w[1]));
}

#[boxing_testhelpers::test]
fn boxes_cross_threads() {
    let values = boxing::boxes![1u8, "shared", 2.5f64];
    let rendered = thread::scope(|scope| {
        scope
            .spawn(|| values.iter().map(Boxed::to_text).collect::<Vec<_>>())
            .join()
            .unwrap()
    });
    assert_eq!(rendered, ["1", "shared", "2.5"]);
}
