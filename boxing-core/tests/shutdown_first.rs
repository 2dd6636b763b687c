//! Shutting down a process that never bootstrapped. Own process, so that
//! no other test has walked the gate.

#[test]
#[should_panic(expected = "boxing was never bootstrapped")]
fn shutdown_before_bootstrap_panics() {
    boxing_core::shutdown();
}
