//! The process-wide initialization gate.
//!
//! ```text
//! Uninitialized ──bootstrap──► Bootstrapping ──► Initialized ──shutdown──► ShutDown
//!       ▲                            │
//!       └──── platform probe fails ──┘
//! ```
//!
//! Bootstrap registers the built-in tables, then the defaults, then the
//! type-specific functions, in that order. Shutdown is terminal.

use core::sync::atomic::{AtomicU8, Ordering};
use std::sync::Once;

use crate::{BootstrapError, builtins, defaults, numbers, platform, registry, text};

/// Lifecycle of the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    /// Nothing registered yet.
    Uninitialized = 0,
    /// Bootstrap is running.
    Bootstrapping = 1,
    /// Ready for use.
    Initialized = 2,
    /// Tables were unregistered; no further use allowed.
    ShutDown = 3,
}

impl State {
    fn from_u8(raw: u8) -> State {
        match raw {
            0 => State::Uninitialized,
            1 => State::Bootstrapping,
            2 => State::Initialized,
            _ => State::ShutDown,
        }
    }
}

pub(crate) struct Gate {
    state: AtomicU8,
}

impl Gate {
    pub(crate) const fn new() -> Self {
        Self {
            state: AtomicU8::new(State::Uninitialized as u8),
        }
    }

    pub(crate) fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::Acquire))
    }

    fn transition(&self, from: State, to: State) -> Result<(), State> {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(State::from_u8)
    }

    /// Uninitialized → Bootstrapping.
    pub(crate) fn begin_bootstrap(&self) -> Result<(), BootstrapError> {
        self.transition(State::Uninitialized, State::Bootstrapping)
            .map_err(|current| match current {
                State::ShutDown => BootstrapError::AlreadyShutDown,
                _ => BootstrapError::AlreadyBootstrapped,
            })
    }

    /// Bootstrapping → Initialized, or back to Uninitialized on failure.
    pub(crate) fn end_bootstrap(&self, succeeded: bool) {
        let to = if succeeded {
            State::Initialized
        } else {
            State::Uninitialized
        };
        self.state.store(to as u8, Ordering::Release);
    }

    /// Initialized → ShutDown.
    pub(crate) fn begin_shutdown(&self) -> Result<(), BootstrapError> {
        self.transition(State::Initialized, State::ShutDown)
            .map_err(|current| match current {
                State::ShutDown => BootstrapError::AlreadyShutDown,
                _ => BootstrapError::NotBootstrapped,
            })
    }
}

static GATE: Gate = Gate::new();

/// Which function sets bootstrap installs on top of the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootstrapConfig {
    numeric_overrides: bool,
    text_overrides: bool,
    platform_checks: bool,
}

impl BootstrapConfig {
    /// Everything on.
    pub const fn new() -> Self {
        Self {
            numeric_overrides: true,
            text_overrides: true,
            platform_checks: true,
        }
    }

    /// Cross-type equality, ordering, hashing and formatting for integers and
    /// floats. When off, numbers compare like any other scalar: by type and
    /// bytes.
    pub const fn numeric_overrides(mut self, enabled: bool) -> Self {
        self.numeric_overrides = enabled;
        self
    }

    /// Textual append for `str` and `[char]`. When off, both append like
    /// any other array. Their ordering is installed either way.
    pub const fn text_overrides(mut self, enabled: bool) -> Self {
        self.text_overrides = enabled;
        self
    }

    /// The run-time platform probe.
    pub const fn platform_checks(mut self, enabled: bool) -> Self {
        self.platform_checks = enabled;
        self
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Register every built-in table and function, exactly once per process.
///
/// Must complete before any box is operated on, and before any array of a
/// type without a built-in table is boxed. Fails without side effects if
/// already called or if the platform probe fails.
pub fn try_bootstrap(config: BootstrapConfig) -> Result<(), BootstrapError> {
    GATE.begin_bootstrap()?;
    debug!("bootstrapping boxing with {:?}", config);

    if config.platform_checks {
        if let Err(err) = platform::probe() {
            GATE.end_bootstrap(false);
            return Err(err.into());
        }
    }

    for vtable in builtins::static_vtables() {
        registry::register_vtable(vtable);
    }
    defaults::register_all();
    numbers::register_scalars();
    builtins::register_array_functions();
    if config.numeric_overrides {
        numbers::register_numeric(&builtins::numeric_vtables());
    }
    if config.text_overrides {
        text::register_text();
    }

    GATE.end_bootstrap(true);
    debug!("boxing bootstrapped");
    Ok(())
}

/// [`try_bootstrap`] with the default configuration.
///
/// # Panics
///
/// If already bootstrapped or if the platform probe fails.
pub fn bootstrap() {
    bootstrap_with(BootstrapConfig::new());
}

/// [`try_bootstrap`] with `config`.
///
/// # Panics
///
/// If already bootstrapped or if the platform probe fails.
pub fn bootstrap_with(config: BootstrapConfig) {
    if let Err(err) = try_bootstrap(config) {
        panic!("{err}");
    }
}

/// Bootstrap with the default configuration unless some bootstrap already
/// ran. Safe to call from many threads at once.
///
/// # Panics
///
/// If the engine was shut down or the platform probe fails.
pub fn ensure_bootstrapped() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        if GATE.state() == State::Uninitialized {
            bootstrap();
        }
    });
    assert_eq!(GATE.state(), State::Initialized, "boxing is not available");
}

/// Unregister every table. Boxes must not be operated on afterwards and
/// bootstrap cannot run again.
pub fn try_shutdown() -> Result<(), BootstrapError> {
    GATE.begin_shutdown()?;
    registry::clear();
    debug!("boxing shut down");
    Ok(())
}

/// [`try_shutdown`], panicking on misuse.
///
/// # Panics
///
/// If not bootstrapped, or shut down twice.
pub fn shutdown() {
    if let Err(err) = try_shutdown() {
        panic!("{err}");
    }
}

/// The current lifecycle state.
pub fn state() -> State {
    GATE.state()
}

/// Whether bootstrap has completed and shutdown has not happened.
pub fn is_bootstrapped() -> bool {
    GATE.state() == State::Initialized
}

/// Whether tables may be created and registered.
pub(crate) fn registration_open() -> bool {
    matches!(GATE.state(), State::Bootstrapping | State::Initialized)
}
