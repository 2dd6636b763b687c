#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

extern crate alloc;

// Logging macros, must come before the modules using them
#[macro_use]
mod tracing_macros;

// Boxable type declaration macro
mod macros;

// Const type Id
mod typeid;
pub use typeid::*;

// Untagged two-word storage
mod placeholder;
pub use placeholder::*;

// Per-type function tables and operation kinds
mod vtable;
pub use vtable::*;

// The boxed value
mod boxed;
pub use boxed::*;

// Built-in boxable types and their static tables
mod builtins;

// Type identity → function table registry
mod registry;
pub use registry::{
    array_vtable, lookup, register, register_default, register_in, register_vtable,
    registered_vtables, resolve,
};

// Operation dispatch on boxes
mod dispatch;
pub use dispatch::*;

// Fallback algorithms
pub mod defaults;

// Cross-type numeric algorithms
mod numbers;
pub use numbers::FLOAT_TOLERANCE;

// Character arrays and strings
mod text;

// Process-wide initialization gate
mod bootstrap;
pub use bootstrap::*;

// Startup sanity checks
mod platform;

// Errors
mod error;
pub use error::*;

// Consistency checker and table listing
pub mod debug;

// Arena for cloned array contents
mod mono;
pub use mono::*;

// Collection of boxes
mod boxes;
pub use boxes::*;
