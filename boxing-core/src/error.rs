use core::fmt;

use crate::ConstTypeId;

/// Errors from [`try_bootstrap`](crate::try_bootstrap) and
/// [`try_shutdown`](crate::try_shutdown).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootstrapError {
    /// Bootstrap was already called.
    AlreadyBootstrapped,
    /// Shutdown was called before bootstrap.
    NotBootstrapped,
    /// The engine was shut down and cannot be started again.
    AlreadyShutDown,
    /// The platform probe failed; the engine stays uninitialized.
    Platform(PlatformError),
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::AlreadyBootstrapped => write!(f, "boxing was already bootstrapped"),
            BootstrapError::NotBootstrapped => write!(f, "boxing was never bootstrapped"),
            BootstrapError::AlreadyShutDown => write!(f, "boxing was shut down and cannot be restarted"),
            BootstrapError::Platform(err) => write!(f, "platform check failed: {err}"),
        }
    }
}

impl core::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            BootstrapError::Platform(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PlatformError> for BootstrapError {
    fn from(err: PlatformError) -> Self {
        BootstrapError::Platform(err)
    }
}

/// A storage assumption that does not hold on the running target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformError {
    /// The placeholder is not two machine words.
    PlaceholderSize {
        /// Required size in bytes.
        expected: usize,
        /// Measured size in bytes.
        actual: usize,
    },
    /// The placeholder is not word-aligned.
    PlaceholderAlign {
        /// Required alignment in bytes.
        expected: usize,
        /// Measured alignment in bytes.
        actual: usize,
    },
    /// A built-in value type does not fit into the placeholder.
    TypeTooLarge {
        /// Name of the type.
        type_name: &'static str,
        /// Its size in bytes.
        size: usize,
    },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::PlaceholderSize { expected, actual } => {
                write!(f, "placeholder is {actual} bytes, expected {expected}")
            }
            PlatformError::PlaceholderAlign { expected, actual } => {
                write!(f, "placeholder is aligned to {actual} bytes, expected {expected}")
            }
            PlatformError::TypeTooLarge { type_name, size } => {
                write!(f, "`{type_name}` takes {size} bytes and does not fit into a placeholder")
            }
        }
    }
}

impl core::error::Error for PlatformError {}

/// A checked unboxing that did not match the box's type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnboxError {
    /// The box holds a different type.
    TypeMismatch {
        /// The requested type.
        expected: ConstTypeId,
        /// The type in the box.
        actual: ConstTypeId,
    },
    /// A slice was requested from a box that is not an array.
    NotAnArray {
        /// The type in the box.
        actual: ConstTypeId,
    },
}

impl fmt::Display for UnboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnboxError::TypeMismatch { expected, actual } => {
                write!(f, "cannot unbox `{actual:?}` as `{expected:?}`")
            }
            UnboxError::NotAnArray { actual } => write!(f, "`{actual:?}` is not an array"),
        }
    }
}

impl core::error::Error for UnboxError {}
