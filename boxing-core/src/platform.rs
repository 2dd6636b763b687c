use core::mem::{align_of, size_of};

use crate::{Placeholder, PlatformError, WORD};

/// Checks the storage assumptions the engine relies on at run time.
///
/// Most of them are also asserted at compile time; this is what bootstrap
/// reports when a target breaks them anyway.
pub(crate) fn probe() -> Result<(), PlatformError> {
    let size = size_of::<Placeholder>();
    if size != 2 * WORD {
        return Err(PlatformError::PlaceholderSize {
            expected: 2 * WORD,
            actual: size,
        });
    }
    let align = align_of::<Placeholder>();
    if align != align_of::<usize>() {
        return Err(PlatformError::PlaceholderAlign {
            expected: align_of::<usize>(),
            actual: align,
        });
    }
    fits::<f64>()?;
    fits::<i64>()?;
    fits::<*const ()>()?;
    #[cfg(target_pointer_width = "64")]
    fits::<u128>()?;
    Ok(())
}

fn fits<T>() -> Result<(), PlatformError> {
    if size_of::<T>() > Placeholder::SIZE {
        return Err(PlatformError::TypeTooLarge {
            type_name: core::any::type_name::<T>(),
            size: size_of::<T>(),
        });
    }
    Ok(())
}
