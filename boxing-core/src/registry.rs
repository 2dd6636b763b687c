//! Maps type identities to function tables and installs functions into them.
//!
//! Lookups take a read lock; only the first encounter of a new array element
//! type takes the write lock, double-checking before it inserts.

use alloc::boxed::Box;
use alloc::vec::Vec;
use std::sync::OnceLock;

use museair::bfast::HashMap;
use parking_lot::RwLock;

use crate::{Boxable, Boxed, ConstTypeId, Function, FunctionTable, VTable};

/// Every registered table by type identity.
static TABLES: OnceLock<RwLock<HashMap<ConstTypeId, &'static VTable>>> = OnceLock::new();

/// Fallbacks consulted when a table has no function for an operation.
pub(crate) static DEFAULTS: FunctionTable = FunctionTable::new();

fn tables() -> &'static RwLock<HashMap<ConstTypeId, &'static VTable>> {
    TABLES.get_or_init(|| RwLock::new(HashMap::default()))
}

/// Register a statically declared table.
///
/// Built-in tables are registered by bootstrap; tables declared with
/// [`boxable!`](crate::boxable) outside this crate must be registered by
/// their owner before boxes of that type are operated on. Registering the
/// same table twice asserts in debug builds and is ignored otherwise.
pub fn register_vtable(vtable: &'static VTable) {
    let fresh = vtable.mark_registered();
    debug_assert!(fresh, "function table of `{}` registered twice", vtable.type_name());
    if fresh {
        trace!("registering function table of `{}`", vtable.type_name());
        tables().write().insert(vtable.id, vtable);
    }
}

/// The registered table for `id`, if any.
pub fn lookup(id: ConstTypeId) -> Option<&'static VTable> {
    tables().read().get(&id).copied()
}

/// Every registered table, in no particular order.
pub fn registered_vtables() -> Vec<&'static VTable> {
    tables().read().values().copied().collect()
}

/// The table for arrays of `T`.
///
/// Returns the registered table if there is one, and otherwise creates,
/// registers and returns a dynamic table that lives for the rest of the
/// process. Concurrent first encounters agree on a single table.
pub fn array_vtable<T>() -> &'static VTable {
    let id = ConstTypeId::of::<[T]>();

    // Fast path: read lock
    if let Some(vtable) = lookup(id) {
        return vtable;
    }

    debug_assert!(
        crate::bootstrap::registration_open(),
        "array of `{}` boxed before bootstrap",
        core::any::type_name::<T>()
    );

    // Slow path: write lock, another thread may have won the race
    let mut tables = tables().write();
    *tables.entry(id).or_insert_with(|| {
        let vtable: &'static VTable = Box::leak(Box::new(VTable::array_of::<T>().dynamic()));
        vtable.mark_registered();
        debug!("created dynamic function table for `{}`", vtable.type_name());
        vtable
    })
}

/// Install `function` as operation `F` for boxes of type `T`.
///
/// The table must already be registered when boxes of `T` are used.
/// Installing the same operation twice asserts in debug builds and keeps the
/// first function otherwise.
pub fn register<F: Function, T: Boxable>(function: F::Signature) {
    register_in::<F>(T::vtable(), function);
}

/// Install `function` as operation `F` in `vtable`.
pub fn register_in<F: Function>(vtable: &'static VTable, function: F::Signature) {
    let installed = F::slot(&vtable.functions).set(function).is_ok();
    debug_assert!(installed, "{} registered twice for `{}`", F::NAME, vtable.type_name());
    trace!("registered {} for `{}`", F::NAME, vtable.type_name());
}

/// Install the fallback for operation `F`, used by every table without its
/// own function.
pub fn register_default<F: Function>(function: F::Signature) {
    let installed = F::slot(&DEFAULTS).set(function).is_ok();
    debug_assert!(installed, "default {} registered twice", F::NAME);
    trace!("registered default {}", F::NAME);
}

/// The function for operation `F` on `boxed`: the type's own, else the
/// default, else `None`.
///
/// Asserts in debug builds that the box's table was registered. A
/// registered table with no function and no default yields `None`, which
/// the dispatch functions answer with a neutral result.
#[inline]
pub fn resolve<F: Function>(boxed: &Boxed) -> Option<F::Signature> {
    let vtable = boxed.vtable();
    debug_assert!(
        vtable.is_registered(),
        "function table of `{}` used before registration; register it or bootstrap first",
        vtable.type_name()
    );
    F::slot(&vtable.functions)
        .get()
        .or_else(|| F::slot(&DEFAULTS).get())
        .copied()
}

/// Drop every table from the map and mark it unregistered. Dynamic tables
/// stay allocated since boxes may still point at them.
pub(crate) fn clear() {
    let mut tables = tables().write();
    for vtable in tables.values() {
        vtable.mark_unregistered();
    }
    debug!("unregistered {} function tables", tables.len());
    tables.clear();
}
