//! Inspection of the registry, for diagnostics and tests.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::{Boxed, Category, ConstTypeId, Mapping, Provenance, VTable, registered_vtables};

/// A snapshot of one registered table.
#[derive(Clone, Debug)]
pub struct VTableInfo {
    /// Identity of the boxed type.
    pub id: ConstTypeId,
    /// Name of the boxed type.
    pub type_name: &'static str,
    /// Placeholder interpretation.
    pub mapping: Mapping,
    /// Numeric family.
    pub category: Category,
    /// Static or dynamic.
    pub provenance: Provenance,
    /// Whether the table is currently registered.
    pub registered: bool,
    /// Boxes created with the table so far, zero in release builds.
    pub usage: usize,
    /// Operations with a type-specific function.
    pub functions: Vec<&'static str>,
}

impl VTableInfo {
    fn of(vtable: &VTable) -> Self {
        Self {
            id: vtable.id,
            type_name: vtable.type_name(),
            mapping: vtable.mapping,
            category: vtable.category,
            provenance: vtable.provenance,
            registered: vtable.is_registered(),
            usage: vtable.usage_count(),
            functions: vtable
                .functions()
                .slots()
                .filter(|&(_, populated)| populated)
                .map(|(name, _)| name)
                .collect(),
        }
    }
}

impl fmt::Display for VTableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {:?} {:?} uses={} [{}]",
            self.type_name,
            self.mapping,
            self.category,
            self.provenance,
            self.usage,
            self.functions.join(", ")
        )
    }
}

/// Every registered table, sorted by type name.
pub fn vtable_report() -> Vec<VTableInfo> {
    let mut report: Vec<VTableInfo> = registered_vtables().into_iter().map(VTableInfo::of).collect();
    report.sort_by(|a, b| a.type_name.cmp(b.type_name).then_with(|| a.id.cmp(&b.id)));
    report
}

/// [`vtable_report`], one table per line.
pub fn render_report() -> String {
    let mut out = String::new();
    for info in vtable_report() {
        out.push_str(&info.to_string());
        out.push('\n');
    }
    out
}

/// The table behind `boxed`, registered or not.
pub fn type_info(boxed: &Boxed) -> VTableInfo {
    VTableInfo::of(boxed.vtable())
}

/// Operations with a process-wide default installed.
pub fn default_functions() -> Vec<&'static str> {
    crate::registry::DEFAULTS
        .slots()
        .filter(|&(_, populated)| populated)
        .map(|(name, _)| name)
        .collect()
}

/// A violated registry invariant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inconsistency {
    /// A table in the registry is not marked registered.
    NotMarked {
        /// The table's type.
        type_name: &'static str,
    },
    /// A built-in table absent from the registry after bootstrap.
    MissingBuiltin {
        /// The table's type.
        type_name: &'static str,
    },
    /// An operation with neither a type function nor a default.
    MissingFunction {
        /// The table's type.
        type_name: &'static str,
        /// The operation.
        operation: &'static str,
    },
    /// An array table without element type, or a scalar table with one.
    ElementMismatch {
        /// The table's type.
        type_name: &'static str,
    },
    /// A scalar table using more bytes than the placeholder has.
    Oversized {
        /// The table's type.
        type_name: &'static str,
        /// Its usage length.
        usage_length: usize,
    },
}

impl fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inconsistency::NotMarked { type_name } => {
                write!(f, "`{type_name}` is in the registry but not marked registered")
            }
            Inconsistency::MissingBuiltin { type_name } => {
                write!(f, "built-in `{type_name}` is not registered")
            }
            Inconsistency::MissingFunction {
                type_name,
                operation,
            } => write!(f, "`{type_name}` cannot resolve {operation}"),
            Inconsistency::ElementMismatch { type_name } => {
                write!(f, "`{type_name}` disagrees with its mapping about having elements")
            }
            Inconsistency::Oversized {
                type_name,
                usage_length,
            } => write!(f, "`{type_name}` claims {usage_length} placeholder bytes"),
        }
    }
}

/// Check every registered table, returning what is wrong with them.
pub fn check_consistency() -> Vec<Inconsistency> {
    let tables = registered_vtables();
    let mut found = Vec::new();
    for vtable in &tables {
        let type_name = vtable.type_name();
        if !vtable.is_registered() {
            found.push(Inconsistency::NotMarked { type_name });
        }
        for ((operation, own), (_, default)) in
            vtable.functions().slots().zip(crate::registry::DEFAULTS.slots())
        {
            if !own && !default {
                found.push(Inconsistency::MissingFunction {
                    type_name,
                    operation,
                });
            }
        }
        if (vtable.mapping == Mapping::Array) != vtable.element_id.is_some() {
            found.push(Inconsistency::ElementMismatch { type_name });
        }
        if vtable.usage_length > crate::Placeholder::SIZE {
            found.push(Inconsistency::Oversized {
                type_name,
                usage_length: vtable.usage_length,
            });
        }
    }
    if crate::is_bootstrapped() {
        for vtable in crate::builtins::static_vtables() {
            let registered = crate::lookup(vtable.id).is_some_and(|entry| core::ptr::eq(entry, vtable));
            if !registered {
                found.push(Inconsistency::MissingBuiltin {
                    type_name: vtable.type_name(),
                });
            }
        }
    }
    if !found.is_empty() {
        debug!("registry has {} inconsistencies", found.len());
    }
    found
}
