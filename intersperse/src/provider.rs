//! Type catalog interface queried by the kernel

use crate::descriptor::{TypeDescriptor, TypeKey};

/// Lookup service over every concrete type known to the process.
///
/// The kernel only reads from a catalog. Implementations must enumerate
/// types in a stable order: it decides which implementation single-resolve
/// picks and the order of multi-resolve results.
pub trait TypeCatalog: Send + Sync {
    /// Every instantiable concrete type satisfying `interface`, in catalog order
    fn find_implementations(&self, interface: TypeKey) -> Vec<TypeKey>;

    /// Constructors and interfaces of a concrete type
    fn describe(&self, ty: TypeKey) -> Option<&TypeDescriptor>;

    /// Concrete types in catalog order
    fn types(&self) -> Box<dyn Iterator<Item = TypeKey> + '_>;

    /// Whether `implementation` satisfies the capability contract of `interface`
    fn satisfies(&self, interface: TypeKey, implementation: TypeKey) -> bool {
        self.describe(implementation)
            .map_or(false, |descriptor| descriptor.implements(interface))
    }

    /// Find a type (concrete or interface) by full or short name.
    ///
    /// A full-name match wins over a short-name match; among short-name
    /// matches the first in catalog order wins.
    fn lookup(&self, name: &str) -> Option<TypeKey> {
        let name = name.trim();
        let known: Vec<TypeKey> = self
            .types()
            .flat_map(|ty| {
                let interfaces: Vec<TypeKey> = self
                    .describe(ty)
                    .map(|descriptor| descriptor.interfaces().collect())
                    .unwrap_or_default();
                std::iter::once(ty).chain(interfaces)
            })
            .collect();

        known
            .iter()
            .find(|key| key.name() == name)
            .or_else(|| known.iter().find(|key| key.short_name() == name))
            .copied()
    }
}
