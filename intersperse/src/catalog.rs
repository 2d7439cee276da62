//! In-memory type catalog

use crate::descriptor::{TypeDescriptor, TypeKey};
use crate::provider::TypeCatalog;
use rustc_hash::FxHashMap;
use tracing::trace;

/// Catalog of explicitly registered concrete types.
///
/// Types are enumerated in registration order.
#[derive(Debug, Default)]
pub struct Catalog {
    types: Vec<TypeDescriptor>,
    index: FxHashMap<TypeKey, usize>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type; a type registered twice keeps its first position
    /// but takes the newer descriptor
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        let key = descriptor.key();
        match self.index.get(&key) {
            Some(&position) => {
                trace!("Replacing catalog entry for {}", key);
                self.types[position] = descriptor;
            }
            None => {
                trace!("Cataloged {}", key);
                self.index.insert(key, self.types.len());
                self.types.push(descriptor);
            }
        }
        self
    }

    /// Builder-style [`Catalog::register`]
    pub fn with(mut self, descriptor: TypeDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl TypeCatalog for Catalog {
    fn find_implementations(&self, interface: TypeKey) -> Vec<TypeKey> {
        self.types
            .iter()
            .filter(|descriptor| descriptor.implements(interface))
            .map(TypeDescriptor::key)
            .collect()
    }

    fn describe(&self, ty: TypeKey) -> Option<&TypeDescriptor> {
        self.index.get(&ty).map(|&position| &self.types[position])
    }

    fn types(&self) -> Box<dyn Iterator<Item = TypeKey> + '_> {
        Box::new(self.types.iter().map(TypeDescriptor::key))
    }
}

impl FromIterator<TypeDescriptor> for Catalog {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for descriptor in iter {
            catalog.register(descriptor);
        }
        catalog
    }
}
