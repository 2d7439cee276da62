//! Binding registry populated from modules

use crate::descriptor::TypeKey;
use crate::module::{Binder, Module, ModuleBindings};
use crate::provider::TypeCatalog;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Interfaces registered as injectable and implementations eligible for
/// multi-resolution.
///
/// Implementation entries are not de-duplicated: two modules binding the same
/// implementation both contribute an entry.
#[derive(Debug, Clone, Default)]
pub struct BindingRegistry {
    interfaces: FxHashSet<TypeKey>,
    implementations: Vec<TypeKey>,
}

impl BindingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every module once, in order, and merge what it binds
    pub fn load<M: Module>(catalog: &dyn TypeCatalog, modules: &[M]) -> Self {
        let mut registry = Self::new();
        for module in modules {
            let mut binder = Binder::new(catalog);
            module.load(&mut binder);
            let bindings = binder.finish();
            debug!(
                "Loaded module '{}': {} interfaces, {} implementations",
                module.name(),
                bindings.interfaces.len(),
                bindings.implementations.len()
            );
            registry.merge(bindings);
        }
        registry
    }

    /// Union a module's bindings into the registry
    pub fn merge(&mut self, bindings: ModuleBindings) {
        self.interfaces.extend(bindings.interfaces);
        self.implementations.extend(bindings.implementations);
    }

    pub fn is_registered(&self, interface: TypeKey) -> bool {
        self.interfaces.contains(&interface)
    }

    pub fn has_implementation(&self, implementation: TypeKey) -> bool {
        self.implementations.contains(&implementation)
    }

    /// Registered interfaces, in no particular order
    pub fn interfaces(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.interfaces.iter().copied()
    }

    /// Registered implementations in load order, duplicates included
    pub fn implementations(&self) -> &[TypeKey] {
        &self.implementations
    }

    /// Register an interface; returns false if it already was
    pub(crate) fn add(&mut self, interface: TypeKey) -> bool {
        self.interfaces.insert(interface)
    }

    /// Unregister an interface; returns false if it was not registered
    pub(crate) fn remove(&mut self, interface: TypeKey) -> bool {
        self.interfaces.remove(&interface)
    }
}
