//! Configuration modules and the binder they declare bindings through

use crate::descriptor::TypeKey;
use crate::provider::TypeCatalog;
use tracing::debug;

/// Association of an interface to one implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub interface: TypeKey,
    pub implementation: TypeKey,
}

/// A unit of configuration contributing bindings to a kernel.
///
/// `load` runs exactly once per kernel construction.
pub trait Module {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Declare bindings
    fn load(&self, binder: &mut Binder<'_>);
}

impl<M: Module + ?Sized> Module for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn load(&self, binder: &mut Binder<'_>) {
        (**self).load(binder)
    }
}

/// Collects the bindings of one module.
///
/// A binding whose implementation does not satisfy its interface is dropped
/// without an error.
pub struct Binder<'c> {
    catalog: &'c dyn TypeCatalog,
    bindings: ModuleBindings,
}

impl<'c> Binder<'c> {
    pub fn new(catalog: &'c dyn TypeCatalog) -> Self {
        Self {
            catalog,
            bindings: ModuleBindings::default(),
        }
    }

    /// Bind interface `I` to implementation `C`
    pub fn bind<I: ?Sized + 'static, C: 'static>(&mut self) -> &mut Self {
        self.bind_keys(TypeKey::of::<I>(), TypeKey::of::<C>());
        self
    }

    /// Bind by type keys; returns whether the binding was recorded
    pub fn bind_keys(&mut self, interface: TypeKey, implementation: TypeKey) -> bool {
        if !self.catalog.satisfies(interface, implementation) {
            debug!(
                "Dropping binding {} -> {}: contract not satisfied",
                interface, implementation
            );
            return false;
        }

        self.bindings.record(Binding {
            interface,
            implementation,
        });
        true
    }

    /// Bind by type names, looked up in the catalog; unknown names are dropped
    pub fn bind_named(&mut self, interface: &str, implementation: &str) -> bool {
        match (self.catalog.lookup(interface), self.catalog.lookup(implementation)) {
            (Some(interface), Some(implementation)) => self.bind_keys(interface, implementation),
            _ => {
                debug!(
                    "Dropping binding {} -> {}: unknown type name",
                    interface, implementation
                );
                false
            }
        }
    }

    pub fn bindings(&self) -> &ModuleBindings {
        &self.bindings
    }

    pub fn finish(self) -> ModuleBindings {
        self.bindings
    }
}

/// Bindings declared by one module
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleBindings {
    /// Bound interfaces, without duplicates
    pub interfaces: Vec<TypeKey>,
    /// Bound implementations, in declaration order
    pub implementations: Vec<TypeKey>,
}

impl ModuleBindings {
    fn record(&mut self, binding: Binding) {
        if !self.interfaces.contains(&binding.interface) {
            self.interfaces.push(binding.interface);
        }
        self.implementations.push(binding.implementation);
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty() && self.implementations.is_empty()
    }
}
