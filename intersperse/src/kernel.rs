//! The injection kernel

use std::any::{type_name, Any};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::descriptor::{Instance, TypeDescriptor, TypeKey};
use crate::error::{DiError, DiResult};
use crate::module::Module;
use crate::provider::TypeCatalog;
use crate::registry::BindingRegistry;
use crate::resolver::{resolve_parameters, LeafResolver};
use crate::selector::select_constructor;

/// Builds object graphs from module bindings and a type catalog.
///
/// Nothing is cached: every call re-runs resolution and constructs fresh
/// instances at every level.
pub struct Kernel {
    catalog: Arc<dyn TypeCatalog>,
    registry: BindingRegistry,
    modules: Vec<String>,
}

impl Kernel {
    /// Create a kernel, loading `modules` in order
    pub fn new<M: Module>(catalog: Arc<dyn TypeCatalog>, modules: &[M]) -> Self {
        let registry = BindingRegistry::load(catalog.as_ref(), modules);
        Self {
            catalog,
            registry,
            modules: modules.iter().map(|module| module.name().to_string()).collect(),
        }
    }

    /// Create a new kernel builder
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// Construct `T` through its selected constructor, resolving the whole
    /// dependency graph below it
    pub fn build<T: Any>(&self) -> DiResult<T> {
        self.build_key(TypeKey::of::<T>())?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| DiError::TypeMismatch {
                expected: type_name::<T>().to_string(),
            })
    }

    /// Resolve one implementation of `I`, built through its parameterless
    /// constructor
    pub fn resolve<I: ?Sized + 'static>(&self, require_registered: bool) -> DiResult<Arc<I>> {
        let instance = self.resolve_key(TypeKey::of::<I>(), require_registered)?;
        downcast_interface::<I>(instance)
    }

    /// Resolve every registered implementation of `I` that has a
    /// parameterless constructor, in catalog order
    pub fn resolve_all<I: ?Sized + 'static>(
        &self,
        require_registered: bool,
    ) -> DiResult<Vec<Arc<I>>> {
        self.resolve_all_key(TypeKey::of::<I>(), require_registered)?
            .into_iter()
            .map(downcast_interface::<I>)
            .collect()
    }

    /// Register `I` as injectable if `C` satisfies it; otherwise do nothing
    pub fn add<I: ?Sized + 'static, C: 'static>(&mut self) -> bool {
        let interface = TypeKey::of::<I>();
        let implementation = TypeKey::of::<C>();
        if !self.catalog.satisfies(interface, implementation) {
            debug!("Not adding {}: {} does not satisfy it", interface, implementation);
            return false;
        }
        self.registry.add(interface)
    }

    /// Unregister `I`
    pub fn remove<I: ?Sized + 'static>(&mut self) -> bool {
        self.registry.remove(TypeKey::of::<I>())
    }

    pub fn is_registered<I: ?Sized + 'static>(&self) -> bool {
        self.registry.is_registered(TypeKey::of::<I>())
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &dyn TypeCatalog {
        self.catalog.as_ref()
    }

    /// Names of the loaded modules, in load order
    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Type-erased [`Kernel::build`]
    pub fn build_key(&self, target: TypeKey) -> DiResult<Instance> {
        let descriptor = self.describe(target)?;
        let selection = select_constructor(target, descriptor.constructors(), |ctor| {
            resolve_parameters(ctor.parameters(), self)
        })?;
        descriptor.constructors()[selection.index].invoke(selection.arguments)
    }

    /// Type-erased [`Kernel::resolve`]; the instance holds an `Arc<dyn I>`
    pub fn resolve_key(&self, interface: TypeKey, require_registered: bool) -> DiResult<Instance> {
        self.guard(interface, require_registered)?;

        let implementation = self
            .catalog
            .find_implementations(interface)
            .into_iter()
            .next()
            .ok_or_else(|| DiError::NoImplementationFound {
                interface: interface.to_string(),
            })?;

        let descriptor = self.describe(implementation)?;
        let ctor = descriptor.parameterless_constructor().ok_or_else(|| {
            DiError::NoParameterlessConstructor {
                implementation: implementation.to_string(),
            }
        })?;

        trace!("Resolving {} as {}", interface, implementation);
        let instance = ctor.invoke(Default::default())?;
        upcast(descriptor, interface, instance)
    }

    /// Type-erased [`Kernel::resolve_all`]; each instance holds an `Arc<dyn I>`
    pub fn resolve_all_key(
        &self,
        interface: TypeKey,
        require_registered: bool,
    ) -> DiResult<Vec<Instance>> {
        self.guard(interface, require_registered)?;

        let mut instances = Vec::new();
        for implementation in self.catalog.find_implementations(interface) {
            if !self.registry.has_implementation(implementation) {
                continue;
            }

            let descriptor = self.describe(implementation)?;
            let Some(ctor) = descriptor.parameterless_constructor() else {
                debug!("Skipping {}: no parameterless constructor", implementation);
                continue;
            };

            let instance = ctor.invoke(Default::default())?;
            instances.push(upcast(descriptor, interface, instance)?);
        }

        trace!("Resolved {} implementations of {}", instances.len(), interface);
        Ok(instances)
    }

    fn guard(&self, interface: TypeKey, require_registered: bool) -> DiResult<()> {
        if require_registered && !self.registry.is_registered(interface) {
            return Err(DiError::NotRegistered {
                interface: interface.to_string(),
            });
        }
        Ok(())
    }

    fn describe(&self, ty: TypeKey) -> DiResult<&TypeDescriptor> {
        self.catalog
            .describe(ty)
            .ok_or_else(|| DiError::TypeNotCataloged {
                type_name: ty.to_string(),
            })
    }
}

impl LeafResolver for Kernel {
    fn resolve_single(&self, interface: TypeKey) -> DiResult<Option<Instance>> {
        match self.resolve_key(interface, false) {
            Ok(instance) => Ok(Some(instance)),
            Err(err) if err.is_absence() => {
                trace!("Nothing to inject for {}: {}", interface, err);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_sequence(&self, interface: TypeKey) -> DiResult<Vec<Instance>> {
        self.resolve_all_key(interface, false)
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("registry", &self.registry)
            .field("modules", &self.modules)
            .finish()
    }
}

fn upcast(descriptor: &TypeDescriptor, interface: TypeKey, instance: Instance) -> DiResult<Instance> {
    descriptor
        .upcast(interface, instance)
        .ok_or_else(|| DiError::TypeMismatch {
            expected: interface.to_string(),
        })
}

fn downcast_interface<I: ?Sized + 'static>(instance: Instance) -> DiResult<Arc<I>> {
    instance
        .downcast::<Arc<I>>()
        .map(|value| *value)
        .map_err(|_| DiError::TypeMismatch {
            expected: type_name::<I>().to_string(),
        })
}

/// Builder for [`Kernel`]
#[derive(Default)]
pub struct KernelBuilder {
    catalog: Option<Arc<dyn TypeCatalog>>,
    modules: Vec<Box<dyn Module>>,
}

impl KernelBuilder {
    /// Create a new kernel builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `catalog` for type lookups; defaults to an empty [`Catalog`]
    pub fn catalog(mut self, catalog: impl TypeCatalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    /// Share an existing catalog
    pub fn shared_catalog(mut self, catalog: Arc<dyn TypeCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Append a module; modules load in the order they were added
    pub fn module(mut self, module: impl Module + 'static) -> Self {
        self.modules.push(Box::new(module));
        self
    }

    pub fn modules<I, M>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Module + 'static,
    {
        self.modules
            .extend(modules.into_iter().map(|module| Box::new(module) as Box<dyn Module>));
        self
    }

    /// Append the modules of a configuration
    #[cfg(feature = "config")]
    pub fn config(self, config: crate::config::KernelConfig) -> Self {
        self.modules(config.modules)
    }

    pub fn build(self) -> Kernel {
        let catalog = self
            .catalog
            .unwrap_or_else(|| Arc::new(Catalog::new()) as Arc<dyn TypeCatalog>);
        Kernel::new(catalog, &self.modules)
    }
}
