//! Constructor-injection kernel
//!
//! Modules bind interfaces (trait-object types such as `dyn Key`) to
//! implementations. A [`Kernel`] loads those bindings and builds object
//! graphs on demand: it picks a constructor on the target type, resolves
//! every parameter against the bindings and invokes it.
//!
//! Concrete types are described to the kernel through a [`TypeCatalog`],
//! usually an in-memory [`Catalog`] of [`TypeDescriptor`]s.
//!
//! ```
//! use intersperse::prelude::*;
//! use std::sync::Arc;
//!
//! trait Key {}
//! struct Oem;
//! impl Key for Oem {}
//!
//! struct Keyboard {
//!     keys: Vec<Arc<dyn Key>>,
//! }
//!
//! struct KeyModule;
//!
//! impl Module for KeyModule {
//!     fn name(&self) -> &str {
//!         "keys"
//!     }
//!
//!     fn load(&self, binder: &mut Binder<'_>) {
//!         binder.bind::<dyn Key, Oem>();
//!     }
//! }
//!
//! let catalog = Catalog::new()
//!     .with(
//!         TypeDescriptor::builder::<Oem>()
//!             .default_constructor(|| Oem)
//!             .implements::<dyn Key, _>(|key| key as Arc<dyn Key>)
//!             .build(),
//!     )
//!     .with(
//!         TypeDescriptor::builder::<Keyboard>()
//!             .constructor([Parameter::sequence::<dyn Key>()], |args| {
//!                 Ok(Keyboard { keys: args.take_all::<dyn Key>(0)? })
//!             })
//!             .build(),
//!     );
//!
//! let kernel = Kernel::builder().catalog(catalog).module(KeyModule).build();
//! let keyboard = kernel.build::<Keyboard>()?;
//! assert_eq!(keyboard.keys.len(), 1);
//! # Ok::<(), DiError>(())
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod kernel;
pub mod module;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod selector;

#[cfg(feature = "config")]
pub mod config;

pub use catalog::Catalog;
pub use descriptor::{
    Arguments, ConstructorDescriptor, Instance, Parameter, TypeDescriptor, TypeDescriptorBuilder,
    TypeKey,
};
pub use error::{DiError, DiResult};
pub use kernel::{Kernel, KernelBuilder};
pub use module::{Binder, Binding, Module, ModuleBindings};
pub use provider::TypeCatalog;
pub use registry::BindingRegistry;
pub use resolver::{LeafResolver, Resolution, Unresolved};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::{
        Arguments, Binder, Catalog, DiError, DiResult, Kernel, KernelBuilder, Module, Parameter,
        TypeCatalog, TypeDescriptor, TypeKey,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{ConfigBuilder, KernelConfig};
}
