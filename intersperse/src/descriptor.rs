//! Type, constructor and parameter descriptors
//!
//! Target types are described explicitly instead of being discovered by
//! reflection: a [`TypeDescriptor`] lists a concrete type's constructors and
//! the interfaces it satisfies. Interfaces are trait-object types such as
//! `dyn Key`; a resolved interface value travels as `Arc<dyn Key>`.

use crate::error::{DiError, DiResult};
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-erased resolved value
pub type Instance = Box<dyn Any>;

type Invoker = Box<dyn Fn(&mut Arguments) -> DiResult<Instance> + Send + Sync>;
type Upcast = Box<dyn Fn(Instance) -> Option<Instance> + Send + Sync>;

/// Identity of a Rust type, interface or concrete
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key of `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the name, without `dyn`, generics or extra bounds.
    ///
    /// `dyn app::input::Key + Send` becomes `Key`.
    pub fn short_name(&self) -> &'static str {
        let name = self.name.strip_prefix("dyn ").unwrap_or(self.name);
        let name = name.split('<').next().unwrap_or(name);
        let name = name.split(" + ").next().unwrap_or(name);
        name.rsplit("::").next().unwrap_or(name)
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Declared type of one constructor parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// A single interface value, filled by single-resolve
    Interface(TypeKey),
    /// An array of an element interface, filled by multi-resolve
    Sequence(TypeKey),
    /// A concrete type; never injectable
    Concrete(TypeKey),
}

impl Parameter {
    pub fn interface<I: ?Sized + 'static>() -> Self {
        Parameter::Interface(TypeKey::of::<I>())
    }

    pub fn sequence<I: ?Sized + 'static>() -> Self {
        Parameter::Sequence(TypeKey::of::<I>())
    }

    pub fn concrete<T: 'static>() -> Self {
        Parameter::Concrete(TypeKey::of::<T>())
    }

    /// The interface (or element interface, or concrete type) named
    pub fn type_key(&self) -> TypeKey {
        match self {
            Parameter::Interface(key) | Parameter::Sequence(key) | Parameter::Concrete(key) => *key,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Sequence(key) => write!(f, "[{}]", key),
            Parameter::Interface(key) | Parameter::Concrete(key) => write!(f, "{}", key),
        }
    }
}

pub(crate) enum Argument {
    Single(Instance),
    Sequence(Vec<Instance>),
}

/// Resolved arguments for one constructor call, in parameter order.
///
/// Each argument can be taken once.
#[derive(Default)]
pub struct Arguments {
    values: Vec<Option<Argument>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, argument: Argument) {
        self.values.push(Some(argument));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the single interface value at `index`
    pub fn take<I: ?Sized + 'static>(&mut self, index: usize) -> DiResult<Arc<I>> {
        let mismatch = || DiError::ArgumentMismatch {
            index,
            expected: type_name::<I>().to_string(),
        };

        match self.values.get_mut(index).and_then(Option::take) {
            Some(Argument::Single(instance)) => instance
                .downcast::<Arc<I>>()
                .map(|value| *value)
                .map_err(|_| mismatch()),
            _ => Err(mismatch()),
        }
    }

    /// Take the sequence of interface values at `index`
    pub fn take_all<I: ?Sized + 'static>(&mut self, index: usize) -> DiResult<Vec<Arc<I>>> {
        let mismatch = || DiError::ArgumentMismatch {
            index,
            expected: format!("[{}]", type_name::<I>()),
        };

        match self.values.get_mut(index).and_then(Option::take) {
            Some(Argument::Sequence(items)) => items
                .into_iter()
                .map(|item| {
                    item.downcast::<Arc<I>>()
                        .map(|value| *value)
                        .map_err(|_| mismatch())
                })
                .collect(),
            _ => Err(mismatch()),
        }
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arguments")
            .field("len", &self.values.len())
            .finish()
    }
}

/// One public constructor of a concrete type
pub struct ConstructorDescriptor {
    parameters: Vec<Parameter>,
    injection_point: bool,
    invoke: Invoker,
}

impl ConstructorDescriptor {
    /// Describe a constructor producing `T` from resolved arguments
    pub fn new<T, F>(parameters: impl IntoIterator<Item = Parameter>, invoke: F) -> Self
    where
        T: Any,
        F: Fn(&mut Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            parameters: parameters.into_iter().collect(),
            injection_point: false,
            invoke: Box::new(move |args: &mut Arguments| {
                invoke(args).map(|value| Box::new(value) as Instance)
            }),
        }
    }

    /// Mark this constructor as the designated injection point
    pub fn mark_injection_point(mut self) -> Self {
        self.injection_point = true;
        self
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_injection_point(&self) -> bool {
        self.injection_point
    }

    pub fn is_parameterless(&self) -> bool {
        self.parameters.is_empty()
    }

    pub(crate) fn invoke(&self, mut arguments: Arguments) -> DiResult<Instance> {
        (self.invoke)(&mut arguments)
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parameters: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
        write!(f, "({})", parameters.join(", "))?;
        if self.injection_point {
            f.write_str(" [inject]")?;
        }
        Ok(())
    }
}

struct InterfaceImpl {
    interface: TypeKey,
    upcast: Upcast,
}

/// Constructors and satisfied interfaces of one concrete type
pub struct TypeDescriptor {
    key: TypeKey,
    constructors: Vec<ConstructorDescriptor>,
    interfaces: Vec<InterfaceImpl>,
}

impl TypeDescriptor {
    /// Start describing the concrete type `T`
    pub fn builder<T: Any>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            descriptor: TypeDescriptor {
                key: TypeKey::of::<T>(),
                constructors: Vec::new(),
                interfaces: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Constructors in declaration order
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }

    pub fn parameterless_constructor(&self) -> Option<&ConstructorDescriptor> {
        self.constructors.iter().find(|ctor| ctor.is_parameterless())
    }

    /// Interfaces this type satisfies
    pub fn interfaces(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.interfaces.iter().map(|entry| entry.interface)
    }

    pub fn implements(&self, interface: TypeKey) -> bool {
        self.interfaces.iter().any(|entry| entry.interface == interface)
    }

    /// Turn an instance of this type into the `Arc<dyn I>` value for `interface`
    pub(crate) fn upcast(&self, interface: TypeKey, instance: Instance) -> Option<Instance> {
        self.interfaces
            .iter()
            .find(|entry| entry.interface == interface)
            .and_then(|entry| (entry.upcast)(instance))
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("key", &self.key)
            .field("constructors", &self.constructors)
            .field("interfaces", &self.interfaces().collect::<Vec<_>>())
            .finish()
    }
}

/// Fluent builder for [`TypeDescriptor`]
pub struct TypeDescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeDescriptorBuilder<T> {
    /// Add an unmarked constructor
    pub fn constructor<F>(mut self, parameters: impl IntoIterator<Item = Parameter>, invoke: F) -> Self
    where
        F: Fn(&mut Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        self.descriptor
            .constructors
            .push(ConstructorDescriptor::new(parameters, invoke));
        self
    }

    /// Add a constructor marked as the designated injection point
    pub fn injection_point<F>(
        mut self,
        parameters: impl IntoIterator<Item = Parameter>,
        invoke: F,
    ) -> Self
    where
        F: Fn(&mut Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        self.descriptor
            .constructors
            .push(ConstructorDescriptor::new(parameters, invoke).mark_injection_point());
        self
    }

    /// Add a zero-argument constructor
    pub fn default_constructor<F>(self, create: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.constructor(Vec::<Parameter>::new(), move |_| Ok(create()))
    }

    /// Declare that `T` satisfies interface `I`
    pub fn implements<I, F>(mut self, upcast: F) -> Self
    where
        I: ?Sized + 'static,
        F: Fn(Arc<T>) -> Arc<I> + Send + Sync + 'static,
    {
        let interface = TypeKey::of::<I>();
        self.descriptor.interfaces.retain(|entry| entry.interface != interface);
        self.descriptor.interfaces.push(InterfaceImpl {
            interface,
            upcast: Box::new(move |instance: Instance| {
                let concrete = instance.downcast::<T>().ok()?;
                Some(Box::new(upcast(Arc::new(*concrete))) as Instance)
            }),
        });
        self
    }

    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}
