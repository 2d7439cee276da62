//! Constructor parameter resolution
//!
//! Parameters are matched in declared order. Interface parameters go through
//! single-resolve, sequence parameters through multi-resolve; concrete
//! parameters are never injectable. The first parameter that cannot be
//! matched ends resolution for the whole constructor.

use crate::descriptor::{Argument, Arguments, Instance, Parameter, TypeKey};
use crate::error::DiResult;
use std::fmt;
use tracing::trace;

/// Resolution of leaf values, implemented by the kernel.
///
/// Neither method enforces the registration guard.
pub trait LeafResolver {
    /// One `Arc<dyn I>` value for `interface`, or `None` if nothing can be injected
    fn resolve_single(&self, interface: TypeKey) -> DiResult<Option<Instance>>;

    /// Every registered implementation of `interface` as `Arc<dyn I>` values
    fn resolve_sequence(&self, interface: TypeKey) -> DiResult<Vec<Instance>>;
}

/// Why a parameter could not be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// Multi-resolve produced no implementations
    EmptySequence(TypeKey),
    /// Concrete parameters are not injectable
    ConcreteParameter(TypeKey),
    /// Single-resolve produced no value
    NoImplementation(TypeKey),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::EmptySequence(key) => write!(f, "no implementations of {}", key),
            Unresolved::ConcreteParameter(key) => write!(f, "concrete parameter {}", key),
            Unresolved::NoImplementation(key) => write!(f, "no implementation of {}", key),
        }
    }
}

/// Outcome of resolving one constructor's parameter list
#[derive(Debug)]
pub enum Resolution {
    /// One argument per parameter, in order
    Complete(Arguments),
    /// Resolution stopped at `parameter`; `resolved` arguments were produced before it
    Incomplete {
        resolved: usize,
        parameter: usize,
        reason: Unresolved,
    },
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        matches!(self, Resolution::Complete(_))
    }

    /// Number of arguments produced
    pub fn resolved_count(&self) -> usize {
        match self {
            Resolution::Complete(arguments) => arguments.len(),
            Resolution::Incomplete { resolved, .. } => *resolved,
        }
    }
}

/// Resolve `parameters` in order against `resolver`
pub fn resolve_parameters<R>(parameters: &[Parameter], resolver: &R) -> DiResult<Resolution>
where
    R: LeafResolver + ?Sized,
{
    let mut arguments = Arguments::new();

    for (index, parameter) in parameters.iter().enumerate() {
        let outcome = match *parameter {
            Parameter::Sequence(element) => {
                let values = resolver.resolve_sequence(element)?;
                if values.is_empty() {
                    Err(Unresolved::EmptySequence(element))
                } else {
                    Ok(Argument::Sequence(values))
                }
            }
            Parameter::Concrete(ty) => Err(Unresolved::ConcreteParameter(ty)),
            Parameter::Interface(interface) => resolver
                .resolve_single(interface)?
                .map(Argument::Single)
                .ok_or(Unresolved::NoImplementation(interface)),
        };

        match outcome {
            Ok(argument) => arguments.push(argument),
            Err(reason) => {
                trace!("Parameter {} ({}) unresolved: {}", index, parameter, reason);
                return Ok(Resolution::Incomplete {
                    resolved: arguments.len(),
                    parameter: index,
                    reason,
                });
            }
        }
    }

    Ok(Resolution::Complete(arguments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiError;
    use rustc_hash::FxHashMap;
    use std::cell::RefCell;
    use std::sync::Arc;

    trait Light {
        fn lumens(&self) -> u32;
    }

    struct Bulb(u32);

    impl Light for Bulb {
        fn lumens(&self) -> u32 {
            self.0
        }
    }

    trait Switch {}
    struct Dimmer;

    /// Canned answers per interface, recording the call sequence
    #[derive(Default)]
    struct FakeResolver {
        singles: FxHashMap<TypeKey, u32>,
        sequences: FxHashMap<TypeKey, Vec<u32>>,
        failing: Option<TypeKey>,
        calls: RefCell<Vec<String>>,
    }

    impl LeafResolver for FakeResolver {
        fn resolve_single(&self, interface: TypeKey) -> DiResult<Option<Instance>> {
            self.calls.borrow_mut().push(format!("single {}", interface.short_name()));
            if self.failing == Some(interface) {
                return Err(DiError::ConstructorFailed {
                    target: interface.to_string(),
                    reason: "boom".into(),
                });
            }
            Ok(self
                .singles
                .get(&interface)
                .map(|&lumens| Box::new(Arc::new(Bulb(lumens)) as Arc<dyn Light>) as Instance))
        }

        fn resolve_sequence(&self, interface: TypeKey) -> DiResult<Vec<Instance>> {
            self.calls.borrow_mut().push(format!("sequence {}", interface.short_name()));
            Ok(self
                .sequences
                .get(&interface)
                .map(|values| {
                    values
                        .iter()
                        .map(|&lumens| {
                            Box::new(Arc::new(Bulb(lumens)) as Arc<dyn Light>) as Instance
                        })
                        .collect()
                })
                .unwrap_or_default())
        }
    }

    fn light() -> TypeKey {
        TypeKey::of::<dyn Light>()
    }

    #[test]
    fn test_complete_resolution_preserves_order() {
        let mut resolver = FakeResolver::default();
        resolver.singles.insert(light(), 800);
        resolver.sequences.insert(light(), vec![100, 200, 300]);

        let parameters = [Parameter::sequence::<dyn Light>(), Parameter::interface::<dyn Light>()];
        let resolution = resolve_parameters(&parameters, &resolver).unwrap();
        assert_eq!(resolution.resolved_count(), 2);

        let Resolution::Complete(mut arguments) = resolution else {
            panic!("expected complete resolution");
        };
        let lights = arguments.take_all::<dyn Light>(0).unwrap();
        let lumens: Vec<u32> = lights.iter().map(|light| light.lumens()).collect();
        assert_eq!(lumens, vec![100, 200, 300]);
        assert_eq!(arguments.take::<dyn Light>(1).unwrap().lumens(), 800);
    }

    #[test]
    fn test_empty_sequence_stops_resolution() {
        let mut resolver = FakeResolver::default();
        resolver.singles.insert(light(), 800);

        let parameters = [
            Parameter::interface::<dyn Light>(),
            Parameter::sequence::<dyn Light>(),
            Parameter::interface::<dyn Light>(),
        ];
        let resolution = resolve_parameters(&parameters, &resolver).unwrap();

        assert!(!resolution.is_complete());
        assert!(matches!(
            resolution,
            Resolution::Incomplete {
                resolved: 1,
                parameter: 1,
                reason: Unresolved::EmptySequence(_)
            }
        ));
        // Nothing after the failing parameter is attempted
        assert_eq!(resolver.calls.borrow().len(), 2);
    }

    #[test]
    fn test_concrete_parameter_is_not_injectable() {
        let resolver = FakeResolver::default();
        let parameters = [Parameter::concrete::<Dimmer>()];
        let resolution = resolve_parameters(&parameters, &resolver).unwrap();

        assert!(matches!(
            resolution,
            Resolution::Incomplete {
                resolved: 0,
                parameter: 0,
                reason: Unresolved::ConcreteParameter(ty)
            } if ty == TypeKey::of::<Dimmer>()
        ));
        assert!(resolver.calls.borrow().is_empty());
    }

    #[test]
    fn test_missing_interface() {
        let resolver = FakeResolver::default();
        let parameters = [Parameter::interface::<dyn Switch>()];
        let resolution = resolve_parameters(&parameters, &resolver).unwrap();

        assert!(matches!(
            resolution,
            Resolution::Incomplete {
                reason: Unresolved::NoImplementation(_),
                ..
            }
        ));
    }

    #[test]
    fn test_empty_parameter_list_is_complete() {
        let resolver = FakeResolver::default();
        let resolution = resolve_parameters(&[], &resolver).unwrap();
        assert!(resolution.is_complete());
        assert_eq!(resolution.resolved_count(), 0);
    }

    #[test]
    fn test_resolver_errors_propagate() {
        let resolver = FakeResolver {
            failing: Some(light()),
            ..FakeResolver::default()
        };
        let parameters = [Parameter::interface::<dyn Light>()];

        assert!(matches!(
            resolve_parameters(&parameters, &resolver),
            Err(DiError::ConstructorFailed { .. })
        ));
    }
}
