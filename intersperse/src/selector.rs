//! Constructor selection
//!
//! A single constructor marked as injection point is always used and must
//! resolve completely. Without a marker every constructor is evaluated and
//! the fully resolvable one with the most arguments wins; on a tie the first
//! declared constructor is kept.

use crate::descriptor::{Arguments, ConstructorDescriptor, TypeKey};
use crate::error::{DiError, DiResult};
use crate::resolver::Resolution;
use tracing::{debug, trace};

/// The constructor chosen for a build target, with its arguments
#[derive(Debug)]
pub struct Selection {
    /// Position of the constructor in declaration order
    pub index: usize,
    pub arguments: Arguments,
}

/// Choose one of `target`'s constructors.
///
/// `resolve` runs parameter resolution for one constructor; its errors
/// propagate unchanged.
pub fn select_constructor<F>(
    target: TypeKey,
    constructors: &[ConstructorDescriptor],
    mut resolve: F,
) -> DiResult<Selection>
where
    F: FnMut(&ConstructorDescriptor) -> DiResult<Resolution>,
{
    let marked: Vec<usize> = constructors
        .iter()
        .enumerate()
        .filter(|(_, ctor)| ctor.is_injection_point())
        .map(|(index, _)| index)
        .collect();
    debug!("{}: {} constructors marked as injection point", target, marked.len());

    match marked.as_slice() {
        [] => select_fallback(target, constructors, resolve),
        [index] => {
            let ctor = &constructors[*index];
            match resolve(ctor)? {
                Resolution::Complete(arguments) => Ok(Selection {
                    index: *index,
                    arguments,
                }),
                Resolution::Incomplete { parameter, .. } => {
                    Err(DiError::UnresolvableMarkedConstructor {
                        target: target.to_string(),
                        parameter,
                        parameter_type: ctor.parameters()[parameter].to_string(),
                    })
                }
            }
        }
        _ => Err(DiError::ConstructorAmbiguity {
            target: target.to_string(),
            count: marked.len(),
        }),
    }
}

fn select_fallback<F>(
    target: TypeKey,
    constructors: &[ConstructorDescriptor],
    mut resolve: F,
) -> DiResult<Selection>
where
    F: FnMut(&ConstructorDescriptor) -> DiResult<Resolution>,
{
    let mut best: Option<Selection> = None;

    for (index, ctor) in constructors.iter().enumerate() {
        trace!("Evaluating constructor {:?} of {}", ctor, target);
        let arguments = match resolve(ctor)? {
            Resolution::Complete(arguments) => arguments,
            Resolution::Incomplete { .. } => continue,
        };

        if best
            .as_ref()
            .map_or(true, |current| arguments.len() > current.arguments.len())
        {
            best = Some(Selection { index, arguments });
        }
    }

    match best {
        Some(selection) => {
            debug!(
                "Best constructor for {}: {:?}",
                target, constructors[selection.index]
            );
            Ok(selection)
        }
        None => Err(DiError::NoInjectableConstructor {
            target: target.to_string(),
        }),
    }
}
