//! Error types for the injection kernel

use thiserror::Error;

/// Result type alias for kernel operations
pub type DiResult<T> = Result<T, DiError>;

/// Errors raised while resolving or building object graphs.
///
/// Every variant is raised at the point of failure and reaches the caller of
/// `build`, `resolve` or `resolve_all` unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// Interface queried with the registration guard on, but never bound
    #[error("Type is not registered for injection: {interface}")]
    NotRegistered { interface: String },

    /// The type catalog knows no usable implementation of the interface
    #[error("No implementation found for: {interface}")]
    NoImplementationFound { interface: String },

    /// Leaf resolution target without a zero-argument constructor
    #[error("A constructor that takes 0 arguments was not found for: {implementation}")]
    NoParameterlessConstructor { implementation: String },

    /// More than one constructor is marked as the injection point
    #[error("'{target}' has {count} constructors marked as injection points")]
    ConstructorAmbiguity { target: String, count: usize },

    /// The marked constructor could not have all of its parameters resolved
    #[error(
        "'{target}' has a constructor marked as injection point, but parameter {parameter} ({parameter_type}) could not be resolved"
    )]
    UnresolvableMarkedConstructor {
        target: String,
        parameter: usize,
        parameter_type: String,
    },

    /// No constructor could be fully resolved
    #[error("'{target}' has no constructor whose parameters can all be injected")]
    NoInjectableConstructor { target: String },

    /// A type was requested that the catalog does not describe
    #[error("Type is not known to the catalog: {type_name}")]
    TypeNotCataloged { type_name: String },

    /// A constructor read an argument with the wrong shape
    #[error("Argument {index} is not a {expected}")]
    ArgumentMismatch { index: usize, expected: String },

    /// A constructor reported failure
    #[error("Failed to construct {target}: {reason}")]
    ConstructorFailed { target: String, reason: String },

    /// A produced instance was not of the requested type
    #[error("Resolved instance is not a {expected}")]
    TypeMismatch { expected: String },

    /// Configuration error
    #[cfg(feature = "config")]
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DiError {
    /// Whether this error only means "nothing to inject here".
    ///
    /// Nested single-resolution inside parameter matching treats these as an
    /// unresolvable parameter instead of a failure.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            DiError::NoImplementationFound { .. } | DiError::NoParameterlessConstructor { .. }
        )
    }
}
