//! Configuration-based modules
//!
//! Bindings can be declared by type name in TOML or JSON. Names are looked
//! up in the kernel's type catalog, either fully qualified or by their last
//! path segment. Unknown names and unsatisfied bindings are dropped the same
//! way code-declared bindings are.

use crate::error::{DiError, DiResult};
use crate::module::{Binder, Module};
use serde::{Deserialize, Serialize};

/// One configured binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingConfig {
    /// Interface type name
    pub interface: String,
    /// Implementation type name
    pub implementation: String,
}

/// A module declared in configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub name: String,
    #[serde(default)]
    pub bindings: Vec<BindingConfig>,
}

impl Module for ModuleConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, binder: &mut Binder<'_>) {
        for binding in &self.bindings {
            binder.bind_named(&binding.interface, &binding.implementation);
        }
    }
}

/// Kernel configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Modules, loaded in order
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

impl KernelConfig {
    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> DiResult<Self> {
        toml::from_str(toml_str)
            .map_err(|e| DiError::ConfigError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from JSON string
    pub fn from_json(json_str: &str) -> DiResult<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| DiError::ConfigError(format!("Failed to parse JSON: {}", e)))
    }
}

/// Programmatic construction of a [`KernelConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    modules: Vec<ModuleConfig>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new module; following bindings go into it
    pub fn module(&mut self, name: impl Into<String>) -> &mut Self {
        self.modules.push(ModuleConfig {
            name: name.into(),
            bindings: Vec::new(),
        });
        self
    }

    /// Add a binding to the current module, starting a default one if needed
    pub fn bind(
        &mut self,
        interface: impl Into<String>,
        implementation: impl Into<String>,
    ) -> &mut Self {
        if self.modules.is_empty() {
            self.module("default");
        }
        if let Some(module) = self.modules.last_mut() {
            module.bindings.push(BindingConfig {
                interface: interface.into(),
                implementation: implementation.into(),
            });
        }
        self
    }

    /// Build the configuration
    pub fn build(&mut self) -> KernelConfig {
        KernelConfig {
            modules: std::mem::take(&mut self.modules),
        }
    }
}

// Example configuration file format:
// ```toml
// [[modules]]
// name = "keys"
//
// [[modules.bindings]]
// interface = "Key"
// implementation = "Oem"
//
// [[modules.bindings]]
// interface = "Key"
// implementation = "Sa"
// ```
