//! Keyboard assembly through code and configured modules
//!
//! Run with `cargo run --example keyboard` to see the kernel's constructor
//! selection in the debug log.

use intersperse::prelude::*;
use std::sync::Arc;
use tracing::Level;

trait Key {
    fn label(&self) -> &'static str;
}

struct Oem;
struct Sa;

impl Key for Oem {
    fn label(&self) -> &'static str {
        "OEM"
    }
}

impl Key for Sa {
    fn label(&self) -> &'static str {
        "SA"
    }
}

struct Keyboard {
    keys: Vec<Arc<dyn Key>>,
}

struct KeyModule;

impl Module for KeyModule {
    fn name(&self) -> &str {
        "keys"
    }

    fn load(&self, binder: &mut Binder<'_>) {
        binder.bind::<dyn Key, Oem>();
    }
}

fn catalog() -> Catalog {
    Catalog::new()
        .with(
            TypeDescriptor::builder::<Oem>()
                .default_constructor(|| Oem)
                .implements::<dyn Key, _>(|key| key as Arc<dyn Key>)
                .build(),
        )
        .with(
            TypeDescriptor::builder::<Sa>()
                .default_constructor(|| Sa)
                .implements::<dyn Key, _>(|key| key as Arc<dyn Key>)
                .build(),
        )
        .with(
            TypeDescriptor::builder::<Keyboard>()
                .default_constructor(|| Keyboard { keys: Vec::new() })
                .constructor([Parameter::sequence::<dyn Key>()], |args| {
                    Ok(Keyboard {
                        keys: args.take_all::<dyn Key>(0)?,
                    })
                })
                .build(),
        )
}

fn main() -> Result<(), DiError> {
    tracing_subscriber::fmt().with_max_level(Level::TRACE).init();

    let config = KernelConfig::from_toml(
        r#"
        [[modules]]
        name = "extra-keys"

        [[modules.bindings]]
        interface = "Key"
        implementation = "Sa"
        "#,
    )?;

    let kernel = Kernel::builder()
        .catalog(catalog())
        .module(KeyModule)
        .config(config)
        .build();

    let keyboard = kernel.build::<Keyboard>()?;
    let labels: Vec<&str> = keyboard.keys.iter().map(|key| key.label()).collect();
    println!("Keyboard keys: {:?}", labels);

    match kernel.resolve::<dyn Key>(true) {
        Ok(key) => println!("Default key: {}", key.label()),
        Err(e) => println!("Failed to resolve key: {}", e),
    }

    Ok(())
}
