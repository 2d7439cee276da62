//! Keyboard fixtures shared by the integration tests

#![allow(dead_code)]

use intersperse::prelude::*;
use std::sync::Arc;

pub trait Key: Send + Sync {
    fn label(&self) -> &'static str;
}

/// OEM profile keycap
pub struct Oem;

/// SA profile keycap
pub struct Sa;

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

pub trait KeyboardSize: Send + Sync {
    fn num_of_keys(&self) -> u32;
}

pub struct FullKeyboardSize;

impl KeyboardSize for FullKeyboardSize {
    fn num_of_keys(&self) -> u32 {
        100
    }
}

/// Never bound and never implemented
pub trait Switch: Send + Sync {}

/// Implements `Key` but can only be built with arguments
pub struct CustomKey {
    pub size: Arc<dyn KeyboardSize>,
}

impl Key for CustomKey {
    fn label(&self) -> &'static str {
        "custom"
    }
}

/// Parameterless and all-keys constructors
pub struct Keyboard {
    pub keys: Vec<Arc<dyn Key>>,
}

/// Single all-keys constructor
pub struct MechanicalKeyboard {
    pub keys: Vec<Arc<dyn Key>>,
}

/// Single-key constructor plus a marked all-keys constructor
pub struct MembraneKeyboard {
    pub key: Option<Arc<dyn Key>>,
    pub keys: Option<Vec<Arc<dyn Key>>>,
}

/// Three marked constructors
pub struct ErgonomicKeyboard;

/// All keys plus one key
pub struct OrtholinearKeyboard {
    pub keys: Vec<Arc<dyn Key>>,
    pub key: Arc<dyn Key>,
}

/// Constructors over the keyboard size interface
pub struct KeyboardLayout {
    pub size: Option<Arc<dyn KeyboardSize>>,
}

/// All keys, or a single switch that nothing implements
pub struct SplitKeyboard {
    pub keys: Option<Vec<Arc<dyn Key>>>,
}

/// Marked constructor needing a switch
pub struct HotSwapKeyboard;

/// Only a concrete parameter
pub struct Macropad;

pub fn catalog() -> Catalog {
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
            TypeDescriptor::builder::<FullKeyboardSize>()
                .default_constructor(|| FullKeyboardSize)
                .implements::<dyn KeyboardSize, _>(|size| size as Arc<dyn KeyboardSize>)
                .build(),
        )
        .with(
            TypeDescriptor::builder::<CustomKey>()
                .constructor([Parameter::interface::<dyn KeyboardSize>()], |args| {
                    Ok(CustomKey {
                        size: args.take::<dyn KeyboardSize>(0)?,
                    })
                })
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
        .with(
            TypeDescriptor::builder::<MechanicalKeyboard>()
                .constructor([Parameter::sequence::<dyn Key>()], |args| {
                    Ok(MechanicalKeyboard {
                        keys: args.take_all::<dyn Key>(0)?,
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::builder::<MembraneKeyboard>()
                .constructor([Parameter::interface::<dyn Key>()], |args| {
                    Ok(MembraneKeyboard {
                        key: Some(args.take::<dyn Key>(0)?),
                        keys: None,
                    })
                })
                .injection_point([Parameter::sequence::<dyn Key>()], |args| {
                    Ok(MembraneKeyboard {
                        key: None,
                        keys: Some(args.take_all::<dyn Key>(0)?),
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::builder::<ErgonomicKeyboard>()
                .injection_point([Parameter::sequence::<dyn Key>()], |_| Ok(ErgonomicKeyboard))
                .injection_point([Parameter::interface::<dyn Key>()], |_| Ok(ErgonomicKeyboard))
                .injection_point([Parameter::interface::<dyn KeyboardSize>()], |_| {
                    Ok(ErgonomicKeyboard)
                })
                .build(),
        )
        .with(
            TypeDescriptor::builder::<OrtholinearKeyboard>()
                .constructor(
                    [Parameter::sequence::<dyn Key>(), Parameter::interface::<dyn Key>()],
                    |args| {
                        Ok(OrtholinearKeyboard {
                            keys: args.take_all::<dyn Key>(0)?,
                            key: args.take::<dyn Key>(1)?,
                        })
                    },
                )
                .build(),
        )
        .with(
            TypeDescriptor::builder::<KeyboardLayout>()
                .default_constructor(|| KeyboardLayout { size: None })
                .constructor([Parameter::interface::<dyn KeyboardSize>()], |args| {
                    Ok(KeyboardLayout {
                        size: Some(args.take::<dyn KeyboardSize>(0)?),
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::builder::<SplitKeyboard>()
                .constructor([Parameter::interface::<dyn Switch>()], |_| {
                    Ok(SplitKeyboard { keys: None })
                })
                .constructor([Parameter::sequence::<dyn Key>()], |args| {
                    Ok(SplitKeyboard {
                        keys: Some(args.take_all::<dyn Key>(0)?),
                    })
                })
                .build(),
        )
        .with(
            TypeDescriptor::builder::<HotSwapKeyboard>()
                .default_constructor(|| HotSwapKeyboard)
                .injection_point([Parameter::interface::<dyn Switch>()], |_| {
                    Ok(HotSwapKeyboard)
                })
                .build(),
        )
        .with(
            TypeDescriptor::builder::<Macropad>()
                .constructor([Parameter::concrete::<Oem>()], |_| Ok(Macropad))
                .build(),
        )
}

pub struct KeyModule;

impl Module for KeyModule {
    fn name(&self) -> &str {
        "keys"
    }

    fn load(&self, binder: &mut Binder<'_>) {
        binder.bind::<dyn Key, Oem>().bind::<dyn Key, Sa>();
    }
}

pub struct KeyboardSizeModule;

impl Module for KeyboardSizeModule {
    fn name(&self) -> &str {
        "keyboard-size"
    }

    fn load(&self, binder: &mut Binder<'_>) {
        binder.bind::<dyn KeyboardSize, FullKeyboardSize>();
    }
}

pub fn labels(keys: &[Arc<dyn Key>]) -> Vec<&'static str> {
    keys.iter().map(|key| key.label()).collect()
}
