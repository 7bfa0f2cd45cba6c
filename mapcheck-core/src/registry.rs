//! Type-keyed registry of generator factories.
//!
//! Replaces runtime type introspection: the embedding application registers
//! a factory per generated type at setup time, and resolution is an explicit
//! map lookup that fails with [`MapcheckError::NoGenerator`] for types never
//! registered.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

use crate::error::{MapcheckError, Result};
use crate::gen::BoxedGenerator;

type Factory<T> = Box<dyn Fn() -> BoxedGenerator<T>>;

/// Registry mapping a value type to a factory for its generator.
#[derive(Default)]
pub struct GeneratorRegistry {
    factories: HashMap<TypeId, Box<dyn Any>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        GeneratorRegistry {
            factories: HashMap::new(),
        }
    }

    /// Register a factory for values of type `T`, replacing any previous
    /// registration for the same type.
    pub fn register<T, F>(&mut self, factory: F)
    where
        T: 'static,
        F: Fn() -> BoxedGenerator<T> + 'static,
    {
        let factory: Factory<T> = Box::new(factory);
        self.factories.insert(TypeId::of::<T>(), Box::new(factory));
    }

    /// Build a generator for values of type `T`.
    pub fn resolve<T: 'static>(&self) -> Result<BoxedGenerator<T>> {
        let factory = self
            .factories
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Factory<T>>())
            .ok_or(MapcheckError::NoGenerator {
                type_name: type_name::<T>(),
            })?;
        Ok(factory())
    }

    /// Whether a factory is registered for type `T`.
    pub fn knows<T: 'static>(&self) -> bool {
        self.factories.contains_key(&TypeId::of::<T>())
    }
}
