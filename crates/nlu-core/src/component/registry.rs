//! Registro de tipos de componente disponibles para armar grafos.

use std::sync::Arc;

use indexmap::IndexMap;

use super::{ComponentFactory, ComponentType, GraphComponent};

/// Conjunto cerrado de tipos de componente, indexado por `NAME`.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: IndexMap<String, Arc<dyn ComponentFactory>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra `T`. Devuelve `false` si ya existía un tipo con ese nombre
    /// (el registro original se conserva).
    pub fn register<T: GraphComponent>(&mut self) -> bool {
        self.register_factory(T::NAME, Arc::new(ComponentType::<T>::new()))
    }

    pub fn register_factory(&mut self, name: &str, factory: Arc<dyn ComponentFactory>) -> bool {
        if self.factories.contains_key(name) {
            return false;
        }
        self.factories.insert(name.to_string(), factory);
        true
    }

    /// Builder encadenable sobre `register`.
    pub fn with<T: GraphComponent>(mut self) -> Self {
        self.register::<T>();
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ComponentFactory>> {
        self.factories.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
