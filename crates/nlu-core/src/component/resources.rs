//! Recursos compartidos entre componentes.
//!
//! Un componente proveedor (p. ej. el que carga un modelo) devuelve desde
//! `provide` un valor inmutable envuelto en `Arc`; el runner lo guarda en un
//! `ResourceSet` bajo el nombre del componente y lo pasa por referencia al
//! `create` de cada dependiente. No hay singletons globales: el set vive lo
//! que vive el pipeline.
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::errors::ComponentError;
use crate::model::Fingerprintable;

/// Recurso compartible: fingerprintable, inmutable y seguro entre hilos.
pub trait ProvidedResource: Fingerprintable + Send + Sync + 'static {
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T> ProvidedResource for T where T: Fingerprintable + Send + Sync + 'static
{
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

pub type SharedResource = Arc<dyn ProvidedResource>;

#[derive(Clone, Default)]
pub struct ResourceSet {
    inner: IndexMap<String, SharedResource>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registra el recurso provisto por `component`. Un segundo proveedor del
    /// mismo tipo reemplaza al anterior.
    pub fn insert(&mut self, component: impl Into<String>, resource: SharedResource) {
        self.inner.insert(component.into(), resource);
    }

    pub fn get_shared(&self, component: &str) -> Option<&SharedResource> {
        self.inner.get(component)
    }

    /// Recurso tipado provisto por `component`.
    pub fn get<T>(&self, component: &str) -> Result<Arc<T>, ComponentError>
        where T: Fingerprintable + Send + Sync + 'static
    {
        let shared = self.inner
                         .get(component)
                         .ok_or_else(|| ComponentError::MissingResource(component.to_string()))?;
        Arc::clone(shared).into_any()
                          .downcast::<T>()
                          .map_err(|_| {
                              ComponentError::Internal(format!("resource '{component}' is not a {}",
                                                               std::any::type_name::<T>()))
                          })
    }

    pub fn fingerprint_of(&self, component: &str) -> Option<String> {
        self.inner.get(component).map(|r| r.fingerprint())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for ResourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
         .entries(self.inner.iter().map(|(k, v)| (k, v.fingerprint())))
         .finish()
    }
}
