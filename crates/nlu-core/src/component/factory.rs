use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;

use super::{ComponentDeclaration, GraphComponent, ResourceSet, SharedResource};
use crate::errors::ComponentError;
use crate::model::{ExecutionContext, Message};
use crate::storage::{ModelStorage, Resource};

/// Instancia ya construida, vista por el runner.
pub trait ComponentInstance: Send + Sync {
    fn component_name(&self) -> &'static str;

    fn shared_resource(&self) -> Option<SharedResource>;

    fn run(&self, message: &mut Message) -> Result<(), ComponentError>;
}

/// Punto de entrada neutro para declarar y construir un tipo de componente.
pub trait ComponentFactory: Send + Sync {
    fn declaration(&self) -> ComponentDeclaration;

    fn create(&self,
              config: &Value,
              storage: &dyn ModelStorage,
              resource: &Resource,
              ctx: &ExecutionContext,
              resources: &ResourceSet)
              -> Result<Arc<dyn ComponentInstance>, ComponentError>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `GraphComponent` es una instancia y, vía
// `ComponentType<T>`, una factory neutra.
// -------------------------------------------------------------
impl<T> ComponentInstance for T where T: GraphComponent
{
    fn component_name(&self) -> &'static str {
        T::NAME
    }

    fn shared_resource(&self) -> Option<SharedResource> {
        <T as GraphComponent>::provide(self)
    }

    fn run(&self, message: &mut Message) -> Result<(), ComponentError> {
        <T as GraphComponent>::process(self, message)
    }
}

/// Marcador de tipo que expone un `GraphComponent` como `ComponentFactory`.
pub struct ComponentType<T>(PhantomData<fn() -> T>);

impl<T: GraphComponent> ComponentType<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: GraphComponent> Default for ComponentType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GraphComponent> ComponentFactory for ComponentType<T> {
    fn declaration(&self) -> ComponentDeclaration {
        T::declaration()
    }

    fn create(&self,
              config: &Value,
              storage: &dyn ModelStorage,
              resource: &Resource,
              ctx: &ExecutionContext,
              resources: &ResourceSet)
              -> Result<Arc<dyn ComponentInstance>, ComponentError> {
        let instance = T::create(config, storage, resource, ctx, resources)?;
        Ok(Arc::new(instance))
    }
}
