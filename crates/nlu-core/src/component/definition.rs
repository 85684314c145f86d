use serde::Serialize;
use serde_json::{Map, Value};

use super::{ResourceSet, SharedResource};
use crate::errors::ComponentError;
use crate::model::{ExecutionContext, Message};
use crate::storage::{ModelStorage, Resource};

/// Metadatos estáticos de un tipo de componente. Los lee el runner antes de
/// construir cualquier instancia.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentDeclaration {
    pub name: String,
    pub default_config: Value,
    pub provides: Vec<String>,
    pub requires: Vec<String>,
    pub required_components: Vec<String>,
    pub required_packages: Vec<String>,
}

/// Interfaz que implementa cada tipo de componente.
///
/// La construcción es en dos fases: `create` (una vez por corrida y por
/// configuración distinta; debe fallar rápido ante configuración inválida) y
/// luego `process` por mensaje. `process` sólo lee atributos declarados en
/// `requires` (más los atributos crudos del mensaje) y sólo escribe claves
/// declaradas en `provides`.
pub trait GraphComponent: Send + Sync + Sized + 'static {
    /// Nombre estable del tipo; otros componentes lo referencian en
    /// `required_components`.
    const NAME: &'static str;

    /// Opciones reconocidas y sus defaults. Sin efectos secundarios.
    fn get_default_config() -> Value {
        Value::Object(Map::new())
    }

    fn provides() -> Vec<String> {
        Vec::new()
    }

    fn requires() -> Vec<String> {
        Vec::new()
    }

    fn required_components() -> Vec<&'static str> {
        Vec::new()
    }

    /// Paquetes nativos que el componente necesita en runtime. Sólo
    /// informativo: el core no lo hace cumplir.
    fn required_packages() -> Vec<&'static str> {
        Vec::new()
    }

    /// Construye la instancia a partir de la configuración efectiva y de los
    /// recursos que proveyeron los componentes requeridos.
    fn create(config: &Value,
              storage: &dyn ModelStorage,
              resource: &Resource,
              ctx: &ExecutionContext,
              resources: &ResourceSet)
              -> Result<Self, ComponentError>;

    /// Recurso compartible para dependientes. Debe ser barato e idempotente.
    fn provide(&self) -> Option<SharedResource> {
        None
    }

    fn process(&self, _message: &mut Message) -> Result<(), ComponentError> {
        Ok(())
    }

    fn declaration() -> ComponentDeclaration {
        ComponentDeclaration { name: Self::NAME.to_string(),
                               default_config: Self::get_default_config(),
                               provides: Self::provides(),
                               requires: Self::requires(),
                               required_components: Self::required_components().into_iter().map(String::from).collect(),
                               required_packages: Self::required_packages().into_iter().map(String::from).collect() }
    }
}
