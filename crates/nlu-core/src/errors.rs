//! Errores del core.
//!
//! - `ComponentError`: lo que un componente devuelve desde `create` o
//!   `process`.
//! - `GraphError`: errores de ensamblado del grafo y de procesamiento
//!   atribuibles a un nodo concreto.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::Attribute;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ComponentError {
    /// Configuración ausente o inválida. Fatal durante `create`.
    #[error("component '{component}' has invalid configuration '{option}': {reason}")]
    Configuration { component: String, option: String, reason: String },
    /// El documento upstream nunca se calculó para este atributo. Distinto
    /// de un documento presente pero vacío.
    #[error("missing '{key}' for attribute '{attribute}' (upstream document not computed)")]
    MissingDependency { attribute: Attribute, key: String },
    #[error("shared resource '{0}' not provided by any upstream component")] MissingResource(String),
    #[error("component '{component}' wrote undeclared key '{key}'")] UndeclaredWrite { component: String, key: String },
    #[error("invalid document: {0}")] InvalidDocument(String),
    #[error("storage: {0}")] Storage(String),
    #[error("internal: {0}")] Internal(String),
}

impl ComponentError {
    /// Atajo para errores de configuración de una opción concreta.
    pub fn configuration(component: &str, option: &str, reason: impl Into<String>) -> Self {
        Self::Configuration { component: component.to_string(),
                              option: option.to_string(),
                              reason: reason.into() }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum GraphError {
    #[error("unknown component '{0}'")] UnknownComponent(String),
    #[error("duplicate node '{0}'")] DuplicateNode(String),
    #[error("node '{node}' requires component '{component}' which is not part of the graph")]
    MissingComponent { node: String, component: String },
    #[error("node '{node}' requires '{key}' but no other node provides it")]
    UnsatisfiedRequirement { node: String, key: String },
    #[error("dependency cycle between nodes {0:?}")] Cycle(Vec<String>),
    #[error("node '{node}' failed to initialize: {source}")]
    Creation { node: String, source: ComponentError },
    #[error("node '{node}' failed on message {message_index}: {source}")]
    Process { node: String, message_index: usize, source: ComponentError },
}

impl GraphError {
    /// Nodo al que se atribuye el error, si aplica.
    pub fn node(&self) -> Option<&str> {
        match self {
            GraphError::MissingComponent { node, .. }
            | GraphError::UnsatisfiedRequirement { node, .. }
            | GraphError::Creation { node, .. }
            | GraphError::Process { node, .. } => Some(node),
            GraphError::DuplicateNode(node) => Some(node),
            _ => None,
        }
    }
}
