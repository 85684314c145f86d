//! Handles opacos de persistencia que se pasan a `GraphComponent::create`.
//!
//! El core sólo los transporta: nunca inspecciona ni deserializa lo que un
//! componente guarde en su slot.

mod local;

use std::fmt::Debug;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::ComponentError;

pub use local::LocalModelStorage;

/// Identidad de un slot versionado para los artefactos de un componente.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub output_fingerprint: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, output_fingerprint: impl Into<String>) -> Self {
        Self { name: name.into(),
               output_fingerprint: output_fingerprint.into() }
    }

    /// Nombre de directorio estable del slot: `<name>_<fp[..12]>`.
    pub fn slot_name(&self) -> String {
        let fp: String = self.output_fingerprint.chars().take(12).collect();
        if fp.is_empty() {
            self.name.clone()
        } else {
            format!("{}_{}", self.name, fp)
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io: {0}")] Io(#[from] std::io::Error),
    #[error("resource '{0}' not found in storage")] NotFound(String),
}

impl From<StorageError> for ComponentError {
    fn from(e: StorageError) -> Self {
        ComponentError::Storage(e.to_string())
    }
}

/// Almacenamiento direccionable por `Resource`.
pub trait ModelStorage: Send + Sync + Debug {
    /// Directorio donde el componente puede persistir artefactos del recurso.
    /// Se crea si no existe.
    fn write_to(&self, resource: &Resource) -> Result<PathBuf, StorageError>;

    /// Directorio ya existente con los artefactos del recurso.
    fn read_from(&self, resource: &Resource) -> Result<PathBuf, StorageError>;
}
