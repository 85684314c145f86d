//! Carga del extractor de features de palabras de MITIE.
//!
//! El archivo se trata como un artefacto opaco: se lee completo una vez y
//! queda inmutable. El resto del workspace sólo ve `WordFeatureExtractor`.
use std::path::PathBuf;

use thiserror::Error;

pub mod extractor;
pub use extractor::WordFeatureExtractor;

/// Nombre del paquete nativo que declaran los componentes que usan MITIE.
pub const REQUIRED_PACKAGE: &str = "mitie";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read feature extractor '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },
    #[error("feature extractor '{0}' is empty")]
    Empty(PathBuf),
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Empty(path) => path,
        }
    }
}
