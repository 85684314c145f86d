use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use sha2::{Digest, Sha256};

use crate::LoadError;

/// Extractor de features de palabras ya cargado en memoria.
///
/// Inmutable tras `load`: no expone mutación y es `Send + Sync`, así que
/// puede compartirse detrás de un `Arc` y leerse desde varios hilos a la
/// vez (procesamiento de lotes en paralelo).
pub struct WordFeatureExtractor {
    source: PathBuf,
    data: Box<[u8]>,
    checksum: String,
}

impl WordFeatureExtractor {
    /// Lee el archivo completo. Un archivo ilegible o vacío es un error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| LoadError::Io { path: path.to_path_buf(),
                                                                    source })?;
        if data.is_empty() {
            return Err(LoadError::Empty(path.to_path_buf()));
        }
        let checksum = format!("{:x}", Sha256::digest(&data));
        debug!("mitie:load path={} bytes={} sha256={checksum}", path.display(), data.len());
        Ok(Self { source: path.to_path_buf(),
                  data: data.into_boxed_slice(),
                  checksum })
    }

    /// Ruta desde la que se cargó.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// SHA-256 hex del contenido. Sólo informativo.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }
}

impl fmt::Debug for WordFeatureExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordFeatureExtractor")
         .field("source", &self.source)
         .field("len", &self.data.len())
         .field("checksum", &self.checksum)
         .finish()
    }
}
