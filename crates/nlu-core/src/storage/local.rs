use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::{ModelStorage, Resource, StorageError};

/// `ModelStorage` sobre un directorio local: un subdirectorio por slot.
#[derive(Debug, Clone)]
pub struct LocalModelStorage {
    root: PathBuf,
}

impl LocalModelStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ModelStorage for LocalModelStorage {
    fn write_to(&self, resource: &Resource) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(resource.slot_name());
        fs::create_dir_all(&dir)?;
        debug!("storage:write_to resource={} dir={}", resource.name, dir.display());
        Ok(dir)
    }

    fn read_from(&self, resource: &Resource) -> Result<PathBuf, StorageError> {
        let dir = self.root.join(resource.slot_name());
        if !dir.is_dir() {
            return Err(StorageError::NotFound(resource.slot_name()));
        }
        Ok(dir)
    }
}
