//! Proveedor del extractor de features de MITIE.
//!
//! `MitieNlp` carga el archivo una sola vez en `create` y lo expone vía
//! `provide` como `MitieModel`, que los componentes dependientes leen del
//! `ResourceSet` bajo el nombre `MitieNLP`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::info;
use nlu_core::{ComponentError, ExecutionContext, Fingerprintable, GraphComponent, ModelStorage, Resource,
               ResourceSet, SharedResource};
use nlu_mitie::{WordFeatureExtractor, REQUIRED_PACKAGE};
use serde_json::{json, Value};

pub const DEFAULT_MODEL_PATH: &str = "data/total_word_feature_extractor.dat";

/// Extractor cargado más la ruta desde la que se cargó.
#[derive(Debug, Clone)]
pub struct MitieModel {
    pub word_feature_extractor: Arc<WordFeatureExtractor>,
    pub model_path: PathBuf,
}

impl Fingerprintable for MitieModel {
    /// Sólo la ruta, tal como se configuró. Cambiar el contenido del archivo
    /// sin cambiar la ruta no invalida outputs cacheados.
    fn fingerprint(&self) -> String {
        self.model_path.to_string_lossy().into_owned()
    }
}

#[derive(Debug)]
pub struct MitieNlp {
    path_to_model_file: PathBuf,
    extractor: Arc<WordFeatureExtractor>,
}

impl MitieNlp {
    pub fn new(path_to_model_file: impl Into<PathBuf>, extractor: Arc<WordFeatureExtractor>) -> Self {
        Self { path_to_model_file: path_to_model_file.into(),
               extractor }
    }

    pub fn model_path(&self) -> &Path {
        &self.path_to_model_file
    }
}

impl GraphComponent for MitieNlp {
    const NAME: &'static str = "MitieNLP";

    fn get_default_config() -> Value {
        json!({ "model": DEFAULT_MODEL_PATH })
    }

    fn required_packages() -> Vec<&'static str> {
        vec![REQUIRED_PACKAGE]
    }

    fn create(config: &Value,
              _storage: &dyn ModelStorage,
              resource: &Resource,
              _ctx: &ExecutionContext,
              _resources: &ResourceSet)
              -> Result<Self, ComponentError> {
        let model_file = config.get("model")
                               .and_then(Value::as_str)
                               .filter(|p| !p.is_empty() && Path::new(p).is_file())
                               .ok_or_else(|| {
                                   ComponentError::configuration(Self::NAME, "model", "missing or non-existent model path")
                               })?;
        let extractor = WordFeatureExtractor::load(model_file)
            .map_err(|e| ComponentError::configuration(Self::NAME, "model", e.to_string()))?;
        info!("mitie:loaded node={} path={model_file} bytes={}", resource.name, extractor.len());
        Ok(Self::new(model_file, Arc::new(extractor)))
    }

    fn provide(&self) -> Option<SharedResource> {
        Some(Arc::new(MitieModel { word_feature_extractor: Arc::clone(&self.extractor),
                                   model_path: self.path_to_model_file.clone() }))
    }
}
