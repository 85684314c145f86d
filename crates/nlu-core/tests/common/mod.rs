//! Componentes mínimos compartidos por los tests de integración del core.
#![allow(dead_code)]

use std::sync::Arc;

use nlu_core::constants::Attribute;
use nlu_core::{ComponentError, ComponentRegistry, ExecutionContext, Fingerprintable, GraphComponent,
               LanguageModelDoc, LocalModelStorage, Message, ModelStorage, Resource, ResourceSet, SharedResource,
               Token};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Recurso compartido: identidad = ruta configurada.
#[derive(Debug)]
pub struct Vocab {
    pub path: String,
}

impl Fingerprintable for Vocab {
    fn fingerprint(&self) -> String {
        self.path.clone()
    }
}

pub struct VocabLoader {
    vocab: Arc<Vocab>,
}

impl GraphComponent for VocabLoader {
    const NAME: &'static str = "VocabLoader";

    fn get_default_config() -> Value {
        json!({"path": "vocab.txt"})
    }

    fn required_packages() -> Vec<&'static str> {
        vec!["vocabkit"]
    }

    fn create(config: &Value,
              _storage: &dyn ModelStorage,
              _resource: &Resource,
              _ctx: &ExecutionContext,
              _resources: &ResourceSet)
              -> Result<Self, ComponentError> {
        let path = config.get("path")
                         .and_then(Value::as_str)
                         .filter(|p| !p.is_empty())
                         .ok_or_else(|| ComponentError::configuration(Self::NAME, "path", "expected a non-empty string"))?;
        Ok(Self { vocab: Arc::new(Vocab { path: path.to_string() }) })
    }

    fn provide(&self) -> Option<SharedResource> {
        Some(self.vocab.clone())
    }
}

/// Extractor upstream: un documento de tokens separados por espacios.
pub struct DocWriter;

impl GraphComponent for DocWriter {
    const NAME: &'static str = "DocWriter";

    fn provides() -> Vec<String> {
        vec!["text_language_model_doc".to_string()]
    }

    fn create(_config: &Value,
              _storage: &dyn ModelStorage,
              _resource: &Resource,
              _ctx: &ExecutionContext,
              _resources: &ResourceSet)
              -> Result<Self, ComponentError> {
        Ok(DocWriter)
    }

    fn process(&self, message: &mut Message) -> Result<(), ComponentError> {
        let Some(text) = message.get_text(Attribute::Text).map(str::to_string) else {
            return Ok(());
        };
        let mut tokens = Vec::new();
        let mut offset = 0;
        for word in text.split(' ') {
            let len = word.chars().count();
            if len > 0 {
                tokens.push(Token::new(word, offset, offset + len));
            }
            offset += len + 1;
        }
        message.set("text_language_model_doc", LanguageModelDoc::new(tokens)?);
        Ok(())
    }
}

/// Consumidor: copia los tokens del documento a `text_tokens`.
pub struct VocabTokenizer {
    pub vocab: Arc<Vocab>,
}

impl GraphComponent for VocabTokenizer {
    const NAME: &'static str = "VocabTokenizer";

    fn provides() -> Vec<String> {
        vec!["text_tokens".to_string()]
    }

    fn requires() -> Vec<String> {
        vec!["text_language_model_doc".to_string()]
    }

    fn required_components() -> Vec<&'static str> {
        vec![VocabLoader::NAME]
    }

    fn create(_config: &Value,
              _storage: &dyn ModelStorage,
              _resource: &Resource,
              _ctx: &ExecutionContext,
              resources: &ResourceSet)
              -> Result<Self, ComponentError> {
        Ok(Self { vocab: resources.get::<Vocab>(VocabLoader::NAME)? })
    }

    fn process(&self, message: &mut Message) -> Result<(), ComponentError> {
        let doc = message.get("text_language_model_doc")
                         .and_then(|v| v.as_document())
                         .ok_or(ComponentError::MissingDependency { attribute: Attribute::Text,
                                                                    key: "text_language_model_doc".into() })?;
        let tokens = doc.tokens().to_vec();
        message.set("text_tokens", tokens);
        Ok(())
    }
}

pub fn registry() -> ComponentRegistry {
    ComponentRegistry::new().with::<VocabLoader>()
                            .with::<DocWriter>()
                            .with::<VocabTokenizer>()
}

pub fn storage() -> (TempDir, Arc<dyn ModelStorage>) {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage: Arc<dyn ModelStorage> = Arc::new(LocalModelStorage::new(dir.path()));
    (dir, storage)
}
