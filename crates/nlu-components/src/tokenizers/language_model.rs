//! Tokenizer sobre los documentos de un language model upstream.
//!
//! No tokeniza texto por sí mismo: para cada atributo dense-featurizable
//! copia los tokens del documento que `HFTransformersNLP` dejó en el
//! mensaje. El intent se tokeniza como un único token con el texto completo
//! y luego pasa por la política de split.

use nlu_core::constants::Attribute;
use nlu_core::{ComponentError, ExecutionContext, GraphComponent, LanguageModelDoc, Message, MessageValue,
               ModelStorage, Resource, ResourceSet, Token};
use serde_json::{json, Value};

use super::IntentSplitPolicy;

/// Nombre del extractor upstream del que depende.
pub const HF_TRANSFORMERS_NLP: &str = "HFTransformersNLP";

#[derive(Debug, Clone)]
pub struct LanguageModelTokenizer {
    policy: IntentSplitPolicy,
}

impl LanguageModelTokenizer {
    pub fn new(policy: IntentSplitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntentSplitPolicy {
        &self.policy
    }

    /// Documento del language model para `attribute`, si se calculó.
    pub fn get_doc<'m>(&self, message: &'m Message, attribute: Attribute) -> Option<&'m LanguageModelDoc> {
        attribute.language_model_doc_key()
                 .and_then(|key| message.get(key))
                 .and_then(MessageValue::as_document)
    }

    /// Tokens del documento tal cual. Un documento ausente es un error; uno
    /// presente pero vacío devuelve una lista vacía.
    pub fn tokenize(&self, message: &Message, attribute: Attribute) -> Result<Vec<Token>, ComponentError> {
        self.get_doc(message, attribute)
            .map(|doc| doc.tokens().to_vec())
            .ok_or_else(|| ComponentError::MissingDependency { attribute,
                                                               key: doc_key(attribute) })
    }

    fn tokens_for(&self, message: &Message, attribute: Attribute, text: &str) -> Result<Vec<Token>, ComponentError> {
        if attribute == Attribute::Intent {
            return Ok(self.policy.apply(vec![Token::at(text, 0)]));
        }
        self.tokenize(message, attribute)
    }
}

fn doc_key(attribute: Attribute) -> String {
    attribute.language_model_doc_key()
             .map(str::to_string)
             .unwrap_or_else(|| format!("{attribute}_language_model_doc"))
}

impl GraphComponent for LanguageModelTokenizer {
    const NAME: &'static str = "LanguageModelTokenizer";

    fn get_default_config() -> Value {
        let defaults = IntentSplitPolicy::default();
        json!({
            "intent_tokenization_flag": defaults.intent_tokenization_flag,
            "intent_split_symbol": defaults.intent_split_symbol,
        })
    }

    fn provides() -> Vec<String> {
        Attribute::MESSAGE_ATTRIBUTES.iter().map(|a| a.tokens_key().to_string()).collect()
    }

    fn requires() -> Vec<String> {
        Attribute::DENSE_FEATURIZABLE.iter()
                                     .filter_map(|a| a.language_model_doc_key())
                                     .map(str::to_string)
                                     .collect()
    }

    fn required_components() -> Vec<&'static str> {
        vec![HF_TRANSFORMERS_NLP]
    }

    fn create(config: &Value,
              _storage: &dyn ModelStorage,
              _resource: &Resource,
              _ctx: &ExecutionContext,
              _resources: &ResourceSet)
              -> Result<Self, ComponentError> {
        Ok(Self::new(IntentSplitPolicy::from_config(Self::NAME, config)?))
    }

    fn process(&self, message: &mut Message) -> Result<(), ComponentError> {
        // todos los atributos se tokenizan antes de escribir: un error deja
        // el mensaje intacto
        let mut pending = Vec::with_capacity(Attribute::MESSAGE_ATTRIBUTES.len());
        for attribute in Attribute::MESSAGE_ATTRIBUTES {
            let Some(text) = message.get_text(attribute).filter(|t| !t.is_empty()) else {
                continue;
            };
            pending.push((attribute.tokens_key(), self.tokens_for(message, attribute, text)?));
        }
        for (key, tokens) in pending {
            message.set(key, tokens);
        }
        Ok(())
    }
}
