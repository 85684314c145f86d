//! Tokenizers.

mod language_model;

use nlu_core::{ComponentError, Token};
use serde_json::Value;

pub use language_model::{LanguageModelTokenizer, HF_TRANSFORMERS_NLP};

/// Opciones comunes a los tokenizers para el atributo intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentSplitPolicy {
    pub intent_tokenization_flag: bool,
    pub intent_split_symbol: String,
}

impl Default for IntentSplitPolicy {
    fn default() -> Self {
        Self { intent_tokenization_flag: false,
               intent_split_symbol: "_".to_string() }
    }
}

impl IntentSplitPolicy {
    /// Lee ambas opciones de la config efectiva.
    pub fn from_config(component: &str, config: &Value) -> Result<Self, ComponentError> {
        let defaults = Self::default();
        let intent_tokenization_flag = match config.get("intent_tokenization_flag") {
            None | Some(Value::Null) => defaults.intent_tokenization_flag,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(ComponentError::configuration(component,
                                                         "intent_tokenization_flag",
                                                         format!("expected a boolean, got {other}")))
            }
        };
        let intent_split_symbol = match config.get("intent_split_symbol") {
            None | Some(Value::Null) => defaults.intent_split_symbol,
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                return Err(ComponentError::configuration(component,
                                                         "intent_split_symbol",
                                                         format!("expected a string, got {other}")))
            }
        };
        Ok(Self { intent_tokenization_flag,
                  intent_split_symbol })
    }

    /// Con el flag activo divide cada token en el símbolo; si no, los tokens
    /// pasan sin cambios.
    pub fn apply(&self, tokens: Vec<Token>) -> Vec<Token> {
        if !self.intent_tokenization_flag {
            return tokens;
        }
        tokens.iter().flat_map(|t| t.split_on(&self.intent_split_symbol)).collect()
    }
}
