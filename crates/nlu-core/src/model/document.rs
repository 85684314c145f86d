//! Documento estructurado que un extractor upstream (language model) deja en
//! el mensaje por cada atributo dense-featurizable.
//!
//! Invariante: los tokens tienen `start <= end`, no se solapan y sus offsets
//! crecen monótonamente. La secuencia puede estar vacía. El invariante se
//! valida al construir y también al deserializar (`try_from`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Token;
use crate::errors::ComponentError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDoc")]
pub struct LanguageModelDoc {
    tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Value>, // datos auxiliares del extractor (features, ids); no se interpretan
}

#[derive(Deserialize)]
struct RawDoc {
    tokens: Vec<Token>,
    #[serde(default)]
    metadata: Option<Value>,
}

impl TryFrom<RawDoc> for LanguageModelDoc {
    type Error = ComponentError;

    fn try_from(raw: RawDoc) -> Result<Self, Self::Error> {
        let doc = LanguageModelDoc::new(raw.tokens)?;
        Ok(match raw.metadata {
            Some(m) => doc.with_metadata(m),
            None => doc,
        })
    }
}

impl LanguageModelDoc {
    pub fn new(tokens: Vec<Token>) -> Result<Self, ComponentError> {
        validate_tokens(&tokens)?;
        Ok(Self { tokens, metadata: None })
    }

    /// Documento calculado pero sin tokens (texto vacío). No es lo mismo que
    /// un documento ausente.
    pub fn empty() -> Self {
        Self { tokens: Vec::new(),
               metadata: None }
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.metadata.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

fn validate_tokens(tokens: &[Token]) -> Result<(), ComponentError> {
    let mut previous_end = 0usize;
    for (i, t) in tokens.iter().enumerate() {
        if t.start() > t.end() {
            return Err(ComponentError::InvalidDocument(format!("token {i} '{}' has negative length ({}..{})",
                                                               t.text(),
                                                               t.start(),
                                                               t.end())));
        }
        if t.start() < previous_end {
            return Err(ComponentError::InvalidDocument(format!("token {i} '{}' overlaps previous token (starts at {}, previous ends at {})",
                                                               t.text(),
                                                               t.start(),
                                                               previous_end)));
        }
        previous_end = t.end();
    }
    Ok(())
}
