//! Constantes del motor core.
//!
//! Este módulo agrupa valores estáticos que participan en el cálculo de
//! fingerprints y las claves de atributos que viajan en cada `Message`.
//! Cambios en `ENGINE_VERSION` invalidan todos los fingerprints de nodo (y por
//! lo tanto la cache de outputs) aunque la configuración no cambie.

use serde::{Deserialize, Serialize};

/// Versión lógica del motor. Se incluye en el input de cada fingerprint de
/// nodo. Mantener estable mientras no haya cambios incompatibles.
pub const ENGINE_VERSION: &str = "G1.0";

/// Clave del campo de tokens dentro de un documento de language model.
pub const TOKENS: &str = "tokens";

/// Atributos de un `Message` que los componentes conocen.
///
/// El conjunto es cerrado: cada atributo sabe bajo qué clave se guardan sus
/// tokens y, si es dense-featurizable, bajo qué clave el extractor upstream
/// deja su documento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Text,
    Intent,
    Response,
}

impl Attribute {
    /// Todos los atributos de mensaje, en orden estable.
    pub const MESSAGE_ATTRIBUTES: [Attribute; 3] = [Attribute::Text, Attribute::Intent, Attribute::Response];

    /// Atributos para los que un extractor upstream produce documentos densos.
    pub const DENSE_FEATURIZABLE: [Attribute; 2] = [Attribute::Text, Attribute::Response];

    /// Nombre crudo del atributo dentro del mensaje ("text", "intent", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Text => "text",
            Attribute::Intent => "intent",
            Attribute::Response => "response",
        }
    }

    /// Clave donde se escriben los tokens del atributo.
    pub fn tokens_key(&self) -> &'static str {
        match self {
            Attribute::Text => "text_tokens",
            Attribute::Intent => "intent_tokens",
            Attribute::Response => "response_tokens",
        }
    }

    /// Clave del documento de language model; `None` si el atributo no es
    /// dense-featurizable.
    pub fn language_model_doc_key(&self) -> Option<&'static str> {
        match self {
            Attribute::Text => Some("text_language_model_doc"),
            Attribute::Response => Some("response_language_model_doc"),
            Attribute::Intent => None,
        }
    }

    pub fn is_dense_featurizable(&self) -> bool {
        self.language_model_doc_key().is_some()
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
