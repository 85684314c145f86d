//! `Message`: registro clave-valor mutable que representa una unidad de
//! entrada (un utterance) recorriendo el pipeline.
//!
//! Las claves son nombres de atributo ("text", "intent", "text_tokens", ...).
//! Cada `set` queda registrado en un diario de escrituras que el runner
//! consume tras `process` para comprobar que el componente sólo escribió
//! claves declaradas en `provides`.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{LanguageModelDoc, Token};
use crate::constants::Attribute;
use crate::hashing::hash_value;

/// Valores que puede contener un mensaje.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MessageValue {
    Text(String),
    Tokens(Vec<Token>),
    Document(LanguageModelDoc),
    Json(Value),
}

impl MessageValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tokens(&self) -> Option<&[Token]> {
        match self {
            MessageValue::Tokens(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&LanguageModelDoc> {
        match self {
            MessageValue::Document(d) => Some(d),
            _ => None,
        }
    }
}

impl From<&str> for MessageValue {
    fn from(s: &str) -> Self {
        MessageValue::Text(s.to_string())
    }
}

impl From<String> for MessageValue {
    fn from(s: String) -> Self {
        MessageValue::Text(s)
    }
}

impl From<Vec<Token>> for MessageValue {
    fn from(t: Vec<Token>) -> Self {
        MessageValue::Tokens(t)
    }
}

impl From<LanguageModelDoc> for MessageValue {
    fn from(d: LanguageModelDoc) -> Self {
        MessageValue::Document(d)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    data: IndexMap<String, MessageValue>,
    #[serde(skip)]
    writes: Vec<String>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mensaje con sólo el atributo `text`.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with(Attribute::Text.as_str(), MessageValue::Text(text.into()))
    }

    /// Variante builder de `set` para armar mensajes de entrada. No queda en
    /// el diario de escrituras.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MessageValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&MessageValue> {
        self.data.get(key)
    }

    /// Texto crudo de un atributo, si existe y es texto.
    pub fn get_text(&self, attribute: Attribute) -> Option<&str> {
        self.get(attribute.as_str()).and_then(MessageValue::as_text)
    }

    pub fn get_tokens(&self, attribute: Attribute) -> Option<&[Token]> {
        self.get(attribute.tokens_key()).and_then(MessageValue::as_tokens)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<MessageValue>) {
        let key = key.into();
        if !self.writes.contains(&key) {
            self.writes.push(key.clone());
        }
        self.data.insert(key, value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Devuelve y limpia las claves escritas con `set` desde la última
    /// llamada.
    pub fn take_writes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.writes)
    }

    /// Hash estable del contenido completo (independiente del orden de
    /// inserción). Se usa como parte de la clave de la cache de outputs.
    pub fn content_hash(&self) -> String {
        let value = serde_json::to_value(&self.data).expect("serialize message data");
        hash_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_records_writes_once() {
        let mut m = Message::from_text("hola");
        m.set("text_tokens", vec![Token::new("hola", 0, 4)]);
        m.set("text_tokens", vec![Token::new("hola", 0, 4)]);
        assert_eq!(m.take_writes(), vec!["text_tokens".to_string()]);
        assert!(m.take_writes().is_empty());
    }

    #[test]
    fn builder_does_not_record_writes() {
        let mut m = Message::from_text("hola").with("intent", "greet");
        assert!(m.take_writes().is_empty());
        assert_eq!(m.get_text(Attribute::Intent), Some("greet"));
    }

    #[test]
    fn content_hash_ignores_insertion_order() {
        let a = Message::new().with("text", "x").with("intent", "y");
        let b = Message::new().with("intent", "y").with("text", "x");
        assert_eq!(a.content_hash(), b.content_hash());
        let c = Message::new().with("intent", "z").with("text", "x");
        assert_ne!(a.content_hash(), c.content_hash());
    }

    #[test]
    fn typed_getters_reject_other_variants() {
        let m = Message::from_text("hola");
        assert_eq!(m.get("text").and_then(MessageValue::as_document), None);
        assert_eq!(m.get_tokens(Attribute::Text), None);
    }
}
