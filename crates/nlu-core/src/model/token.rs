use serde::{Deserialize, Serialize};

/// Token inmutable `(text, start, end)`.
///
/// Los offsets son posiciones de carácter (no de byte) dentro del texto del
/// atributo del que proviene el token. Pertenece al documento que lo produjo;
/// los consumidores lo copian pero nunca lo mutan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    text: String,
    start: usize,
    end: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Self {
        Self { text: text.into(),
               start,
               end }
    }

    /// Token cuyo `end` se deriva del largo en caracteres de `text`.
    pub fn at(text: impl Into<String>, start: usize) -> Self {
        let text = text.into();
        let end = start + text.chars().count();
        Self { text, start, end }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Divide el token en cada aparición de `symbol`.
    ///
    /// Cada fragmento no vacío se convierte en un token con offsets relativos
    /// al span original, conservando orden y no solapamiento. Si no hay nada
    /// que dividir (símbolo vacío, ausente o sólo fragmentos vacíos) se
    /// devuelve el token original.
    pub fn split_on(&self, symbol: &str) -> Vec<Token> {
        if symbol.is_empty() || !self.text.contains(symbol) {
            return vec![self.clone()];
        }
        let step = symbol.chars().count();
        let mut offset = self.start;
        let mut out = Vec::new();
        for fragment in self.text.split(symbol) {
            let len = fragment.chars().count();
            if len > 0 {
                out.push(Token::new(fragment, offset, offset + len));
            }
            offset += len + step;
        }
        if out.is_empty() {
            return vec![self.clone()];
        }
        out
    }
}
