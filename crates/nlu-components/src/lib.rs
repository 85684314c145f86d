//! nlu-components: componentes concretos del grafo NLU.
//!
//! - `MitieNlp`: carga el extractor de features de MITIE una vez y lo
//!   comparte como `MitieModel`.
//! - `LanguageModelTokenizer`: toma los tokens de los documentos que dejó un
//!   extractor de language model upstream.

pub mod tokenizers;
pub mod utils;

use nlu_core::ComponentRegistry;

pub use tokenizers::LanguageModelTokenizer;
pub use utils::mitie::{MitieModel, MitieNlp};

/// Registra todos los componentes de este crate. No incluye el extractor
/// upstream (`HFTransformersNLP`), que aporta quien arme el pipeline.
pub fn register_all(registry: &mut ComponentRegistry) {
    registry.register::<MitieNlp>();
    registry.register::<LanguageModelTokenizer>();
}
