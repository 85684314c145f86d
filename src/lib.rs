//! nluflow: fachada del workspace.
//!
//! Re-exporta el core (`nlu_core`) y los componentes concretos
//! (`nlu_components`), y arma runners con los componentes incluidos.

pub mod errors;

use log::info;

pub use errors::NluflowError;
pub use nlu_components::{register_all, LanguageModelTokenizer, MitieModel, MitieNlp};
pub use nlu_core::*;

/// Registry con todos los componentes de `nlu_components`.
pub fn default_registry() -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();
    register_all(&mut registry);
    registry
}

/// Ensambla `schema` con un runner configurado desde el entorno.
pub fn assemble(registry: ComponentRegistry, schema: &GraphSchema) -> Result<Pipeline, NluflowError> {
    let mut runner = GraphRunner::from_env(registry);
    let pipeline = runner.assemble(schema)?;
    info!("nluflow:assembled run_id={} nodes={}", pipeline.run_id(), pipeline.nodes().len());
    Ok(pipeline)
}
