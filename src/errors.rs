use nlu_core::{ComponentError, GraphError};
use nlu_mitie::LoadError;
use thiserror::Error;

/// Errores de la fachada; envuelven los de cada crate del workspace.
#[derive(Debug, Error)]
pub enum NluflowError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(transparent)]
    Component(#[from] ComponentError),
    #[error("feature extractor: {0}")]
    Load(#[from] LoadError),
}

impl NluflowError {
    /// Nodo del grafo al que se atribuye el error, si aplica.
    pub fn node(&self) -> Option<&str> {
        match self {
            NluflowError::Graph(e) => e.node(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_errors_keep_node_attribution() {
        let err: NluflowError = GraphError::Creation { node: "mitie".into(),
                                                       source: ComponentError::configuration("MitieNLP",
                                                                                             "model",
                                                                                             "missing or non-existent model path") }.into();
        assert_eq!(err.node(), Some("mitie"));
        assert!(err.to_string().contains("missing or non-existent model path"));
    }

    #[test]
    fn load_errors_are_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.dat");
        std::fs::write(&path, b"").unwrap();
        let err: NluflowError = nlu_mitie::WordFeatureExtractor::load(&path).unwrap_err().into();
        assert!(err.to_string().starts_with("feature extractor:"));
        assert_eq!(err.node(), None);
    }
}
