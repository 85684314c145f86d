use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Contexto de ejecución entregado a `GraphComponent::create`.
///
/// Identifica la corrida, el grafo y el nodo; el componente puede usarlo
/// para logs, nunca para persistencia.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub run_id: Uuid,
    pub graph_schema_hash: String,
    pub node_name: Option<String>, // fijado por el runner al crear cada nodo
    pub started_at: DateTime<Utc>,
}

impl ExecutionContext {
    pub fn new(graph_schema_hash: impl Into<String>) -> Self {
        Self { run_id: Uuid::new_v4(),
               graph_schema_hash: graph_schema_hash.into(),
               node_name: None,
               started_at: Utc::now() }
    }

    /// Copia del contexto apuntando a un nodo concreto.
    pub fn for_node(&self, node_name: &str) -> Self {
        Self { node_name: Some(node_name.to_string()),
               ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_node_keeps_run_identity() {
        let ctx = ExecutionContext::new("abc");
        let node = ctx.for_node("tokenizer");
        assert_eq!(node.run_id, ctx.run_id);
        assert_eq!(node.graph_schema_hash, "abc");
        assert_eq!(node.node_name.as_deref(), Some("tokenizer"));
        assert!(ctx.node_name.is_none());
    }
}
