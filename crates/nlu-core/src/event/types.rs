//! Tipos de evento del ensamblado y estructura `GraphEvent`.
//!
//! Rol:
//! - Cada ensamblado del `GraphRunner` emite eventos a un `EventStore`
//!   append-only, con un `run_id` por corrida.
//! - Permiten auditar cuántas veces se construyó cada componente (la
//!   garantía de construcción única) y con qué fingerprint.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ComponentError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphEventKind {
    /// Primer evento de una corrida: fija el hash del schema y la cantidad de
    /// nodos.
    GraphInitialized { schema_hash: String, node_count: usize },
    /// Se invocó `create` para el nodo.
    ComponentCreated { node: String, component: String, fingerprint: String },
    /// El nodo comparte instancia con otro de igual fingerprint; no se invocó
    /// `create`.
    ComponentReused { node: String, component: String, reused_from: String, fingerprint: String },
    /// El nodo expuso un recurso compartido vía `provide`.
    ResourceProvided { node: String, component: String, resource_fingerprint: String },
    /// `create` falló. La corrida no continúa.
    ComponentFailed { node: String, component: String, error: ComponentError },
    /// Cierre con fingerprint agregado del grafo (hash de fingerprints de
    /// nodos en orden topológico).
    GraphAssembled { graph_fingerprint: String },
}

impl GraphEventKind {
    /// Código de una letra, útil para comparar secuencias en tests.
    pub fn code(&self) -> &'static str {
        match self {
            GraphEventKind::GraphInitialized { .. } => "I",
            GraphEventKind::ComponentCreated { .. } => "C",
            GraphEventKind::ComponentReused { .. } => "R",
            GraphEventKind::ResourceProvided { .. } => "P",
            GraphEventKind::ComponentFailed { .. } => "X",
            GraphEventKind::GraphAssembled { .. } => "A",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub run_id: Uuid,
    pub kind: GraphEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
