//! Cache de outputs por fingerprint.
//!
//! La clave combina el fingerprint del nodo (componente + config + recursos
//! de los que depende) con el hash del mensaje de entrada. Si coincide, las
//! escrituras guardadas se reaplican al mensaje sin invocar `process`.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::hashing::hash_value;
use crate::model::{Message, MessageValue};

/// Escrituras que un nodo hizo sobre un mensaje, en orden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedOutput {
    pub writes: Vec<(String, MessageValue)>,
}

impl CachedOutput {
    /// Captura los valores actuales de `keys` en `message`.
    pub fn capture(message: &Message, keys: &[String]) -> Self {
        let writes = keys.iter()
                         .filter_map(|k| message.get(k).map(|v| (k.clone(), v.clone())))
                         .collect();
        Self { writes }
    }

    /// Reaplica las escrituras sobre `message` (quedan en su diario).
    pub fn replay(&self, message: &mut Message) {
        for (k, v) in &self.writes {
            message.set(k.clone(), v.clone());
        }
    }
}

pub trait OutputCache: Send + Sync {
    fn get(&self, key: &str) -> Option<CachedOutput>;
    fn put(&self, key: String, output: CachedOutput);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Clave de cache para el output de un nodo sobre un mensaje.
pub fn output_cache_key(node_fingerprint: &str, message: &Message) -> String {
    hash_value(&json!({
        "node_fingerprint": node_fingerprint,
        "message_hash": message.content_hash(),
    }))
}

/// Implementación concurrente en memoria (segura para lotes en paralelo).
#[derive(Debug, Default)]
pub struct InMemoryOutputCache {
    inner: DashMap<String, CachedOutput>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl InMemoryOutputCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(hits, misses)` acumulados.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits.load(Ordering::Relaxed), self.misses.load(Ordering::Relaxed))
    }
}

impl OutputCache for InMemoryOutputCache {
    fn get(&self, key: &str) -> Option<CachedOutput> {
        let found = self.inner.get(key).map(|e| e.value().clone());
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    fn put(&self, key: String, output: CachedOutput) {
        self.inner.insert(key, output);
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
