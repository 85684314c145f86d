use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::hashing::hash_value;

/// Tipos capaces de producir un string de identidad estable para decidir si
/// un output cacheado puede reutilizarse.
pub trait Fingerprintable {
    fn fingerprint(&self) -> String;
}

/// Insumos del fingerprint de un nodo del grafo.
/// NO es el fingerprint final (string hash) sino el modelo previo a
/// canonicalizar.
#[derive(Serialize)]
pub struct NodeFingerprintInput<'a> {
    pub engine_version: &'a str,
    pub component: &'a str,
    pub config: &'a Value,                      // config efectiva (defaults + overrides)
    pub dependencies: BTreeMap<&'a str, &'a str>, // nombre de componente -> fingerprint del recurso provisto
}

impl NodeFingerprintInput<'_> {
    pub fn compute(&self) -> String {
        hash_value(&serde_json::to_value(self).expect("serialize fingerprint input"))
    }
}

impl Fingerprintable for NodeFingerprintInput<'_> {
    fn fingerprint(&self) -> String {
        self.compute()
    }
}
