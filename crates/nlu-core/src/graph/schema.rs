//! Schema declarativo del grafo: nodos con nombre, tipo de componente y
//! overrides de configuración. El orden de declaración sólo se usa para
//! desempatar el orden topológico.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GraphError;
use crate::hashing::hash_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub component: String,
    #[serde(default)]
    pub config: Value, // overrides; null = usar defaults
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSchema {
    nodes: IndexMap<String, SchemaNode>,
}

impl GraphSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema con un nodo por componente, usando el nombre del componente
    /// como nombre de nodo y sin overrides.
    pub fn from_components(components: &[&str]) -> Result<Self, GraphError> {
        let mut schema = Self::new();
        for c in components {
            schema.add_node(*c, *c, Value::Null)?;
        }
        Ok(schema)
    }

    pub fn add_node(&mut self,
                    name: impl Into<String>,
                    component: impl Into<String>,
                    config: Value)
                    -> Result<(), GraphError> {
        let name = name.into();
        if self.nodes.contains_key(&name) {
            return Err(GraphError::DuplicateNode(name));
        }
        self.nodes.insert(name,
                          SchemaNode { component: component.into(),
                                       config });
        Ok(())
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.get(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Hash canónico del schema (componentes + overrides).
    pub fn schema_hash(&self) -> String {
        hash_value(&serde_json::to_value(&self.nodes).expect("serialize graph schema"))
    }
}
