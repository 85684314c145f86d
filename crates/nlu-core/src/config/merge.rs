//! Utilidades para fusionar configuración JSON de forma determinista.
//!
//! Merge "shallow": las claves de `b` reemplazan a las de `a`. La config
//! efectiva de un nodo es `defaults -> overrides` del schema.

use serde_json::{Map, Value};

use crate::errors::ComponentError;

/// Merge shallow: keys from `b` override keys from `a` when both are objects.
/// Cuando alguno de los dos valores no es objeto, `b` tiene precedencia.
pub fn merge_json(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (k, v) in mb.iter() {
                out.insert(k.clone(), v.clone());
            }
            Value::Object(out)
        }
        // Non-objects: override
        (_, other) => other.clone(),
    }
}

/// Config efectiva de un componente: defaults declarados + overrides.
///
/// `null` en overrides equivale a "sin overrides". Cualquier otro valor no
/// objeto es un error de configuración del componente.
pub fn resolve_config(component: &str, defaults: &Value, overrides: &Value) -> Result<Value, ComponentError> {
    match overrides {
        Value::Null => Ok(merge_json(defaults, &Value::Object(Map::new()))),
        Value::Object(_) => Ok(merge_json(defaults, overrides)),
        other => Err(ComponentError::configuration(component,
                                                   "<root>",
                                                   format!("component config must be an object, got {other}"))),
    }
}
