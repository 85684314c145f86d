//! Pruebas para el merge de configuración (defaults + overrides).
//!
//! Verificamos la semántica shallow: claves de `b` sobreescriben claves de `a`.

use nlu_core::config::{merge_json, resolve_config};
use nlu_core::ComponentError;
use serde_json::{json, Value};

#[test]
fn merge_shallow_overrides_keys() {
    let a = json!({"x": 1, "y": {"z": 3}, "keep": "a"});
    let b = json!({"x": 2, "y": "replaced", "new": true});

    let out = merge_json(&a, &b);

    // claves simples son sobreescritas
    assert_eq!(out["x"], json!(2));
    // cuando b tiene un tipo no-objeto, reemplaza completamente
    assert_eq!(out["y"], json!("replaced"));
    // claves que sólo existen en a se mantienen
    assert_eq!(out["keep"], json!("a"));
    // claves nuevas en b aparecen
    assert_eq!(out["new"], json!(true));
}

#[test]
fn resolve_config_null_means_defaults() {
    let defaults = json!({"intent_tokenization_flag": false, "intent_split_symbol": "_"});
    assert_eq!(resolve_config("LanguageModelTokenizer", &defaults, &Value::Null).unwrap(), defaults);
}

#[test]
fn resolve_config_overrides_single_option() {
    let defaults = json!({"intent_tokenization_flag": false, "intent_split_symbol": "_"});
    let out = resolve_config("LanguageModelTokenizer", &defaults, &json!({"intent_tokenization_flag": true})).unwrap();
    assert_eq!(out, json!({"intent_tokenization_flag": true, "intent_split_symbol": "_"}));
}

#[test]
fn resolve_config_rejects_non_object() {
    let err = resolve_config("MitieNLP", &json!({}), &json!("model.dat")).unwrap_err();
    assert!(matches!(err, ComponentError::Configuration { ref option, .. } if option == "<root>"));
}
