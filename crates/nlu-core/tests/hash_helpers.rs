use nlu_core::hashing::{hash_str, hash_value, to_canonical_json};
use nlu_core::model::NodeFingerprintInput;
use serde_json::json;
use std::collections::BTreeMap;

#[test]
fn hash_value_produces_hex_64() {
    let v = json!({"b":2, "a":1});
    let h = hash_value(&v);
    // blake3 hex length is 64
    assert_eq!(h.len(), 64);
    // deterministic: same value with different key order yields same hash
    let v2 = json!({"a":1, "b":2});
    assert_eq!(h, hash_value(&v2));
}

#[test]
fn hash_value_matches_hash_of_canonical_json() {
    let v = json!({"model": "data/total_word_feature_extractor.dat", "z": [1, 2]});
    assert_eq!(hash_value(&v), hash_str(&to_canonical_json(&v)));
}

#[test]
fn node_fingerprint_depends_on_dependency_fingerprints() {
    let config = json!({"intent_tokenization_flag": false});
    let mut deps_a = BTreeMap::new();
    deps_a.insert("MitieNLP", "data/a.dat");
    let mut deps_b = BTreeMap::new();
    deps_b.insert("MitieNLP", "data/b.dat");

    let fp = |deps: BTreeMap<&str, &str>| {
        NodeFingerprintInput { engine_version: "G1.0",
                               component: "LanguageModelTokenizer",
                               config: &config,
                               dependencies: deps }.compute()
    };
    assert_eq!(fp(deps_a.clone()), fp(deps_a.clone()));
    assert_ne!(fp(deps_a), fp(deps_b));
}
