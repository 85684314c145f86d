//! Pipeline MitieNLP + extractor upstream + LanguageModelTokenizer.

use std::sync::Arc;

use nlu_components::{register_all, LanguageModelTokenizer, MitieModel, MitieNlp};
use nlu_core::constants::Attribute;
use nlu_core::{ComponentError, ComponentRegistry, ExecutionContext, GraphComponent, GraphError, GraphEventKind,
               GraphRunner, GraphSchema, LanguageModelDoc, LocalModelStorage, Message, ModelStorage, Resource,
               ResourceSet, Token};
use serde_json::{json, Value};
use tempfile::TempDir;

/// Extractor upstream de prueba: documento por palabras separadas por espacio.
struct WhitespaceLanguageModel;

impl GraphComponent for WhitespaceLanguageModel {
    const NAME: &'static str = "HFTransformersNLP";

    fn provides() -> Vec<String> {
        vec!["text_language_model_doc".into(), "response_language_model_doc".into()]
    }

    fn create(_: &Value, _: &dyn ModelStorage, _: &Resource, _: &ExecutionContext, _: &ResourceSet)
              -> Result<Self, ComponentError> {
        Ok(WhitespaceLanguageModel)
    }

    fn process(&self, message: &mut Message) -> Result<(), ComponentError> {
        for attribute in Attribute::DENSE_FEATURIZABLE {
            let Some(text) = message.get_text(attribute).map(str::to_string) else {
                continue;
            };
            let mut tokens = Vec::new();
            let mut offset = 0;
            for word in text.split(' ') {
                if !word.is_empty() {
                    tokens.push(Token::at(word, offset));
                }
                offset += word.chars().count() + 1;
            }
            if let Some(key) = attribute.language_model_doc_key() {
                message.set(key, LanguageModelDoc::new(tokens)?);
            }
        }
        Ok(())
    }
}

struct Fixture {
    dir: TempDir,
    model_path: String,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("total_word_feature_extractor.dat");
        std::fs::write(&model_path, b"\x00mitie-total-word-feature-extractor").unwrap();
        let model_path = model_path.to_string_lossy().into_owned();
        Self { dir, model_path }
    }

    fn runner(&self) -> GraphRunner<nlu_core::InMemoryEventStore> {
        let mut registry = ComponentRegistry::new().with::<WhitespaceLanguageModel>();
        register_all(&mut registry);
        let storage: Arc<dyn ModelStorage> = Arc::new(LocalModelStorage::new(self.dir.path().join("models")));
        GraphRunner::new(registry, storage)
    }

    fn schema(&self, tokenizer_config: Value) -> GraphSchema {
        let mut s = GraphSchema::new();
        s.add_node("tokenizer", LanguageModelTokenizer::NAME, tokenizer_config).unwrap();
        s.add_node("hf", "HFTransformersNLP", Value::Null).unwrap();
        s.add_node("mitie", MitieNlp::NAME, json!({"model": self.model_path})).unwrap();
        s
    }
}

#[test]
fn tokens_follow_language_model_documents() {
    let fx = Fixture::new();
    let mut runner = fx.runner();
    let pipeline = runner.assemble(&fx.schema(json!({"intent_tokenization_flag": true}))).unwrap();

    let mut msg = Message::from_text("I want to book a flight").with("intent", "book_flight")
                                                                .with("response", "sure thing");
    pipeline.process(&mut msg).unwrap();

    let text: Vec<_> = msg.get_tokens(Attribute::Text).unwrap().iter().map(|t| t.text().to_string()).collect();
    assert_eq!(text, vec!["I", "want", "to", "book", "a", "flight"]);
    assert_eq!(msg.get_tokens(Attribute::Intent).unwrap(),
               &[Token::new("book", 0, 4), Token::new("flight", 5, 11)]);
    assert_eq!(msg.get_tokens(Attribute::Response).unwrap(),
               &[Token::new("sure", 0, 4), Token::new("thing", 5, 10)]);
}

#[test]
fn mitie_model_is_shared_with_path_fingerprint() {
    let fx = Fixture::new();
    let mut runner = fx.runner();
    let pipeline = runner.assemble(&fx.schema(Value::Null)).unwrap();

    let model = pipeline.resources().get::<MitieModel>(MitieNlp::NAME).unwrap();
    assert_eq!(model.model_path.to_string_lossy(), fx.model_path);
    let provided: Vec<_> = runner.events(pipeline.run_id())
                                 .into_iter()
                                 .filter_map(|e| match e.kind {
                                     GraphEventKind::ResourceProvided { resource_fingerprint, .. } => {
                                         Some(resource_fingerprint)
                                     }
                                     _ => None,
                                 })
                                 .collect();
    assert_eq!(provided, vec![fx.model_path.clone()]);
}

#[test]
fn duplicated_mitie_nodes_load_extractor_once() {
    let fx = Fixture::new();
    let mut runner = fx.runner();
    let mut s = fx.schema(Value::Null);
    s.add_node("mitie_again", MitieNlp::NAME, json!({"model": fx.model_path})).unwrap();
    let pipeline = runner.assemble(&s).unwrap();

    let created = runner.events(pipeline.run_id())
                        .into_iter()
                        .filter(|e| matches!(&e.kind, GraphEventKind::ComponentCreated { component, .. } if component == MitieNlp::NAME))
                        .count();
    assert_eq!(created, 1);
    assert!(pipeline.node("mitie").unwrap().shares_instance_with(pipeline.node("mitie_again").unwrap()));
}

#[test]
fn bad_model_path_aborts_assembly() {
    let fx = Fixture::new();
    let mut runner = fx.runner();
    let mut s = GraphSchema::new();
    s.add_node("mitie", MitieNlp::NAME, json!({"model": "does/not/exist.dat"})).unwrap();
    let err = runner.assemble(&s).unwrap_err();
    assert_eq!(err,
               GraphError::Creation { node: "mitie".into(),
                                      source: ComponentError::configuration("MitieNLP",
                                                                            "model",
                                                                            "missing or non-existent model path") });
}

#[test]
fn tokenizer_without_upstream_extractor_is_rejected() {
    let fx = Fixture::new();
    let runner = fx.runner();
    let s = GraphSchema::from_components(&[LanguageModelTokenizer::NAME]).unwrap();
    assert_eq!(runner.plan(&s).unwrap_err(),
               GraphError::MissingComponent { node: "LanguageModelTokenizer".into(),
                                              component: "HFTransformersNLP".into() });
}

#[test]
fn missing_mitie_package_is_only_reported() {
    let fx = Fixture::new();
    let mut runner = fx.runner();
    let s = fx.schema(Value::Null);
    assert_eq!(runner.missing_packages(&s, |_| false).unwrap(),
               vec![("mitie".to_string(), "mitie".to_string())]);
    assert!(runner.assemble(&s).is_ok());
}

#[test]
fn batch_processes_messages_independently() {
    let fx = Fixture::new();
    let mut runner = fx.runner();
    let pipeline = runner.assemble(&fx.schema(Value::Null)).unwrap();

    // texto vacío: se omite sin error
    let mut messages = vec![Message::from_text("hola mundo"), Message::from_text("")];
    let results = pipeline.process_batch(&mut messages);
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(messages[0].get_tokens(Attribute::Text).unwrap().len(), 2);
    assert!(messages[1].get_tokens(Attribute::Text).is_none());
}
