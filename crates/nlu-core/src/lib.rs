//! nlu-core: contrato de componentes y ensamblado determinista del grafo NLU.
pub mod cache;
pub mod component;
pub mod config;
pub mod constants;
pub mod errors;
pub mod event;
pub mod graph;
pub mod hashing;
pub mod model;
pub mod storage;

pub use cache::{CachedOutput, InMemoryOutputCache, OutputCache};
pub use component::{ComponentDeclaration, ComponentFactory, ComponentInstance, ComponentRegistry, ComponentType,
                    GraphComponent, ProvidedResource, ResourceSet, SharedResource};
pub use config::EngineConfig;
pub use constants::Attribute;
pub use errors::{ComponentError, GraphError};
pub use event::{EventStore, GraphEvent, GraphEventKind, InMemoryEventStore};
pub use graph::{GraphRunner, GraphSchema, Pipeline};
pub use model::{ExecutionContext, Fingerprintable, LanguageModelDoc, Message, MessageValue, Token};
pub use storage::{LocalModelStorage, ModelStorage, Resource};
