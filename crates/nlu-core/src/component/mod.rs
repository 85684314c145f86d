//! Contrato de componentes del grafo.
//!
//! Un componente es una unidad que declara qué atributos produce
//! (`provides`), cuáles necesita ya presentes en el mensaje (`requires`) y
//! qué otros componentes deben haberse construido antes
//! (`required_components`). Este módulo define:
//! - `GraphComponent`: interfaz tipada que implementa cada componente.
//! - `ComponentFactory` / `ComponentInstance`: interfaz neutra (object-safe)
//!   usada por el runner, con un adaptador blanket desde `GraphComponent`.
//! - `ResourceSet`: recursos compartidos provistos por componentes upstream.
//! - `ComponentRegistry`: conjunto cerrado de tipos disponibles por nombre.

pub mod definition;
pub mod factory;
pub mod registry;
pub mod resources;

pub use definition::{ComponentDeclaration, GraphComponent};
pub use factory::{ComponentFactory, ComponentInstance, ComponentType};
pub use registry::ComponentRegistry;
pub use resources::{ProvidedResource, ResourceSet, SharedResource};
