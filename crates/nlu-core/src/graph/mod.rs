//! Ensamblado y ejecución del grafo de componentes.

mod order;
mod pipeline;
mod runner;
mod schema;

pub use order::topological_order;
pub use pipeline::{Pipeline, PipelineNode};
pub use runner::{GraphPlan, GraphRunner, PlannedNode};
pub use schema::{GraphSchema, SchemaNode};
