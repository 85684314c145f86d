//! `Pipeline`: grafo ya ensamblado. Procesa mensajes recorriendo los nodos
//! en orden topológico y verifica que cada nodo sólo escriba lo que declara
//! en `provides`.

use std::fmt;
use std::sync::Arc;

use log::debug;
use rayon::prelude::*;
use uuid::Uuid;

use crate::cache::{output_cache_key, CachedOutput, OutputCache};
use crate::component::{ComponentInstance, ResourceSet, SharedResource};
use crate::errors::{ComponentError, GraphError};
use crate::model::Message;

pub struct PipelineNode {
    pub name: String,
    pub component: String,
    pub fingerprint: String,
    pub provides: Vec<String>,
    pub(crate) instance: Arc<dyn ComponentInstance>,
}

impl PipelineNode {
    /// Dos nodos comparten instancia si tenían el mismo fingerprint.
    pub fn shares_instance_with(&self, other: &PipelineNode) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Debug for PipelineNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineNode")
         .field("name", &self.name)
         .field("component", &self.component)
         .field("fingerprint", &self.fingerprint)
         .field("provides", &self.provides)
         .finish()
    }
}

pub struct Pipeline {
    run_id: Uuid,
    nodes: Vec<PipelineNode>,
    resources: ResourceSet,
    graph_fingerprint: String,
    output_cache: Option<Arc<dyn OutputCache>>,
    parallel_batch: bool,
}

impl Pipeline {
    pub(crate) fn new(run_id: Uuid,
                      nodes: Vec<PipelineNode>,
                      resources: ResourceSet,
                      graph_fingerprint: String,
                      output_cache: Option<Arc<dyn OutputCache>>,
                      parallel_batch: bool)
                      -> Self {
        Self { run_id,
               nodes,
               resources,
               graph_fingerprint,
               output_cache,
               parallel_batch }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn graph_fingerprint(&self) -> &str {
        &self.graph_fingerprint
    }

    pub fn nodes(&self) -> &[PipelineNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&PipelineNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    pub fn shared_resource(&self, component: &str) -> Option<&SharedResource> {
        self.resources.get_shared(component)
    }

    /// Procesa un mensaje. Se detiene en el primer nodo que falla.
    pub fn process(&self, message: &mut Message) -> Result<(), GraphError> {
        self.process_indexed(0, message)
    }

    /// Procesa un lote; cada mensaje es independiente y obtiene su propio
    /// resultado. En paralelo si `parallel_batch` está activo.
    pub fn process_batch(&self, messages: &mut [Message]) -> Vec<Result<(), GraphError>> {
        if self.parallel_batch {
            messages.par_iter_mut()
                    .enumerate()
                    .map(|(i, m)| self.process_indexed(i, m))
                    .collect()
        } else {
            messages.iter_mut()
                    .enumerate()
                    .map(|(i, m)| self.process_indexed(i, m))
                    .collect()
        }
    }

    fn process_indexed(&self, index: usize, message: &mut Message) -> Result<(), GraphError> {
        message.take_writes();
        for node in &self.nodes {
            let cache_key = self.output_cache.as_ref().map(|_| output_cache_key(&node.fingerprint, message));
            if let (Some(cache), Some(key)) = (&self.output_cache, &cache_key) {
                if let Some(cached) = cache.get(key) {
                    debug!("pipeline:cache_hit node={} message={index}", node.name);
                    cached.replay(message);
                    message.take_writes();
                    continue;
                }
            }

            node.instance.run(message).map_err(|source| GraphError::Process { node: node.name.clone(),
                                                                               message_index: index,
                                                                               source })?;
            let writes = message.take_writes();
            if let Some(key) = writes.iter().find(|k| !node.provides.contains(k)) {
                return Err(GraphError::Process { node: node.name.clone(),
                                                 message_index: index,
                                                 source: ComponentError::UndeclaredWrite { component:
                                                                                               node.component.clone(),
                                                                                           key: key.clone() } });
            }

            if let (Some(cache), Some(key)) = (&self.output_cache, cache_key) {
                cache.put(key, CachedOutput::capture(message, &writes));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
         .field("run_id", &self.run_id)
         .field("nodes", &self.nodes)
         .field("resources", &self.resources)
         .field("graph_fingerprint", &self.graph_fingerprint)
         .field("output_cache", &self.output_cache.is_some())
         .field("parallel_batch", &self.parallel_batch)
         .finish()
    }
}
