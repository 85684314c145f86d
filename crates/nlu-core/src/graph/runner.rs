//! `GraphRunner`: resuelve un `GraphSchema` contra un `ComponentRegistry`,
//! ordena los nodos y construye cada componente una única vez por corrida.
//!
//! Ensamblado:
//! 1. `plan`: factory + config efectiva por nodo, aristas desde
//!    `required_components` y `requires`, orden topológico.
//! 2. `assemble`: por nodo en orden, fingerprint (config + recursos de los
//!    componentes requeridos); si otro nodo ya construyó ese fingerprint se
//!    comparte la instancia, si no se invoca `create`. El recurso de
//!    `provide` queda en el `ResourceSet` bajo el nombre del componente.
//!
//! Cada paso emite un `GraphEvent` en el `EventStore`.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde_json::{json, Value};
use uuid::Uuid;

use super::order::topological_order;
use super::pipeline::{Pipeline, PipelineNode};
use super::schema::GraphSchema;
use crate::cache::{InMemoryOutputCache, OutputCache};
use crate::component::{ComponentDeclaration, ComponentFactory, ComponentInstance, ComponentRegistry, ResourceSet};
use crate::config::{resolve_config, EngineConfig};
use crate::constants::ENGINE_VERSION;
use crate::errors::GraphError;
use crate::event::{EventStore, GraphEvent, GraphEventKind, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::model::{ExecutionContext, Fingerprintable, NodeFingerprintInput};
use crate::storage::{LocalModelStorage, ModelStorage, Resource};

/// Nodo resuelto, listo para construir.
pub struct PlannedNode {
    pub name: String,
    pub declaration: ComponentDeclaration,
    pub config: Value,     // defaults + overrides
    pub depends_on: Vec<String>,
    factory: Arc<dyn ComponentFactory>,
}

impl std::fmt::Debug for PlannedNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannedNode")
         .field("name", &self.name)
         .field("component", &self.declaration.name)
         .field("config", &self.config)
         .field("depends_on", &self.depends_on)
         .finish()
    }
}

/// Nodos en orden de construcción.
#[derive(Debug)]
pub struct GraphPlan {
    pub schema_hash: String,
    pub nodes: Vec<PlannedNode>,
}

impl GraphPlan {
    pub fn order(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }
}

pub struct GraphRunner<E: EventStore> {
    registry: ComponentRegistry,
    storage: Arc<dyn ModelStorage>,
    event_store: E,
    config: EngineConfig,
    output_cache: Option<Arc<dyn OutputCache>>,
}

impl GraphRunner<InMemoryEventStore> {
    /// Runner con eventos en memoria y sin cache de outputs.
    pub fn new(registry: ComponentRegistry, storage: Arc<dyn ModelStorage>) -> Self {
        Self::with_stores(registry, storage, InMemoryEventStore::default())
    }

    /// Runner configurado desde el entorno (`NLUFLOW_*`, `.env`).
    pub fn from_env(registry: ComponentRegistry) -> Self {
        let config = EngineConfig::from_env();
        let storage: Arc<dyn ModelStorage> = Arc::new(LocalModelStorage::new(config.storage_dir.clone()));
        let mut runner = Self::new(registry, storage);
        if config.output_cache {
            runner = runner.with_output_cache(Arc::new(InMemoryOutputCache::new()));
        }
        runner.with_config(config)
    }
}

impl<E: EventStore> GraphRunner<E> {
    pub fn with_stores(registry: ComponentRegistry, storage: Arc<dyn ModelStorage>, event_store: E) -> Self {
        Self { registry,
               storage,
               event_store,
               config: EngineConfig { output_cache: false,
                                      ..EngineConfig::default() },
               output_cache: None }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_output_cache(mut self, cache: Arc<dyn OutputCache>) -> Self {
        self.output_cache = Some(cache);
        self
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    pub fn events(&self, run_id: Uuid) -> Vec<GraphEvent> {
        self.event_store.list(run_id)
    }

    /// Paquetes nativos declarados por los componentes del schema que
    /// `is_available` no reconoce, como pares `(nodo, paquete)`. Sólo
    /// informativo: el ensamblado no lo comprueba.
    pub fn missing_packages(&self,
                            schema: &GraphSchema,
                            is_available: impl Fn(&str) -> bool)
                            -> Result<Vec<(String, String)>, GraphError> {
        let mut missing = Vec::new();
        for (name, node) in schema.nodes() {
            let factory = self.factory_for(&node.component)?;
            for pkg in factory.declaration().required_packages {
                if !is_available(&pkg) {
                    warn!("graph:missing_package node={name} component={} package={pkg}", node.component);
                    missing.push((name.to_string(), pkg));
                }
            }
        }
        Ok(missing)
    }

    fn factory_for(&self, component: &str) -> Result<Arc<dyn ComponentFactory>, GraphError> {
        self.registry
            .get(component)
            .ok_or_else(|| GraphError::UnknownComponent(component.to_string()))
    }

    /// Resuelve factories, configuración y orden sin construir nada.
    pub fn plan(&self, schema: &GraphSchema) -> Result<GraphPlan, GraphError> {
        let mut names = Vec::with_capacity(schema.len());
        let mut resolved = Vec::with_capacity(schema.len());
        for (name, node) in schema.nodes() {
            let factory = self.factory_for(&node.component)?;
            let declaration = factory.declaration();
            let config = resolve_config(&declaration.name, &declaration.default_config, &node.config)
                .map_err(|source| GraphError::Creation { node: name.to_string(),
                                                         source })?;
            names.push(name.to_string());
            resolved.push((declaration, config, factory));
        }

        let mut deps: Vec<Vec<usize>> = vec![Vec::new(); names.len()];
        for (i, (decl, _, _)) in resolved.iter().enumerate() {
            for required in &decl.required_components {
                let providers: Vec<usize> = resolved.iter()
                                                    .enumerate()
                                                    .filter(|(j, (d, _, _))| *j != i && &d.name == required)
                                                    .map(|(j, _)| j)
                                                    .collect();
                if providers.is_empty() {
                    return Err(GraphError::MissingComponent { node: names[i].clone(),
                                                              component: required.clone() });
                }
                deps[i].extend(providers);
            }
            for key in &decl.requires {
                let providers: Vec<usize> = resolved.iter()
                                                    .enumerate()
                                                    .filter(|(j, (d, _, _))| *j != i && d.provides.contains(key))
                                                    .map(|(j, _)| j)
                                                    .collect();
                if providers.is_empty() {
                    return Err(GraphError::UnsatisfiedRequirement { node: names[i].clone(),
                                                                    key: key.clone() });
                }
                deps[i].extend(providers);
            }
            deps[i].sort_unstable();
            deps[i].dedup();
        }

        let order = topological_order(&names, &deps)?;
        let mut slots: Vec<Option<(ComponentDeclaration, Value, Arc<dyn ComponentFactory>)>> =
            resolved.into_iter().map(Some).collect();
        let mut nodes = Vec::with_capacity(order.len());
        for i in order {
            let Some((declaration, config, factory)) = slots[i].take() else {
                continue;
            };
            let depends_on = deps[i].iter().map(|d| names[*d].clone()).collect();
            nodes.push(PlannedNode { name: names[i].clone(),
                                     declaration,
                                     config,
                                     depends_on,
                                     factory });
        }
        Ok(GraphPlan { schema_hash: schema.schema_hash(),
                       nodes })
    }

    /// Construye el grafo y devuelve un `Pipeline` listo para procesar
    /// mensajes. Cada configuración distinta de componente se construye una
    /// sola vez.
    pub fn assemble(&mut self, schema: &GraphSchema) -> Result<Pipeline, GraphError> {
        let plan = self.plan(schema)?;
        let ctx = ExecutionContext::new(plan.schema_hash.clone());
        let run_id = ctx.run_id;
        info!("graph:assemble:start run_id={run_id} nodes={}", plan.nodes.len());
        self.event_store.append_kind(run_id,
                                     GraphEventKind::GraphInitialized { schema_hash: plan.schema_hash.clone(),
                                                                        node_count: plan.nodes.len() });

        let mut resources = ResourceSet::new();
        let mut built: HashMap<String, (String, Arc<dyn ComponentInstance>)> = HashMap::new();
        let mut nodes = Vec::with_capacity(plan.nodes.len());

        for planned in plan.nodes {
            let component = planned.declaration.name.clone();
            let fingerprint = self.node_fingerprint(&planned, &resources);

            let instance = match built.get(&fingerprint) {
                Some((first, instance)) => {
                    debug!("graph:reuse node={} from={first} fingerprint={fingerprint}", planned.name);
                    self.event_store.append_kind(run_id,
                                                 GraphEventKind::ComponentReused { node: planned.name.clone(),
                                                                                   component: component.clone(),
                                                                                   reused_from: first.clone(),
                                                                                   fingerprint: fingerprint.clone() });
                    instance.clone()
                }
                None => {
                    let instance = self.create_node(run_id, &ctx, &planned, &fingerprint, &resources)?;
                    built.insert(fingerprint.clone(), (planned.name.clone(), instance.clone()));
                    instance
                }
            };

            // el último proveedor en orden topológico queda registrado, aunque
            // su instancia sea compartida
            if let Some(shared) = instance.shared_resource() {
                self.event_store.append_kind(run_id,
                                             GraphEventKind::ResourceProvided { node: planned.name.clone(),
                                                                                component: component.clone(),
                                                                                resource_fingerprint:
                                                                                    shared.fingerprint() });
                resources.insert(component.clone(), shared);
            }

            nodes.push(PipelineNode { name: planned.name,
                                      component,
                                      fingerprint,
                                      provides: planned.declaration.provides,
                                      instance });
        }

        let graph_fingerprint = hash_value(&json!({
                                               "engine_version": ENGINE_VERSION,
                                               "schema_hash": plan.schema_hash,
                                               "node_fingerprints": nodes.iter().map(|n| n.fingerprint.as_str()).collect::<Vec<_>>()
                                           }));
        self.event_store
            .append_kind(run_id, GraphEventKind::GraphAssembled { graph_fingerprint: graph_fingerprint.clone() });
        info!("graph:assemble:done run_id={run_id} instances={} fingerprint={graph_fingerprint}", built.len());

        Ok(Pipeline::new(run_id,
                         nodes,
                         resources,
                         graph_fingerprint,
                         self.output_cache.clone(),
                         self.config.parallel_batch))
    }

    fn node_fingerprint(&self, planned: &PlannedNode, resources: &ResourceSet) -> String {
        let dependency_fps: Vec<(String, String)> =
            planned.declaration
                   .required_components
                   .iter()
                   .filter_map(|c| resources.fingerprint_of(c).map(|fp| (c.clone(), fp)))
                   .collect();
        NodeFingerprintInput { engine_version: ENGINE_VERSION,
                               component: &planned.declaration.name,
                               config: &planned.config,
                               dependencies: dependency_fps.iter().map(|(c, fp)| (c.as_str(), fp.as_str())).collect() }
            .compute()
    }

    fn create_node(&mut self,
                   run_id: Uuid,
                   ctx: &ExecutionContext,
                   planned: &PlannedNode,
                   fingerprint: &str,
                   resources: &ResourceSet)
                   -> Result<Arc<dyn ComponentInstance>, GraphError> {
        let component = planned.declaration.name.clone();
        let resource = Resource::new(planned.name.clone(), fingerprint);
        let node_ctx = ctx.for_node(&planned.name);
        debug!("graph:create node={} component={component} fingerprint={fingerprint}", planned.name);
        match planned.factory
                     .create(&planned.config, self.storage.as_ref(), &resource, &node_ctx, resources)
        {
            Ok(instance) => {
                self.event_store.append_kind(run_id,
                                             GraphEventKind::ComponentCreated { node: planned.name.clone(),
                                                                                component,
                                                                                fingerprint: fingerprint.to_string() });
                Ok(instance)
            }
            Err(source) => {
                error!("graph:create:failed node={} component={component}: {source}", planned.name);
                self.event_store.append_kind(run_id,
                                             GraphEventKind::ComponentFailed { node: planned.name.clone(),
                                                                               component,
                                                                               error: source.clone() });
                Err(GraphError::Creation { node: planned.name.clone(),
                                           source })
            }
        }
    }
}
