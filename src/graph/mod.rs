//! The interaction graph: the root context every resolution runs against.
//!
//! A graph owns a generated id, a schema version tag, one registry per
//! [`RegistryKind`] and a token counter. Serializing it resolves the layout
//! once and returns the layout together with every registry that the walk
//! populated.

pub mod buildable;
pub mod defined;
pub mod registry;

pub use buildable::*;
pub use defined::*;
pub use registry::*;

use crate::error::BuildError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Schema tag written to every payload unless configured otherwise.
pub const DEFAULT_SCHEMA_ID: &str = "batono.interaction-graph.v1";

/// Fully resolved output of [`InteractionGraph::serialize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPayload {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "$graph")]
    pub graph: String,
    pub layout: Defined,
    #[serde(flatten)]
    pub registries: Map<String, Value>,
}

impl GraphPayload {
    /// The entries of one registry, keyed by generated name.
    pub fn registry(&self, kind: RegistryKind) -> Option<&Map<String, Value>> {
        self.registries
            .get(kind.output_key())
            .and_then(Value::as_object)
    }
}

pub struct InteractionGraph {
    schema_id: String,
    graph_id: String,
    layout: Node,
    registries: Vec<Registry>,
}

pub struct GraphBuilder {
    layout: Node,
    schema_id: Option<String>,
    graph_id: Option<String>,
}

impl GraphBuilder {
    pub fn new(layout: Node) -> Self {
        Self {
            layout,
            schema_id: None,
            graph_id: None,
        }
    }

    pub fn with_schema_id(mut self, schema_id: impl Into<String>) -> Self {
        self.schema_id = Some(schema_id.into());
        self
    }

    /// Fixes the graph id instead of generating one.
    pub fn with_graph_id(mut self, graph_id: impl Into<String>) -> Self {
        self.graph_id = Some(graph_id.into());
        self
    }

    pub fn build(self) -> InteractionGraph {
        InteractionGraph {
            schema_id: self
                .schema_id
                .unwrap_or_else(|| DEFAULT_SCHEMA_ID.to_string()),
            graph_id: self.graph_id.unwrap_or_else(generate_graph_id),
            layout: self.layout,
            registries: RegistryKind::ALL.into_iter().map(Registry::new).collect(),
        }
    }
}

fn generate_graph_id() -> String {
    format!("g_{:08x}", rand::random::<u32>())
}

impl InteractionGraph {
    pub fn new<B: Buildable + 'static>(layout: B) -> Self {
        Self::builder(layout).build()
    }

    pub fn builder<B: Buildable + 'static>(layout: B) -> GraphBuilder {
        GraphBuilder::new(Rc::new(layout))
    }

    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Issues `<prefix><n>`. The counter is process-wide, so a token drawn
    /// here never repeats one handed out by another graph.
    pub fn next_token(&self, prefix: &str) -> String {
        format!("{}{}", prefix, NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn registry(&self, kind: RegistryKind) -> &Registry {
        let index = self.registry_index(kind);
        &self.registries[index]
    }

    /// Name of the definition with identity `id`, assigning one on first sight.
    pub fn register_or_lookup(&mut self, kind: RegistryKind, id: DefinitionId) -> String {
        let index = self.registry_index(kind);
        self.registries[index].register_or_lookup(id)
    }

    pub fn record_body(&mut self, kind: RegistryKind, name: &str, body: Vec<Defined>) {
        let index = self.registry_index(kind);
        self.registries[index].record_body(name, body);
    }

    fn registry_index(&self, kind: RegistryKind) -> usize {
        RegistryKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default()
    }

    /// Resolves the layout and returns the whole graph.
    ///
    /// Can be called repeatedly; registries are keyed by identity, so later
    /// calls overwrite entries with identical content.
    pub fn serialize(&mut self) -> Result<GraphPayload, BuildError> {
        log::debug!("serializing graph '{}'", self.graph_id);
        let layout = Rc::clone(&self.layout);
        let layout = layout.build(self)?;

        let registries = self
            .registries
            .iter()
            .map(|r| (r.kind().output_key().to_string(), r.to_json()))
            .collect();

        Ok(GraphPayload {
            schema: self.schema_id.clone(),
            graph: self.graph_id.clone(),
            layout,
            registries,
        })
    }

    pub fn to_json(&mut self) -> Result<Value, BuildError> {
        let payload = self.serialize()?;
        serde_json::to_value(payload).map_err(|e| BuildError::Serialization(e.to_string()))
    }
}
