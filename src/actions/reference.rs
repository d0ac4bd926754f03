use crate::error::BuildError;
use crate::graph::{
    Buildable, Defined, DefinitionId, InteractionGraph, Node, RegistryKind, build_definition,
};
use crate::schema::FieldValue;
use serde_json::{Map, Value};
use std::rc::Rc;

/// A definition that lives in one of the graph's registries.
///
/// Resolving it registers it by identity (once per graph), records its
/// resolved body under the generated name and returns a reference record
/// `{ type: "<kind>-reference", target, payload? }` in its place.
#[derive(Debug, Clone)]
pub struct DefinedReference {
    id: DefinitionId,
    kind: RegistryKind,
    definitions: Rc<[Node]>,
    payload: Option<Map<String, Value>>,
}

impl DefinedReference {
    pub fn new(kind: RegistryKind, definitions: Vec<Node>) -> Self {
        Self {
            id: DefinitionId::next(),
            kind,
            definitions: definitions.into(),
            payload: None,
        }
    }

    pub fn action(definitions: Vec<Node>) -> Self {
        Self::new(RegistryKind::Action, definitions)
    }

    pub fn flow(definitions: Vec<Node>) -> Self {
        Self::new(RegistryKind::Flow, definitions)
    }

    pub fn id(&self) -> DefinitionId {
        self.id
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    pub fn payload(&self) -> Option<&Map<String, Value>> {
        self.payload.as_ref()
    }

    /// A new reference to the same body carrying `payload`.
    ///
    /// The result is a distinct definition and is registered under its own name.
    pub fn with_payload(&self, payload: Map<String, Value>) -> Self {
        Self {
            id: DefinitionId::next(),
            kind: self.kind,
            definitions: Rc::clone(&self.definitions),
            payload: Some(payload),
        }
    }
}

impl Buildable for DefinedReference {
    fn build(&self, graph: &mut InteractionGraph) -> Result<Defined, BuildError> {
        let name = graph.register_or_lookup(self.kind, self.id);
        let body = self
            .definitions
            .iter()
            .map(|definition| definition.build(graph))
            .collect::<Result<Vec<_>, _>>()?;
        graph.record_body(self.kind, &name, body);

        let mut fields = Map::new();
        fields.insert("target".to_string(), Value::String(name));
        if let Some(payload) = &self.payload {
            fields.insert("payload".to_string(), Value::Object(payload.clone()));
        }
        build_definition(graph, self.kind.reference_type(), fields)
    }
}

impl From<DefinedReference> for FieldValue {
    fn from(reference: DefinedReference) -> Self {
        FieldValue::node(reference)
    }
}

impl From<&DefinedReference> for FieldValue {
    fn from(reference: &DefinedReference) -> Self {
        FieldValue::node(reference.clone())
    }
}
