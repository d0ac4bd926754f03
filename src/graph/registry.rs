use super::Defined;
use ahash::AHashMap;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DEFINITION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a registrable definition, assigned once at construction.
///
/// Clones of a definition share its id; two structurally identical
/// definitions built separately never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionId(u64);

impl DefinitionId {
    pub fn next() -> Self {
        DefinitionId(NEXT_DEFINITION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The named registries a graph keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryKind {
    Action,
    Flow,
}

impl RegistryKind {
    pub const ALL: [RegistryKind; 2] = [RegistryKind::Action, RegistryKind::Flow];

    /// Key of this registry in the serialized payload.
    pub fn output_key(&self) -> &'static str {
        match self {
            RegistryKind::Action => "actions",
            RegistryKind::Flow => "flows",
        }
    }

    /// Prefix of generated entry names, e.g. `action_3`.
    pub fn name_prefix(&self) -> &'static str {
        match self {
            RegistryKind::Action => "action",
            RegistryKind::Flow => "flow",
        }
    }

    /// Type tag of the reference records pointing into this registry.
    pub fn reference_type(&self) -> &'static str {
        match self {
            RegistryKind::Action => "action-reference",
            RegistryKind::Flow => "flow-reference",
        }
    }
}

/// Identity-keyed naming plus the resolved bodies recorded under each name.
#[derive(Debug)]
pub struct Registry {
    kind: RegistryKind,
    names: AHashMap<DefinitionId, String>,
    bodies: Vec<(String, Vec<Defined>)>,
    latest_id: u64,
}

impl Registry {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            names: AHashMap::new(),
            bodies: Vec::new(),
            latest_id: 0,
        }
    }

    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Returns the name already assigned to `id`, or assigns the next one.
    pub fn register_or_lookup(&mut self, id: DefinitionId) -> String {
        if let Some(name) = self.names.get(&id) {
            return name.clone();
        }
        self.latest_id += 1;
        let name = format!("{}_{}", self.kind.name_prefix(), self.latest_id);
        log::debug!("registered {:?} in '{}' as '{}'", id, self.kind.output_key(), name);
        self.names.insert(id, name.clone());
        name
    }

    /// Stores the resolved body under `name`, replacing an earlier one.
    pub fn record_body(&mut self, name: &str, body: Vec<Defined>) {
        match self.bodies.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = body,
            None => self.bodies.push((name.to_string(), body)),
        }
    }

    pub fn body(&self, name: &str) -> Option<&[Defined]> {
        self.bodies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, body)| body.as_slice())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Entries in first-registration order.
    pub fn to_json(&self) -> Value {
        let entries: Map<String, Value> = self
            .bodies
            .iter()
            .map(|(name, body)| {
                let items = body.iter().cloned().map(Value::from).collect();
                (name.clone(), Value::Array(items))
            })
            .collect();
        Value::Object(entries)
    }
}
