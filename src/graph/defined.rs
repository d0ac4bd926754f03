use super::InteractionGraph;
use crate::error::BuildError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key carrying the owning graph's id on every resolved record.
pub const GRAPH_KEY: &str = "$graph";
/// Key carrying the type discriminator.
pub const TYPE_KEY: &str = "type";
/// Key carrying accumulated scope tokens.
pub const NODE_SCOPE_KEY: &str = "$node";

const RESERVED_KEYS: [&str; 3] = [GRAPH_KEY, TYPE_KEY, NODE_SCOPE_KEY];

/// A resolved, serialization-ready record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Defined(Map<String, Value>);

impl Defined {
    pub fn type_tag(&self) -> Option<&str> {
        self.0.get(TYPE_KEY).and_then(Value::as_str)
    }

    pub fn graph_id(&self) -> Option<&str> {
        self.0.get(GRAPH_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Scope tokens attached by enclosing scoped wrappers, innermost first.
    pub fn node_scopes(&self) -> Vec<&str> {
        self.0
            .get(NODE_SCOPE_KEY)
            .and_then(Value::as_array)
            .map(|tokens| tokens.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub(crate) fn push_node_scope(&mut self, token: String) {
        let tags = self
            .0
            .entry(NODE_SCOPE_KEY)
            .or_insert_with(|| Value::Array(Vec::new()));
        match tags {
            Value::Array(tokens) => tokens.push(Value::String(token)),
            other => *other = Value::Array(vec![Value::String(token)]),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Defined> for Value {
    fn from(defined: Defined) -> Self {
        defined.into_value()
    }
}

/// Stamps the graph id and type tag onto `fields`.
///
/// Fails if `fields` uses a reserved key: `$graph`, `type`, or `$node`,
/// which only scoped wrappers may write.
pub fn build_definition(
    graph: &InteractionGraph,
    type_tag: &str,
    fields: Map<String, Value>,
) -> Result<Defined, BuildError> {
    let mut record = Map::with_capacity(fields.len() + 2);
    record.insert(GRAPH_KEY.to_string(), Value::String(graph.graph_id().to_string()));
    record.insert(TYPE_KEY.to_string(), Value::String(type_tag.to_string()));

    for (key, value) in fields {
        if RESERVED_KEYS.contains(&key.as_str()) {
            return Err(BuildError::ReservedKey {
                type_tag: type_tag.to_string(),
                key,
            });
        }
        record.insert(key, value);
    }
    Ok(Defined(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::mock_graph;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn stamps_graph_and_type_first() {
        let graph = mock_graph();
        let defined = build_definition(&graph, "item", fields(json!({"label": "a"}))).unwrap();
        let keys: Vec<_> = defined.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["$graph", "type", "label"]);
        assert_eq!(defined.graph_id(), Some(graph.graph_id()));
        assert_eq!(defined.type_tag(), Some("item"));
    }

    #[test]
    fn rejects_reserved_keys() {
        let graph = mock_graph();
        for key in [GRAPH_KEY, TYPE_KEY, NODE_SCOPE_KEY] {
            let data: Map<String, Value> = [(key.to_string(), json!("x"))].into_iter().collect();
            let err = build_definition(&graph, "item", data).unwrap_err();
            assert_eq!(
                err,
                BuildError::ReservedKey {
                    type_tag: "item".to_string(),
                    key: key.to_string()
                }
            );
        }
    }

    #[test]
    fn node_scopes_accumulate_in_order() {
        let graph = mock_graph();
        let mut defined = build_definition(&graph, "item", Map::new()).unwrap();
        assert!(defined.node_scopes().is_empty());
        defined.push_node_scope("s_1".to_string());
        defined.push_node_scope("s_2".to_string());
        assert_eq!(defined.node_scopes(), vec!["s_1", "s_2"]);
    }
}
