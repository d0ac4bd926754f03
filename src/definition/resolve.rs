use crate::error::BuildError;
use crate::graph::{Buildable, InteractionGraph};
use crate::schema::value::number_to_json;
use crate::schema::{FieldDescriptor, FieldKind, FieldValue};
use serde_json::{Map, Value};

/// Resolves one field value, guided by its descriptor.
///
/// Descriptors with no reachable reference take the plain-data path;
/// otherwise the walk follows the descriptor into arrays, objects and
/// records so nested definitions are resolved in place.
pub(crate) fn resolve_field(
    value: &FieldValue,
    descriptor: &FieldDescriptor,
    graph: &mut InteractionGraph,
) -> Result<Value, BuildError> {
    if !descriptor.contains_reference() || value.is_null() {
        return resolve_value(value, graph);
    }

    if descriptor.is_many() {
        if let FieldValue::Array(items) = value {
            let element = descriptor.single();
            return items
                .iter()
                .map(|item| resolve_field(item, &element, graph))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }
    }

    match (descriptor.kind(), value) {
        (FieldKind::Object(schema), FieldValue::Object(entries)) => {
            let mut resolved = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                let entry = match schema.get(key) {
                    Some(field) => resolve_field(entry, field, graph)?,
                    None => resolve_value(entry, graph)?,
                };
                resolved.insert(key.clone(), entry);
            }
            Ok(Value::Object(resolved))
        }
        (FieldKind::Record(value_type), FieldValue::Object(entries)) => {
            let mut resolved = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                resolved.insert(key.clone(), resolve_field(entry, value_type, graph)?);
            }
            Ok(Value::Object(resolved))
        }
        _ => resolve_value(value, graph),
    }
}

/// Converts a value to JSON, resolving any buildable or scope it meets.
pub(crate) fn resolve_value(
    value: &FieldValue,
    graph: &mut InteractionGraph,
) -> Result<Value, BuildError> {
    Ok(match value {
        FieldValue::Null => Value::Null,
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::Number(n) => number_to_json(*n),
        FieldValue::String(s) => Value::String(s.clone()),
        FieldValue::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, graph))
                .collect::<Result<_, _>>()?,
        ),
        FieldValue::Object(entries) => {
            let mut resolved = Map::with_capacity(entries.len());
            for (key, entry) in entries {
                resolved.insert(key.clone(), resolve_value(entry, graph)?);
            }
            Value::Object(resolved)
        }
        FieldValue::Node(node) => node.build(graph)?.into_value(),
        FieldValue::Scope(scope) => scope.build(graph)?.into_value(),
        FieldValue::When(when) => match when.as_ref().clone().value_of() {
            Some(inner) => resolve_value(&inner, graph)?,
            None => Value::Null,
        },
    })
}
