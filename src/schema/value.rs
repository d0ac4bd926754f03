use super::When;
use crate::graph::{Buildable, Node};
use crate::scope::Scope;
use ahash::AHashMap;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Constructor arguments and patch updates: field name to value.
pub type FieldMap = AHashMap<String, FieldValue>;

/// A field value as handed to a definition factory.
///
/// Besides plain data this can carry nested buildables, scopes and
/// conditional wrappers, all of which are resolved later against a graph.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<FieldValue>),
    Object(IndexMap<String, FieldValue>),
    Node(Node),
    Scope(Scope),
    When(Box<When>),
}

impl FieldValue {
    /// Wraps any buildable as a node value.
    pub fn node<B: Buildable + 'static>(buildable: B) -> Self {
        FieldValue::Node(Rc::new(buildable))
    }

    /// Builds an object value from key/value pairs, keeping their order.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        FieldValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Runtime kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::Array(_) => "array",
            FieldValue::Object(_) => "object",
            FieldValue::Node(_) => "buildable",
            FieldValue::Scope(_) => "scope",
            FieldValue::When(_) => "when",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            FieldValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            FieldValue::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Unwraps a conditional wrapper; `None` means the value is absent.
    pub(crate) fn settle(self) -> Option<FieldValue> {
        match self {
            FieldValue::When(when) => when.value_of(),
            other => Some(other),
        }
    }
}

/// Converts a number the way it is displayed: whole numbers become integers.
pub(crate) fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Array(items) => write!(f, "[array of {}]", items.len()),
            FieldValue::Object(_) => write!(f, "[object]"),
            FieldValue::Node(_) => write!(f, "[buildable]"),
            FieldValue::Scope(_) => write!(f, "[scope]"),
            FieldValue::When(_) => write!(f, "[when]"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<Node> for FieldValue {
    fn from(node: Node) -> Self {
        FieldValue::Node(node)
    }
}

impl From<Scope> for FieldValue {
    fn from(scope: Scope) -> Self {
        FieldValue::Scope(scope)
    }
}

impl From<&Scope> for FieldValue {
    fn from(scope: &Scope) -> Self {
        FieldValue::Scope(scope.clone())
    }
}

impl From<When> for FieldValue {
    fn from(when: When) -> Self {
        FieldValue::When(Box::new(when))
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, FieldValue>> for FieldValue {
    fn from(map: IndexMap<String, FieldValue>) -> Self {
        FieldValue::Object(map)
    }
}

impl From<BTreeMap<String, FieldValue>> for FieldValue {
    fn from(map: BTreeMap<String, FieldValue>) -> Self {
        FieldValue::Object(map.into_iter().collect())
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null),
            Value::String(s) => FieldValue::String(s),
            Value::Array(items) => FieldValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                FieldValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// Builds a [`FieldMap`] from `"key" => value` pairs.
///
/// ```
/// use batono::fields;
///
/// let args = fields! { "label" => "Save", "count" => 3 };
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::schema::FieldMap::default() };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut map = $crate::schema::FieldMap::default();
        $( map.insert(::std::string::String::from($key), $crate::schema::FieldValue::from($value)); )+
        map
    }};
}
