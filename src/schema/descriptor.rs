use super::FieldValue;
use crate::error::{ValidationError, ValidationErrorKind};
use std::rc::Rc;

/// The base shape of a field.
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Any,
    Enum(Rc<[String]>),
    Union(Rc<[FieldDescriptor]>),
    Object(Rc<Schema>),
    Record(Rc<FieldDescriptor>),
    Buildable,
    Scope,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Any => "any",
            FieldKind::Enum(_) => "enum",
            FieldKind::Union(_) => "union",
            FieldKind::Object(_) => "object",
            FieldKind::Record(_) => "record",
            FieldKind::Buildable => "buildable",
            FieldKind::Scope => "scope",
        }
    }

    fn contains_reference(&self) -> bool {
        match self {
            FieldKind::Buildable | FieldKind::Scope => true,
            FieldKind::Union(branches) => branches.iter().any(|b| b.contains_reference),
            FieldKind::Object(schema) => schema.iter().any(|(_, d)| d.contains_reference),
            FieldKind::Record(value_type) => value_type.contains_reference,
            FieldKind::String
            | FieldKind::Number
            | FieldKind::Boolean
            | FieldKind::Any
            | FieldKind::Enum(_) => false,
        }
    }
}

/// An immutable description of one field's shape.
///
/// The modifier methods (`optional`, `nullable`, `many`) return a new
/// descriptor and leave the receiver untouched, so one descriptor can be
/// specialised independently by several schemas.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    kind: FieldKind,
    optional: bool,
    nullable: bool,
    many: bool,
    default_value: Option<FieldValue>,
    contains_reference: bool,
}

impl FieldDescriptor {
    pub fn new(kind: FieldKind) -> Self {
        let contains_reference = kind.contains_reference();
        Self {
            kind,
            optional: false,
            nullable: false,
            many: false,
            default_value: None,
            contains_reference,
        }
    }

    /// A union of the given branches, tried in order.
    pub fn union(branches: Vec<FieldDescriptor>) -> Result<Self, ValidationError> {
        if branches.is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidUnion,
                "schema",
                "union",
                "must have at least one type",
            ));
        }
        Ok(Self::new(FieldKind::Union(branches.into())))
    }

    pub fn optional(&self) -> Self {
        Self {
            optional: true,
            default_value: None,
            ..self.clone()
        }
    }

    /// Optional, with `default` injected when the field is omitted.
    pub fn optional_or(&self, default: impl Into<FieldValue>) -> Self {
        Self {
            optional: true,
            default_value: Some(default.into()),
            ..self.clone()
        }
    }

    pub fn nullable(&self) -> Self {
        Self {
            nullable: true,
            ..self.clone()
        }
    }

    pub fn many(&self) -> Self {
        Self {
            many: true,
            ..self.clone()
        }
    }

    /// The element descriptor of a `many` field.
    pub(crate) fn single(&self) -> Self {
        Self {
            many: false,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn base_type(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_many(&self) -> bool {
        self.many
    }

    pub fn default_value(&self) -> Option<&FieldValue> {
        self.default_value.as_ref()
    }

    /// Whether this descriptor, or anything reachable from it, refers to a
    /// buildable or a scope. Computed once at construction.
    pub fn contains_reference(&self) -> bool {
        self.contains_reference
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Enum(values) => Some(values),
            _ => None,
        }
    }

    pub fn union_branches(&self) -> Option<&[FieldDescriptor]> {
        match &self.kind {
            FieldKind::Union(branches) => Some(branches),
            _ => None,
        }
    }

    pub fn object_schema(&self) -> Option<&Schema> {
        match &self.kind {
            FieldKind::Object(schema) => Some(schema),
            _ => None,
        }
    }

    pub fn record_value_type(&self) -> Option<&FieldDescriptor> {
        match &self.kind {
            FieldKind::Record(value_type) => Some(value_type),
            _ => None,
        }
    }
}

/// An ordered mapping of field name to descriptor.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, FieldDescriptor)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field, keeping declaration order.
    pub fn field(mut self, name: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = descriptor,
            None => self.fields.push((name, descriptor)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(k, d)| (k.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldDescriptor)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, FieldDescriptor)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Schema::new(), |schema, (k, d)| schema.field(k, d))
    }
}
