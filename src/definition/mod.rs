//! The definition factory.
//!
//! A [`DefinitionFactory`] is built once from a type tag and a [`Schema`];
//! every call to [`DefinitionFactory::create`] applies defaults, unwraps
//! conditional values, validates the result and hands back an immutable
//! [`Definition`]. Definitions resolve themselves against an
//! [`InteractionGraph`] through the [`Buildable`] trait.

mod resolve;

use crate::error::{BuildError, ValidationError, ValidationErrorKind};
use crate::graph::{Buildable, Defined, InteractionGraph, build_definition};
use crate::schema::{FieldMap, FieldValue, Schema, validate_field};
use resolve::resolve_field;
use serde_json::Map;
use std::fmt;
use std::rc::Rc;

/// Computes a partial update from a single argument.
pub type DerivedMethod = Rc<dyn Fn(FieldValue) -> FieldMap>;

const PATCH_VERB: &str = "with";

/// `payload` becomes `withPayload`.
pub fn patch_method_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", PATCH_VERB, first.to_uppercase(), chars.as_str()),
        None => PATCH_VERB.to_string(),
    }
}

struct FactoryInner {
    type_tag: String,
    schema: Schema,
    methods: Vec<(String, DerivedMethod)>,
}

impl fmt::Debug for FactoryInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionFactory")
            .field("type_tag", &self.type_tag)
            .field("schema", &self.schema)
            .field(
                "methods",
                &self.methods.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// A constructor for definitions of one type.
#[derive(Debug, Clone)]
pub struct DefinitionFactory {
    inner: Rc<FactoryInner>,
}

pub struct FactoryBuilder {
    type_tag: String,
    schema: Schema,
    methods: Vec<(String, DerivedMethod)>,
}

impl FactoryBuilder {
    pub fn new(type_tag: impl Into<String>, schema: Schema) -> Self {
        Self {
            type_tag: type_tag.into(),
            schema,
            methods: Vec::new(),
        }
    }

    /// Registers a derived update; it is exposed as `with<Key>`.
    pub fn with_method<F>(mut self, key: &str, method: F) -> Self
    where
        F: Fn(FieldValue) -> FieldMap + 'static,
    {
        let name = patch_method_name(key);
        self.methods.retain(|(existing, _)| *existing != name);
        self.methods.push((name, Rc::new(method)));
        self
    }

    pub fn build(self) -> DefinitionFactory {
        DefinitionFactory {
            inner: Rc::new(FactoryInner {
                type_tag: self.type_tag,
                schema: self.schema,
                methods: self.methods,
            }),
        }
    }
}

impl DefinitionFactory {
    pub fn new(type_tag: impl Into<String>, schema: Schema) -> Self {
        FactoryBuilder::new(type_tag, schema).build()
    }

    pub fn builder(type_tag: impl Into<String>, schema: Schema) -> FactoryBuilder {
        FactoryBuilder::new(type_tag, schema)
    }

    pub fn type_tag(&self) -> &str {
        &self.inner.type_tag
    }

    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.inner.methods.iter().map(|(name, _)| name.as_str())
    }

    /// Builds a validated definition from `args`.
    ///
    /// Construction is all-or-nothing: the first failing field aborts it.
    pub fn create(&self, args: FieldMap) -> Result<Definition, ValidationError> {
        create_instance(&self.inner, args)
    }
}

fn create_instance(
    factory: &Rc<FactoryInner>,
    mut data: FieldMap,
) -> Result<Definition, ValidationError> {
    let type_tag = factory.type_tag.as_str();

    for (key, descriptor) in factory.schema.iter() {
        if descriptor.is_optional() && !data.contains_key(key) {
            if let Some(default) = descriptor.default_value() {
                data.insert(key.to_string(), default.clone());
            }
        }

        let Some(value) = data.remove(key) else {
            continue;
        };
        let settled = match value.settle() {
            Some(FieldValue::Array(items)) if descriptor.is_many() => Some(FieldValue::Array(
                items
                    .into_iter()
                    .filter_map(FieldValue::settle)
                    .filter(|item| !item.is_null())
                    .collect(),
            )),
            other => other,
        };
        if let Some(value) = settled {
            data.insert(key.to_string(), value);
        }
    }

    for (key, descriptor) in factory.schema.iter() {
        match data.get(key) {
            Some(value) => validate_field(type_tag, key, value, descriptor)?,
            None if descriptor.is_optional() => {}
            None => {
                return Err(ValidationError::new(
                    ValidationErrorKind::MissingField,
                    type_tag,
                    key,
                    "is required",
                ));
            }
        }
    }

    if log::log_enabled!(log::Level::Debug) {
        for key in data.keys().filter(|k| factory.schema.get(k).is_none()) {
            log::debug!("definition [{}]: ignoring undeclared field '{}'", type_tag, key);
        }
    }

    Ok(Definition {
        factory: Rc::clone(factory),
        data: Rc::new(data),
    })
}

/// An immutable, validated instance produced by a [`DefinitionFactory`].
#[derive(Debug, Clone)]
pub struct Definition {
    factory: Rc<FactoryInner>,
    data: Rc<FieldMap>,
}

impl Definition {
    pub fn type_tag(&self) -> &str {
        &self.factory.type_tag
    }

    /// The validated, defaulted field values.
    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.data.get(key)
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.factory.methods.iter().any(|(n, _)| n == name)
    }

    /// Calls the patch method `name` (e.g. `withPayload`) and returns a new
    /// definition built from the current data merged with the update.
    /// The receiver is left untouched.
    pub fn patch(&self, name: &str, arg: impl Into<FieldValue>) -> Result<Definition, BuildError> {
        let (_, method) = self
            .factory
            .methods
            .iter()
            .find(|(n, _)| n == name)
            .ok_or_else(|| BuildError::UnknownMethod {
                type_tag: self.type_tag().to_string(),
                method: name.to_string(),
            })?;

        let mut merged = (*self.data).clone();
        merged.extend((**method)(arg.into()));
        Ok(create_instance(&self.factory, merged)?)
    }
}

impl Buildable for Definition {
    fn build(&self, graph: &mut InteractionGraph) -> Result<Defined, BuildError> {
        log::trace!("resolving definition [{}]", self.type_tag());
        let mut fields = Map::with_capacity(self.factory.schema.len());
        for (key, descriptor) in self.factory.schema.iter() {
            if let Some(value) = self.data.get(key) {
                fields.insert(key.to_string(), resolve_field(value, descriptor, graph)?);
            }
        }
        build_definition(graph, self.type_tag(), fields)
    }
}

impl From<Definition> for FieldValue {
    fn from(definition: Definition) -> Self {
        FieldValue::node(definition)
    }
}

impl From<&Definition> for FieldValue {
    fn from(definition: &Definition) -> Self {
        FieldValue::node(definition.clone())
    }
}
