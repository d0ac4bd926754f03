//! Field descriptors, the runtime value model and the validation engine.

pub mod descriptor;
pub mod validation;
pub mod value;
pub mod when;

pub use descriptor::*;
pub use validation::validate_field;
pub use value::*;
pub use when::*;

/// Descriptor constructors, meant to be used as `s::string()`, `s::buildable().many()`, ...
pub mod s {
    use super::{FieldDescriptor, FieldKind, Schema};
    use crate::error::ValidationError;
    use std::rc::Rc;

    pub fn string() -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::String)
    }

    pub fn number() -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Number)
    }

    pub fn boolean() -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Boolean)
    }

    /// Accepts any value without checking it.
    pub fn any() -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Any)
    }

    pub fn enumeration<I, S>(values: I) -> FieldDescriptor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        FieldDescriptor::new(FieldKind::Enum(values.into()))
    }

    /// Fails when `branches` is empty.
    pub fn union(branches: Vec<FieldDescriptor>) -> Result<FieldDescriptor, ValidationError> {
        FieldDescriptor::union(branches)
    }

    pub fn object(schema: Schema) -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Object(Rc::new(schema)))
    }

    pub fn record(value_type: FieldDescriptor) -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Record(Rc::new(value_type)))
    }

    /// A nested definition (or any other buildable node).
    pub fn buildable() -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Buildable)
    }

    pub fn scope() -> FieldDescriptor {
        FieldDescriptor::new(FieldKind::Scope)
    }
}
