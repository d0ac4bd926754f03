//! Prelude module for convenient imports
//!
//! Re-exports the types needed to declare schemas, build definitions and
//! serialize a graph.
//!
//! # Example
//!
//! ```rust
//! use batono::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let item = DefinitionFactory::new("item", Schema::new().field("label", s::string()));
//! let mut graph = InteractionGraph::new(item.create(fields! { "label" => "foo" })?);
//! let json = graph.to_json()?;
//! assert_eq!(json["layout"]["label"], "foo");
//! # Ok(())
//! # }
//! # run_example().unwrap();
//! ```

// Schema declaration
pub use crate::schema::{
    FieldDescriptor, FieldKind, FieldMap, FieldValue, Schema, When, s, validate_field, when,
};

// Definitions
pub use crate::definition::{Definition, DefinitionFactory, FactoryBuilder};

// Graph
pub use crate::graph::{
    Buildable, Defined, GraphPayload, InteractionGraph, Node, RegistryKind, build_definition,
};

// Registry-backed definitions and composites
pub use crate::actions::{DefinedReference, parallel, sequential};

// Scopes
pub use crate::scope::{Scopable, Scope, ScopedBuildable};

// Error types
pub use crate::error::{BuildError, ValidationError, ValidationErrorKind};

pub use crate::fields;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
