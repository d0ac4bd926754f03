//! Short constructors for the common building blocks.
//!
//! ```
//! use batono::bt;
//! use batono::prelude::*;
//!
//! let button = DefinitionFactory::new("button", Schema::new().field("label", s::string()));
//! let open = bt::define_action(vec![bt::node(button.create(fields! { "label" => "Open" })?)]);
//! let layout = bt::sequential(vec![bt::node(open.clone()), bt::node(open)])?;
//!
//! let payload = bt::graph(layout).serialize()?;
//! assert_eq!(payload.registry(RegistryKind::Action).map(|r| r.len()), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::actions::{self, DefinedReference};
use crate::definition::Definition;
use crate::error::ValidationError;
use crate::graph::{Buildable, InteractionGraph, Node};
use crate::scope::{Scope, ScopedBuildable};
use std::rc::Rc;

pub fn graph<B: Buildable + 'static>(layout: B) -> InteractionGraph {
    InteractionGraph::new(layout)
}

/// Erases a buildable into a shared [`Node`].
pub fn node<B: Buildable + 'static>(buildable: B) -> Node {
    Rc::new(buildable)
}

pub fn define_action(definitions: Vec<Node>) -> DefinedReference {
    DefinedReference::action(definitions)
}

pub fn define_flow(definitions: Vec<Node>) -> DefinedReference {
    DefinedReference::flow(definitions)
}

pub fn sequential(items: Vec<Node>) -> Result<Definition, ValidationError> {
    actions::sequential(items)
}

pub fn parallel(items: Vec<Node>) -> Result<Definition, ValidationError> {
    actions::parallel(items)
}

pub fn scope<B: Buildable + 'static>(buildable: B, scope: &Scope) -> ScopedBuildable {
    ScopedBuildable::new(Rc::new(buildable), scope.clone())
}

/// A scope with a pre-generated random token.
pub fn create_scope() -> Scope {
    Scope::generate()
}
