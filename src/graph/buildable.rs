use super::{Defined, InteractionGraph};
use crate::error::BuildError;
use std::fmt;
use std::rc::Rc;

/// The resolution capability shared by every node kind: definitions,
/// scoped wrappers, references and composites.
pub trait Buildable: fmt::Debug {
    /// Resolves this node (and everything below it) into a flat record.
    fn build(&self, graph: &mut InteractionGraph) -> Result<Defined, BuildError>;
}

/// A shared handle to a buildable node.
pub type Node = Rc<dyn Buildable>;

impl<B: Buildable + ?Sized> Buildable for Rc<B> {
    fn build(&self, graph: &mut InteractionGraph) -> Result<Defined, BuildError> {
        (**self).build(graph)
    }
}
