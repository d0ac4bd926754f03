//! Scope tokens and the wrapper that tags resolved nodes with them.
//!
//! A [`Scope`] can be attached to any number of unrelated nodes; after
//! serialization all of them carry the same token in their `$node` list,
//! which is how consumers correlate them.

use crate::error::BuildError;
use crate::graph::{Buildable, Defined, InteractionGraph, Node, build_definition};
use serde_json::{Map, Value};
use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

const TOKEN_PREFIX: &str = "s_";

/// A reusable correlation token.
///
/// Clones share the same token cell, so a scope resolves to one token no
/// matter how many places it is used from.
#[derive(Clone, Default)]
pub struct Scope {
    token: Rc<OnceCell<String>>,
}

impl Scope {
    /// A scope whose token is drawn from the first graph that asks for it.
    /// Tokens drawn this way are unique within the process.
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope with a pre-generated random token.
    pub fn generate() -> Self {
        Self::with_token(format!("{}{:08x}", TOKEN_PREFIX, rand::random::<u32>()))
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Rc::new(OnceCell::from(token.into())),
        }
    }

    /// The cached token, issued by `graph` on first use.
    pub fn token(&self, graph: &InteractionGraph) -> String {
        self.token
            .get_or_init(|| graph.next_token(TOKEN_PREFIX))
            .clone()
    }

    /// Whether two handles refer to the same scope.
    pub fn same_as(&self, other: &Scope) -> bool {
        Rc::ptr_eq(&self.token, &other.token)
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("token", &self.token.get())
            .finish()
    }
}

/// Used as a field value, a scope resolves to `{ type: "scope", token }`.
impl Buildable for Scope {
    fn build(&self, graph: &mut InteractionGraph) -> Result<Defined, BuildError> {
        let mut fields = Map::new();
        fields.insert("token".to_string(), Value::String(self.token(graph)));
        build_definition(graph, "scope", fields)
    }
}

/// Resolves `inner` and appends the scope's token to its `$node` tags.
///
/// Nested wrappers accumulate: the innermost scope's token comes first.
#[derive(Debug, Clone)]
pub struct ScopedBuildable {
    inner: Node,
    scope: Scope,
}

impl ScopedBuildable {
    pub fn new(inner: Node, scope: Scope) -> Self {
        Self { inner, scope }
    }
}

impl Buildable for ScopedBuildable {
    fn build(&self, graph: &mut InteractionGraph) -> Result<Defined, BuildError> {
        let mut result = self.inner.build(graph)?;
        let token = self.scope.token(graph);
        result.push_node_scope(token);
        Ok(result)
    }
}

/// Lets any buildable be wrapped in a scope with `.scope(&scope)`.
pub trait Scopable: Buildable + Sized + 'static {
    fn scope(self, scope: &Scope) -> ScopedBuildable {
        ScopedBuildable::new(Rc::new(self), scope.clone())
    }
}

impl<B: Buildable + 'static> Scopable for B {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::{MockNode, mock_graph};

    #[test]
    fn token_is_stable_per_scope() {
        let graph = mock_graph();
        let scope = Scope::new();
        let first = scope.token(&graph);
        assert!(first.starts_with("s_"));
        assert_eq!(scope.token(&graph), first);
        assert_eq!(scope.clone().token(&graph), first);
        assert_eq!(scope.token(&mock_graph()), first);
    }

    #[test]
    fn distinct_scopes_get_distinct_tokens() {
        let graph = mock_graph();
        let a = Scope::new();
        let b = Scope::new();
        assert_ne!(a.token(&graph), b.token(&graph));
        assert!(!a.same_as(&b));
        assert!(a.same_as(&a.clone()));
    }

    #[test]
    fn pregenerated_tokens_ignore_the_graph() {
        let graph = mock_graph();
        let fixed = Scope::with_token("s_fixed");
        assert_eq!(fixed.token(&graph), "s_fixed");

        let generated = Scope::generate();
        let token = generated.token(&graph);
        assert_eq!(token.len(), 10);
        assert_eq!(generated.token(&mock_graph()), token);
        assert_ne!(Scope::generate().token(&graph), token);
    }

    #[test]
    fn scoped_wrapper_tags_inner_output() {
        let mut graph = mock_graph();
        let scope = Scope::new();
        let defined = MockNode("item").scope(&scope).build(&mut graph).unwrap();
        let token = scope.token(&graph);
        assert_eq!(defined.type_tag(), Some("item"));
        assert_eq!(defined.node_scopes(), vec![token.as_str()]);
    }

    #[test]
    fn nested_wrappers_list_innermost_first() {
        let mut graph = mock_graph();
        let inner = Scope::with_token("s_inner");
        let outer = Scope::with_token("s_outer");
        let defined = MockNode("item")
            .scope(&inner)
            .scope(&outer)
            .build(&mut graph)
            .unwrap();
        assert_eq!(defined.node_scopes(), vec!["s_inner", "s_outer"]);
    }

    #[test]
    fn scope_resolves_to_token_record() {
        let mut graph = mock_graph();
        let scope = Scope::new();
        let defined = scope.build(&mut graph).unwrap();
        assert_eq!(defined.type_tag(), Some("scope"));
        assert_eq!(defined.get("token"), Some(&Value::from(scope.token(&graph))));
    }

    #[test]
    fn reused_scope_never_collides_with_a_fresh_one() {
        let first = mock_graph();
        let reused = Scope::new();
        let token = reused.token(&first);

        let second = mock_graph();
        let fresh = Scope::new();
        assert_eq!(reused.token(&second), token);
        assert_ne!(fresh.token(&second), token);
    }
}
