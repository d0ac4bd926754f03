//! # Batono - Declarative Schema and Interaction-Graph Engine
//!
//! **Batono** lets you describe typed node kinds with a field schema, build
//! validated, immutable instances of them, and resolve a tree of those
//! instances into a flat, serializable interaction graph. Definitions that
//! are referenced from several places are stored once in a registry and
//! pointed at by name.
//!
//! ## Core Workflow
//!
//! 1.  **Describe a Node Kind**: Build a [`Schema`](schema::Schema) from field descriptors (`s::string()`, `s::buildable().many()`, ...).
//! 2.  **Create a Factory**: `DefinitionFactory::new(type_tag, schema)` precomputes the descriptors once; `DefinitionFactory::builder` additionally registers `with<Key>` patch methods.
//! 3.  **Build Instances**: `factory.create(fields! { .. })` applies defaults, unwraps conditional values and validates. Construction either succeeds completely or returns a [`ValidationError`](error::ValidationError).
//! 4.  **Serialize**: Hand the root to an [`InteractionGraph`](graph::InteractionGraph) and call `serialize()`. Shared actions and flows are registered by identity and emitted once.
//!
//! ## Quick Start
//!
//! ```rust
//! use batono::prelude::*;
//! use batono::bt;
//!
//! fn main() -> Result<()> {
//!     // 1. Describe the node kinds.
//!     let button = DefinitionFactory::builder(
//!         "button",
//!         Schema::new()
//!             .field("label", s::string())
//!             .field("variant", s::enumeration(["primary", "secondary"]).optional_or("primary"))
//!             .field("onClick", s::buildable().optional()),
//!     )
//!     .with_method("label", |label| fields! { "label" => label })
//!     .build();
//!
//!     let request = DefinitionFactory::new("request", Schema::new().field("url", s::string()));
//!
//!     // 2. A shared action, referenced from two buttons.
//!     let save = bt::define_action(vec![bt::node(request.create(fields! { "url" => "/save" })?)]);
//!
//!     let first = button.create(fields! { "label" => "Save", "onClick" => &save })?;
//!     let second = first.patch("withLabel", "Save again")?;
//!
//!     // 3. Resolve the whole layout.
//!     let layout = bt::parallel(vec![bt::node(first), bt::node(second)])?;
//!     let mut graph = InteractionGraph::builder(layout).with_graph_id("g_demo").build();
//!     let json = graph.to_json()?;
//!
//!     assert_eq!(json["layout"]["items"][0]["variant"], "primary");
//!     assert_eq!(json["layout"]["items"][0]["onClick"]["target"], "action_1");
//!     assert_eq!(json["layout"]["items"][1]["onClick"]["target"], "action_1");
//!     assert_eq!(json["actions"]["action_1"][0]["url"], "/save");
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod bt;
pub mod definition;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod schema;
pub mod scope;
