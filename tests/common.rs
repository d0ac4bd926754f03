//! Common test utilities for building schemas, definitions and graphs.
use batono::prelude::*;
use serde_json::Value;

/// `inner { label: string }`, the usual nested definition.
#[allow(dead_code)]
pub fn inner_factory() -> DefinitionFactory {
    DefinitionFactory::new("inner", Schema::new().field("label", s::string()))
}

/// Creates an `inner` definition with the given label.
#[allow(dead_code)]
pub fn inner(label: &str) -> Definition {
    inner_factory()
        .create(fields! { "label" => label })
        .expect("inner definition should be valid")
}

/// A factory with a single field called `field`.
#[allow(dead_code)]
pub fn single_field(type_tag: &str, descriptor: FieldDescriptor) -> DefinitionFactory {
    DefinitionFactory::new(type_tag, Schema::new().field("field", descriptor))
}

/// Serializes `layout` in a graph with a fixed id.
#[allow(dead_code)]
pub fn serialize<B: Buildable + 'static>(layout: B) -> Value {
    InteractionGraph::builder(layout)
        .with_graph_id("g_test")
        .build()
        .to_json()
        .expect("layout should resolve")
}
