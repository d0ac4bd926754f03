use crate::definition::{Definition, DefinitionFactory};
use crate::error::ValidationError;
use crate::graph::Node;
use crate::schema::{FieldValue, Schema, s};
use crate::fields;

thread_local! {
    static SEQUENTIAL: DefinitionFactory = grouping("sequential");
    static PARALLEL: DefinitionFactory = grouping("parallel");
}

fn grouping(type_tag: &str) -> DefinitionFactory {
    DefinitionFactory::new(type_tag, Schema::new().field("items", s::buildable().many()))
}

fn items(nodes: Vec<Node>) -> FieldValue {
    FieldValue::Array(nodes.into_iter().map(FieldValue::Node).collect())
}

/// Items that run one after another: `{ type: "sequential", items }`.
pub fn sequential(nodes: Vec<Node>) -> Result<Definition, ValidationError> {
    SEQUENTIAL.with(|factory| factory.create(fields! { "items" => items(nodes) }))
}

/// Items that run side by side: `{ type: "parallel", items }`.
pub fn parallel(nodes: Vec<Node>) -> Result<Definition, ValidationError> {
    PARALLEL.with(|factory| factory.create(fields! { "items" => items(nodes) }))
}
