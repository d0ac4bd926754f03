//! Tests for scope tokens and scoped wrappers.
mod common;
use batono::bt;
use batono::prelude::*;
use common::*;

#[test]
fn test_scoped_node_keeps_type_and_graph() {
    let scope = bt::create_scope();
    let mut graph = InteractionGraph::builder(bt::scope(inner("foo"), &scope))
        .with_graph_id("g_scope")
        .build();
    let json = graph.to_json().unwrap();
    let token = scope.token(&graph);

    assert_eq!(json["layout"]["type"], "inner");
    assert_eq!(json["layout"]["label"], "foo");
    assert_eq!(json["layout"]["$graph"], "g_scope");
    assert_eq!(json["layout"]["$node"], serde_json::json!([token]));
}

#[test]
fn test_same_scope_on_unrelated_nodes_shares_token() {
    let scope = Scope::new();
    let row = single_field("row", s::buildable().many());
    let rows = single_field("rows", s::buildable().many());
    let layout = rows
        .create(fields! { "field" => vec![
            row.create(fields! { "field" => vec![bt::node(inner("foo").scope(&scope))] }).unwrap(),
            row.create(fields! { "field" => vec![bt::node(inner("bar").scope(&scope))] }).unwrap(),
        ] })
        .unwrap();

    let mut graph = bt::graph(layout);
    let json = graph.to_json().unwrap();
    let token = scope.token(&graph);

    let first = &json["layout"]["field"][0]["field"][0]["$node"];
    let second = &json["layout"]["field"][1]["field"][0]["$node"];
    assert_eq!(first, &serde_json::json!([token]));
    assert_eq!(first, second);
}

#[test]
fn test_scope_order_is_innermost_first() {
    let inner_scope = Scope::with_token("s_inner");
    let outer_scope = Scope::with_token("s_outer");
    let json = serialize(inner("x").scope(&inner_scope).scope(&outer_scope));
    assert_eq!(json["layout"]["$node"], serde_json::json!(["s_inner", "s_outer"]));
}

#[test]
fn test_scope_field_resolves_to_token_record() {
    let factory = DefinitionFactory::new(
        "item",
        Schema::new().field("label", s::string()).field("scope", s::scope()),
    );
    let scope = Scope::new();
    let json = serialize(factory.create(fields! { "label" => "test", "scope" => &scope }).unwrap());
    assert_eq!(json["layout"]["scope"]["type"], "scope");
    assert!(json["layout"]["scope"]["token"].as_str().unwrap().starts_with("s_"));

    let err = factory
        .create(fields! { "label" => "test", "scope" => "not-a-scope" })
        .unwrap_err();
    assert!(err.to_string().contains("expected Scope, got string"));
}

#[test]
fn test_scope_token_is_shared_between_field_and_wrapper() {
    let factory = single_field("marker", s::scope());
    let scope = Scope::new();
    let marker = factory.create(fields! { "field" => &scope }).unwrap();
    let layout = bt::parallel(vec![bt::node(marker), bt::node(bt::scope(inner("x"), &scope))]).unwrap();

    let json = serialize(layout);
    assert_eq!(
        json["layout"]["items"][0]["field"]["token"],
        json["layout"]["items"][1]["$node"][0]
    );
}

#[test]
fn test_different_scopes_differ() {
    let graph = bt::graph(inner("root"));
    let a = bt::create_scope();
    let b = bt::create_scope();
    assert_ne!(a.token(&graph), b.token(&graph));
}

#[test]
fn test_scope_reused_in_a_second_graph_keeps_its_own_token() {
    let reused = Scope::new();
    let json = serialize(inner("first").scope(&reused));
    let token = json["layout"]["$node"][0].clone();

    let fresh = Scope::new();
    let layout = bt::parallel(vec![
        bt::node(inner("again").scope(&reused)),
        bt::node(inner("other").scope(&fresh)),
    ])
    .unwrap();
    let json = serialize(layout);

    assert_eq!(json["layout"]["items"][0]["$node"][0], token);
    assert_ne!(json["layout"]["items"][1]["$node"][0], token);
}

#[test]
fn test_created_scopes_are_pregenerated() {
    let scope = bt::create_scope();
    let first = serialize(inner("a").scope(&scope));
    let second = serialize(inner("b").scope(&scope));
    let token = first["layout"]["$node"][0].as_str().unwrap();
    assert!(token.starts_with("s_"));
    assert_eq!(token.len(), 10);
    assert_eq!(second["layout"]["$node"][0], token);
}
