//! Unit tests for the built-in widgets

#![allow(clippy::unwrap_used)]


use serde_json::{Map, Value};

/// Config object from a JSON literal.
fn config(json: Value) -> Map<String, Value> {
    match json {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}
