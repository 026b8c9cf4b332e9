//! JSON reading and writing for Document Trees
//!
//! Objects, strings and nulls have a tree representation. Arrays, numbers
//! and booleans are rejected with the JSON path where they occur.

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};
use crate::tree::{Node, Object};

/// Parse a JSON object into a Document Tree
pub fn from_json_str(input: &str) -> Result<Object> {
    let value: Value = serde_json::from_str(input)?;
    from_json_value(&value)
}

/// Convert an already parsed JSON value; the root must be an object
pub fn from_json_value(value: &Value) -> Result<Object> {
    let mut path = String::from("$");
    match value_to_node(value, &mut path)? {
        Node::Object(obj) => Ok(obj),
        Node::Text(_) => Err(unsupported(&path, "string")),
        Node::Null => Err(unsupported(&path, "null")),
    }
}

fn value_to_node(value: &Value, path: &mut String) -> Result<Node> {
    match value {
        Value::String(s) => Ok(Node::Text(s.clone())),
        Value::Object(map) => {
            let mut obj = Object::new();
            for (key, child) in map {
                let len = path.len();
                path.push('.');
                path.push_str(key);
                let node = value_to_node(child, path)?;
                path.truncate(len);
                obj.insert(key.clone(), node);
            }
            Ok(Node::Object(obj))
        }
        Value::Array(_) => Err(unsupported(path, "array")),
        Value::Number(_) => Err(unsupported(path, "number")),
        Value::Bool(_) => Err(unsupported(path, "boolean")),
        Value::Null => Ok(Node::Null),
    }
}

fn unsupported(path: &str, found: &'static str) -> Error {
    Error::new(ErrorKind::UnsupportedJson {
        path: path.to_string(),
        found,
    })
}

/// Pretty JSON with two-space indentation, fields in tree order; nulls are
/// written explicitly
pub fn to_json_pretty(tree: &Object) -> String {
    // serializing string-keyed maps of strings cannot fail
    serde_json::to_string_pretty(tree).unwrap_or_default()
}

/// Compact JSON, fields in tree order
pub fn to_json_string(tree: &Object) -> String {
    serde_json::to_string(tree).unwrap_or_default()
}
