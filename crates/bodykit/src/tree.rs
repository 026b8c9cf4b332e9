//! Document Tree shared by the XML parser, the serializers and the materializer

use indexmap::map::{IntoIter, Iter, IterMut, Keys, Values};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::ops::Index;

/// A node of the Document Tree
///
/// There is no array variant: repeated elements can only be expressed by
/// re-inserting under the same key, which replaces the previous value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Ordered mapping of field names to children
    Object(Object),
    /// Leaf string value
    Text(String),
    /// Explicit JSON `null`; the XML parser never produces it
    Null,
}

impl Node {
    /// Returns true if this node is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns true if this node is a text leaf
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the object if this is an object, None otherwise
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            Self::Text(_) | Self::Null => None,
        }
    }

    /// Returns a mutable reference to the object if this is an object, None otherwise
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(o) => Some(o),
            Self::Text(_) | Self::Null => None,
        }
    }

    /// Returns the text if this is a text leaf, None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Object(_) | Self::Null => None,
        }
    }

    /// Nesting depth of this node; leaves have depth 0
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(o) => o.depth(),
            Self::Text(_) | Self::Null => 0,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::Object(Object::new())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Object> for Node {
    fn from(value: Object) -> Self {
        Self::Object(value)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object(o) => o.serialize(serializer),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

/// An order-preserving object node (field name to child)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Object(IndexMap<String, Node>);

impl Object {
    /// Creates a new empty object
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the object has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the child stored under the key
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the child stored under the key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Follows a chain of keys through nested objects
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        let (first, rest) = path.split_first()?;
        let node = self.get(first)?;
        if rest.is_empty() {
            Some(node)
        } else {
            node.as_object()?.get_path(rest)
        }
    }

    /// Inserts a field, returning the previous child if the key already existed
    ///
    /// An existing key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.0.insert(key.into(), value.into())
    }

    /// Removes a field, preserving the order of the remaining ones
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.shift_remove(key)
    }

    /// Returns true if the object contains the key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns an iterator over the keys in insertion order
    pub fn keys(&self) -> Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the children in insertion order
    pub fn values(&self) -> Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over fields in insertion order
    pub fn iter(&self) -> Iter<'_, String, Node> {
        self.0.iter()
    }

    /// Returns an iterator that allows modifying each child
    pub fn iter_mut(&mut self) -> IterMut<'_, String, Node> {
        self.0.iter_mut()
    }

    /// Nesting depth; an object holding only text leaves has depth 1
    pub fn depth(&self) -> usize {
        1 + self.values().map(Node::depth).max().unwrap_or(0)
    }
}

impl Index<&str> for Object {
    type Output = Node;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Node);
    type IntoIter = Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Object {
    type Item = (String, Node);
    type IntoIter = IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Node)> for Object {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Object {
        let mut inner = Object::new();
        inner.insert("id", "7");
        let mut root = Object::new();
        root.insert("name", "Alice");
        root.insert("meta", inner);
        root
    }

    #[test]
    fn test_node_kind_methods() {
        assert!(Node::from("x").is_text());
        assert!(Node::from(Object::new()).is_object());
        assert_eq!(Node::from("x").as_text(), Some("x"));
        assert!(Node::from("x").as_object().is_none());
        assert!(Node::default().is_object());
        assert!(Node::Null.is_null());
        assert!(Node::Null.as_text().is_none());
    }

    #[test]
    fn test_object_order_preservation() {
        let mut obj = Object::new();
        obj.insert("first", "1");
        obj.insert("second", "2");
        obj.insert("third", "3");

        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_reinsert_keeps_position_and_replaces_value() {
        let mut obj = Object::new();
        obj.insert("a", "1");
        obj.insert("b", "2");
        let previous = obj.insert("a", "3");

        assert_eq!(previous, Some(Node::from("1")));
        let pairs: Vec<_> = obj
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_text().unwrap_or_default()))
            .collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut obj = Object::new();
        obj.insert("a", "1");
        obj.insert("b", "2");
        obj.insert("c", "3");
        obj.remove("a");

        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_get_path_and_index() {
        let root = sample();
        assert_eq!(root.get_path(&["meta", "id"]), Some(&Node::from("7")));
        assert_eq!(root.get_path(&["name", "id"]), None);
        assert_eq!(root.get_path(&[]), None);
        assert_eq!(root["name"], Node::from("Alice"));
    }

    #[test]
    fn test_depth() {
        assert_eq!(Object::new().depth(), 1);
        assert_eq!(sample().depth(), 2);
        assert_eq!(Node::from("leaf").depth(), 0);
    }

    #[test]
    fn test_serialize_preserves_order() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&sample())?;
        assert_eq!(json, r#"{"name":"Alice","meta":{"id":"7"}}"#);
        Ok(())
    }
}
