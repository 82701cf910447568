//! Value types for JSON-lite documents.
//!
//! A JSON-lite object holds two kinds of entries:
//! - `"key": "text"` is `Value::String("text")`
//! - `"key": { ... }` is `Value::Object(Document { ... })`
//!
//! String payloads are stored exactly as they appear between the quotes in
//! the source, escape sequences included.

use std::collections::{BTreeMap, BTreeSet, btree_map};

/// A value stored under a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// String text, in escaped form.
    String(String),
    /// Nested object.
    Object(Document),
}

/// A JSON-lite object: a set of uniquely keyed entries.
///
/// Each nested [`Document`] is owned by the entry that holds it, so a tree is
/// always acyclic and can be cloned or dropped as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    entries: BTreeMap<String, Value>,
}

impl Value {
    /// Create a string value.
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    /// Create an empty object value.
    pub fn object() -> Self {
        Value::Object(Document::new())
    }

    /// Check if this is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Object(_) => None,
        }
    }

    /// Get as object.
    pub fn as_object(&self) -> Option<&Document> {
        match self {
            Value::Object(o) => Some(o),
            Value::String(_) => None,
        }
    }

    /// Get as mutable object.
    pub fn as_object_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Object(o) => Some(o),
            Value::String(_) => None,
        }
    }

    /// Get a value by dotted path, starting at this value.
    ///
    /// An empty path returns `self`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        self.as_object()?.get_path(path)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc)
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry exists under `key`, whatever its kind.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the value under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Get the string under `key`.
    ///
    /// Returns `None` when the key is missing or holds an object.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Insert or overwrite a string entry.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(key, Value::String(value.into()))
    }

    /// Get the object under `key`.
    ///
    /// Returns `None` when the key is missing or holds a string.
    pub fn get_object(&self, key: &str) -> Option<&Document> {
        self.entries.get(key).and_then(Value::as_object)
    }

    /// Get the object under `key` for modification.
    pub fn get_object_mut(&mut self, key: &str) -> Option<&mut Document> {
        self.entries.get_mut(key).and_then(Value::as_object_mut)
    }

    /// Insert or overwrite an object entry.
    pub fn set_object(&mut self, key: impl Into<String>, value: Document) -> &mut Self {
        self.insert(key, Value::Object(value))
    }

    /// Insert or overwrite an entry of either kind.
    ///
    /// The last write for a key wins.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Remove the entry under `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Keys whose value is a string.
    pub fn string_keys(&self) -> BTreeSet<&str> {
        self.keys_where(Value::is_string)
    }

    /// Keys whose value is an object.
    pub fn object_keys(&self) -> BTreeSet<&str> {
        self.keys_where(Value::is_object)
    }

    fn keys_where(&self, pred: impl Fn(&Value) -> bool) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter(|(_, v)| pred(v))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Get a value by path.
    ///
    /// Path segments are separated by `.` and each one names a key in the
    /// object reached so far. An empty path, or a path with an empty
    /// segment, finds nothing.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let (segment, rest) = match path.split_once('.') {
            Some((segment, rest)) => (segment, Some(rest)),
            None => (path, None),
        };
        if segment.is_empty() {
            return None;
        }

        let value = self.entries.get(segment)?;
        match rest {
            None => Some(value),
            Some(rest) => value.as_object()?.get_path(rest),
        }
    }
}

/// Iterator over the entries of a [`Document`], in key order.
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}
