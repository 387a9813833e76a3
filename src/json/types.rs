//! Dynamic JSON value tree.
//!
//! A [`Value`] is produced once by a deserialize call and then belongs to the
//! caller. Callers inspect it by type-testing nodes, e.g. pulling the
//! `access_token` string out of an OAuth token response.
//!
//! Objects use `BTreeMap` so equality and iteration order are deterministic.
//! Source order of keys is not retained.

use std::collections::BTreeMap;

/// Map type backing [`Value::Object`].
pub type Map = BTreeMap<String, Value>;

/// A JSON value.
///
/// Numbers are split by literal shape: a literal without `.` becomes
/// [`Value::Integer`], one with `.` becomes [`Value::Float`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// Number literal without a decimal point
    Integer(i64),
    /// Number literal with a decimal point
    Float(f64),
    /// JSON string with escapes resolved
    String(String),
    /// JSON array of values
    Array(Vec<Value>),
    /// JSON object; duplicate keys keep the last value
    Object(Map),
}

impl Value {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this is an integer value.
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    /// Returns true if this is a floating point value.
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns true for either kind of number.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an Integer, None otherwise.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as f64. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Follow a dotted path such as `data.items.0.name`.
    ///
    /// Each segment is an object key, or an array index when the current node
    /// is an array. An empty path returns `self`.
    pub fn pointer(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.').try_fold(self, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(arr) => segment.parse::<usize>().ok().and_then(|i| arr.get(i)),
            _ => None,
        })
    }

    /// Number of children for containers, None for scalars.
    pub fn child_count(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.len()),
            Value::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let mut inner = Map::new();
        inner.insert("name".to_string(), Value::from("spin"));
        let mut root = Map::new();
        root.insert(
            "items".to_string(),
            Value::Array(vec![Value::Integer(7), Value::Object(inner)]),
        );
        root.insert("access_token".to_string(), Value::from("abc"));
        Value::Object(root)
    }

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Integer(42).is_integer());
        assert!(Value::Float(4.2).is_float());
        assert!(Value::Integer(1).is_number() && Value::Float(1.0).is_number());
        assert!(Value::from("test").is_string());
        assert!(Value::Array(vec![]).is_array());
        assert!(Value::Object(Map::new()).is_object());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_i64(), Some(42));
        assert_eq!(Value::Float(42.0).as_i64(), None);
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("test").as_str(), Some("test"));
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_integer_and_float_differ() {
        assert_ne!(Value::Integer(42), Value::Float(42.0));
    }

    #[test]
    fn test_pointer() {
        let v = sample();
        assert_eq!(v.pointer("access_token").and_then(Value::as_str), Some("abc"));
        assert_eq!(v.pointer("items.0"), Some(&Value::Integer(7)));
        assert_eq!(
            v.pointer("items.1.name").and_then(Value::as_str),
            Some("spin")
        );
        assert_eq!(v.pointer("items.2"), None);
        assert_eq!(v.pointer("items.x"), None);
        assert_eq!(v.pointer("access_token.more"), None);
        assert_eq!(v.pointer(""), Some(&v));
    }

    #[test]
    fn test_child_count() {
        let v = sample();
        assert_eq!(v.child_count(), Some(2));
        assert_eq!(v.get("items").and_then(Value::child_count), Some(2));
        assert_eq!(Value::Integer(1).child_count(), None);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::Bool(false).type_name(), "boolean");
        assert_eq!(Value::Integer(0).type_name(), "integer");
        assert_eq!(Value::Float(0.5).type_name(), "float");
        assert_eq!(Value::String(String::new()).type_name(), "string");
        assert_eq!(Value::Array(vec![]).type_name(), "array");
        assert_eq!(Value::Object(Map::new()).type_name(), "object");
    }
}
