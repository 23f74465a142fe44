//! Type-erased payloads for cells.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Type-erased payload bound to a cell.
///
/// Records, headers and footers carry application data of any shape. The
/// handler never looks inside; it passes the payload to the resolved cell
/// class and back out through callbacks and delegate notifications.
///
/// Cloning is cheap for everything except large JSON documents. Custom
/// payloads are shared through an `Arc`, so a clone refers to the same value.
///
/// # Example
///
/// ```
/// use trellis::model::CellData;
/// use serde_json::json;
///
/// let data = CellData::from(json!({ "type": 2, "flag": true }));
/// assert_eq!(data.int_field("type"), Some(2));
/// assert_eq!(data.bool_field("flag"), Some(true));
///
/// #[derive(Debug, PartialEq)]
/// struct Profile(u32);
///
/// let data = CellData::new(Profile(7));
/// assert_eq!(data.downcast::<Profile>(), Some(&Profile(7)));
/// ```
#[derive(Clone, Default)]
pub enum CellData {
    /// No data.
    #[default]
    None,
    /// Boolean data.
    Bool(bool),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// String data.
    String(String),
    /// Structured JSON data, typically a record object from a payload.
    Json(Value),
    /// Custom data (type-erased, shared).
    Custom(Arc<dyn Any + Send + Sync>),
}

impl CellData {
    /// Creates new custom data from any type.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        CellData::Custom(Arc::new(value))
    }

    /// Returns `true` if this is `CellData::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, CellData::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the data as a boolean.
    ///
    /// JSON booleans are accepted too.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellData::Bool(b) => Some(*b),
            CellData::Json(value) => value.as_bool(),
            _ => None,
        }
    }

    /// Attempts to get the data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellData::Int(n) => Some(*n),
            CellData::Json(value) => value.as_i64(),
            _ => None,
        }
    }

    /// Attempts to get the data as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellData::Float(n) => Some(*n),
            CellData::Int(n) => Some(*n as f64),
            CellData::Json(value) => value.as_f64(),
            _ => None,
        }
    }

    /// Attempts to get the data as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellData::String(s) => Some(s.as_str()),
            CellData::Json(value) => value.as_str(),
            _ => None,
        }
    }

    /// Attempts to get the data as a JSON value.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            CellData::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a field of a JSON object payload.
    ///
    /// Returns `None` for any other kind of payload.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.as_json().and_then(|value| value.get(key))
    }

    /// Looks up an integer field of a JSON object payload.
    pub fn int_field(&self, key: &str) -> Option<i64> {
        self.field(key).and_then(Value::as_i64)
    }

    /// Looks up a numeric field of a JSON object payload.
    pub fn float_field(&self, key: &str) -> Option<f64> {
        self.field(key).and_then(Value::as_f64)
    }

    /// Looks up a boolean field of a JSON object payload.
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.field(key).and_then(Value::as_bool)
    }

    /// Looks up a string field of a JSON object payload.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// Attempts to downcast custom data to the specified type.
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        match self {
            CellData::Custom(data) => data.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for CellData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellData::None => write!(f, "None"),
            CellData::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            CellData::Int(n) => f.debug_tuple("Int").field(n).finish(),
            CellData::Float(n) => f.debug_tuple("Float").field(n).finish(),
            CellData::String(s) => f.debug_tuple("String").field(s).finish(),
            CellData::Json(value) => f.debug_tuple("Json").field(value).finish(),
            CellData::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for CellData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellData::None, CellData::None) => true,
            (CellData::Bool(a), CellData::Bool(b)) => a == b,
            (CellData::Int(a), CellData::Int(b)) => a == b,
            (CellData::Float(a), CellData::Float(b)) => a == b,
            (CellData::String(a), CellData::String(b)) => a == b,
            (CellData::Json(a), CellData::Json(b)) => a == b,
            // Custom payloads compare by identity
            (CellData::Custom(a), CellData::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for CellData {
    fn from(b: bool) -> Self {
        CellData::Bool(b)
    }
}

impl From<i64> for CellData {
    fn from(n: i64) -> Self {
        CellData::Int(n)
    }
}

impl From<i32> for CellData {
    fn from(n: i32) -> Self {
        CellData::Int(n as i64)
    }
}

impl From<f64> for CellData {
    fn from(n: f64) -> Self {
        CellData::Float(n)
    }
}

impl From<f32> for CellData {
    fn from(n: f32) -> Self {
        CellData::Float(n as f64)
    }
}

impl From<String> for CellData {
    fn from(s: String) -> Self {
        CellData::String(s)
    }
}

impl From<&str> for CellData {
    fn from(s: &str) -> Self {
        CellData::String(s.to_string())
    }
}

impl From<Value> for CellData {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellData::None,
            other => CellData::Json(other),
        }
    }
}

impl<T: Into<CellData>> From<Option<T>> for CellData {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => value.into(),
            None => CellData::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_data_json_fields() {
        let data = CellData::from(json!({ "type": 2, "height": 88.5, "title": "A" }));
        assert_eq!(data.int_field("type"), Some(2));
        assert_eq!(data.float_field("height"), Some(88.5));
        assert_eq!(data.str_field("title"), Some("A"));
        assert!(data.field("missing").is_none());
    }

    #[test]
    fn test_cell_data_fields_on_non_json() {
        let data = CellData::from("plain");
        assert_eq!(data.as_str(), Some("plain"));
        assert!(data.int_field("type").is_none());
    }

    #[test]
    fn test_cell_data_null_json_is_none() {
        assert!(CellData::from(Value::Null).is_none());
        assert!(CellData::from(None::<bool>).is_none());
        assert_eq!(CellData::from(Some(true)), CellData::Bool(true));
    }

    #[test]
    fn test_cell_data_custom_identity() {
        #[derive(Debug, PartialEq)]
        struct Payload(u32);

        let data = CellData::new(Payload(42));
        let shared = data.clone();
        assert_eq!(data, shared);
        assert_eq!(shared.downcast::<Payload>(), Some(&Payload(42)));
        assert!(data.downcast::<u32>().is_none());
        assert_ne!(data, CellData::new(Payload(42)));
    }

    #[test]
    fn test_cell_data_numeric_accessors() {
        assert_eq!(CellData::from(3).as_float(), Some(3.0));
        assert_eq!(CellData::from(json!(true)).as_bool(), Some(true));
        assert!(CellData::None.as_int().is_none());
    }
}
