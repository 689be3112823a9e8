//! Bind values and the ordered parameter list carried by every builder.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// An opaque bind value.
///
/// Builders never look inside a `Value`; they only keep it in the position
/// that matches its `?` placeholder. Serializes to its natural JSON form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Uuid(Uuid),
    Json(serde_json::Value),
}

impl Value {
    /// Check if this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    /// Debug-oriented SQL literal rendering. Never use it to inline values
    /// into executable SQL; bind them instead.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(&crate::literal::quote_literal(s)),
            Value::Date(d) => write!(f, "DATE '{d}'"),
            Value::Timestamp(ts) => write!(f, "TIMESTAMP '{ts}'"),
            Value::Uuid(u) => write!(f, "'{u}'"),
            Value::Json(j) => f.write_str(&crate::literal::quote_literal(&j.to_string())),
        }
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use oraqb::{params, Value};
///
/// let p = params![1, "IT", true];
/// assert_eq!(p, vec![Value::Int(1), Value::Text("IT".into()), Value::Bool(true)]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

/// An ordered parameter sequence. Position `n` binds the `n`-th placeholder.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParamList {
    params: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter and return its 1-based index.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.params.push(value.into());
        self.params.len()
    }

    /// Get the current parameter count.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Extend this list with another list's parameters.
    pub fn extend(&mut self, other: &ParamList) {
        self.params.extend(other.params.iter().cloned());
    }

    /// Extend this list with values from an iterator.
    pub fn extend_values<V: Into<Value>>(&mut self, values: impl IntoIterator<Item = V>) {
        self.params.extend(values.into_iter().map(Into::into));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.params.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.params
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.params
    }
}

impl From<Vec<Value>> for ParamList {
    fn from(params: Vec<Value>) -> Self {
        Self { params }
    }
}

impl<V: Into<Value>> FromIterator<V> for ParamList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for ParamList {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParamList {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}

impl PartialEq<Vec<Value>> for ParamList {
    fn eq(&self, other: &Vec<Value>) -> bool {
        &self.params == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_becomes_null() {
        let v: Value = Option::<i32>::None.into();
        assert!(v.is_null());
        assert_eq!(Value::from(Some("x")), Value::Text("x".into()));
    }

    #[test]
    fn test_param_list_push_returns_index() {
        let mut params = ParamList::new();
        assert_eq!(params.push(5), 1);
        assert_eq!(params.push("a"), 2);
        assert_eq!(params, vec![Value::Int(5), Value::Text("a".into())]);
    }

    #[test]
    fn test_params_macro() {
        let empty = params![];
        assert!(empty.is_empty());
        assert_eq!(params![1u8, 2.5f64], vec![Value::Int(1), Value::Float(2.5)]);
    }

    #[test]
    fn test_serialize_json() {
        let params: ParamList = params![1, "IT", Option::<i64>::None].into();
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"[1,"IT",null]"#);
    }

    #[test]
    fn test_display_escapes_text() {
        assert_eq!(Value::from("O'Brien").to_string(), "'O''Brien'");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
