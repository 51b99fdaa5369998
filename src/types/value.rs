//! Raw and canonical values handled by validators
//!
//! `ApiValue` mirrors the JSON data model with one addition: a validated
//! schema instance (`Object`). `Null` stands for an absent value.

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use super::schema::ApiObject;

/// A dynamically typed request value.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<ApiValue>),
    Map(BTreeMap<String, ApiValue>),
    /// Instance of a Custom schema
    Object(ApiObject),
}

impl ApiValue {
    /// Returns the kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiValue::Null => "null",
            ApiValue::Bool(_) => "bool",
            ApiValue::Int(_) => "integer",
            ApiValue::Float(_) => "float",
            ApiValue::Text(_) => "text",
            ApiValue::List(_) => "list",
            ApiValue::Map(_) => "map",
            ApiValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ApiValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ApiValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ApiValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ApiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ApiObject> {
        match self {
            ApiValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ApiValue]> {
        match self {
            ApiValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Converts to JSON. Schema instances serialize through `as_dict`;
    /// non-finite floats become null.
    pub fn to_json(&self) -> Value {
        match self {
            ApiValue::Null => Value::Null,
            ApiValue::Bool(b) => Value::Bool(*b),
            ApiValue::Int(n) => Value::Number((*n).into()),
            ApiValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            ApiValue::Text(s) => Value::String(s.clone()),
            ApiValue::List(items) => Value::Array(items.iter().map(ApiValue::to_json).collect()),
            ApiValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<String, Value>>(),
            ),
            ApiValue::Object(obj) => Value::Object(obj.as_dict()),
        }
    }

    /// Compact rendering for error messages.
    pub fn render(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<Value> for ApiValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ApiValue::Null,
            Value::Bool(b) => ApiValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ApiValue::Int(i),
                None => ApiValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => ApiValue::Text(s),
            Value::Array(items) => ApiValue::List(items.into_iter().map(ApiValue::from).collect()),
            Value::Object(map) => {
                ApiValue::Map(map.into_iter().map(|(k, v)| (k, ApiValue::from(v))).collect())
            }
        }
    }
}

impl From<&str> for ApiValue {
    fn from(s: &str) -> Self {
        ApiValue::Text(s.to_string())
    }
}

impl From<String> for ApiValue {
    fn from(s: String) -> Self {
        ApiValue::Text(s)
    }
}

impl From<i64> for ApiValue {
    fn from(n: i64) -> Self {
        ApiValue::Int(n)
    }
}

impl From<bool> for ApiValue {
    fn from(b: bool) -> Self {
        ApiValue::Bool(b)
    }
}

impl From<f64> for ApiValue {
    fn from(f: f64) -> Self {
        ApiValue::Float(f)
    }
}

impl From<Vec<ApiValue>> for ApiValue {
    fn from(items: Vec<ApiValue>) -> Self {
        ApiValue::List(items)
    }
}

impl From<ApiObject> for ApiValue {
    fn from(obj: ApiObject) -> Self {
        ApiValue::Object(obj)
    }
}
