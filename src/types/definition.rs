//! Serializable schema definitions
//!
//! Definition files describe one schema each:
//!
//! ```json
//! {
//!   "name": "Container",
//!   "fields": {
//!     "name": { "type": "container_name" },
//!     "memory": { "type": "container_memory" },
//!     "cpu": { "type": "float", "minimum": 0 },
//!     "auto_remove": { "type": "bool", "default": false },
//!     "labels": { "type": "dict", "key": { "type": "string" }, "value": { "type": "string" } },
//!     "restart_policy": { "type": "custom", "schema": "RestartPolicy" }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::options::ValidateOptions;
use super::value::ApiValue;

/// Validator selector as written in definition files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeSpec {
    Text,
    String,
    Integer,
    Float,
    Bool,
    ContainerName,
    ContainerMemory,
    ImageName,
    Enum {
        values: Vec<String>,
    },
    List {
        element: Box<TypeSpec>,
    },
    Dict {
        key: Box<TypeSpec>,
        value: Box<TypeSpec>,
    },
    /// Reference to another registered schema
    Custom {
        schema: String,
    },
}

impl TypeSpec {
    /// Collects the names of schemas this spec refers to.
    pub fn referenced_schemas(&self, out: &mut BTreeSet<String>) {
        match self {
            TypeSpec::Custom { schema } => {
                out.insert(schema.clone());
            }
            TypeSpec::List { element } => element.referenced_schemas(out),
            TypeSpec::Dict { key, value } => {
                key.referenced_schemas(out);
                value.referenced_schemas(out);
            }
            _ => {}
        }
    }
}

/// One field of a schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(flatten)]
    pub type_spec: TypeSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldDefinition {
    pub fn new(type_spec: TypeSpec) -> Self {
        Self {
            type_spec,
            min_length: None,
            max_length: None,
            minimum: None,
            maximum: None,
            default: None,
        }
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn options(&self) -> ValidateOptions {
        ValidateOptions {
            min_length: self.min_length,
            max_length: self.max_length,
            minimum: self.minimum,
            maximum: self.maximum,
            default: self.default.clone().map(ApiValue::from),
        }
    }
}

/// A complete schema definition file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: BTreeMap<String, FieldDefinition>,
}

impl SchemaDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, field: FieldDefinition) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Names of the schemas that must be registered before this one.
    pub fn dependencies(&self) -> BTreeSet<String> {
        let mut deps = BTreeSet::new();
        for field in self.fields.values() {
            field.type_spec.referenced_schemas(&mut deps);
        }
        deps
    }
}
