//! Schema objects: named field sets backing the Custom validator
//!
//! A `Schema` binds each field name to a validator and its options (including
//! the default). `ApiObject` is one validated instance of a schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use super::errors::{TypeError, TypeResult};
use super::options::ValidateOptions;
use super::validator::Validator;
use super::value::ApiValue;

/// Validator and options for one schema field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub validator: Validator,
    pub options: ValidateOptions,
}

/// A named collection of fields describing one API resource body.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    description: Option<String>,
    fields: BTreeMap<String, FieldSpec>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declares a field validated with default options.
    pub fn field(self, name: impl Into<String>, validator: Validator) -> Self {
        self.field_with(name, validator, ValidateOptions::default())
    }

    /// Declares a field with explicit options.
    pub fn field_with(
        mut self,
        name: impl Into<String>,
        validator: Validator,
        options: ValidateOptions,
    ) -> Self {
        self.fields.insert(name.into(), FieldSpec { validator, options });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn field_spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Checks that every declared default passes its own field validator.
    pub fn check_defaults(&self) -> TypeResult<()> {
        for (name, spec) in &self.fields {
            if spec.options.default.is_some() {
                spec.validator
                    .validate(ApiValue::Null, &spec.options)
                    .map_err(|e| e.within(name))?;
            }
        }
        Ok(())
    }

    /// Builds an instance from a mapping of raw field values.
    ///
    /// Declared fields are validated; absent fields take their default if one is
    /// declared and stay unset otherwise. Undeclared keys are dropped.
    pub fn instantiate(self: &Arc<Self>, values: BTreeMap<String, ApiValue>) -> TypeResult<ApiObject> {
        let mut values = values;
        let mut validated = BTreeMap::new();

        for (name, spec) in &self.fields {
            let raw = match values.remove(name) {
                Some(raw) => raw,
                None if spec.options.default.is_some() => ApiValue::Null,
                None => continue,
            };
            let value = spec
                .validator
                .validate(raw, &spec.options)
                .map_err(|e| e.within(name))?;
            validated.insert(name.clone(), value);
        }

        for key in values.keys() {
            debug!(schema = %self.name, field = %key, "ignoring undeclared field");
        }

        Ok(ApiObject {
            schema: Arc::clone(self),
            values: validated,
        })
    }
}

/// A validated instance of a `Schema`.
#[derive(Debug, Clone)]
pub struct ApiObject {
    schema: Arc<Schema>,
    values: BTreeMap<String, ApiValue>,
}

impl ApiObject {
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn schema_name(&self) -> &str {
        self.schema.name()
    }

    /// True only for instances built by this very schema, not by a namesake.
    pub fn is_instance_of(&self, schema: &Arc<Schema>) -> bool {
        Arc::ptr_eq(&self.schema, schema)
    }

    pub fn get(&self, field: &str) -> Option<&ApiValue> {
        self.values.get(field)
    }

    /// Assigns a field, validating it the way construction does.
    pub fn set(&mut self, field: &str, value: ApiValue) -> TypeResult<()> {
        let spec = self.schema.field_spec(field).ok_or_else(|| {
            TypeError::invalid(
                value.render(),
                self.schema.name(),
                format!("'{}' is not a declared field", field),
            )
        })?;
        let value = spec
            .validator
            .validate(value, &spec.options)
            .map_err(|e| e.within(field))?;
        self.values.insert(field.to_string(), value);
        Ok(())
    }

    /// Plain mapping of the fields that are set.
    pub fn as_dict(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }

    pub fn into_values(self) -> BTreeMap<String, ApiValue> {
        self.values
    }
}

impl PartialEq for ApiObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn restart_policy() -> Arc<Schema> {
        Arc::new(
            Schema::new("RestartPolicy")
                .field("name", Validator::one_of(["no", "always", "on-failure", "unless-stopped"]))
                .field_with(
                    "max_retry_count",
                    Validator::Integer,
                    ValidateOptions::new().minimum(0).default_value(0i64),
                ),
        )
    }

    fn container() -> Arc<Schema> {
        Arc::new(
            Schema::new("Container")
                .field("name", Validator::container_name())
                .field("memory", Validator::container_memory())
                .field_with("auto_remove", Validator::Bool, ValidateOptions::new().default_value(false))
                .field("restart_policy", Validator::custom(restart_policy())),
        )
    }

    fn map(value: Value) -> BTreeMap<String, ApiValue> {
        match ApiValue::from(value) {
            ApiValue::Map(map) => map,
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiate_applies_defaults() {
        let obj = container()
            .instantiate(map(json!({"name": "web", "memory": "512m"})))
            .unwrap();
        assert_eq!(
            Value::Object(obj.as_dict()),
            json!({"name": "web", "memory": "512m", "auto_remove": false})
        );
    }

    #[test]
    fn test_instantiate_nested_schema() {
        let obj = container()
            .instantiate(map(json!({"restart_policy": {"name": "always"}})))
            .unwrap();
        let policy = obj.get("restart_policy").unwrap().as_object().unwrap();
        assert_eq!(policy.schema_name(), "RestartPolicy");
        assert_eq!(policy.get("max_retry_count"), Some(&ApiValue::Int(0)));
    }

    #[test]
    fn test_instantiate_reports_nested_path() {
        let err = container()
            .instantiate(map(json!({"restart_policy": {"name": "sometimes"}})))
            .unwrap_err();
        assert_eq!(
            err.details().unwrap().field.as_deref(),
            Some("restart_policy.name")
        );
    }

    #[test]
    fn test_instantiate_ignores_undeclared_keys() {
        let obj = container()
            .instantiate(map(json!({"name": "web", "unknown": 1})))
            .unwrap();
        assert!(obj.get("unknown").is_none());
    }

    #[test]
    fn test_explicit_null_is_kept() {
        let obj = container()
            .instantiate(map(json!({"memory": null})))
            .unwrap();
        assert_eq!(obj.get("memory"), Some(&ApiValue::Null));
        assert_eq!(obj.as_dict().get("memory"), Some(&Value::Null));
    }

    #[test]
    fn test_set_validates() {
        let mut obj = container().instantiate(BTreeMap::new()).unwrap();
        obj.set("name", "db".into()).unwrap();
        assert_eq!(obj.get("name"), Some(&ApiValue::from("db")));

        assert!(obj.set("name", "***".into()).is_err());
        assert!(obj.set("nope", "x".into()).is_err());
    }

    #[test]
    fn test_check_defaults() {
        assert!(container().check_defaults().is_ok());

        let bad = Schema::new("Bad").field_with(
            "size",
            Validator::Integer,
            ValidateOptions::new().minimum(1).default_value(0i64),
        );
        let err = bad.check_defaults().unwrap_err();
        assert_eq!(err.details().unwrap().field.as_deref(), Some("size"));
    }

    #[test]
    fn test_equality_by_schema_and_values() {
        let schema = restart_policy();
        let a = schema.instantiate(map(json!({"name": "no"}))).unwrap();
        let b = schema.instantiate(map(json!({"name": "no"}))).unwrap();
        let c = schema.instantiate(map(json!({"name": "always"}))).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_namesake_schemas_are_distinct() {
        let first = restart_policy();
        let second = restart_policy();
        let a = first.instantiate(map(json!({"name": "no"}))).unwrap();
        let b = second.instantiate(map(json!({"name": "no"}))).unwrap();

        assert!(a.is_instance_of(&first));
        assert!(!a.is_instance_of(&second));
        assert_ne!(a, b);
    }
}
