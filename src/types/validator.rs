//! Composable field validators
//!
//! A `Validator` is a tagged rule resolved once (at schema construction or
//! registry build) and applied per request through `validate`. Validators hold
//! no mutable state and may be shared across threads.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::container::{self, MemoryRules, NameRules};
use super::errors::TypeResult;
use super::options::ValidateOptions;
use super::primitives::{self, apply_default, reject};
use super::schema::Schema;
use super::value::ApiValue;

/// Inline validation closure.
pub type FieldFn = Arc<dyn Fn(ApiValue) -> TypeResult<ApiValue> + Send + Sync>;

#[derive(Clone)]
pub enum Validator {
    Text,
    String,
    Integer,
    Float,
    Bool,
    ContainerName(NameRules),
    ContainerMemory(MemoryRules),
    ImageName,
    /// Text equal to one of the listed values
    Enum(Vec<String>),
    /// Homogeneous list
    List(Box<Validator>),
    /// Mapping with validated keys and values
    Dict {
        key: Box<Validator>,
        value: Box<Validator>,
    },
    /// Instance of a schema object
    Custom(Arc<Schema>),
    /// Caller-supplied rule
    Func { name: String, func: FieldFn },
}

impl Validator {
    pub fn list(element: Validator) -> Self {
        Validator::List(Box::new(element))
    }

    pub fn dict(key: Validator, value: Validator) -> Self {
        Validator::Dict {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn custom(schema: Arc<Schema>) -> Self {
        Validator::Custom(schema)
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Validator::Enum(values.into_iter().map(Into::into).collect())
    }

    pub fn func<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(ApiValue) -> TypeResult<ApiValue> + Send + Sync + 'static,
    {
        Validator::Func {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// ContainerName with the default length bounds.
    pub fn container_name() -> Self {
        Validator::ContainerName(NameRules::default())
    }

    /// ContainerMemory with the default minimum.
    pub fn container_memory() -> Self {
        Validator::ContainerMemory(MemoryRules::default())
    }

    /// Name used in error messages and registry lookups.
    pub fn type_name(&self) -> String {
        match self {
            Validator::Text => "Text".into(),
            Validator::String => "String".into(),
            Validator::Integer => "Integer".into(),
            Validator::Float => "Float".into(),
            Validator::Bool => "Bool".into(),
            Validator::ContainerName(_) => "ContainerName".into(),
            Validator::ContainerMemory(_) => "ContainerMemory".into(),
            Validator::ImageName => "ImageName".into(),
            Validator::Enum(values) => format!("Enum({})", values.join(", ")),
            Validator::List(element) => format!("List({})", element.type_name()),
            Validator::Dict { key, value } => {
                format!("Dict({}, {})", key.type_name(), value.type_name())
            }
            Validator::Custom(schema) => schema.name().to_string(),
            Validator::Func { name, .. } => name.clone(),
        }
    }

    /// Coerces and checks `value`, returning its canonical form.
    pub fn validate(&self, value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
        match self {
            Validator::Text => primitives::text(value, opts),
            Validator::String => primitives::string(value, opts),
            Validator::Integer => primitives::integer(value, opts),
            Validator::Float => primitives::float(value, opts),
            Validator::Bool => primitives::boolean(value, opts),
            Validator::ContainerName(rules) => container::container_name(value, opts, rules),
            Validator::ContainerMemory(rules) => container::container_memory(value, opts, rules),
            Validator::ImageName => container::image_name(value, opts),
            Validator::Enum(allowed) => self.validate_enum(allowed, value, opts),
            Validator::List(element) => self.validate_list(element, value, opts),
            Validator::Dict { key, value: item } => self.validate_dict(key, item, value, opts),
            Validator::Custom(schema) => validate_custom(schema, value, opts),
            Validator::Func { func, .. } => func(apply_default(value, opts)),
        }
    }

    fn validate_enum(
        &self,
        allowed: &[String],
        value: ApiValue,
        opts: &ValidateOptions,
    ) -> TypeResult<ApiValue> {
        let value = apply_default(value, opts);
        if value.is_null() {
            return Ok(ApiValue::Null);
        }

        let accepted = value
            .as_str()
            .map_or(false, |s| allowed.iter().any(|a| a == s));
        if accepted {
            Ok(value)
        } else {
            Err(reject(
                &value,
                &self.type_name(),
                format!("must be one of: {}", allowed.join(", ")),
            ))
        }
    }

    fn validate_list(
        &self,
        element: &Validator,
        value: ApiValue,
        opts: &ValidateOptions,
    ) -> TypeResult<ApiValue> {
        let element_opts = ValidateOptions::default();
        match apply_default(value, opts) {
            ApiValue::Null => Ok(ApiValue::Null),
            ApiValue::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    element
                        .validate(item, &element_opts)
                        .map_err(|e| e.within(&format!("[{}]", i)))
                })
                .collect::<TypeResult<Vec<_>>>()
                .map(ApiValue::List),
            other => Err(reject(
                &other,
                &self.type_name(),
                format!("expected list, got {}", other.kind()),
            )),
        }
    }

    fn validate_dict(
        &self,
        key_validator: &Validator,
        item_validator: &Validator,
        value: ApiValue,
        opts: &ValidateOptions,
    ) -> TypeResult<ApiValue> {
        let map = match apply_default(value, opts) {
            ApiValue::Null => return Ok(ApiValue::Null),
            ApiValue::Map(map) => map,
            other => {
                return Err(reject(
                    &other,
                    &self.type_name(),
                    format!("expected mapping, got {}", other.kind()),
                ))
            }
        };

        let item_opts = ValidateOptions::default();
        let mut validated = BTreeMap::new();
        for (key, item) in map {
            let checked_key = key_validator
                .validate(ApiValue::Text(key.clone()), &item_opts)
                .map_err(|e| e.within(&key))?;
            let checked_key = match checked_key {
                ApiValue::Text(k) => k,
                other => {
                    return Err(reject(&other, &self.type_name(), "keys must remain text")
                        .within(&key))
                }
            };
            if validated.contains_key(&checked_key) {
                return Err(reject(
                    &ApiValue::Text(key.clone()),
                    &self.type_name(),
                    format!("key collides with '{}' after validation", checked_key),
                )
                .within(&key));
            }
            let checked_item = item_validator
                .validate(item, &item_opts)
                .map_err(|e| e.within(&key))?;
            validated.insert(checked_key, checked_item);
        }

        Ok(ApiValue::Map(validated))
    }
}

fn validate_custom(
    schema: &Arc<Schema>,
    value: ApiValue,
    opts: &ValidateOptions,
) -> TypeResult<ApiValue> {
    match apply_default(value, opts) {
        ApiValue::Null => Ok(ApiValue::Null),
        ApiValue::Object(obj) if obj.is_instance_of(schema) => Ok(ApiValue::Object(obj)),
        ApiValue::Map(map) => schema.instantiate(map).map(ApiValue::Object),
        other => Err(reject(
            &other,
            schema.name(),
            format!("expected {} or mapping, got {}", schema.name(), other.kind()),
        )),
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validator({})", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::errors::TypeError;
    use serde_json::json;

    fn opts() -> ValidateOptions {
        ValidateOptions::new()
    }

    fn passthrough_schema() -> Arc<Schema> {
        Arc::new(Schema::new("TestAPI").field("test", Validator::func("passthrough", Ok)))
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Validator::list(Validator::Text).type_name(), "List(Text)");
        assert_eq!(
            Validator::dict(Validator::String, Validator::Integer).type_name(),
            "Dict(String, Integer)"
        );
        assert_eq!(Validator::custom(passthrough_schema()).type_name(), "TestAPI");
        assert_eq!(
            format!("{:?}", Validator::list(Validator::Bool)),
            "Validator(List(Bool))"
        );
    }

    #[test]
    fn test_list_with_text() {
        let list = Validator::list(Validator::Text);
        assert_eq!(list.validate(ApiValue::Null, &opts()).unwrap(), ApiValue::Null);

        let value = ApiValue::from(json!(["test1", "test2"]));
        assert_eq!(list.validate(value.clone(), &opts()).unwrap(), value);

        assert!(list.validate("invalid_value".into(), &opts()).is_err());
    }

    #[test]
    fn test_list_preserves_order_and_duplicates() {
        let list = Validator::list(Validator::Integer);
        let value = ApiValue::from(json!(["3", 1, "3"]));
        assert_eq!(
            list.validate(value, &opts()).unwrap(),
            ApiValue::from(json!([3, 1, 3]))
        );
    }

    #[test]
    fn test_list_element_error_has_index() {
        let list = Validator::list(Validator::Text);
        let err = list
            .validate(ApiValue::from(json!(["ok", 2])), &opts())
            .unwrap_err();
        assert_eq!(err.details().unwrap().field.as_deref(), Some("[1]"));
    }

    #[test]
    fn test_list_with_custom() {
        let list = Validator::list(Validator::custom(passthrough_schema()));
        assert_eq!(list.validate(ApiValue::Null, &opts()).unwrap(), ApiValue::Null);

        let value = list
            .validate(ApiValue::from(json!([{"test": "test_value"}])), &opts())
            .unwrap();
        let items = value.as_list().unwrap();
        let obj = items[0].as_object().unwrap();
        assert_eq!(obj.schema_name(), "TestAPI");
        assert_eq!(serde_json::Value::Object(obj.as_dict()), json!({"test": "test_value"}));
    }

    #[test]
    fn test_custom_accepts_instance_unchanged() {
        let schema = passthrough_schema();
        let custom = Validator::custom(schema.clone());
        assert_eq!(custom.validate(ApiValue::Null, &opts()).unwrap(), ApiValue::Null);

        let mut fields = BTreeMap::new();
        fields.insert("test".to_string(), ApiValue::from("test_value"));
        let instance = schema.instantiate(fields).unwrap();

        let value = custom.validate(ApiValue::Object(instance.clone()), &opts()).unwrap();
        assert_eq!(value, ApiValue::Object(instance));
    }

    #[test]
    fn test_custom_builds_from_mapping() {
        let custom = Validator::custom(passthrough_schema());
        let value = custom
            .validate(ApiValue::from(json!({"test": "test_value"})), &opts())
            .unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(serde_json::Value::Object(obj.as_dict()), json!({"test": "test_value"}));

        assert!(custom.validate("invalid_value".into(), &opts()).is_err());
    }

    #[test]
    fn test_custom_rejects_other_schema_instance() {
        let other = Arc::new(Schema::new("Other").field("test", Validator::Text));
        let instance = other.instantiate(BTreeMap::new()).unwrap();

        let custom = Validator::custom(passthrough_schema());
        let err = custom.validate(ApiValue::Object(instance), &opts()).unwrap_err();
        assert_eq!(err.details().unwrap().type_name, "TestAPI");
    }

    #[test]
    fn test_custom_rejects_namesake_instance() {
        let loose = Arc::new(Schema::new("Container").field("memory", Validator::Text));
        let strict = Arc::new(Schema::new("Container").field("memory", Validator::container_memory()));

        let mut fields = BTreeMap::new();
        fields.insert("memory".to_string(), ApiValue::from("4K"));
        let instance = loose.instantiate(fields).unwrap();

        let custom = Validator::custom(strict);
        let err = custom.validate(ApiValue::Object(instance), &opts()).unwrap_err();
        assert_eq!(err.code(), "INVALID_VALUE");
        assert_eq!(err.details().unwrap().type_name, "Container");
    }

    #[test]
    fn test_dict() {
        let dict = Validator::dict(Validator::String, Validator::Integer);
        let value = dict
            .validate(ApiValue::from(json!({"cpu": "2", "disk": 10})), &opts())
            .unwrap();
        assert_eq!(value, ApiValue::from(json!({"cpu": 2, "disk": 10})));

        let err = dict
            .validate(ApiValue::from(json!({"cpu": "two"})), &opts())
            .unwrap_err();
        assert_eq!(err.details().unwrap().field.as_deref(), Some("cpu"));

        assert!(dict.validate(ApiValue::from(json!([1, 2])), &opts()).is_err());
        assert_eq!(dict.validate(ApiValue::Null, &opts()).unwrap(), ApiValue::Null);
    }

    #[test]
    fn test_dict_key_error_carries_path() {
        let dict = Validator::dict(Validator::container_name(), Validator::Integer);
        let err = dict
            .validate(ApiValue::from(json!({"web": 1, "-bad": 2})), &opts())
            .unwrap_err();
        let details = err.details().unwrap();
        assert_eq!(details.field.as_deref(), Some("-bad"));
        assert_eq!(details.type_name, "ContainerName");
    }

    #[test]
    fn test_dict_rejects_colliding_keys() {
        let lowercase = Validator::func("lowercase", |value| match value {
            ApiValue::Text(s) => Ok(ApiValue::Text(s.to_lowercase())),
            other => Ok(other),
        });
        let dict = Validator::dict(lowercase, Validator::Integer);

        let value = dict
            .validate(ApiValue::from(json!({"CPU": 1, "disk": 2})), &opts())
            .unwrap();
        assert_eq!(value, ApiValue::from(json!({"cpu": 1, "disk": 2})));

        let err = dict
            .validate(ApiValue::from(json!({"A": 1, "a": 2})), &opts())
            .unwrap_err();
        let details = err.details().unwrap();
        assert_eq!(details.field.as_deref(), Some("a"));
        assert!(details.reason.contains("collides"));
    }

    #[test]
    fn test_enum() {
        let policy = Validator::one_of(["no", "always", "on-failure"]);
        assert!(policy.validate("always".into(), &opts()).is_ok());
        assert!(policy.validate("Always".into(), &opts()).is_err());
        assert!(policy.validate(ApiValue::Int(1), &opts()).is_err());
        assert_eq!(policy.validate(ApiValue::Null, &opts()).unwrap(), ApiValue::Null);
    }

    #[test]
    fn test_func_errors_propagate() {
        let even = Validator::func("Even", |v| match v.as_i64() {
            Some(n) if n % 2 == 0 => Ok(v),
            _ => Err(TypeError::invalid(v.render(), "Even", "not even")),
        });
        assert!(even.validate(ApiValue::Int(4), &opts()).is_ok());
        let err = even.validate(ApiValue::Int(3), &opts()).unwrap_err();
        assert_eq!(err.details().unwrap().reason, "not even");
    }

    #[test]
    fn test_validators_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
        assert_send_sync::<Schema>();
    }
}
