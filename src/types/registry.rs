//! Type registry: validators looked up by name
//!
//! Built once at startup from a `TypesConfig`, extended with schemas, then
//! shared read-only across request handlers.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use super::definition::{SchemaDefinition, TypeSpec};
use super::errors::{TypeError, TypeResult};
use super::options::ValidateOptions;
use super::schema::Schema;
use super::validator::Validator;
use super::value::ApiValue;
use crate::config::TypesConfig;

static DEFAULT_REGISTRY: Lazy<TypeRegistry> = Lazy::new(TypeRegistry::default);

/// Process-wide registry built from the default configuration.
pub fn default_registry() -> &'static TypeRegistry {
    &DEFAULT_REGISTRY
}

/// Name to validator table.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    config: TypesConfig,
    types: HashMap<String, Validator>,
    schemas: HashMap<String, Arc<Schema>>,
}

impl TypeRegistry {
    /// Creates a registry holding the built-in validators.
    pub fn new(config: TypesConfig) -> Self {
        let builtins = [
            Validator::Text,
            Validator::String,
            Validator::Integer,
            Validator::Float,
            Validator::Bool,
            Validator::ContainerName(config.name_rules()),
            Validator::ContainerMemory(config.memory_rules()),
            Validator::ImageName,
        ];
        let types = builtins
            .into_iter()
            .map(|validator| (validator.type_name(), validator))
            .collect();

        Self {
            config,
            types,
            schemas: HashMap::new(),
        }
    }

    pub fn config(&self) -> &TypesConfig {
        &self.config
    }

    pub fn get(&self, name: &str) -> Option<&Validator> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn schema(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.get(name).cloned()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }

    /// Registers a schema as a Custom type under its name.
    ///
    /// Names are unique across built-ins and schemas; declared defaults must
    /// pass their own validators.
    pub fn register_schema(&mut self, schema: Schema) -> TypeResult<Arc<Schema>> {
        if self.types.contains_key(schema.name()) {
            return Err(TypeError::DuplicateSchema(schema.name().to_string()));
        }
        schema.check_defaults()?;

        let schema = Arc::new(schema);
        let name = schema.name().to_string();
        self.types
            .insert(name.clone(), Validator::custom(Arc::clone(&schema)));
        self.schemas.insert(name.clone(), Arc::clone(&schema));
        debug!(schema = %name, "registered schema");

        Ok(schema)
    }

    /// Validates `value` with the validator registered under `type_name`.
    pub fn validate(
        &self,
        type_name: &str,
        value: ApiValue,
        opts: &ValidateOptions,
    ) -> TypeResult<ApiValue> {
        let validator = self
            .get(type_name)
            .ok_or_else(|| TypeError::UnknownType(type_name.to_string()))?;
        validator.validate(value, opts)
    }

    /// Turns a type selector into a validator, using this registry's limits.
    pub fn resolve(&self, spec: &TypeSpec) -> TypeResult<Validator> {
        let validator = match spec {
            TypeSpec::Text => Validator::Text,
            TypeSpec::String => Validator::String,
            TypeSpec::Integer => Validator::Integer,
            TypeSpec::Float => Validator::Float,
            TypeSpec::Bool => Validator::Bool,
            TypeSpec::ContainerName => Validator::ContainerName(self.config.name_rules()),
            TypeSpec::ContainerMemory => Validator::ContainerMemory(self.config.memory_rules()),
            TypeSpec::ImageName => Validator::ImageName,
            TypeSpec::Enum { values } => Validator::one_of(values.iter().cloned()),
            TypeSpec::List { element } => Validator::list(self.resolve(element)?),
            TypeSpec::Dict { key, value } => {
                Validator::dict(self.resolve(key)?, self.resolve(value)?)
            }
            TypeSpec::Custom { schema } => self
                .schema(schema)
                .map(Validator::Custom)
                .ok_or_else(|| TypeError::UnknownType(schema.clone()))?,
        };
        Ok(validator)
    }

    /// Builds a schema from its definition. Referenced schemas must already be registered.
    pub fn build_schema(&self, definition: &SchemaDefinition) -> TypeResult<Schema> {
        let mut schema = Schema::new(&definition.name);
        if let Some(ref description) = definition.description {
            schema = schema.with_description(description);
        }
        for (name, field) in &definition.fields {
            let validator = self.resolve(&field.type_spec)?;
            schema = schema.field_with(name, validator, field.options());
        }
        Ok(schema)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(TypesConfig::default())
    }
}
