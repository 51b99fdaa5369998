//! Schema loader for definition files
//!
//! - One `*.json` file per schema
//! - Files are read in name order
//! - Schemas are registered after the schemas they reference
//! - Saved definitions are never overwritten

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::definition::SchemaDefinition;
use super::errors::{TypeError, TypeResult};
use super::registry::TypeRegistry;

/// Reads schema definitions from a directory into a `TypeRegistry`.
pub struct SchemaLoader {
    schema_dir: PathBuf,
}

impl SchemaLoader {
    pub fn new(schema_dir: impl Into<PathBuf>) -> Self {
        Self {
            schema_dir: schema_dir.into(),
        }
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Parses every definition file. A missing directory yields no definitions.
    pub fn read_definitions(&self) -> TypeResult<Vec<SchemaDefinition>> {
        if !self.schema_dir.exists() {
            debug!(dir = %self.schema_dir.display(), "schema directory missing, nothing to load");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            TypeError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                TypeError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        paths.iter().map(|path| read_definition_file(path)).collect()
    }

    /// Loads all definition files into `registry`, returning how many were registered.
    pub fn load_all(&self, registry: &mut TypeRegistry) -> TypeResult<usize> {
        let definitions = self.read_definitions()?;
        let count = register_definitions(registry, definitions)?;
        info!(dir = %self.schema_dir.display(), count, "loaded schema definitions");
        Ok(count)
    }

    /// Writes a definition as `schema_<name>.json`.
    pub fn save_definition(&self, definition: &SchemaDefinition) -> TypeResult<PathBuf> {
        let path = self
            .schema_dir
            .join(format!("schema_{}.json", definition.name));

        if path.exists() {
            return Err(TypeError::DuplicateSchema(definition.name.clone()));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            TypeError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(definition).map_err(|e| {
            TypeError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            TypeError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}

fn read_definition_file(path: &Path) -> TypeResult<SchemaDefinition> {
    let content = fs::read_to_string(path).map_err(|e| {
        TypeError::malformed_schema(path.display().to_string(), format!("Failed to read file: {}", e))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TypeError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
    })
}

/// Registers definitions so that every referenced schema is registered first.
///
/// Fails on references that are neither registered nor among `definitions`,
/// including reference cycles. Either every definition is registered or
/// `registry` is left untouched.
pub fn register_definitions(
    registry: &mut TypeRegistry,
    definitions: Vec<SchemaDefinition>,
) -> TypeResult<usize> {
    let mut staged = registry.clone();
    let mut pending = definitions;
    let mut registered = 0;

    while !pending.is_empty() {
        let (ready, blocked): (Vec<_>, Vec<_>) = pending
            .into_iter()
            .partition(|def| missing_dependencies(&staged, def).is_empty());

        if ready.is_empty() {
            let def = &blocked[0];
            let missing: Vec<String> = missing_dependencies(&staged, def).into_iter().collect();
            return Err(TypeError::malformed_schema(
                def.name.clone(),
                format!("unresolved schema reference(s): {}", missing.join(", ")),
            ));
        }

        for def in ready {
            let schema = staged.build_schema(&def)?;
            staged.register_schema(schema)?;
            registered += 1;
        }
        pending = blocked;
    }

    *registry = staged;
    Ok(registered)
}

fn missing_dependencies(registry: &TypeRegistry, def: &SchemaDefinition) -> BTreeSet<String> {
    def.dependencies()
        .into_iter()
        .filter(|name| registry.schema(name).is_none())
        .collect()
}
