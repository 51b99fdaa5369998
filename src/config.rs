//! Validator configuration
//!
//! Limits of the container validators and the schema directory, read from a
//! JSON file. Every field is optional and falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{MemoryRules, NameRules, TypeError, TypeResult};
use crate::types::{DEFAULT_MIN_MEMORY_BYTES, DEFAULT_NAME_MAX_LENGTH, DEFAULT_NAME_MIN_LENGTH};

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypesConfig {
    /// Shortest accepted container name (default: 2)
    #[serde(default = "default_name_min_length")]
    pub container_name_min_length: usize,

    /// Longest accepted container name (default: 255)
    #[serde(default = "default_name_max_length")]
    pub container_name_max_length: usize,

    /// Smallest accepted memory limit in bytes (default: 4 MiB)
    #[serde(default = "default_min_memory_bytes")]
    pub container_min_memory_bytes: u64,

    /// Directory of schema definition files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dir: Option<PathBuf>,
}

fn default_name_min_length() -> usize {
    DEFAULT_NAME_MIN_LENGTH
}

fn default_name_max_length() -> usize {
    DEFAULT_NAME_MAX_LENGTH
}

fn default_min_memory_bytes() -> u64 {
    DEFAULT_MIN_MEMORY_BYTES
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            container_name_min_length: default_name_min_length(),
            container_name_max_length: default_name_max_length(),
            container_min_memory_bytes: default_min_memory_bytes(),
            schema_dir: None,
        }
    }
}

impl TypesConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(content: &str) -> TypeResult<Self> {
        let config: TypesConfig = serde_json::from_str(content)
            .map_err(|e| TypeError::Config(format!("Invalid JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration file.
    pub fn from_file(path: &Path) -> TypeResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TypeError::Config(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Rejects inconsistent limits.
    pub fn validate(&self) -> TypeResult<()> {
        if self.container_name_min_length == 0 {
            return Err(TypeError::Config(
                "container_name_min_length must be at least 1".into(),
            ));
        }
        if self.container_name_min_length > self.container_name_max_length {
            return Err(TypeError::Config(format!(
                "container_name_min_length ({}) exceeds container_name_max_length ({})",
                self.container_name_min_length, self.container_name_max_length
            )));
        }
        Ok(())
    }

    pub fn name_rules(&self) -> NameRules {
        NameRules {
            min_length: self.container_name_min_length,
            max_length: self.container_name_max_length,
        }
    }

    pub fn memory_rules(&self) -> MemoryRules {
        MemoryRules {
            min_bytes: self.container_min_memory_bytes,
        }
    }
}
