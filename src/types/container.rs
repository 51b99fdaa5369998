//! Container-specific validators
//!
//! - ContainerName: `^[a-zA-Z0-9][a-zA-Z0-9_.-]+$`, 2..=255 characters
//! - ContainerMemory: `^[0-9]+(b|k|m|g)?$`, at least 4 MiB
//! - ImageName: 2..=255 characters

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::TypeResult;
use super::options::ValidateOptions;
use super::primitives::{apply_default, reject, string_named};
use super::value::ApiValue;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9_.-]+$").expect("valid name pattern"));

static MEMORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]+)([bkmg])?$").expect("valid memory pattern"));

pub const DEFAULT_NAME_MIN_LENGTH: usize = 2;
pub const DEFAULT_NAME_MAX_LENGTH: usize = 255;
/// 4 MiB, the smallest memory limit the container runtime accepts
pub const DEFAULT_MIN_MEMORY_BYTES: u64 = 4 * 1024 * 1024;

const IMAGE_NAME_MIN_LENGTH: usize = 2;
const IMAGE_NAME_MAX_LENGTH: usize = 255;

/// Length bounds for container names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for NameRules {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_NAME_MIN_LENGTH,
            max_length: DEFAULT_NAME_MAX_LENGTH,
        }
    }
}

/// Lower bound for container memory limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRules {
    pub min_bytes: u64,
}

impl Default for MemoryRules {
    fn default() -> Self {
        Self {
            min_bytes: DEFAULT_MIN_MEMORY_BYTES,
        }
    }
}

pub fn container_name(
    value: ApiValue,
    opts: &ValidateOptions,
    rules: &NameRules,
) -> TypeResult<ApiValue> {
    let bounds = tightened(opts, rules.min_length, rules.max_length);
    let value = string_named("ContainerName", value, &bounds)?;

    match value.as_str() {
        None => Ok(value),
        Some(name) if NAME_PATTERN.is_match(name) => Ok(value),
        Some(_) => Err(reject(
            &value,
            "ContainerName",
            "must start with a letter or digit and contain only [a-zA-Z0-9_.-]",
        )),
    }
}

/// Accepts a memory size string and returns it unchanged.
pub fn container_memory(
    value: ApiValue,
    opts: &ValidateOptions,
    rules: &MemoryRules,
) -> TypeResult<ApiValue> {
    let value = apply_default(value, opts);
    let spec = match &value {
        ApiValue::Null => return Ok(ApiValue::Null),
        ApiValue::Text(s) => s,
        other => {
            return Err(reject(
                other,
                "ContainerMemory",
                format!("expected text, got {}", other.kind()),
            ))
        }
    };

    let bytes = parse_memory(spec)
        .ok_or_else(|| reject(&value, "ContainerMemory", "expected <digits>[b|k|m|g]"))?;

    if bytes < rules.min_bytes {
        return Err(reject(
            &value,
            "ContainerMemory",
            format!("{} bytes is less than the minimum {}", bytes, rules.min_bytes),
        ));
    }

    Ok(value)
}

/// Returns the byte count of a memory spec, or `None` if malformed or too large.
pub fn parse_memory(spec: &str) -> Option<u64> {
    let caps = MEMORY_PATTERN.captures(spec)?;
    let magnitude: u64 = caps.get(1)?.as_str().parse().ok()?;
    let multiplier: u64 = match caps.get(2).map(|m| m.as_str()) {
        None | Some("b") => 1,
        Some("k") => 1024,
        Some("m") => 1024 * 1024,
        Some("g") => 1024 * 1024 * 1024,
        Some(_) => return None,
    };
    magnitude.checked_mul(multiplier)
}

pub fn image_name(value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
    let bounds = tightened(opts, IMAGE_NAME_MIN_LENGTH, IMAGE_NAME_MAX_LENGTH);
    string_named("ImageName", value, &bounds)
}

/// Caller bounds may narrow the built-in length range but never widen it.
fn tightened(opts: &ValidateOptions, min_length: usize, max_length: usize) -> ValidateOptions {
    ValidateOptions {
        min_length: Some(opts.min_length.map_or(min_length, |min| min.max(min_length))),
        max_length: Some(opts.max_length.map_or(max_length, |max| max.min(max_length))),
        ..opts.clone()
    }
}
