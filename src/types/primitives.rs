//! Primitive validators: Text, String, Integer, Float, Bool
//!
//! Every validator passes `Null` through unchanged unless the options carry a
//! default, which is then substituted.

use tracing::debug;

use super::errors::{TypeError, TypeResult};
use super::options::ValidateOptions;
use super::value::ApiValue;

/// Replaces a `Null` input with the caller's default, if any.
pub(crate) fn apply_default(value: ApiValue, opts: &ValidateOptions) -> ApiValue {
    match (value, &opts.default) {
        (ApiValue::Null, Some(default)) => default.clone(),
        (value, _) => value,
    }
}

/// Builds an `InvalidValue` error and records the rejection.
pub(crate) fn reject(value: &ApiValue, type_name: &str, reason: impl Into<String>) -> TypeError {
    let reason = reason.into();
    debug!(type_name, kind = value.kind(), %reason, "value rejected");
    TypeError::invalid(value.render(), type_name, reason)
}

/// Any text value.
pub fn text(value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
    match apply_default(value, opts) {
        ApiValue::Null => Ok(ApiValue::Null),
        value @ ApiValue::Text(_) => Ok(value),
        other => Err(reject(&other, "Text", format!("expected text, got {}", other.kind()))),
    }
}

/// Text whose length (in characters) lies within the inclusive bounds.
pub fn string(value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
    string_named("String", value, opts)
}

pub(crate) fn string_named(
    type_name: &str,
    value: ApiValue,
    opts: &ValidateOptions,
) -> TypeResult<ApiValue> {
    let value = apply_default(value, opts);
    let s = match &value {
        ApiValue::Null => return Ok(ApiValue::Null),
        ApiValue::Text(s) => s,
        other => {
            return Err(reject(other, type_name, format!("expected text, got {}", other.kind())))
        }
    };

    let length = s.chars().count();
    if let Some(min) = opts.min_length {
        if length < min {
            return Err(reject(
                &value,
                type_name,
                format!("has {} characters, less than {}", length, min),
            ));
        }
    }
    if let Some(max) = opts.max_length {
        if length > max {
            return Err(reject(
                &value,
                type_name,
                format!("has {} characters, more than {}", length, max),
            ));
        }
    }

    Ok(value)
}

/// Integers, integral floats, and base-10 integer text.
pub fn integer(value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
    let value = apply_default(value, opts);
    let n = match &value {
        ApiValue::Null => return Ok(ApiValue::Null),
        ApiValue::Int(n) => *n,
        ApiValue::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            if *f < i64::MIN as f64 || *f >= i64::MAX as f64 {
                return Err(reject(&value, "Integer", "out of range"));
            }
            *f as i64
        }
        ApiValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| reject(&value, "Integer", "not a base-10 integer"))?,
        other => {
            return Err(reject(other, "Integer", format!("expected integer, got {}", other.kind())))
        }
    };

    if let Some(min) = opts.minimum {
        if n < min {
            return Err(reject(&value, "Integer", format!("{} is smaller than {}", n, min)));
        }
    }
    if let Some(max) = opts.maximum {
        if n > max {
            return Err(reject(&value, "Integer", format!("{} is larger than {}", n, max)));
        }
    }

    Ok(ApiValue::Int(n))
}

/// Finite numbers and numeric text, returned as floats.
pub fn float(value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
    let value = apply_default(value, opts);
    let f = match &value {
        ApiValue::Null => return Ok(ApiValue::Null),
        ApiValue::Int(n) => *n as f64,
        ApiValue::Float(f) => *f,
        ApiValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| reject(&value, "Float", "not a number"))?,
        other => {
            return Err(reject(other, "Float", format!("expected number, got {}", other.kind())))
        }
    };

    if !f.is_finite() {
        return Err(reject(&value, "Float", "not a finite number"));
    }
    if let Some(min) = opts.minimum {
        if f < min as f64 {
            return Err(reject(&value, "Float", format!("{} is smaller than {}", f, min)));
        }
    }
    if let Some(max) = opts.maximum {
        if f > max as f64 {
            return Err(reject(&value, "Float", format!("{} is larger than {}", f, max)));
        }
    }

    Ok(ApiValue::Float(f))
}

/// Booleans and "true"/"false" text in any case.
///
/// A default stands in for `Null` without being checked.
pub fn boolean(value: ApiValue, opts: &ValidateOptions) -> TypeResult<ApiValue> {
    match value {
        ApiValue::Null => match &opts.default {
            Some(default) => Ok(default.clone()),
            None => Err(reject(&ApiValue::Null, "Bool", "a boolean is required")),
        },
        value @ ApiValue::Bool(_) => Ok(value),
        ApiValue::Text(ref s) if s.eq_ignore_ascii_case("true") => Ok(ApiValue::Bool(true)),
        ApiValue::Text(ref s) if s.eq_ignore_ascii_case("false") => Ok(ApiValue::Bool(false)),
        other => Err(reject(&other, "Bool", "expected 'true' or 'false'")),
    }
}
