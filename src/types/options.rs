//! Per-call validation options

use super::value::ApiValue;

/// Constraints supplied by the caller for one `validate` call.
///
/// Unset bounds are unbounded. `default` replaces a `Null` input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateOptions {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub minimum: Option<i64>,
    pub maximum: Option<i64>,
    pub default: Option<ApiValue>,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.min_length = Some(min_length);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn minimum(mut self, minimum: i64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn maximum(mut self, maximum: i64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn default_value(mut self, default: impl Into<ApiValue>) -> Self {
        self.default = Some(default.into());
        self
    }
}
