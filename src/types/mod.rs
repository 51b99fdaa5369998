//! Typed input validators for the container API
//!
//! Each inbound request field is coerced and checked by a `Validator` before it
//! reaches business logic. Rejections surface as `TypeError::InvalidValue`,
//! which the API layer turns into a 400 response.
//!
//! # Design Principles
//!
//! - Validators are stateless and shareable across threads
//! - `Null` passes through unless a default is supplied
//! - Inputs are never mutated; a canonical value is returned
//! - Every violation is reported to the immediate caller

mod container;
mod definition;
mod errors;
mod loader;
mod options;
mod primitives;
mod registry;
mod schema;
mod validator;
mod value;

pub use container::{
    parse_memory, MemoryRules, NameRules, DEFAULT_MIN_MEMORY_BYTES, DEFAULT_NAME_MAX_LENGTH,
    DEFAULT_NAME_MIN_LENGTH,
};
pub use definition::{FieldDefinition, SchemaDefinition, TypeSpec};
pub use errors::{ErrorResponse, InvalidValue, TypeError, TypeResult};
pub use loader::{register_definitions, SchemaLoader};
pub use options::ValidateOptions;
pub use registry::{default_registry, TypeRegistry};
pub use schema::{ApiObject, FieldSpec, Schema};
pub use validator::{FieldFn, Validator};
pub use value::ApiValue;
