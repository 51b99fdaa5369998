//! CLI module
//!
//! Provides command-line access to the type registry:
//! - check: validate one JSON value read from stdin
//! - types: list registered type names

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, RegistryArgs};
pub use commands::{build_registry, check, run, run_command};
pub use errors::{CliError, CliResult};
pub use io::{read_value, write_error, write_response};
