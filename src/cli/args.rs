//! CLI argument definitions using clap
//!
//! Commands:
//! - container-api-types check --type <name> [options] < value.json
//! - container-api-types types

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::ValidateOptions;

/// Validate container API input values
#[derive(Parser, Debug)]
#[command(name = "container-api-types")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the registry's configuration and schemas come from
#[derive(Args, Debug, Clone, Default)]
pub struct RegistryArgs {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of schema definition files (overrides the configured one)
    #[arg(long)]
    pub schema_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON value read from stdin
    Check {
        /// Registered type name (e.g. ContainerMemory, or a schema name)
        #[arg(long = "type")]
        type_name: String,

        #[command(flatten)]
        registry: RegistryArgs,

        /// Minimum text length
        #[arg(long)]
        min_length: Option<usize>,

        /// Maximum text length
        #[arg(long)]
        max_length: Option<usize>,

        /// Minimum numeric value
        #[arg(long, allow_negative_numbers = true)]
        minimum: Option<i64>,

        /// Maximum numeric value
        #[arg(long, allow_negative_numbers = true)]
        maximum: Option<i64>,
    },

    /// List registered type names
    Types {
        #[command(flatten)]
        registry: RegistryArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Builds per-call options from the `check` flags.
pub(crate) fn check_options(
    min_length: Option<usize>,
    max_length: Option<usize>,
    minimum: Option<i64>,
    maximum: Option<i64>,
) -> ValidateOptions {
    ValidateOptions {
        min_length,
        max_length,
        minimum,
        maximum,
        default: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "container-api-types",
            "check",
            "--type",
            "Integer",
            "--minimum",
            "-5",
            "--schema-dir",
            "/tmp/schemas",
        ])
        .unwrap();

        match cli.command {
            Command::Check {
                type_name,
                registry,
                minimum,
                ..
            } => {
                assert_eq!(type_name, "Integer");
                assert_eq!(minimum, Some(-5));
                assert_eq!(registry.schema_dir, Some(PathBuf::from("/tmp/schemas")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_type() {
        assert!(Cli::try_parse_from(["container-api-types", "check"]).is_err());
    }

    #[test]
    fn test_parse_types() {
        let cli = Cli::try_parse_from(["container-api-types", "types"]).unwrap();
        assert!(matches!(cli.command, Command::Types { .. }));
    }
}
