//! CLI command implementations

use serde_json::Value;
use tracing::debug;

use super::args::{check_options, Cli, Command, RegistryArgs};
use super::errors::{CliError, CliResult};
use super::io::{read_value, write_error, write_response};
use crate::config::TypesConfig;
use crate::types::{SchemaLoader, TypeRegistry, TypeResult, ValidateOptions};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Check {
            type_name,
            registry,
            min_length,
            max_length,
            minimum,
            maximum,
        } => {
            let registry = build_registry(&registry)?;
            let opts = check_options(min_length, max_length, minimum, maximum);
            let raw = read_value()?;

            match check(&registry, &type_name, raw, &opts) {
                Ok(canonical) => write_response(canonical),
                Err(e) => {
                    write_error(&e)?;
                    Err(CliError::from(e))
                }
            }
        }
        Command::Types { registry } => {
            let registry = build_registry(&registry)?;
            for name in registry.type_names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// Builds the registry from the config file and schema directory, if given.
///
/// `--schema-dir` wins over the configured `schema_dir`.
pub fn build_registry(args: &RegistryArgs) -> CliResult<TypeRegistry> {
    let config = match args.config {
        Some(ref path) => TypesConfig::from_file(path)?,
        None => TypesConfig::default(),
    };
    let schema_dir = args.schema_dir.clone().or_else(|| config.schema_dir.clone());

    let mut registry = TypeRegistry::new(config);
    if let Some(dir) = schema_dir {
        let count = SchemaLoader::new(dir).load_all(&mut registry)?;
        debug!(count, "schemas available to check");
    }
    Ok(registry)
}

/// Validates a raw JSON value and returns its canonical JSON form.
pub fn check(
    registry: &TypeRegistry,
    type_name: &str,
    raw: Value,
    opts: &ValidateOptions,
) -> TypeResult<Value> {
    registry
        .validate(type_name, raw.into(), opts)
        .map(|canonical| canonical.to_json())
}
