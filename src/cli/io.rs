//! JSON I/O handling for the CLI
//!
//! - Input: one JSON value via stdin
//! - Output: one JSON object via stdout

use std::io::{self, Read, Write};

use serde_json::{json, Value};

use super::errors::{CliError, CliResult};
use crate::types::{ErrorResponse, TypeError};

/// Read a JSON value from stdin
pub fn read_value() -> CliResult<Value> {
    read_value_from(io::stdin().lock())
}

pub(crate) fn read_value_from<R: Read>(mut reader: R) -> CliResult<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::EmptyInput);
    }

    Ok(serde_json::from_str(&input)?)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_response_to(&mut io::stdout(), data)
}

pub(crate) fn write_response_to<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = json!({
        "status": "ok",
        "data": data
    });
    write_line(writer, &response)
}

/// Write an error response to stdout
pub fn write_error(err: &TypeError) -> CliResult<()> {
    write_error_to(&mut io::stdout(), err)
}

pub(crate) fn write_error_to<W: Write>(writer: &mut W, err: &TypeError) -> CliResult<()> {
    let body = ErrorResponse::from(err);
    let response = json!({
        "status": "error",
        "code": body.code,
        "http_status": body.status,
        "message": body.error
    });
    write_line(writer, &response)
}

fn write_line<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
