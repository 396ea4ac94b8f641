//! Resolution of path parameters against a working directory.

use serde_json::Value;
use tracing::debug;

use crate::argv::Argv;
use crate::error::{ArgsError, Result};
use crate::path;
use crate::schema::Schema;

/// Resolve `path` and array-of-`path` parameters against `cwd`.
///
/// Absolute values pass through unchanged, relative ones are joined onto
/// `cwd` and normalized. An unset scalar path (absent, `null`, `false`, `0`
/// or `""`) is removed rather than resolved.
pub fn resolve_paths(schema: &Schema, mut argv: Argv, cwd: &str) -> Result<Argv> {
    for param in schema.iter().filter(|param| param.kind.is_path()) {
        let Some(value) = argv.remove(&param.name) else {
            continue;
        };

        let resolved = match value {
            Value::Array(items) if param.kind.is_array() => Value::Array(
                items
                    .into_iter()
                    .map(|item| resolve_value(&param.name, item, cwd))
                    .collect::<Result<_>>()?,
            ),
            scalar if param.kind.is_array() => resolve_value(&param.name, scalar, cwd)?,
            scalar if is_unset(&scalar) => continue,
            scalar => resolve_value(&param.name, scalar, cwd)?,
        };

        debug!("Resolved {} to {}", param.name, resolved);
        argv.set(param.name.clone(), resolved);
    }

    Ok(argv)
}

fn resolve_value(name: &str, value: Value, cwd: &str) -> Result<Value> {
    match value {
        Value::String(p) => Ok(Value::String(path::resolve(&p, cwd))),
        other => Err(ArgsError::InvalidPathSegment {
            name: name.to_string(),
            found: json_type(&other),
        }),
    }
}

fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
