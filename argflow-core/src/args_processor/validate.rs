//! Required-parameter validation.

use serde_json::Value;

use crate::argv::Argv;
use crate::error::{ArgsError, Result};
use crate::schema::Schema;

/// Check that every required parameter is present, and non-empty for arrays.
///
/// Meant to run after normalization so that defaults count as present.
pub fn validate(schema: &Schema, argv: &Argv) -> Result<()> {
    for param in schema.iter().filter(|param| param.required) {
        let missing = match argv.get(&param.name) {
            None => true,
            Some(Value::Array(items)) => param.kind.is_array() && items.is_empty(),
            Some(_) => false,
        };

        if missing {
            return Err(ArgsError::MissingRequired {
                name: param.name.clone(),
            });
        }
    }

    Ok(())
}
