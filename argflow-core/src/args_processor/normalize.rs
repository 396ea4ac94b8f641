//! Default injection, filtering and array coercion.
//!
//! Each pass takes the argument object by value and hands back the
//! transformed one. [`super::process_args`] runs them in the order defaults,
//! filters, arrays.

use serde_json::Value;
use tracing::debug;

use crate::argv::Argv;
use crate::schema::Schema;

/// Fill in declared defaults, plus `false` for booleans without one.
///
/// A present but empty array counts as unset and becomes `[default]`. Any
/// other present value, including `0`, `false` and `""`, is kept.
pub fn apply_defaults(schema: &Schema, mut argv: Argv) -> Argv {
    for param in schema {
        let Some(default) = param.effective_default() else {
            continue;
        };

        let value = match argv.get(&param.name) {
            Some(Value::Array(items)) if items.is_empty() => Value::Array(vec![default]),
            Some(_) => continue,
            None => default,
        };

        debug!("Defaulting {} to {}", param.name, value);
        argv.set(param.name.clone(), value);
    }

    argv
}

/// Run each parameter's filter over its value, element-wise for arrays.
///
/// A missing value is passed to the filter as `null`, so a filter can supply
/// one. A `null` result leaves the parameter unset.
pub fn apply_filters(schema: &Schema, mut argv: Argv) -> Argv {
    for param in schema {
        let Some(filter) = &param.filter else {
            continue;
        };

        let filtered = match argv.remove(&param.name).unwrap_or(Value::Null) {
            Value::Array(items) => Value::Array(items.into_iter().map(|item| filter.apply(item)).collect()),
            scalar => filter.apply(scalar),
        };
        if !filtered.is_null() {
            argv.set(param.name.clone(), filtered);
        }
    }

    argv
}

/// Make every array parameter a sequence.
///
/// Scalars are wrapped in a one-element array and missing values become `[]`.
pub fn coerce_arrays(schema: &Schema, mut argv: Argv) -> Argv {
    for param in schema.iter().filter(|param| param.kind.is_array()) {
        match argv.remove(&param.name) {
            Some(Value::Array(items)) => argv.set(param.name.clone(), Value::Array(items)),
            Some(scalar) => argv.set(param.name.clone(), Value::Array(vec![scalar])),
            None => argv.set(param.name.clone(), Value::Array(vec![])),
        }
    }

    argv
}
