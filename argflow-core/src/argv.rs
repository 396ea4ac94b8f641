//! The argument object threaded through the processing pipeline.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Key under which leftover tokens appear in the serialized object.
pub const REST_KEY: &str = "_";

/// Named values plus the leftover (non-flag) tokens.
///
/// This is both the tokenizer's output and the final argument object. An
/// absent key means the parameter was never given a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Argv {
    values: Map<String, Value>,

    /// Leftover tokens not consumed as flags or positional slots
    pub rest: Vec<Value>,
}

impl Argv {
    /// Create a new empty Argv
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.remove(name)
    }

    /// Record an occurrence of a flag; repeated flags accumulate into an array.
    pub fn push(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    /// Named values, without the leftover tokens
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    /// Flatten into a single JSON object with the leftover tokens under `_`.
    pub fn into_value(self) -> Value {
        let mut object = self.values;
        object.insert(REST_KEY.to_string(), Value::Array(self.rest));
        Value::Object(object)
    }
}

impl Serialize for Argv {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.serialize_entry(REST_KEY, &self.rest)?;
        map.end()
    }
}

impl From<Argv> for Value {
    fn from(argv: Argv) -> Self {
        argv.into_value()
    }
}
