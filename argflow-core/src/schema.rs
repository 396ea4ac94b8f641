//! Schema types for declarative argument processing.
//!
//! A schema is an ordered list of parameters, each describing one expected
//! argument: its name, type, whether it may be filled from leftover tokens,
//! and how it is defaulted, filtered and validated. Schemas can be built in
//! code or loaded from JSON/TOML documents.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::{ArgsError, Result};

/// Element type of a scalar parameter or of an array's items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Boolean,
    Number,
    Path,
}

/// Item description of an array parameter (`"items": {"type": "path"}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub kind: ScalarType,
}

/// The declared type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamType {
    String,
    Boolean,
    Number,
    Path,
    Array { items: Items },
}

impl ParamType {
    /// Whether values of this parameter are always sequences
    pub fn is_array(&self) -> bool {
        matches!(self, ParamType::Array { .. })
    }

    /// The scalar type, looking through arrays to their items
    pub fn scalar(&self) -> ScalarType {
        match self {
            ParamType::String => ScalarType::String,
            ParamType::Boolean => ScalarType::Boolean,
            ParamType::Number => ScalarType::Number,
            ParamType::Path => ScalarType::Path,
            ParamType::Array { items } => items.kind,
        }
    }

    pub fn is_path(&self) -> bool {
        self.scalar() == ScalarType::Path
    }
}

/// A value transform applied to a parameter after defaults are injected.
///
/// Arrays are filtered element-wise.
#[derive(Clone)]
pub struct Filter(Arc<dyn Fn(Value) -> Value + Send + Sync>);

impl Filter {
    pub fn new(f: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Definition of one expected argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    /// Key under which the resolved value is stored
    pub name: String,

    /// Declared type (`{"type": "array", "items": {"type": "string"}}` for arrays)
    #[serde(flatten)]
    pub kind: ParamType,

    /// Whether the parameter may be filled from leftover tokens
    #[serde(rename = "_", default, skip_serializing_if = "is_false")]
    pub positional: bool,

    /// Single-character shorthand flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Value used when the parameter is absent after parsing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Must be present (and non-empty for arrays) to pass validation
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,

    /// Documentation only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Transform applied after defaults; only settable from code
    #[serde(skip)]
    pub filter: Option<Filter>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Param {
    /// Create a parameter with the given name and type and no other options
    pub fn new(name: impl Into<String>, kind: ParamType) -> Self {
        Self {
            name: name.into(),
            kind,
            positional: false,
            alias: None,
            default: None,
            required: false,
            description: None,
            filter: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::String)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Boolean)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Number)
    }

    pub fn path(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Path)
    }

    pub fn array(name: impl Into<String>, items: ScalarType) -> Self {
        Self::new(name, ParamType::Array { items: Items { kind: items } })
    }

    pub fn positional(mut self) -> Self {
        self.positional = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_filter(mut self, filter: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        self.filter = Some(Filter::new(filter));
        self
    }

    /// The declared default, or `false` for booleans that declare none
    pub fn effective_default(&self) -> Option<Value> {
        match (&self.default, self.kind) {
            (Some(default), _) => Some(default.clone()),
            (None, ParamType::Boolean) => Some(Value::Bool(false)),
            (None, _) => None,
        }
    }
}

/// An ordered, validated list of parameters.
///
/// Declaration order matters: positional parameters are filled in the order
/// they appear here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Param>", into = "Vec<Param>")]
pub struct Schema {
    params: Vec<Param>,
}

/// TOML documents need a top-level table, so parameters live under `[[param]]`.
#[derive(Deserialize)]
struct TomlSchema {
    #[serde(default)]
    param: Vec<Param>,
}

impl Schema {
    /// Build a schema, rejecting duplicate names and a second positional array.
    pub fn new(params: Vec<Param>) -> Result<Self> {
        let mut names = HashSet::new();
        let mut variadic: Option<&str> = None;

        for param in &params {
            if !names.insert(param.name.as_str()) {
                return Err(ArgsError::DuplicateParam(param.name.clone()));
            }
            if param.positional && param.kind.is_array() {
                if let Some(first) = variadic {
                    return Err(ArgsError::MultipleVariadicPositionals {
                        first: first.to_string(),
                        second: param.name.clone(),
                    });
                }
                variadic = Some(param.name.as_str());
            }
        }

        Ok(Self { params })
    }

    /// Parse a schema from a JSON array of parameters.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a schema from a TOML document of `[[param]]` tables.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let document: TomlSchema = toml::from_str(content)?;
        Self::new(document.param)
    }

    /// Load a schema file; `.toml` files are read as TOML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Param> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl TryFrom<Vec<Param>> for Schema {
    type Error = ArgsError;

    fn try_from(params: Vec<Param>) -> Result<Self> {
        Schema::new(params)
    }
}

impl From<Schema> for Vec<Param> {
    fn from(schema: Schema) -> Self {
        schema.params
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Param;
    type IntoIter = std::slice::Iter<'a, Param>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
