//! Tokenizer for command line arguments.
//!
//! Splits a raw token list into named flag values and leftover positional
//! tokens. The schema only influences tokenizing through a
//! [`TokenizerConfig`]: which names hold strings, which hold booleans, and
//! which short aliases map to which names.

use regex::Regex;
use serde_json::{Number, Value};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::argv::Argv;
use crate::schema::{Schema, ScalarType};

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:0[xX][0-9a-fA-F]+|[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?)$")
        .expect("valid number pattern")
});

static SHORT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d*)?(?:e-?\d+)?$").expect("valid short number pattern"));

/// Tokenizer tables derived from a schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizerConfig {
    /// Alias to canonical name
    pub aliases: HashMap<String, String>,

    /// Names whose values are never coerced to numbers
    pub strings: HashSet<String>,

    /// Names that take no value unless followed by `true`/`false`
    pub booleans: HashSet<String>,
}

impl TokenizerConfig {
    /// Build the tokenizer tables for a schema.
    ///
    /// `string` and `path` parameters are registered as strings, `boolean`
    /// ones as booleans, and arrays by their item type. Duplicate aliases are
    /// not rejected; the last declaration wins.
    pub fn from_schema(schema: &Schema) -> Self {
        let mut config = Self::default();

        for param in schema {
            if let Some(alias) = &param.alias {
                if let Some(previous) = config.aliases.insert(alias.clone(), param.name.clone()) {
                    warn!("Alias -{} reassigned from {} to {}", alias, previous, param.name);
                }
            }

            match param.kind.scalar() {
                ScalarType::String | ScalarType::Path => {
                    config.strings.insert(param.name.clone());
                }
                ScalarType::Boolean => {
                    config.booleans.insert(param.name.clone());
                }
                ScalarType::Number => {}
            }
        }

        config
    }

    /// Resolve an alias to its canonical name
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    fn is_boolean(&self, name: &str) -> bool {
        self.booleans.contains(name)
    }

    fn is_string(&self, name: &str) -> bool {
        self.strings.contains(name)
    }
}

/// Parse a list of command line arguments
///
/// This handles common patterns like:
/// - Named args: `--name value` or `--name=value`
/// - Negated booleans: `--no-name`
/// - Short flags: `-r`, grouped `-la`, `-n5`, `-o=value`
/// - Positional args: anything not starting with `-`
/// - Everything after `--` is positional
///
/// Repeated names accumulate into arrays. Values of names not registered as
/// strings, and positional tokens, become numbers when they look numeric.
pub fn tokenize(args: &[String], config: &TokenizerConfig) -> Argv {
    let mut result = Argv::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];
        let next = args.get(i + 1).map(String::as_str);

        if arg == "--" {
            result
                .rest
                .extend(args[i + 1..].iter().cloned().map(Value::String));
            break;
        } else if let Some(long) = arg.strip_prefix("--") {
            // --name=value
            if let Some((key, value)) = long.split_once('=') {
                let key = config.canonical(key);
                if config.is_boolean(key) {
                    set_flag(&mut result, config, key, Value::Bool(value != "false"));
                } else {
                    set_arg(&mut result, config, key, value);
                }
            }
            // --no-name
            else if let Some(key) = long.strip_prefix("no-").filter(|key| !key.is_empty()) {
                set_flag(&mut result, config, config.canonical(key), Value::Bool(false));
            }
            // --name value, --name true|false, or bare --name
            else if take_value(&mut result, config, config.canonical(long), next) {
                i += 1;
            }
        } else if arg.len() > 1 && arg.starts_with('-') {
            if take_short(&mut result, config, &arg[1..], next) {
                i += 1;
            }
        } else {
            result.rest.push(coerce(arg, false));
        }

        i += 1;
    }

    debug!(
        "Tokenized {} args into {} named values and {} leftover",
        args.len(),
        result.values().len(),
        result.rest.len()
    );
    result
}

/// Handle a group of short flags (the part after `-`).
///
/// Returns true when the following token was consumed as a value.
fn take_short(result: &mut Argv, config: &TokenizerConfig, group: &str, next: Option<&str>) -> bool {
    let letters: Vec<(usize, char)> = group.char_indices().collect();
    let Some(((_, last), leading)) = letters.split_last() else {
        return false;
    };

    for (position, (index, letter)) in leading.iter().enumerate() {
        let remainder = &group[index + letter.len_utf8()..];
        let key = short_name(config, *letter);

        if remainder == "-" {
            set_arg(result, config, &key, remainder);
            continue;
        }
        if letter.is_ascii_alphabetic() {
            if let Some(value) = remainder.strip_prefix('=') {
                set_arg(result, config, &key, value);
                return false;
            }
            if SHORT_NUMBER.is_match(remainder) {
                set_arg(result, config, &key, remainder);
                return false;
            }
        }
        // -o/tmp: a non-word character ends the group and starts a value
        if leading
            .get(position + 1)
            .is_some_and(|(_, following)| !(following.is_alphanumeric() || *following == '_'))
        {
            set_arg(result, config, &key, remainder);
            return false;
        }
        set_bare(result, config, &key);
    }

    if *last == '-' {
        return false;
    }
    take_value(result, config, &short_name(config, *last), next)
}

fn short_name(config: &TokenizerConfig, letter: char) -> String {
    let mut buf = [0u8; 4];
    config.canonical(letter.encode_utf8(&mut buf)).to_string()
}

/// Assign a value to a flag that was given without `=value`.
///
/// Non-boolean flags take the next token unless it looks like another flag;
/// boolean flags only take a literal `true` or `false`. Returns true when the
/// next token was consumed.
fn take_value(result: &mut Argv, config: &TokenizerConfig, key: &str, next: Option<&str>) -> bool {
    match next {
        Some(value) if !config.is_boolean(key) && !looks_like_flag(value) => {
            set_arg(result, config, key, value);
            true
        }
        Some(value @ ("true" | "false")) => {
            set_flag(result, config, key, Value::Bool(value == "true"));
            true
        }
        _ => {
            set_bare(result, config, key);
            false
        }
    }
}

/// `-x` or `--x`, where `x` is anything but another dash
fn looks_like_flag(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), Some(c), _) if c != '-' => true,
        (Some('-'), Some('-'), Some(c)) => c != '-',
        _ => false,
    }
}

/// A flag given with no value: empty for strings, `true` otherwise
fn set_bare(result: &mut Argv, config: &TokenizerConfig, key: &str) {
    if config.is_string(key) {
        set_flag(result, config, key, Value::String(String::new()));
    } else {
        set_flag(result, config, key, Value::Bool(true));
    }
}

fn set_arg(result: &mut Argv, config: &TokenizerConfig, key: &str, value: &str) {
    let value = coerce(value, config.is_string(key));
    set_flag(result, config, key, value);
}

/// Store a value; boolean flags overwrite, everything else accumulates.
fn set_flag(result: &mut Argv, config: &TokenizerConfig, key: &str, value: Value) {
    if config.is_boolean(key) || result.get(key).is_some_and(Value::is_boolean) {
        result.set(key, value);
    } else {
        result.push(key, value);
    }
}

/// Turn a raw token into a JSON value, parsing numbers unless `keep_string`.
fn coerce(token: &str, keep_string: bool) -> Value {
    if keep_string || !NUMBER.is_match(token) {
        return Value::String(token.to_string());
    }
    parse_number(token)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(token.to_string()))
}

fn parse_number(token: &str) -> Option<Number> {
    if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        return i64::from_str_radix(hex, 16).ok().map(Number::from);
    }
    if let Ok(int) = token.parse::<i64>() {
        return Some(Number::from(int));
    }
    token.parse::<f64>().ok().and_then(Number::from_f64)
}
