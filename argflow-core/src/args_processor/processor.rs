//! Processor for schema-based argument handling.
//!
//! This module provides the main ArgsProcessor that combines tokenizing with
//! the schema-driven stages to produce a resolved argument object.

use tracing::debug;

use super::normalize::{apply_defaults, apply_filters, coerce_arrays};
use super::paths::resolve_paths;
use super::positional::resolve_positionals;
use super::tokenizer::{TokenizerConfig, tokenize};
use super::validate::validate;
use crate::argv::Argv;
use crate::error::Result;
use crate::schema::Schema;

/// Working directory used when none is configured
pub const DEFAULT_CWD: &str = "/";

/// Run the normalization stages on an already tokenized argument object:
/// positionals, then defaults, then filters, then array coercion.
pub fn process_args(schema: &Schema, argv: Argv) -> Result<Argv> {
    let argv = resolve_positionals(schema, argv)?;
    let argv = apply_defaults(schema, argv);
    let argv = apply_filters(schema, argv);
    Ok(coerce_arrays(schema, argv))
}

/// Tokenize, normalize and resolve paths against `/`.
///
/// Does not validate required parameters; call [`validate`] separately or use
/// an [`ArgsProcessor`] with validation enabled.
pub fn process<I, S>(schema: &Schema, tokens: I) -> Result<Argv>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ArgsProcessor::new(schema.clone()).process_args(&collect_tokens(tokens))
}

fn collect_tokens<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tokens.into_iter().map(Into::into).collect()
}

/// Processor for command line arguments based on a schema
#[derive(Debug, Clone)]
pub struct ArgsProcessor {
    /// Schema definition for the command
    schema: Schema,

    /// Tokenizer tables derived from the schema
    config: TokenizerConfig,

    /// Directory relative path parameters are resolved against
    cwd: String,

    /// Check required parameters before resolving paths
    validate: bool,

    /// Resolve path parameters against `cwd`
    resolve_paths: bool,
}

impl ArgsProcessor {
    /// Create a new processor with the given schema
    pub fn new(schema: Schema) -> Self {
        let config = TokenizerConfig::from_schema(&schema);
        Self {
            schema,
            config,
            cwd: DEFAULT_CWD.to_string(),
            validate: false,
            resolve_paths: true,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate = enabled;
        self
    }

    pub fn with_path_resolution(mut self, enabled: bool) -> Self {
        self.resolve_paths = enabled;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn tokenizer_config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    /// Process command line arguments into a resolved argument object
    pub fn process_args(&self, args: &[String]) -> Result<Argv> {
        let parsed = tokenize(args, &self.config);
        self.process_parsed(parsed)
    }

    /// Process already-tokenized arguments
    pub fn process_parsed(&self, parsed: Argv) -> Result<Argv> {
        let argv = process_args(&self.schema, parsed)?;

        if self.validate {
            validate(&self.schema, &argv)?;
        }

        if !self.resolve_paths {
            return Ok(argv);
        }

        debug!("Resolving paths against {}", self.cwd);
        resolve_paths(&self.schema, argv, &self.cwd)
    }
}
