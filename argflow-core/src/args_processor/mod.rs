//! Command argument processing functionality.
//!
//! This module turns a raw token list into a resolved argument object for a
//! [`Schema`](crate::Schema). The pipeline runs tokenize, positionals,
//! defaults, filters, array coercion, optional validation and path
//! resolution. Each stage is also exposed on its own so callers can compose
//! or test them individually.

mod normalize;
mod paths;
mod positional;
mod processor;
mod tokenizer;
mod validate;

pub use normalize::{apply_defaults, apply_filters, coerce_arrays};
pub use paths::resolve_paths;
pub use positional::{PositionalPlan, resolve_positionals};
pub use processor::{ArgsProcessor, DEFAULT_CWD, process, process_args};
pub use tokenizer::{TokenizerConfig, tokenize};
pub use validate::validate;
