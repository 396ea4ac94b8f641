//! Declarative command line argument processing.
//!
//! A [`Schema`] describes the parameters a command expects: flags,
//! positional slots, types, defaults, aliases, filters and required fields.
//! Given a schema and raw tokens, the processor produces an [`Argv`] holding
//! typed, defaulted and path-resolved values plus any leftover tokens.
//!
//! ```
//! use argflow_core::{Param, Schema, ScalarType, process};
//! use serde_json::json;
//!
//! let schema = Schema::new(vec![
//!     Param::array("sources", ScalarType::Path).positional().required(),
//!     Param::path("target").positional().required(),
//!     Param::boolean("recursive").with_alias("r"),
//! ])
//! .unwrap();
//!
//! let argv = process(&schema, ["-r", "a", "b", "c"]).unwrap();
//! assert_eq!(argv.get("sources"), Some(&json!(["/a", "/b"])));
//! assert_eq!(argv.get("target"), Some(&json!("/c")));
//! assert_eq!(argv.get("recursive"), Some(&json!(true)));
//! ```

pub mod args_processor;
mod argv;
mod error;
pub mod path;
mod schema;

// Re-export core types
pub use args_processor::{ArgsProcessor, process, process_args, validate};
pub use argv::{Argv, REST_KEY};
pub use error::{ArgsError, Result};
pub use schema::{Filter, Items, Param, ParamType, ScalarType, Schema};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
