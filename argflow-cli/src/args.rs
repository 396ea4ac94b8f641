use std::path::PathBuf;
use clap::Parser;

/// Command line arguments for the argflow CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve command line tokens against a declarative schema")]
pub struct Cli {
    /// Schema file (`.toml` for TOML, anything else is read as JSON)
    #[arg(long, short = 's')]
    pub schema: PathBuf,

    /// Tokens to process; put them after `--` when they start with a dash
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    /// Directory relative paths resolve against (defaults to the current directory)
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Fail when a required parameter is missing
    #[arg(long, default_value_t = false)]
    pub validate: bool,

    /// Leave path parameters as given
    #[arg(long, default_value_t = false)]
    pub no_paths: bool,

    /// Output compact JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}
