mod args;

use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tracing::debug;

use argflow_core::{ArgsProcessor, Schema};
use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let schema = Schema::load(&cli.schema)
        .with_context(|| format!("Failed to load schema {}", cli.schema.display()))?;
    debug!("Loaded {} parameters from {}", schema.len(), cli.schema.display());

    let cwd = match &cli.cwd {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let cwd = cwd
        .to_str()
        .with_context(|| format!("Working directory is not valid UTF-8: {}", cwd.display()))?
        .to_string();

    let processor = ArgsProcessor::new(schema)
        .with_cwd(cwd)
        .with_validation(cli.validate)
        .with_path_resolution(!cli.no_paths);

    let argv = processor.process_args(&cli.args)?;

    // Print raw or formatted JSON
    let output = if cli.raw {
        serde_json::to_string(&argv)?
    } else {
        serde_json::to_string_pretty(&argv)?
    };
    println!("{}", output);

    Ok(())
}

fn init_tracing(debug: bool, quiet: bool) {
    // Logs go to stderr so stdout stays machine readable
    let filter = if debug {
        "argflow=debug,argflow_core=debug"
    } else if quiet {
        "argflow=error,argflow_core=error"
    } else {
        "argflow=info,argflow_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
