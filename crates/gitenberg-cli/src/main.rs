//! Command line interface for the gitenberg catalog library.
//!
//! This crate provides a CLI over the `gitenberg` library. It supports:
//! - Downloading the Project Gutenberg RDF catalog archive
//! - Building (or reusing) the cached metadata dataset
//! - Looking up a single ebook's metadata
//! - Finding the etext number in a plain-text edition
//! - Removing the cached dataset
//!
//! # Usage
//!
//! ```bash
//! # Download the catalog archive
//! gitenberg fetch
//!
//! # Parse the archive into the cached dataset
//! gitenberg build
//!
//! # Show one record, optionally as JSON
//! gitenberg show 123 --json
//!
//! # Find the etext number of a plain-text edition
//! gitenberg etext pg123.txt
//!
//! # Remove the cached dataset
//! gitenberg clean
//! ```
//!
//! Paths default to the platform cache directory and can be overridden with a TOML
//! configuration passed through `--config`. Logging verbosity is raised with `-v`.

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::PathBuf;

use clap::{builder::ArgAction, Parser, Subcommand};
use console::style;
use gitenberg::{error::GitenbergError, Config, Dataset};
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

pub mod commands;
pub mod error;

use crate::{commands::*, error::*};

/// Prefix for information messages
static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for warning messages
static WARNING_PREFIX: &str = "⚠️ ";
/// Prefix for error messages
static ERROR_PREFIX: &str = "✗ ";
/// Branch character for record fields
static TREE_BRANCH: &str = "├";
/// Leaf character for the last record field
static TREE_LEAF: &str = "└";

/// Command line interface configuration and argument parsing
#[derive(Parser)]
#[command(author, version, about = "Project Gutenberg catalog metadata from the command line")]
pub struct Cli {
  /// Verbose mode (-v, -vv, -vvv) for different levels of logging detail
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Path to a TOML configuration file. If not specified, the default configuration file is
  /// used when it exists, and built-in defaults otherwise.
  #[arg(long, short, global = true)]
  config: Option<PathBuf>,

  /// The subcommand to execute
  #[command(subcommand)]
  command: Commands,

  /// Skip all prompts and accept defaults (mostly for testing)
  #[arg(long, hide = true, global = true)]
  accept_defaults: bool,
}

impl Cli {
  /// Resolves the configuration to run with.
  fn configuration(&self) -> Result<Config> {
    let path = match &self.config {
      Some(path) => path.clone(),
      None => {
        let default_path = Config::default_path();
        if !default_path.exists() {
          trace!("No configuration at {}, using defaults", default_path.display());
          return Ok(Config::default());
        }
        default_path
      },
    };
    debug!("Using configuration at {}", path.display());
    Ok(Config::load(path)?)
  }
}

/// Configures the logging system based on the verbosity level
///
/// # Arguments
///
/// * `verbosity` - Number of times the verbose flag was used
///
/// The verbosity levels are:
/// - 0: error (default)
/// - 1: warn
/// - 2: info
/// - 3: debug
/// - 4+: trace
///
/// `RUST_LOG` takes precedence when set.
fn setup_logging(verbosity: u8) {
  let filter = match verbosity {
    0 => "error",
    1 => "warn",
    2 => "info",
    3 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_target(true)
    .init();
}

/// Entry point for the gitenberg CLI application
///
/// # Errors
///
/// Returns [`CliError`] when the configuration cannot be read or a command fails:
/// - Network failures while fetching the archive
/// - Malformed catalog documents while building the dataset
/// - File system errors
fn main() -> Result<()> {
  let cli = Cli::parse();
  setup_logging(cli.verbose);

  let config = cli.configuration().inspect_err(|e| {
    eprintln!("{} Failed to load configuration: {e}", style(ERROR_PREFIX).red());
  })?;

  let result = match &cli.command {
    Commands::Fetch => fetch(&config),
    Commands::Build => build(&config),
    Commands::Show { id, json } => show(&config, *id, *json),
    Commands::Etext { file, lines } => etext(file, *lines),
    Commands::Clean => clean(&cli, &config),
  };
  if let Err(e) = &result {
    eprintln!("{} {e}", style(ERROR_PREFIX).red());
  }
  result
}
