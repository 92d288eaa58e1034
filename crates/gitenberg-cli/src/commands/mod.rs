//! Subcommands of the gitenberg CLI, one module per command.

use super::*;

pub mod build;
pub mod clean;
pub mod etext;
pub mod fetch;
pub mod show;

pub use build::build;
pub use clean::clean;
pub use etext::etext;
pub use fetch::fetch;
pub use show::show;

/// Available commands for the CLI
#[derive(Subcommand, Clone)]
pub enum Commands {
  /// Download the catalog archive unless it is already present
  Fetch,

  /// Build the metadata dataset from the catalog archive, or reuse the cached one
  Build,

  /// Display the metadata of a single ebook
  Show {
    /// Project Gutenberg ebook number
    /// Example: 123
    id: u64,

    /// Print the record as JSON
    #[arg(long)]
    json: bool,
  },

  /// Find the etext number in the header of a plain-text edition
  Etext {
    /// Plain-text file to scan
    file: PathBuf,

    /// How many lines from the top of the file to scan
    #[arg(long, default_value_t = 100)]
    lines: usize,
  },

  /// Remove the cached dataset after confirmation
  Clean,
}
