//! Error types for the gitenberg command line interface.

use thiserror::Error;

/// Result alias for CLI operations.
pub type Result<T> = core::result::Result<T, CliError>;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
  /// A library operation failed.
  #[error(transparent)]
  Gitenberg(#[from] gitenberg::error::GitenbergError),

  /// Reading an input file or removing the cache failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A record could not be rendered as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// An interactive prompt failed, e.g. because stdin is not a terminal.
  #[error(transparent)]
  Dialog(#[from] dialoguer::Error),
}
