//! Module for the "build" command, producing the cached dataset.

use super::*;

/// Function for the [`Commands::Build`] in the CLI.
pub fn build(config: &Config) -> Result<()> {
  if config.cache_path.exists() {
    println!(
      "{} Using cached dataset at: {}",
      style(INFO_PREFIX).cyan(),
      style(config.cache_path.display()).yellow()
    );
  } else {
    println!(
      "{} Parsing catalog archive {}, this may take a while",
      style(INFO_PREFIX).cyan(),
      style(config.archive_path.display()).yellow()
    );
  }

  let dataset = Dataset::load(config)?;
  println!(
    "{} Dataset ready with {} records at: {}",
    style(SUCCESS_PREFIX).green(),
    style(dataset.len()).bold(),
    style(config.cache_path.display()).yellow()
  );
  Ok(())
}
