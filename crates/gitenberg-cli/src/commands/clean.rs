//! Module for the "clean" command, removing the cached dataset.

use super::*;

/// Function for the [`Commands::Clean`] in the CLI.
///
/// Only the cache is removed; the downloaded archive is kept so a rebuild does not
/// need the network.
pub fn clean(cli: &Cli, config: &Config) -> Result<()> {
  let path = &config.cache_path;
  if !path.exists() {
    println!(
      "{} No cached dataset at: {}",
      style(WARNING_PREFIX).yellow(),
      style(path.display()).yellow()
    );
    return Ok(());
  }

  println!(
    "{} Cached dataset found at: {}",
    style(WARNING_PREFIX).yellow(),
    style(path.display()).yellow()
  );
  if !cli.accept_defaults
    && !dialoguer::Confirm::new()
      .with_prompt("Are you sure you want to delete the cached dataset?")
      .default(false)
      .wait_for_newline(true)
      .interact()?
  {
    println!("{} Operation cancelled", style(ERROR_PREFIX).red());
    return Ok(());
  }

  std::fs::remove_file(path)?;
  println!("{} Cached dataset removed", style(SUCCESS_PREFIX).green());
  Ok(())
}
