//! Module for the "fetch" command, downloading the catalog archive.

use super::*;

/// Function for the [`Commands::Fetch`] in the CLI.
pub fn fetch(config: &Config) -> Result<()> {
  if config.archive_path.exists() {
    println!(
      "{} Catalog archive already present at: {}",
      style(INFO_PREFIX).cyan(),
      style(config.archive_path.display()).yellow()
    );
    return Ok(());
  }

  println!(
    "{} Downloading catalog archive from {}",
    style(INFO_PREFIX).cyan(),
    style(&config.archive_url).blue().underlined()
  );
  gitenberg::archive::fetch_archive(&config.archive_url, &config.archive_path)?;
  println!(
    "{} Catalog archive saved to: {}",
    style(SUCCESS_PREFIX).green(),
    style(config.archive_path.display()).yellow()
  );
  Ok(())
}
