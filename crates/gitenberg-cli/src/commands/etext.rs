//! Module for the "etext" command, recovering an ebook number from a plain-text edition.

use std::path::Path;

use gitenberg::text::etext_number;

use super::*;

/// Function for the [`Commands::Etext`] in the CLI.
///
/// Plain-text editions are not always UTF-8, so invalid byte sequences are replaced
/// before the header lines are scanned.
pub fn etext(file: &Path, lines: usize) -> Result<()> {
  let bytes = std::fs::read(file)?;
  let content = String::from_utf8_lossy(&bytes);
  trace!("Scanning the first {lines} lines of {}", file.display());

  match etext_number(content.lines().take(lines)) {
    Ok(id) => {
      println!("{} Etext number: {}", style(SUCCESS_PREFIX).green(), style(id).bold());
      Ok(())
    },
    Err(GitenbergError::EtextNotFound) => {
      println!(
        "{} No etext number found in the first {} lines of {}",
        style(WARNING_PREFIX).yellow(),
        lines,
        style(file.display()).yellow()
      );
      Ok(())
    },
    Err(e) => Err(e.into()),
  }
}
