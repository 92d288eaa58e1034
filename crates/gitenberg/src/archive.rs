//! Acquisition and traversal of the bulk catalog archive.
//!
//! Project Gutenberg publishes its catalog as `rdf-files.tar.bz2`: a bzip2-compressed
//! tar container holding one RDF/XML document per ebook. This module
//!
//! - downloads that archive once with [`fetch_archive`], and
//! - walks it with [`CatalogArchive::documents`], a lazy, single-pass sequence of parsed
//!   [`Document`]s.
//!
//! The walk decompresses and parses one member at a time, so memory use stays bounded
//! by the largest member rather than by the size of the catalog.
//!
//! # Examples
//!
//! ```no_run
//! use gitenberg::{archive::CatalogArchive, prelude::*};
//!
//! # fn example() -> Result<()> {
//! let mut archive = CatalogArchive::open("/tmp/rdf-files.tar.bz2")?;
//! for document in archive.documents()? {
//!   let document = document?;
//!   if let Some(ebook) = document.ebook() {
//!     println!("{:?}", CatalogRecord::from_ebook(ebook)?.title);
//!   }
//! }
//! # Ok(())
//! # }
//! ```

use bzip2::read::BzDecoder;

use super::*;
use crate::document::Document;

/// Makes sure the catalog archive exists at `path`, downloading it from `url` if not.
///
/// An existing file is trusted as-is: there is no freshness check and no network
/// activity in that case. A download is written to a sibling `.part` file and renamed
/// into place once complete, so an interrupted fetch never leaves a truncated archive
/// at `path`. The `.part` file is removed when the transfer fails.
///
/// # Errors
///
/// Network failures (including non-success HTTP statuses) and filesystem errors are
/// returned unchanged. There is no retry.
#[instrument]
pub fn fetch_archive(url: &str, path: &Path) -> Result<()> {
  if path.exists() {
    debug!("Catalog archive already present at {}", path.display());
    return Ok(());
  }

  info!("Downloading catalog archive from {url}");
  let mut response = reqwest::blocking::get(url)?.error_for_status()?;

  let bytes = write_staged(path, "part", |partial| {
    let mut file = File::create(partial)?;
    let bytes = io::copy(&mut response, &mut file)?;
    file.sync_all()?;
    Ok(bytes)
  })?;

  debug!("Wrote {bytes} bytes to {}", path.display());
  Ok(())
}

/// An open, bzip2-compressed tar archive of catalog documents.
pub struct CatalogArchive<R: Read> {
  /// The tar reader over the decompressed stream
  archive: tar::Archive<BzDecoder<R>>,
}

impl CatalogArchive<BufReader<File>> {
  /// Opens the archive file at `path`.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Opening catalog archive {}", path.display());
    Ok(Self::new(BufReader::new(File::open(path)?)))
  }
}

impl<R: Read> CatalogArchive<R> {
  /// Wraps a reader producing the compressed archive bytes.
  pub fn new(reader: R) -> Self { Self { archive: tar::Archive::new(BzDecoder::new(reader)) } }

  /// Starts the walk over the archive's members.
  ///
  /// Members are yielded in archive order. Directories and other non-file members are
  /// passed over. The walk cannot be restarted: open the archive again to walk it a
  /// second time.
  ///
  /// # Errors
  ///
  /// Fails immediately if the archive has already been walked. Each yielded item
  /// carries the outcome of reading and parsing one member; a malformed member shows up
  /// as an `Err` item and callers are expected to stop there.
  pub fn documents(&mut self) -> Result<Documents<'_, R>> {
    Ok(Documents { entries: self.archive.entries()? })
  }
}

/// Lazy sequence of parsed catalog documents, see [`CatalogArchive::documents`].
pub struct Documents<'a, R: Read> {
  /// Cursor over the tar members
  entries: tar::Entries<'a, BzDecoder<R>>,
}

impl<R: Read> Iterator for Documents<'_, R> {
  type Item = Result<Document>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let mut entry = match self.entries.next()? {
        Ok(entry) => entry,
        Err(e) => return Some(Err(e.into())),
      };
      if !entry.header().entry_type().is_file() {
        continue;
      }
      if let Ok(path) = entry.path() {
        trace!("Parsing archive member {}", path.display());
      }
      return Some(Document::parse(BufReader::new(&mut entry)));
    }
  }
}
