//! Bibliographic metadata extraction from the Project Gutenberg catalog.
//!
//! `gitenberg` turns the bulk RDF/XML catalog published by Project Gutenberg into a
//! flat, queryable record set with one [`CatalogRecord`](record::CatalogRecord) per
//! ebook. It provides:
//!
//! - Acquisition of the `rdf-files.tar.bz2` catalog archive
//! - A streaming walk over every catalog document in that archive
//! - Field extraction (author, title, subjects, classification, formats, language,
//!   downloads) from each `pgterms:ebook` element
//! - A gzip-compressed cache of the full dataset so the archive is only parsed once
//! - Recovery of an etext number from the header lines of a plain-text edition
//!
//! # Getting Started
//!
//! ```no_run
//! use gitenberg::{prelude::*, Config, Dataset};
//!
//! fn main() -> Result<()> {
//!   // Uses the platform cache directory for both the archive and the dataset blob
//!   let dataset = Dataset::load(&Config::default())?;
//!
//!   if let Some(record) = dataset.get(123) {
//!     println!("{:?} by {:?}", record.title, record.author);
//!   }
//!   Ok(())
//! }
//! ```
//!
//! Recovering an identifier from a plain-text edition:
//!
//! ```
//! use gitenberg::text::etext_number;
//!
//! let id = etext_number(["Release Date: March 17, 2004 [EBook #11609]"]).unwrap();
//! assert_eq!(id, 11609);
//! ```
//!
//! # Module Organization
//!
//! - [`archive`]: Fetching the catalog archive and walking its members
//! - [`document`]: Namespace-aware element tree for a single catalog document
//! - [`record`]: The [`CatalogRecord`](record::CatalogRecord) type and the ebook parser
//! - [`dataset`]: The identifier-keyed dataset and its persisted cache
//! - [`text`]: Title normalization and etext number extraction
//! - [`configuration`]: Locations of the archive and the cache
//! - [`error`]: Error types shared by the whole crate

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  collections::{BTreeMap, BTreeSet},
  fs::{self, File},
  io::{self, BufRead, BufReader, Read},
  path::{Path, PathBuf},
  str::FromStr,
};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
#[cfg(test)]
use {tempfile::tempdir, tracing_test::traced_test};

pub mod archive;
pub mod configuration;
pub mod dataset;
pub mod document;
pub mod error;
pub mod record;
pub mod text;

pub use crate::{configuration::Config, dataset::Dataset};
use crate::{
  document::{namespace, Element},
  error::*,
  record::CatalogRecord,
};

/// Reads the full catalog dataset using the default [`Config`].
///
/// This is the no-argument entry point used by downstream tabulation and ad-hoc
/// analysis: the cached dataset is returned when present, otherwise the archive is
/// fetched (if missing), parsed in full and cached.
///
/// # Errors
///
/// Any network, filesystem, XML or field-parsing failure is returned as-is.
pub fn read_metadata() -> Result<Dataset> { Dataset::load(&Config::default()) }

/// Writes `path` through a sibling `<path>.<suffix>` staging file.
///
/// `write` receives the staging path. On success the staging file is renamed onto
/// `path`; on failure it is removed and the error is returned.
pub(crate) fn write_staged<T>(
  path: &Path,
  suffix: &str,
  write: impl FnOnce(&Path) -> Result<T>,
) -> Result<T> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let staging = staging_path(path, suffix);
  match write(&staging) {
    Ok(value) => {
      fs::rename(&staging, path)?;
      Ok(value)
    },
    Err(e) => {
      if staging.exists() {
        if let Err(cleanup) = fs::remove_file(&staging) {
          debug!("Could not remove {}: {cleanup}", staging.display());
        }
      }
      Err(e)
    },
  }
}

/// The staging location `<path>.<suffix>`.
fn staging_path(path: &Path, suffix: &str) -> PathBuf {
  let mut name = path.as_os_str().to_os_string();
  name.push(".");
  name.push(suffix);
  PathBuf::from(name)
}

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use gitenberg::prelude::*;
///
/// fn example() -> Result<()> {
///   let dataset = gitenberg::read_metadata()?;
///   println!("{} records", dataset.len());
///   Ok(())
/// }
/// ```
pub mod prelude {
  pub use crate::{
    dataset::Dataset,
    error::{GitenbergError, Result},
    record::CatalogRecord,
  };
}
