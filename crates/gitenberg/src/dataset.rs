//! The identifier-keyed catalog dataset and its on-disk cache.
//!
//! Parsing the full catalog takes minutes, so the resulting [`Dataset`] is persisted
//! as a single gzip-compressed JSON blob. [`Dataset::load`] returns the cached dataset
//! when the blob exists and otherwise rebuilds it from the archive:
//!
//! 1. Fetch the archive if it is not present locally
//! 2. Walk every archive member
//! 3. Parse each member carrying a `pgterms:ebook` element into a [`CatalogRecord`]
//! 4. Key the records by identifier, later members overwriting earlier ones
//! 5. Write the whole dataset to the cache path
//!
//! The cache is all-or-nothing: there is no incremental refresh, and a present cache
//! is trusted without looking at the archive. Delete the cache file to force a rebuild.
//!
//! The blob format is internal to this crate and not meant to be read across versions.

use std::io::{BufWriter, Write};

use flate2::{read::GzDecoder, write::GzEncoder, Compression};

use super::*;
use crate::{archive::CatalogArchive, document::Document};

/// All catalog records, keyed by ebook identifier.
///
/// # Examples
///
/// ```no_run
/// use gitenberg::{Config, Dataset};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let dataset = Dataset::load(&Config::default())?;
/// let english = dataset
///   .records()
///   .filter(|record| record.language.as_ref().is_some_and(|l| l.iter().any(|l| l == "en")))
///   .count();
/// println!("{english} of {} records are in English", dataset.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
  /// Records by identifier
  records: BTreeMap<u64, CatalogRecord>,
}

impl Dataset {
  /// Returns the cached dataset, building and caching it first if necessary.
  ///
  /// # Errors
  ///
  /// Any failure while fetching, walking, parsing or persisting is returned
  /// unchanged; nothing is cached in that case.
  pub fn load(config: &Config) -> Result<Self> {
    if config.cache_path.exists() {
      debug!("Using cached dataset at {}", config.cache_path.display());
      return Self::read(&config.cache_path);
    }

    archive::fetch_archive(&config.archive_url, &config.archive_path)?;
    let mut archive = CatalogArchive::open(&config.archive_path)?;
    let dataset = Self::from_documents(archive.documents()?)?;
    dataset.write(&config.cache_path)?;

    info!("Cached {} catalog records at {}", dataset.len(), config.cache_path.display());
    Ok(dataset)
  }

  /// Builds a dataset from a sequence of parsed documents.
  ///
  /// Documents without an ebook element are skipped. The first error, whether from
  /// the sequence itself or from parsing an ebook, stops the build.
  #[instrument(skip(documents))]
  pub fn from_documents<I>(documents: I) -> Result<Self>
  where I: IntoIterator<Item = Result<Document>> {
    let mut dataset = Self::default();
    let mut skipped = 0usize;
    for document in documents {
      let document = document?;
      match document.ebook() {
        Some(ebook) => dataset.insert(CatalogRecord::from_ebook(ebook)?),
        None => skipped += 1,
      }
    }
    debug!("Parsed {} records, skipped {skipped} documents without an ebook", dataset.len());
    Ok(dataset)
  }

  /// Reads a dataset previously written with [`Dataset::write`].
  pub fn read(path: impl AsRef<Path>) -> Result<Self> {
    let file = File::open(path.as_ref())?;
    let decoder = BufReader::new(GzDecoder::new(BufReader::new(file)));
    Ok(serde_json::from_reader(decoder)?)
  }

  /// Writes the dataset as gzip-compressed JSON.
  ///
  /// The blob is written next to `path` first and renamed into place, so readers never
  /// see a partially written cache. A failed write leaves no staging file behind.
  pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    write_staged(path, "tmp", |staging| {
      let mut encoder =
        GzEncoder::new(BufWriter::new(File::create(staging)?), Compression::default());
      serde_json::to_writer(&mut encoder, self)?;
      encoder.finish()?.flush()?;
      Ok(())
    })?;
    debug!("Wrote {} records to {}", self.len(), path.display());
    Ok(())
  }

  /// Adds a record, replacing any earlier record with the same identifier.
  pub(crate) fn insert(&mut self, record: CatalogRecord) {
    if let Some(previous) = self.records.insert(record.id, record) {
      trace!("Replaced earlier record for ebook {}", previous.id);
    }
  }

  /// The record for ebook `id`.
  pub fn get(&self, id: u64) -> Option<&CatalogRecord> { self.records.get(&id) }

  /// Number of records.
  pub fn len(&self) -> usize { self.records.len() }

  /// Whether the dataset holds no records.
  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  /// Records in ascending identifier order.
  pub fn records(&self) -> impl Iterator<Item = &CatalogRecord> { self.records.values() }

  /// Unwraps the identifier-to-record mapping.
  pub fn into_inner(self) -> BTreeMap<u64, CatalogRecord> { self.records }
}

impl FromIterator<CatalogRecord> for Dataset {
  fn from_iter<T: IntoIterator<Item = CatalogRecord>>(iter: T) -> Self {
    let mut dataset = Self::default();
    iter.into_iter().for_each(|record| dataset.insert(record));
    dataset
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Dataset {
    let mut first = CatalogRecord::new(1);
    first.title = Some("The Declaration of Independence of the United States of America".into());
    first.author = Some("Jefferson, Thomas".into());
    first.author_year_of_birth = Some(1743);
    first.author_year_of_death = Some(1826);
    first.classification.insert("JK".into());
    first.subjects.insert("United States -- History -- Revolution, 1775-1783 -- Sources".into());
    first.formats.insert("text/plain".into(), "http://www.gutenberg.org/ebooks/1.txt.utf-8".into());
    first.language = Some(vec!["en".into()]);
    first.kind = Some("Text".into());
    first.downloads = Some(1234);

    [first, CatalogRecord::new(2)].into_iter().collect()
  }

  #[traced_test]
  #[test]
  fn test_write_then_read() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cache").join("md.json.gz");
    let dataset = sample();

    dataset.write(&path).unwrap();
    assert!(path.exists());
    assert!(!dir.path().join("cache").join("md.json.gz.tmp").exists());

    let loaded = Dataset::read(&path).unwrap();
    assert_eq!(loaded, dataset);
    assert!(logs_contain("Wrote 2 records"));
  }

  #[test]
  fn test_later_duplicate_wins() {
    let mut newer = CatalogRecord::new(7);
    newer.downloads = Some(10);
    let dataset: Dataset = [CatalogRecord::new(7), newer.clone()].into_iter().collect();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.get(7), Some(&newer));
  }

  #[test]
  fn test_documents_without_ebook_are_skipped() {
    let documents = vec![
      Document::from_str("<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\"/>"),
      Document::from_str(
        "<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\" \
         xmlns:pgterms=\"http://www.gutenberg.org/2009/pgterms/\">\
         <pgterms:ebook rdf:about=\"ebooks/42\"/></rdf:RDF>",
      ),
    ];
    let dataset = Dataset::from_documents(documents).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.get(42), Some(&CatalogRecord::new(42)));
  }

  #[test]
  fn test_first_error_stops_build() {
    let documents = vec![
      Err(GitenbergError::MalformedDocument("bad member".into())),
      Document::from_str("<root/>"),
    ];
    assert!(matches!(
      Dataset::from_documents(documents),
      Err(GitenbergError::MalformedDocument(_))
    ));
  }

  #[test]
  fn test_cache_short_circuits_archive() {
    let dir = tempdir().unwrap();
    let cache = dir.path().join("md.json.gz");
    sample().write(&cache).unwrap();

    // Neither the archive nor the URL exist; only the cache may be touched.
    let config = Config::default()
      .with_archive_url("http://127.0.0.1:9/missing.tar.bz2")
      .with_archive_path(&dir.path().join("missing.tar.bz2"))
      .with_cache_path(&cache);
    assert_eq!(Dataset::load(&config).unwrap(), sample());
    assert!(!dir.path().join("missing.tar.bz2").exists());
  }

  #[test]
  fn test_corrupt_cache() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("md.json.gz");
    fs::write(&path, b"not gzip at all").unwrap();
    assert!(Dataset::read(&path).is_err());
  }
}
