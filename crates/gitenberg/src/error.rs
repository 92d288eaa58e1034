//! Error types for the gitenberg library.
//!
//! The catalog build is a one-shot batch job, so most failures here are fatal and
//! surface unchanged to the caller:
//! - Network and filesystem errors while acquiring the archive or the cache
//! - Malformed XML in an archive member
//! - Catalog entries missing a required identifier or format value
//! - Non-integer text where an integer is mandated
//!
//! The one expected, recoverable outcome is [`GitenbergError::EtextNotFound`], returned
//! when no etext number can be located in a run of text lines.
//!
//! # Examples
//!
//! ```
//! use gitenberg::{error::GitenbergError, text::etext_number};
//!
//! match etext_number(["Some lines", "without", "Any [Etext] Number"]) {
//!   Ok(id) => println!("Found etext #{id}"),
//!   Err(GitenbergError::EtextNotFound) => println!("No etext number, try other lines"),
//!   Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error type alias used for the [`gitenberg`](crate) crate.
pub type Result<T> = core::result::Result<T, GitenbergError>;

/// Errors that can occur while building or reading the catalog dataset.
#[derive(Error, Debug)]
pub enum GitenbergError {
  /// Fetching the catalog archive failed.
  ///
  /// Covers an unreachable host, TLS errors and non-success HTTP statuses. There is
  /// no retry: the caller sees the first failure.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - The archive or cache file cannot be opened, created or renamed
  /// - An archive member cannot be read
  /// - The configuration file cannot be read or written
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// An archive member is not well-formed XML.
  ///
  /// A malformed member aborts the whole walk.
  #[error(transparent)]
  Xml(#[from] quick_xml::Error),

  /// An element in an archive member carries a malformed attribute.
  #[error(transparent)]
  XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

  /// An archive member is well-formed XML at the token level but not a usable
  /// document, e.g. it has no root element or ends with elements left open.
  #[error("Malformed catalog document: {0}")]
  MalformedDocument(String),

  /// The persisted dataset could not be encoded or decoded.
  #[error(transparent)]
  Cache(#[from] serde_json::Error),

  /// An ebook element has no `rdf:about` attribute to derive its identifier from.
  #[error("Ebook element has no rdf:about identifier")]
  MissingIdentifier,

  /// A field that must hold an integer held something else.
  ///
  /// Raised for the ebook identifier, the author's birth and death years and the
  /// download count.
  #[error("Expected an integer for {field}, found {value:?}")]
  InvalidInteger {
    /// Name of the field being parsed
    field: &'static str,
    /// The offending text
    value: String,
  },

  /// A value the parser requires is absent from the catalog entry.
  ///
  /// A `pgterms:file` without a `dcterms:format` value is the typical cause.
  #[error("Catalog entry is missing {0}")]
  MissingField(&'static str),

  /// No line contained an etext number.
  ///
  /// This is an expected outcome of [`etext_number`](crate::text::etext_number) and
  /// never signals malformed input.
  #[error("No etext number found")]
  EtextNotFound,

  /// The configuration file is not valid TOML for a [`Config`](crate::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// The configuration is unusable for another reason.
  #[error("{0}")]
  Config(String),
}
