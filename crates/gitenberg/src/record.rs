//! Catalog records and the ebook element parser.
//!
//! A [`CatalogRecord`] is the flat, per-ebook view of one catalog document. It is
//! produced by [`CatalogRecord::from_ebook`] from the `pgterms:ebook` element of a
//! parsed [`Document`](crate::document::Document).
//!
//! Each field is read from its own sub-tree of the ebook element:
//!
//! | Field | Source |
//! |-------|--------|
//! | `id` | basename of `@rdf:about` on the ebook |
//! | `author`, years | first `dcterms:creator`: `pgterms:name`, `pgterms:birthdate`, `pgterms:deathdate` |
//! | `title` | first `dcterms:title`, with subtitles joined onto one line |
//! | `subjects` / `classification` | `dcterms:subject` values, split by their `dcam:memberOf` vocabulary |
//! | `formats` | every `pgterms:file`: `dcterms:format//rdf:value` to `@rdf:about` |
//! | `type` | first `dcterms:type//rdf:value` |
//! | `language` | every `dcterms:language//rdf:value` |
//! | `downloads` | first `pgterms:downloads` |
//!
//! Optional metadata that is missing from the catalog is recorded as `None` and is
//! serialized as an explicit `null`, so "not provided" stays distinguishable from
//! "empty".

use super::*;

/// Bibliographic metadata for one catalog item.
///
/// # Examples
///
/// ```
/// use gitenberg::{document::Document, record::CatalogRecord};
///
/// let xml = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
///                       xmlns:pgterms="http://www.gutenberg.org/2009/pgterms/">
///   <pgterms:ebook rdf:about="ebooks/123"/>
/// </rdf:RDF>"#;
///
/// let document: Document = xml.parse().unwrap();
/// let record = CatalogRecord::from_ebook(document.ebook().unwrap()).unwrap();
/// assert_eq!(record.id, 123);
/// assert_eq!(record.author, None);
/// assert_eq!(record.language, None);
/// assert!(record.subjects.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
  /// Project Gutenberg identifier of the text
  pub id:                   u64,
  /// Author in "Last, First" form
  pub author:               Option<String>,
  /// Author's year of birth, negative for years BCE
  #[serde(rename = "authoryearofbirth")]
  pub author_year_of_birth: Option<i32>,
  /// Author's year of death, negative for years BCE
  #[serde(rename = "authoryearofdeath")]
  pub author_year_of_death: Option<i32>,
  /// Title, with any subtitles joined onto a single line
  pub title:                Option<String>,
  /// Library of Congress Subject Headings, possibly hierarchical
  /// (e.g. "England -- Social life and customs -- 19th century -- Fiction")
  pub subjects:             BTreeSet<String>,
  /// Library of Congress Classification codes, e.g. "PS"
  #[serde(rename = "LCC")]
  pub classification:       BTreeSet<String>,
  /// Download URL for each available MIME type
  pub formats:              BTreeMap<String, String>,
  /// Kind of item: "Text", "Sound", ...
  #[serde(rename = "type")]
  pub kind:                 Option<String>,
  /// Two-letter language codes in catalog order; `None` when the catalog lists none
  pub language:             Option<Vec<String>>,
  /// Downloads from gutenberg.org over the last 30 days
  pub downloads:            Option<u64>,
}

impl CatalogRecord {
  /// A record carrying only its identifier, every other field absent.
  pub fn new(id: u64) -> Self {
    Self {
      id,
      author: None,
      author_year_of_birth: None,
      author_year_of_death: None,
      title: None,
      subjects: BTreeSet::new(),
      classification: BTreeSet::new(),
      formats: BTreeMap::new(),
      kind: None,
      language: None,
      downloads: None,
    }
  }

  /// Extracts a record from a `pgterms:ebook` element.
  ///
  /// # Errors
  ///
  /// - [`GitenbergError::MissingIdentifier`] if the ebook has no `rdf:about`
  /// - [`GitenbergError::InvalidInteger`] if the identifier, a creator year or the
  ///   download count is not an integer
  /// - [`GitenbergError::MissingField`] if a classified subject has no value, or a
  ///   file has no format value or no `rdf:about`
  pub fn from_ebook(ebook: &Element) -> Result<Self> {
    let mut record = Self::new(identifier(ebook)?);
    trace!("Parsing ebook {}", record.id);

    if let Some(creator) = ebook.find(namespace::DC, "creator") {
      record.author = creator.find(namespace::PG, "name").and_then(Element::text).map(String::from);
      record.author_year_of_birth = creator
        .find(namespace::PG, "birthdate")
        .map(|birth| integer(birth, "authoryearofbirth"))
        .transpose()?;
      record.author_year_of_death = creator
        .find(namespace::PG, "deathdate")
        .map(|death| integer(death, "authoryearofdeath"))
        .transpose()?;
    }

    record.title =
      ebook.find(namespace::DC, "title").and_then(Element::text).map(text::fix_subtitles);

    for subject in ebook.find_all(namespace::DC, "subject") {
      let Some(vocabulary) = subject
        .find(namespace::DCAM, "memberOf")
        .and_then(|member_of| member_of.attribute(namespace::RDF, "resource"))
      else {
        continue;
      };
      let target = match vocabulary {
        namespace::LCSH => &mut record.subjects,
        namespace::LCC => &mut record.classification,
        _ => continue,
      };
      let value = subject
        .find(namespace::RDF, "value")
        .and_then(Element::text)
        .ok_or(GitenbergError::MissingField("subject value"))?;
      target.insert(value.to_string());
    }

    for file in ebook.find_all(namespace::PG, "file") {
      let mime = file
        .child(namespace::DC, "format")
        .and_then(|format| format.find(namespace::RDF, "value"))
        .and_then(Element::text)
        .ok_or(GitenbergError::MissingField("file format value"))?;
      let url = file
        .attribute(namespace::RDF, "about")
        .ok_or(GitenbergError::MissingField("file rdf:about"))?;
      record.formats.insert(mime.to_string(), url.to_string());
    }

    record.kind = ebook
      .find(namespace::DC, "type")
      .and_then(|kind| kind.find(namespace::RDF, "value"))
      .and_then(Element::text)
      .map(String::from);

    let language: Vec<String> = ebook
      .find_all(namespace::DC, "language")
      .flat_map(|language| language.find_all(namespace::RDF, "value"))
      .filter_map(Element::text)
      .map(String::from)
      .collect();
    record.language = (!language.is_empty()).then_some(language);

    record.downloads = ebook
      .find(namespace::PG, "downloads")
      .map(|downloads| integer(downloads, "downloads"))
      .transpose()?;

    Ok(record)
  }
}

/// Reads the identifier from the basename of the ebook's `rdf:about`.
fn identifier(ebook: &Element) -> Result<u64> {
  let about =
    ebook.attribute(namespace::RDF, "about").ok_or(GitenbergError::MissingIdentifier)?;
  let basename = about.rsplit('/').next().unwrap_or(about);
  parse_integer(basename, "id")
}

/// Parses the text of `element` as an integer field.
fn integer<T: FromStr>(element: &Element, field: &'static str) -> Result<T> {
  parse_integer(element.text().unwrap_or_default(), field)
}

/// Parses `value`, ignoring surrounding whitespace.
fn parse_integer<T: FromStr>(value: &str, field: &'static str) -> Result<T> {
  value
    .trim()
    .parse()
    .map_err(|_| GitenbergError::InvalidInteger { field, value: value.to_string() })
}
