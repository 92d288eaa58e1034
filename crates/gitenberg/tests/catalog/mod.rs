use super::*;

fn record_from(xml: &str) -> gitenberg::error::Result<CatalogRecord> {
  let document = Document::from_str(xml)?;
  CatalogRecord::from_ebook(document.ebook().expect("document has an ebook element"))
}

#[traced_test]
#[test]
fn test_parse_published_record() -> TestResult<()> {
  let record = record_from(PG123)?;

  let expected = CatalogRecord {
    id:                   123,
    author:               Some("Burroughs, Edgar Rice".to_string()),
    author_year_of_birth: Some(1875),
    author_year_of_death: Some(1950),
    title:                Some("At the Earth's Core".to_string()),
    subjects:             BTreeSet::from(
      [
        "Adventure stories",
        "Earth (Planet) -- Core -- Fiction",
        "Fantasy fiction",
        "Science fiction",
      ]
      .map(String::from),
    ),
    classification:       BTreeSet::from(["PS".to_string()]),
    formats:              BTreeMap::from(
      [
        ("application/epub+zip", "http://www.gutenberg.org/ebooks/123.epub.noimages"),
        ("text/plain", "http://www.gutenberg.org/ebooks/123.txt.utf-8"),
        ("text/plain; charset=us-ascii", "http://www.gutenberg.org/files/123/123.zip"),
        ("text/html; charset=iso-8859-1", "http://www.gutenberg.org/files/123/123-h.zip"),
      ]
      .map(|(mime, url)| (mime.to_string(), url.to_string())),
    ),
    kind:                 Some("Text".to_string()),
    language:             Some(vec!["en".to_string()]),
    downloads:            Some(401),
  };
  assert_eq!(record, expected);
  assert!(logs_contain("Parsing ebook 123"));
  Ok(())
}

#[test]
fn test_subject_vocabularies_do_not_mix() -> TestResult<()> {
  let record = record_from(PG123)?;
  assert!(record.subjects.is_disjoint(&record.classification));
  assert!(!record.subjects.contains("PS"));
  assert!(!record.classification.contains("Science fiction"));
  Ok(())
}

#[test]
fn test_multiline_title() -> TestResult<()> {
  let body = "<dcterms:title>First Across ...\r\nThe Story of ... \r\n\
              Being an investigation into ...</dcterms:title>";
  let record = record_from(&ebook_document(4, body))?;
  assert_eq!(
    record.title.as_deref(),
    Some("First Across ...: The Story of ...; Being an investigation into ...")
  );
  Ok(())
}

#[test]
fn test_escaped_title() -> TestResult<()> {
  let body = "<dcterms:title>Pride &amp; Prejudice</dcterms:title>";
  let record = record_from(&ebook_document(1342, body))?;
  assert_eq!(record.title.as_deref(), Some("Pride & Prejudice"));
  Ok(())
}

#[test]
fn test_distinct_mime_types_counted_once() -> TestResult<()> {
  let file = |url: &str, mime: &str| {
    format!(
      "<dcterms:hasFormat><pgterms:file rdf:about=\"{url}\"><dcterms:format><rdf:Description>\
       <rdf:value>{mime}</rdf:value></rdf:Description></dcterms:format></pgterms:file>\
       </dcterms:hasFormat>"
    )
  };
  let body = [
    file("http://example.org/a.txt", "text/plain"),
    file("http://example.org/a.epub", "application/epub+zip"),
    file("http://example.org/b.txt", "text/plain"),
  ]
  .concat();
  let record = record_from(&ebook_document(8, &body))?;
  assert_eq!(record.formats.len(), 2);
  assert_eq!(
    record.formats.get("text/plain").map(String::as_str),
    Some("http://example.org/b.txt")
  );
  Ok(())
}

#[test]
fn test_etext_number_from_plain_text_header() -> TestResult<()> {
  let header = "The Project Gutenberg EBook of At the Earth's Core, by Edgar Rice Burroughs\r\n\
                \r\n\
                This eBook is for the use of anyone anywhere at no cost\r\n\
                \r\n\
                Title: At the Earth's Core\r\n\
                \r\n\
                Release Date: March 17, 2004 [EBook #11609]\r\n\
                Posting Date: [EBook #123]\r\n";
  assert_eq!(text::etext_number(header.lines())?, 11609);
  Ok(())
}

#[test]
fn test_etext_number_missing() {
  let lines = ["Title: Untitled", "Author: Anonymous"];
  assert!(matches!(text::etext_number(lines), Err(GitenbergError::EtextNotFound)));
}
