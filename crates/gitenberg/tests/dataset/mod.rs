use super::*;

fn members() -> Vec<(&'static str, String)> {
  vec![
    ("cache/epub/123/pg123.rdf", PG123.to_string()),
    (
      "cache/epub/0/pg0.rdf",
      r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"/>"#.to_string(),
    ),
    ("cache/epub/5/pg5.rdf", ebook_document(5, "<pgterms:downloads>7</pgterms:downloads>")),
    ("cache/epub/5/pg5-new.rdf", ebook_document(5, "<pgterms:downloads>9</pgterms:downloads>")),
  ]
}

#[traced_test]
#[test]
fn test_build_persist_and_reload() -> TestResult<()> {
  let (config, _dir) = offline_config();
  write_archive(config.archive_path.parent().unwrap(), &members())?;

  let built = Dataset::load(&config)?;
  assert_eq!(built.len(), 2);
  assert!(config.cache_path.exists());
  assert!(logs_contain("Cached 2 catalog records"));

  let reloaded = Dataset::load(&config)?;
  assert_eq!(reloaded, built);
  assert!(logs_contain("Using cached dataset"));
  Ok(())
}

#[test]
fn test_duplicate_identifier_keeps_later_member() -> TestResult<()> {
  let (config, _dir) = offline_config();
  write_archive(config.archive_path.parent().unwrap(), &members())?;

  let dataset = Dataset::load(&config)?;
  assert_eq!(dataset.get(5).and_then(|record| record.downloads), Some(9));
  assert_eq!(
    dataset.get(123).and_then(|record| record.title.as_deref()),
    Some("At the Earth's Core")
  );
  Ok(())
}

#[test]
fn test_cache_is_trusted_over_archive() -> TestResult<()> {
  let (config, _dir) = offline_config();
  let archive = write_archive(config.archive_path.parent().unwrap(), &members())?;
  let built = Dataset::load(&config)?;

  // Changing or removing the archive has no effect while the cache exists.
  fs::remove_file(&archive)?;
  assert_eq!(Dataset::load(&config)?, built);
  Ok(())
}

#[test]
fn test_malformed_member_aborts_without_caching() -> TestResult<()> {
  let (config, _dir) = offline_config();
  let mut members = members();
  members.insert(1, ("cache/epub/9/pg9.rdf", "<rdf:RDF><unclosed></rdf:RDF>".to_string()));
  write_archive(config.archive_path.parent().unwrap(), &members)?;

  assert!(Dataset::load(&config).is_err());
  assert!(!config.cache_path.exists());
  Ok(())
}

#[test]
fn test_missing_format_aborts() -> TestResult<()> {
  let (config, _dir) = offline_config();
  let body =
    r#"<dcterms:hasFormat><pgterms:file rdf:about="http://example.org/x"/></dcterms:hasFormat>"#;
  write_archive(config.archive_path.parent().unwrap(), &[("pg3.rdf", ebook_document(3, body))])?;

  assert!(matches!(Dataset::load(&config), Err(GitenbergError::MissingField(_))));
  Ok(())
}

#[test]
fn test_walk_yields_every_member() -> TestResult<()> {
  let dir = tempdir()?;
  let path = write_archive(dir.path(), &members())?;

  let mut archive = CatalogArchive::open(&path)?;
  let documents = archive.documents()?.collect::<Result<Vec<_>, _>>()?;
  assert_eq!(documents.len(), 4);
  assert_eq!(documents.iter().filter(|document| document.ebook().is_some()).count(), 3);
  Ok(())
}
