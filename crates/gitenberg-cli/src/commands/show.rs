//! Module for the "show" command, displaying one catalog record.

use super::*;

/// Function for the [`Commands::Show`] in the CLI.
pub fn show(config: &Config, id: u64, json: bool) -> Result<()> {
  let dataset = Dataset::load(config)?;

  let Some(record) = dataset.get(id) else {
    println!("{} No record for ebook #{}", style(WARNING_PREFIX).yellow(), style(id).yellow());
    return Ok(());
  };
  debug!("Found record: {:?}", record);

  if json {
    println!("{}", serde_json::to_string_pretty(record)?);
    return Ok(());
  }

  let years = match (record.author_year_of_birth, record.author_year_of_death) {
    (None, None) => None,
    (birth, death) => Some(format!(
      "{}-{}",
      birth.map(|y| y.to_string()).unwrap_or_default(),
      death.map(|y| y.to_string()).unwrap_or_default()
    )),
  };

  let mut fields = vec![
    ("Title:", record.title.clone()),
    ("Author:", record.author.clone()),
    ("Years:", years),
    ("Type:", record.kind.clone()),
    ("Language:", record.language.as_ref().map(join)),
    ("Downloads:", record.downloads.map(|d| d.to_string())),
    ("Subjects:", Some(join(&record.subjects)).filter(|s| !s.is_empty())),
    ("LCC:", Some(join(&record.classification)).filter(|s| !s.is_empty())),
  ];
  fields
    .extend(record.formats.iter().map(|(mime, url)| ("Format:", Some(format!("{mime} {url}")))));
  let fields: Vec<_> =
    fields.into_iter().filter_map(|(label, value)| value.map(|v| (label, v))).collect();

  println!("\n{} Ebook #{}", style(SUCCESS_PREFIX).green(), style(record.id).bold());
  for (i, (label, value)) in fields.iter().enumerate() {
    let branch = if i + 1 == fields.len() { TREE_LEAF } else { TREE_BRANCH };
    println!("   {} {} {}", branch, style(label).green().bold(), style(value).white());
  }
  Ok(())
}

/// Comma-separated list of `values`.
fn join<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
  values.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
