//! Free-text helpers: subtitle normalization and etext number extraction.
//!
//! Both functions are pure and work on plain strings, so they can be used on catalog
//! titles as well as on the header lines of plain-text editions.

use super::*;

lazy_static! {
  /// A run of line breaks, with any horizontal whitespace around it.
  static ref LINE_BREAK: Regex = Regex::new(r"[ \t]*[\n\r]+[ \t]*").unwrap();

  /// An etext number next to an "etext", "ebook" or "eook" keyword.
  ///
  /// The number either follows the keyword after a `#` ("EBook #11609") or sits in
  /// front of a trailing `#` ("Etext 1576#").
  static ref ETEXT: Regex = Regex::new(
    r"(?ix)
    e(?:text|b?ook)
    \s*
    (?:
      \#\s*(?P<front>[0-9]+)
      |
      (?P<back>[0-9]+)\s*\#
    )"
  )
  .unwrap();
}

/// Joins a multi-line title into a single line.
///
/// The first run of line breaks introduces the subtitle with `": "`, every later run
/// becomes `"; "`. Spaces and tabs around a line break are absorbed. A title without
/// line breaks is returned unchanged, so the function is idempotent.
///
/// # Examples
///
/// ```
/// use gitenberg::text::fix_subtitles;
///
/// assert_eq!(
///   fix_subtitles(
///     "First Across ...\r\nThe Story of ... \r\nBeing an investigation into ..."
///   ),
///   "First Across ...: The Story of ...; Being an investigation into ..."
/// );
/// ```
pub fn fix_subtitles(title: &str) -> String {
  let first = LINE_BREAK.replacen(title, 1, ": ");
  LINE_BREAK.replace_all(&first, "; ").into_owned()
}

/// Finds the etext number in the first line that mentions one.
///
/// Lines are scanned in order and the first match wins. When a match could be read
/// either way, the number following the keyword's `#` takes precedence over a number
/// followed by `#`.
///
/// # Errors
///
/// Returns [`GitenbergError::EtextNotFound`] when no line matches. This is an expected
/// outcome: the caller may try other lines or give up.
///
/// Returns [`GitenbergError::InvalidInteger`] when the first matching line carries a
/// number too large for a `u64`. The scan stops there; later lines are not tried.
///
/// # Examples
///
/// ```
/// use gitenberg::{error::GitenbergError, text::etext_number};
///
/// assert_eq!(etext_number(["Release Date: March 17, 2004 [EBook #11609]"]).unwrap(), 11609);
/// assert_eq!(etext_number(["Release Date: July, 2003 [Etext# 4263]"]).unwrap(), 4263);
/// assert_eq!(etext_number(["Release Date: November 29, 2003 [Eook #10335]"]).unwrap(), 10335);
/// assert_eq!(etext_number(["December, 1998  [Etext 1576#]"]).unwrap(), 1576);
/// assert!(matches!(
///   etext_number(["Some lines", "without", "Any [Etext] Number"]),
///   Err(GitenbergError::EtextNotFound)
/// ));
/// ```
pub fn etext_number<I, S>(lines: I) -> Result<u64>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>, {
  for line in lines {
    let line = line.as_ref();
    if let Some(captures) = ETEXT.captures(line) {
      let digits = captures
        .name("front")
        .or_else(|| captures.name("back"))
        .map(|m| m.as_str())
        .ok_or(GitenbergError::EtextNotFound)?;
      trace!("Found etext number {digits} in line {line:?}");
      return digits.parse().map_err(|_| GitenbergError::InvalidInteger {
        field: "etext number",
        value: digits.to_string(),
      });
    }
  }
  Err(GitenbergError::EtextNotFound)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_single_subtitle() {
    assert_eq!(fix_subtitles("Moby Dick\nor, The Whale"), "Moby Dick: or, The Whale");
  }

  #[test]
  fn test_later_subtitles_use_semicolons() {
    assert_eq!(fix_subtitles("One \t\r\n\r\n Two\nThree\rFour"), "One: Two; Three; Four");
  }

  #[test]
  fn test_fix_subtitles_is_idempotent() {
    let once = fix_subtitles("A Title\r\nA Subtitle\r\nA Further Note");
    assert_eq!(fix_subtitles(&once), once);
    assert_eq!(fix_subtitles("Plain title"), "Plain title");
  }

  #[test]
  fn test_interior_spaces_untouched() {
    assert_eq!(fix_subtitles("  Leading  and trailing  "), "  Leading  and trailing  ");
  }

  #[traced_test]
  #[test]
  fn test_etext_keyword_variants() {
    assert_eq!(etext_number(["[EBook #11609]"]).unwrap(), 11609);
    assert_eq!(etext_number(["[ETEXT # 42]"]).unwrap(), 42);
    assert_eq!(etext_number(["[ebook#7]"]).unwrap(), 7);
    assert_eq!(etext_number(["[Eook #10335]"]).unwrap(), 10335);
    assert_eq!(etext_number(["[Etext 1576#]"]).unwrap(), 1576);
    assert_eq!(etext_number(["[eBook 99 #]"]).unwrap(), 99);
    assert!(logs_contain("Found etext number 99"));
  }

  #[test]
  fn test_first_matching_line_wins() {
    let lines = vec![
      "The Project Gutenberg EBook of Something",
      "Release Date: June, 2004 [EBook #5000]",
      "Posting Date: [EBook #6000]",
    ];
    assert_eq!(etext_number(&lines).unwrap(), 5000);
  }

  #[test]
  fn test_front_number_preferred() {
    // Both readings are available: "#12" after the keyword and "34#" before a hash.
    assert_eq!(etext_number(["Etext #12 34#"]).unwrap(), 12);
  }

  #[test]
  fn test_not_found() {
    assert!(matches!(
      etext_number(["Some lines", "without", "Any [Etext] Number"]),
      Err(GitenbergError::EtextNotFound)
    ));
    assert!(matches!(etext_number(Vec::<String>::new()), Err(GitenbergError::EtextNotFound)));
  }

  #[test]
  fn test_oversized_number_is_invalid() {
    assert!(matches!(
      etext_number(["[EBook #99999999999999999999999]", "[EBook #1]"]),
      Err(GitenbergError::InvalidInteger { field: "etext number", .. })
    ));
  }

  #[test]
  fn test_number_without_hash_is_ignored() {
    assert!(matches!(etext_number(["EBook 123"]), Err(GitenbergError::EtextNotFound)));
  }
}
