//! Locations of the catalog archive and the dataset cache.
//!
//! Nothing in the library reaches for a process-wide path: every operation that
//! touches the filesystem or the network takes a [`Config`]. The defaults place both
//! files under the platform cache directory:
//!
//! - On Unix: `~/.cache/gitenberg/`
//! - On macOS: `~/Library/Caches/gitenberg/`
//! - On Windows: `%LOCALAPPDATA%\gitenberg\`
//! - Fallback: `./gitenberg/` in the current directory
//!
//! A configuration can also be kept on disk as TOML:
//!
//! ```toml
//! archive_url  = "http://www.gutenberg.org/cache/epub/feeds/rdf-files.tar.bz2"
//! archive_path = "/data/gutenberg/rdf-files.tar.bz2"
//! cache_path   = "/data/gutenberg/metadata.json.gz"
//! ```
//!
//! Keys left out of the file keep their default value.

use super::*;

/// Remote location of the bulk RDF catalog.
pub const DEFAULT_ARCHIVE_URL: &str = "http://www.gutenberg.org/cache/epub/feeds/rdf-files.tar.bz2";

/// File name of the downloaded catalog archive.
const ARCHIVE_FILE_NAME: &str = "rdf-files.tar.bz2";

/// File name of the persisted dataset.
const CACHE_FILE_NAME: &str = "metadata.json.gz";

/// Where the catalog comes from and where it is kept locally.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use gitenberg::Config;
///
/// let config = Config::default()
///   .with_archive_path(Path::new("/tmp/rdf-files.tar.bz2"))
///   .with_cache_path(Path::new("/tmp/md.json.gz"));
/// assert_eq!(config.cache_path, Path::new("/tmp/md.json.gz"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// URL the archive is fetched from when it is not present locally
  pub archive_url:  String,
  /// Local path of the `rdf-files.tar.bz2` archive
  pub archive_path: PathBuf,
  /// Local path of the gzip-compressed dataset blob
  pub cache_path:   PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    let dir = Self::default_cache_dir();
    Self {
      archive_url:  DEFAULT_ARCHIVE_URL.to_string(),
      archive_path: dir.join(ARCHIVE_FILE_NAME),
      cache_path:   dir.join(CACHE_FILE_NAME),
    }
  }
}

impl Config {
  /// Directory holding the archive and the cache unless configured otherwise.
  pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")).join("gitenberg")
  }

  /// Default location of the TOML configuration file.
  ///
  /// Constructed as `<platform config dir>/gitenberg/config.toml`, falling back to the
  /// current directory when the platform has no config directory.
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("gitenberg").join("config.toml")
  }

  /// Reads a configuration from a TOML file.
  ///
  /// # Errors
  ///
  /// Returns [`GitenbergError::Path`] if the file cannot be read and
  /// [`GitenbergError::TomlDe`] if it is not a valid configuration.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    if config.archive_url.trim().is_empty() {
      return Err(GitenbergError::Config(format!(
        "archive_url in {} must not be empty",
        path.display()
      )));
    }
    Ok(config)
  }

  /// Writes this configuration as TOML, creating parent directories as needed.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, toml::to_string_pretty(self)?)?;
    debug!("Saved configuration to {}", path.display());
    Ok(())
  }

  /// Sets the URL the archive is fetched from.
  pub fn with_archive_url(mut self, url: &str) -> Self {
    self.archive_url = url.to_string();
    self
  }

  /// Sets the local archive location.
  pub fn with_archive_path(mut self, path: &Path) -> Self {
    self.archive_path = path.to_path_buf();
    self
  }

  /// Sets the local dataset cache location.
  pub fn with_cache_path(mut self, path: &Path) -> Self {
    self.cache_path = path.to_path_buf();
    self
  }
}
