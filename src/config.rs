//! Configuration management for pagevault using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::util::validate_database_url;
use crate::repository::{DbContext, DbError};

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "pagevault.db";

/// Default storage subdirectory name.
const DOCUMENTS_SUBDIR: &str = "storage";

/// Default number of files accepted by a single upload.
pub const DEFAULT_MAX_UPLOAD_FILES: usize = 3;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("{0}\n\nUse a sqlite: URL or remove DATABASE_URL to use the default SQLite database")]
    DatabaseUrl(String),
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    /// Supports sqlite: URLs. Set via DATABASE_URL env var.
    pub database_url: Option<String>,
    /// Directory for storing uploaded PDFs.
    pub documents_dir: PathBuf,
    /// Maximum files per upload command.
    pub max_upload_files: usize,
    /// Truncate generated source ids to this many hex chars.
    pub source_id_length: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        // Documents dir -> Home dir -> Current dir
        let data_dir = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pagevault");

        Self {
            documents_dir: data_dir.join(DOCUMENTS_SUBDIR),
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            max_upload_files: DEFAULT_MAX_UPLOAD_FILES,
            source_id_length: None,
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            documents_dir: data_dir.join(DOCUMENTS_SUBDIR),
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure all directories exist.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        for (dir, label) in [(&self.data_dir, "data"), (&self.documents_dir, "storage")] {
            fs::create_dir_all(dir).map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create {} directory '{}': {}",
                        label,
                        dir.display(),
                        e
                    ),
                )
            })?;
        }
        Ok(())
    }

    /// Create a database context using the configured database URL or path.
    pub fn create_db_context(&self) -> Result<DbContext, DbError> {
        DbContext::from_url(&self.database_url())
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "target")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Storage directory for uploaded PDFs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documents_dir: Option<String>,
    /// Maximum files per upload command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_files: Option<u64>,
    /// Source id length in hex chars (omit for the full 32).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id_length: Option<u64>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers pagevault config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("pagevault").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        let mut config = Self::parse(ext, &contents)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn parse(ext: &str, contents: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
            settings.documents_dir = settings.data_dir.join(DOCUMENTS_SUBDIR);
        }
        if let Some(ref documents_dir) = self.documents_dir {
            settings.documents_dir = self.resolve_path(documents_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(max) = self.max_upload_files {
            settings.max_upload_files = usize::try_from(max).unwrap_or(usize::MAX);
        }
        if let Some(length) = self.source_id_length {
            settings.source_id_length = usize::try_from(length).ok();
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
    /// Data directory or database file (--target flag).
    /// Can be a directory containing pagevault.db or a .db file directly.
    pub target: Option<PathBuf>,
}

fn is_db_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "db" || ext == "sqlite" || ext == "sqlite3")
        || path.is_file()
}

fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

/// Split a --target value into (data_dir, database_filename).
fn resolve_target(path: &Path) -> (PathBuf, Option<String>) {
    let path = absolutize(path);
    if is_db_file(&path) {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);
        let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        (dir, filename)
    } else {
        (path, None)
    }
}

/// Look for a config file next to the database.
fn find_config_next_to_db(data_dir: &Path) -> Option<PathBuf> {
    let extensions = ["json", "yaml", "yml", "toml"];
    let basenames = ["pagevault", "config"];

    for basename in basenames {
        for ext in extensions {
            let path = data_dir.join(format!("{}.{}", basename, ext));
            if path.exists() {
                return Some(path);
            }
        }
    }
    None
}

/// Load config from file sources.
async fn load_file_config(
    options: &LoadOptions,
    data_dir_override: Option<&PathBuf>,
) -> Result<Config, ConfigError> {
    // Priority 1: Explicit --config flag
    if let Some(ref config_path) = options.config_path {
        return Config::load_from_path(config_path).await;
    }

    // Priority 2: Config next to data dir
    if let Some(data_dir) = data_dir_override {
        if let Some(config_path) = find_config_next_to_db(data_dir) {
            tracing::debug!("Found config next to data dir: {}", config_path.display());
            return Config::load_from_path(&config_path).await;
        }
    }

    // Priority 3: Auto-discover via prefer
    Ok(Config::load().await)
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(
    options: LoadOptions,
) -> Result<(Settings, Config), ConfigError> {
    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .filter(|s| !s.is_empty());
    if let Some(ref url) = database_url {
        validate_database_url(url).map_err(ConfigError::DatabaseUrl)?;
    }

    let target = options.target.as_deref().map(resolve_target);
    let config = load_file_config(&options, target.as_ref().map(|(dir, _)| dir)).await?;

    let mut settings = Settings::default();

    let base_dir = if options.use_cwd {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    } else {
        config
            .base_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    };

    config.apply_to_settings(&mut settings, &base_dir);

    // --target takes precedence for data_dir and documents_dir
    if let Some((data_dir, filename)) = target {
        settings.documents_dir = data_dir.join(DOCUMENTS_SUBDIR);
        settings.data_dir = data_dir;
        if let Some(filename) = filename {
            settings.database_filename = filename;
        }
    }

    // DATABASE_URL environment variable takes highest precedence
    if let Some(database_url) = database_url {
        tracing::debug!("Using DATABASE_URL from environment: {}", database_url);
        settings.database_url = Some(database_url);
    }

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_data_dir(PathBuf::from("/data/pv"));
        assert_eq!(settings.documents_dir, PathBuf::from("/data/pv/storage"));
        assert_eq!(settings.database_path(), PathBuf::from("/data/pv/pagevault.db"));
        assert_eq!(settings.database_url(), "sqlite:/data/pv/pagevault.db");
        assert_eq!(settings.max_upload_files, 3);
        assert_eq!(settings.source_id_length, None);
    }

    #[test]
    fn test_apply_relative_paths() {
        let config = Config {
            data_dir: Some("vault".to_string()),
            max_upload_files: Some(5),
            source_id_length: Some(8),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/etc/pagevault"));

        assert_eq!(settings.data_dir, PathBuf::from("/etc/pagevault/vault"));
        assert_eq!(
            settings.documents_dir,
            PathBuf::from("/etc/pagevault/vault/storage")
        );
        assert_eq!(settings.max_upload_files, 5);
        assert_eq!(settings.source_id_length, Some(8));
    }

    #[test]
    fn test_resolve_target_db_file() {
        let (dir, filename) = resolve_target(Path::new("/srv/data/papers.db"));
        assert_eq!(dir, PathBuf::from("/srv/data"));
        assert_eq!(filename.as_deref(), Some("papers.db"));

        let (dir, filename) = resolve_target(Path::new("/srv/nonexistent-dir"));
        assert_eq!(dir, PathBuf::from("/srv/nonexistent-dir"));
        assert!(filename.is_none());
    }

    #[tokio::test]
    async fn test_load_from_toml_and_yaml() {
        let dir = tempdir().unwrap();

        let toml_path = dir.path().join("pagevault.toml");
        fs::write(&toml_path, "data_dir = \"/tmp/pv\"\nmax_upload_files = 2\n").unwrap();
        let config = Config::load_from_path(&toml_path).await.unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("/tmp/pv"));
        assert_eq!(config.max_upload_files, Some(2));
        assert_eq!(config.base_dir(), Some(dir.path().to_path_buf()));

        let yaml_path = dir.path().join("config.yaml");
        fs::write(&yaml_path, "target: ./data\nsource_id_length: 8\n").unwrap();
        let config = Config::load_from_path(&yaml_path).await.unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("./data"));
        assert_eq!(config.source_id_length, Some(8));
    }

    #[tokio::test]
    async fn test_load_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pagevault.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_path(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "JSON", .. }));
    }
}
