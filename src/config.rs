//! Optional configuration file at `<config_dir>/taken/config.toml`.
//!
//! Every key is optional; a missing file yields `Config::default()`.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overrides data directory discovery
    pub data_dir: Option<PathBuf>,

    /// Category shown when the TUI starts, if it exists
    pub default_filter: Option<String>,

    /// Render category colours in the TUI
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_filter: None,
            color: true,
        }
    }
}

impl Config {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taken").join("config.toml"))
    }

    /// Load from the default location, or defaults if there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Missing file → defaults; invalid TOML → `Error::Config`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match crate::persistence::files::read_file(path)? {
            Some(content) => content,
            None => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
        };

        toml::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load(&temp_dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert!(config.color);
    }

    #[test]
    fn test_overrides_from_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
data_dir = "/tmp/taken-data"
default_filter = "Werk"
color = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/taken-data")));
        assert_eq!(config.default_filter.as_deref(), Some("Werk"));
        assert!(!config.color);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "default_filter = \"Health\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, None);
        assert!(config.color);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "this = [not valid").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Config { .. })));
    }
}
