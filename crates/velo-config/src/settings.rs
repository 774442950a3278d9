//! Runtime settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Configurator settings.
///
/// Every field has a default, so an empty TOML file is a valid settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Prefix of generated configuration ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Replaces the product's currency code when set
    #[serde(default)]
    pub currency: Option<String>,

    /// Saved configuration database; defaults to the user data directory
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Product definition file; the built-in bicycle is used when unset
    #[serde(default)]
    pub product_path: Option<PathBuf>,

    /// Reject product definitions whose rules reference unknown options
    #[serde(default)]
    pub strict: bool,
}

fn default_id_prefix() -> String {
    "MK".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            currency: None,
            storage_path: None,
            product_path: None,
            strict: false,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the configured storage path or the default under the user data directory.
    pub fn resolve_storage_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::NoDataDir)?;
        Ok(base.join("velo").join("configurations.redb"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.id_prefix, "MK");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "id_prefix = \"VB\"\nstrict = true\nstorage_path = \"/tmp/velo.redb\""
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.id_prefix, "VB");
        assert!(settings.strict);
        assert_eq!(
            settings.resolve_storage_path().unwrap(),
            PathBuf::from("/tmp/velo.redb")
        );
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Settings::from_toml_str("strict = \"yes\""),
            Err(ConfigError::Settings(_))
        ));
    }
}
