//! Persisted user preferences

use crate::catalog::CatalogFamily;
use crate::error::Result;
use crate::recorder::RecorderOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Preferences shared by every library operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Embed every resource in saved libraries
    pub offline: bool,
    /// Name packaged resources after their item
    pub match_content_name_to_item_name: bool,
    /// Directory receiving resources that are not embedded
    pub resources_local_directory: Option<PathBuf>,
    /// URL base under which that directory is published
    pub resources_remote_url_base: Option<String>,
    /// Creator given to imported items
    pub default_creator: Option<String>,
    /// Family of new libraries
    pub default_family: CatalogFamily,
}

impl Preferences {
    /// Default location, `<config dir>/CatPack/preferences.json`
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("CatPack").join("preferences.json"))
    }

    /// Load preferences from the default location, or return defaults
    #[must_use]
    pub fn load() -> Self {
        Self::default_path()
            .and_then(|path| Self::load_from(path).ok())
            .unwrap_or_default()
    }

    /// Load preferences from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save preferences to the default location
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        match Self::default_path() {
            Some(path) => self.save_to(path),
            None => Ok(()),
        }
    }

    /// Save preferences to a file, creating its directory
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Recorder options matching these preferences
    #[must_use]
    pub fn recorder_options(&self) -> RecorderOptions {
        RecorderOptions {
            offline: self.offline,
            match_content_name_to_item_name: self.match_content_name_to_item_name,
            resources_local_directory: self.resources_local_directory.clone(),
            resources_remote_url_base: self.resources_remote_url_base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_take_defaults() {
        let preferences: Preferences =
            serde_json::from_str(r#"{ "offline": true, "default_family": "furniture" }"#).unwrap();
        assert!(preferences.offline);
        assert_eq!(preferences.default_family, CatalogFamily::Furniture);
        assert_eq!(preferences.default_creator, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");
        let preferences = Preferences {
            resources_local_directory: Some(dir.path().join("res")),
            resources_remote_url_base: Some("https://host/res/".to_string()),
            default_creator: Some("Studio".to_string()),
            ..Preferences::default()
        };
        preferences.save_to(&path).unwrap();
        assert_eq!(Preferences::load_from(&path).unwrap(), preferences);

        let options = preferences.recorder_options();
        assert!(options.externalizes_resources());
        assert!(options.keep_external_unchanged());
    }
}
