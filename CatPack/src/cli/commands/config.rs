//! CLI command showing and editing the saved preferences

use std::path::PathBuf;

use crate::catalog::CatalogFamily;
use crate::cli::CliContext;
use crate::config::Preferences;

/// Preference changes requested on the command line
#[derive(Debug, Clone, Default)]
pub struct PreferenceChanges {
    pub offline: Option<bool>,
    pub match_names: Option<bool>,
    pub resources_dir: Option<PathBuf>,
    pub remote_base: Option<String>,
    pub clear_external: bool,
    pub creator: Option<String>,
    pub family: Option<CatalogFamily>,
}

impl PreferenceChanges {
    /// Apply the changes, returning true if anything was requested
    pub fn apply(&self, preferences: &mut Preferences) -> bool {
        let mut changed = false;
        if self.clear_external {
            preferences.resources_local_directory = None;
            preferences.resources_remote_url_base = None;
            changed = true;
        }
        if let Some(offline) = self.offline {
            preferences.offline = offline;
            changed = true;
        }
        if let Some(enabled) = self.match_names {
            preferences.match_content_name_to_item_name = enabled;
            changed = true;
        }
        if let Some(directory) = &self.resources_dir {
            preferences.resources_local_directory = Some(directory.clone());
            changed = true;
        }
        if let Some(base) = &self.remote_base {
            preferences.resources_remote_url_base = Some(base.clone());
            changed = true;
        }
        if let Some(creator) = &self.creator {
            preferences.default_creator = Some(creator.clone()).filter(|c| !c.is_empty());
            changed = true;
        }
        if let Some(family) = self.family {
            preferences.default_family = family;
            changed = true;
        }
        changed
    }
}

pub fn execute(changes: &PreferenceChanges, context: &CliContext) -> anyhow::Result<()> {
    let mut preferences = context.preferences.clone();
    if changes.apply(&mut preferences) {
        preferences.recorder_options().validate()?;
        match &context.preferences_path {
            Some(path) => {
                preferences.save_to(path)?;
                println!("Saved preferences to {}", path.display());
            }
            None => {
                preferences.save()?;
                if let Some(path) = Preferences::default_path() {
                    println!("Saved preferences to {}", path.display());
                }
            }
        }
    }
    println!("{}", serde_json::to_string_pretty(&preferences)?);
    Ok(())
}
