//! Packaging options of the library recorder

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use url::Url;

/// Where resources are published when they are not embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteBase<'a> {
    /// An absolute URL such as `https://host/resources/`
    Absolute(&'a str),
    /// A prefix relative to the library file such as `resources/`
    Relative(&'a str),
}

impl<'a> RemoteBase<'a> {
    /// Classify a configured base
    #[must_use]
    pub fn parse(base: &'a str) -> Self {
        if Url::parse(base).is_ok() {
            RemoteBase::Absolute(base)
        } else {
            RemoteBase::Relative(base)
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'a str {
        match self {
            RemoteBase::Absolute(base) | RemoteBase::Relative(base) => base,
        }
    }
}

/// Options controlling how libraries are read and written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecorderOptions {
    /// Embed every resource and ignore the external resources settings
    pub offline: bool,
    /// Name resource entries after their item instead of their source file
    pub match_content_name_to_item_name: bool,
    /// Directory receiving externalized resources
    pub resources_local_directory: Option<PathBuf>,
    /// URL base under which the resources directory is published
    pub resources_remote_url_base: Option<String>,
}

impl RecorderOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    #[must_use]
    pub fn match_content_name_to_item_name(mut self, enabled: bool) -> Self {
        self.match_content_name_to_item_name = enabled;
        self
    }

    /// Externalize resources to `local_directory`, published at `remote_base`
    #[must_use]
    pub fn external_resources(
        mut self,
        local_directory: impl Into<PathBuf>,
        remote_base: impl Into<String>,
    ) -> Self {
        self.resources_local_directory = Some(local_directory.into());
        self.resources_remote_url_base = Some(remote_base.into());
        self
    }

    /// Check that the external resources settings are consistent
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when, outside offline mode, only one of
    /// the local directory and the remote base is set.
    pub fn validate(&self) -> Result<()> {
        if self.offline {
            return Ok(());
        }
        match (
            &self.resources_local_directory,
            &self.resources_remote_url_base,
        ) {
            (Some(_), None) => Err(Error::InvalidConfig(
                "a resources directory requires a remote URL base".to_string(),
            )),
            (None, Some(_)) => Err(Error::InvalidConfig(
                "a remote URL base requires a resources directory".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// Resources directory in effect (none when offline)
    #[must_use]
    pub fn local_directory(&self) -> Option<&Path> {
        if self.offline {
            None
        } else {
            self.resources_local_directory.as_deref()
        }
    }

    /// Remote base in effect (none when offline)
    #[must_use]
    pub fn remote_base(&self) -> Option<RemoteBase<'_>> {
        if self.offline {
            None
        } else {
            self.resources_remote_url_base.as_deref().map(RemoteBase::parse)
        }
    }

    /// Resources are copied to the local directory instead of the archive
    #[must_use]
    pub fn externalizes_resources(&self) -> bool {
        self.local_directory().is_some()
    }

    /// URL contents are written as they are instead of being packaged
    #[must_use]
    pub fn keep_external_unchanged(&self) -> bool {
        self.remote_base().is_some()
    }
}
