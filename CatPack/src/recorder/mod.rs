//! Reading and writing catalog library archives
//!
//! [`LibraryRecorder`] ties together the catalog reader, the catalog writer
//! and the resource entry naming rules:
//!
//! ```no_run
//! use catpack::catalog::{CatalogFamily, Library};
//! use catpack::recorder::{LibraryRecorder, RecorderOptions};
//!
//! let recorder = LibraryRecorder::new(RecorderOptions::new());
//! let mut library = Library::new(CatalogFamily::Textures);
//! recorder.load(&mut library, "woods.sh3t")?;
//! recorder.merge(&mut library, "stones.sh3t")?;
//! recorder.write(&library, "materials.sh3t")?;
//! # Ok::<(), catpack::Error>(())
//! ```

mod cancel;
pub mod entries;
mod options;
mod progress;
pub mod reader;
pub mod writer;

pub use cancel::CancelToken;
pub use entries::{EntryNames, content_property, resolve_entry_name};
pub use options::{RecorderOptions, RemoteBase};
pub use progress::{ProgressCallback, RecordPhase, RecordProgress, no_progress};

use crate::catalog::{CatalogContents, ItemId, Library, ReadMode};
use crate::error::{Error, Result};
use std::path::Path;

/// Loads, merges and saves libraries with one set of options
#[derive(Debug, Clone, Default)]
pub struct LibraryRecorder {
    options: RecorderOptions,
    cancel: CancelToken,
}

impl LibraryRecorder {
    #[must_use]
    pub fn new(options: RecorderOptions) -> Self {
        Self {
            options,
            cancel: CancelToken::new(),
        }
    }

    /// Use `cancel` to interrupt this recorder's operations
    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn options(&self) -> &RecorderOptions {
        &self.options
    }

    #[must_use]
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Read an archive without applying it to a library
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] if the archive cannot be read, or
    /// [`Error::Interrupted`] if the operation was cancelled.
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<CatalogContents> {
        reader::read_catalog(path.as_ref(), &self.options, &self.cancel, &no_progress)
    }

    /// Replace the contents of `library` with an archive
    ///
    /// Items, translations and supported locales are replaced, and the
    /// archive metadata becomes the library metadata. The library is left
    /// unchanged if reading fails.
    ///
    /// # Errors
    ///
    /// Same as [`LibraryRecorder::read`].
    pub fn load<P: AsRef<Path>>(&self, library: &mut Library, path: P) -> Result<Vec<ItemId>> {
        self.read_into(library, path.as_ref(), ReadMode::Replace, &no_progress)
    }

    /// Append the items of an archive to `library`
    ///
    /// Library metadata is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`LibraryRecorder::read`], and [`Error::InvalidCatalog`] if the
    /// archive belongs to another catalog family.
    pub fn merge<P: AsRef<Path>>(&self, library: &mut Library, path: P) -> Result<Vec<ItemId>> {
        self.read_into(library, path.as_ref(), ReadMode::Merge, &no_progress)
    }

    /// Read an archive into `library`, reporting progress
    ///
    /// # Errors
    ///
    /// Same as [`LibraryRecorder::merge`].
    pub fn read_into(
        &self,
        library: &mut Library,
        path: &Path,
        mode: ReadMode,
        progress: ProgressCallback,
    ) -> Result<Vec<ItemId>> {
        let contents = reader::read_catalog(path, &self.options, &self.cancel, progress)?;
        if mode == ReadMode::Merge && contents.family != library.family() {
            return Err(Error::InvalidCatalog {
                path: path.to_path_buf(),
                message: format!(
                    "cannot merge a {} library into a {} library",
                    contents.family,
                    library.family()
                ),
            });
        }

        let locales = contents.locales.len();
        let ids = library.apply(contents, mode);
        progress(&RecordProgress::new(RecordPhase::Complete, 1, 1));
        tracing::info!(
            "{} {} items and {} locales from {}",
            match mode {
                ReadMode::Replace => "Loaded",
                ReadMode::Merge => "Merged",
            },
            ids.len(),
            locales,
            path.display()
        );
        Ok(ids)
    }

    /// Save `library` to `destination`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] wrapped in [`Error::WriteFailed`] for
    /// inconsistent options, [`Error::WriteFailed`] for any other failure and
    /// [`Error::Interrupted`] if the operation was cancelled.
    pub fn write<P: AsRef<Path>>(&self, library: &Library, destination: P) -> Result<()> {
        self.write_with_progress(library, destination, &no_progress)
    }

    /// Save `library` to `destination`, reporting progress
    ///
    /// # Errors
    ///
    /// Same as [`LibraryRecorder::write`].
    pub fn write_with_progress<P: AsRef<Path>>(
        &self,
        library: &Library,
        destination: P,
        progress: ProgressCallback,
    ) -> Result<()> {
        writer::write_catalog(
            library,
            destination.as_ref(),
            &self.options,
            &self.cancel,
            progress,
        )
    }
}
