use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::catalog::{CatalogFamily, Library, SortKey};
use crate::recorder::LibraryRecorder;

mod execute;
pub mod config;
pub mod create;
pub mod export;
pub mod info;
pub mod list;
pub mod locales;
pub mod merge;

#[derive(Subcommand)]
pub enum Commands {
    /// Show library metadata, item count and locales
    Info {
        /// Library file (.sh3t or .sh3f)
        library: PathBuf,
    },

    /// List the items of a library
    List {
        /// Library file (.sh3t or .sh3f)
        library: PathBuf,

        /// Sort column: id, name, category, creator, width, height, depth, price
        #[arg(long, default_value = "name")]
        sort: SortKey,

        /// Sort in descending order
        #[arg(long)]
        descending: bool,

        /// Only list items whose texts contain this value
        #[arg(long)]
        filter: Option<String>,

        /// Show names and categories translated to this locale (e.g., fr, pt_BR)
        #[arg(long)]
        locale: Option<String>,
    },

    /// Build a library from a directory of images or models
    Create {
        /// Directory to import
        source: PathBuf,

        /// Library file to write
        destination: PathBuf,

        /// Library family: textures or furniture (defaults to the preferences)
        #[arg(long)]
        family: Option<CatalogFamily>,

        /// Category of every item (defaults to each file's directory name)
        #[arg(long)]
        category: Option<String>,

        /// Item width in cm
        #[arg(long, default_value_t = 100.0)]
        width: f32,

        /// Item height in cm
        #[arg(long, default_value_t = 100.0)]
        height: f32,

        /// Item depth in cm (furniture only)
        #[arg(long, default_value_t = 100.0)]
        depth: f32,

        /// Creator of every item (defaults to the preferences)
        #[arg(long)]
        creator: Option<String>,

        /// Library name
        #[arg(long)]
        name: Option<String>,
    },

    /// Merge several libraries into one
    Merge {
        /// Library file to write
        destination: PathBuf,

        /// Libraries to merge, in order
        #[arg(required = true)]
        libraries: Vec<PathBuf>,
    },

    /// Save a library again with other packaging options
    Export {
        /// Library to read
        source: PathBuf,

        /// Library file to write
        destination: PathBuf,

        /// Embed every resource in the library
        #[arg(long)]
        offline: bool,

        /// Directory receiving resources that are not embedded
        #[arg(long)]
        resources_dir: Option<PathBuf>,

        /// URL base under which the resources directory is published
        #[arg(long)]
        remote_base: Option<String>,

        /// Name resources after their item
        #[arg(long)]
        match_names: bool,
    },

    /// Print the locales offered for translation
    Locales,

    /// Show the saved preferences, changing the given ones first
    Config {
        /// Embed every resource in saved libraries
        #[arg(long)]
        offline: Option<bool>,

        /// Name packaged resources after their item
        #[arg(long)]
        match_names: Option<bool>,

        /// Directory receiving resources that are not embedded
        #[arg(long)]
        resources_dir: Option<PathBuf>,

        /// URL base under which the resources directory is published
        #[arg(long)]
        remote_base: Option<String>,

        /// Forget the resources directory and URL base
        #[arg(long, conflicts_with_all = ["resources_dir", "remote_base"])]
        clear_external: bool,

        /// Creator given to imported items (empty to unset)
        #[arg(long)]
        creator: Option<String>,

        /// Family of new libraries: textures or furniture
        #[arg(long)]
        family: Option<CatalogFamily>,
    },
}

/// Read a library, guessing its family from the file extension
fn load_library(
    recorder: &LibraryRecorder,
    path: &Path,
    default_family: CatalogFamily,
) -> anyhow::Result<Library> {
    let family = CatalogFamily::from_path(path).unwrap_or(default_family);
    let mut library = Library::new(family);
    recorder.load(&mut library, path)?;
    Ok(library)
}
