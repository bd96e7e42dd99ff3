#![allow(non_snake_case)]
//! # CatPack
//!
//! A pure-Rust library for reading and writing textures and furniture
//! catalog libraries: ZIP archives holding a locale-layered set of
//! `.properties` catalogs next to the resources they reference.
//!
//! ## Supported Formats
//!
//! - **Textures libraries** (`.sh3t`) - `DefaultTexturesCatalog*.properties`
//! - **Furniture libraries** (`.sh3f`) - `DefaultFurnitureCatalog*.properties`
//! - **Java-style `.properties`** - ISO-8859-1 with `\uXXXX` escapes
//!
//! ## Quick Start
//!
//! ### Reading a Library
//!
//! ```no_run
//! use catpack::prelude::*;
//!
//! let recorder = LibraryRecorder::new(RecorderOptions::default());
//! let mut library = Library::new(CatalogFamily::Textures);
//! recorder.load(&mut library, "woods.sh3t")?;
//! println!("Found {} textures", library.len());
//! # Ok::<(), catpack::Error>(())
//! ```
//!
//! ### Writing a Library
//!
//! ```no_run
//! use catpack::prelude::*;
//!
//! let mut library = Library::new(CatalogFamily::Textures);
//! library.add_item(CatalogItem::new(
//!     "Oak",
//!     Category::new("Wood"),
//!     Content::temporary_file("oak.jpg"),
//!     50.0,
//!     50.0,
//! ));
//! LibraryRecorder::new(RecorderOptions::default()).write(&library, "woods.sh3t")?;
//! # Ok::<(), catpack::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `catpack` command-line binary
//! - `remote` - Downloads `http(s)` resources that must be embedded

pub mod catalog;
pub mod config;
pub mod error;
pub mod formats;
pub mod recorder;

#[cfg(feature = "cli")]
pub mod cli;

// Re-exports for convenience
pub use error::{Error, Result};

/// Crate version, written into generated catalog headers
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};

    pub use crate::catalog::{
        CatalogContents, CatalogFamily, CatalogItem, Category, Content, ContentSource, ItemId,
        Library, LibraryMetadata, LocalizedField, ReadMode, SortKey, UrlContent, filter_ids,
        sorted_ids,
    };

    pub use crate::recorder::{
        CancelToken, LibraryRecorder, RecordPhase, RecordProgress, RecorderOptions,
    };

    pub use crate::config::Preferences;
    pub use crate::formats::{available_locales, locale_suffix};
}
