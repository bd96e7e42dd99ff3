//! In-memory model of texture and furniture catalog libraries
//!
//! A [`Library`] holds ordered [`CatalogItem`]s, per-locale translations of
//! their names and categories, the set of supported locales and library
//! metadata. Items reference their binary resources through [`Content`]
//! values.

pub mod content;
pub mod family;
pub mod item;
pub mod library;
pub mod overrides;
#[cfg(feature = "remote")]
mod remote;
pub mod sort;

pub use content::{ArchiveSnapshot, Content, ContentSource, UrlContent};
pub use family::CatalogFamily;
pub use item::{CatalogItem, Category};
pub use library::{
    CatalogContents, ItemId, Library, LibraryMetadata, PositionalOverride, ReadMode,
};
pub use overrides::{LocalizedField, OverrideTable};
pub use sort::{SortKey, filter_ids, sorted_ids};
