//! In-memory catalog library

use super::content::ArchiveSnapshot;
use super::family::CatalogFamily;
use super::item::{CatalogItem, Category};
use super::overrides::{LocalizedField, OverrideTable};
use crate::error::{Error, Result};
use crate::formats::locale::is_locale_tag;
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::fmt;

/// Stable handle of an item inside one [`Library`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Library-level metadata (un-indexed catalog keys)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryMetadata {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub license: Option<String>,
    pub provider: Option<String>,
}

/// Whether a read replaces the library or appends to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// Clear items, overrides and locales, and take the archive metadata
    Replace,
    /// Append items and overrides; metadata is left untouched
    Merge,
}

/// A localized value read from an overlay, bound by item position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalOverride {
    /// 0-based position in [`CatalogContents::items`]
    pub position: usize,
    pub locale: String,
    pub field: LocalizedField,
    pub value: String,
}

/// Everything read from a catalog archive, before it is applied to a library
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogContents {
    pub family: CatalogFamily,
    pub items: Vec<CatalogItem>,
    pub overrides: Vec<PositionalOverride>,
    /// Non-default locales found in the archive
    pub locales: BTreeSet<String>,
    pub metadata: LibraryMetadata,
    /// Private copy of the archive that `Content::Resource` items read from
    pub snapshot: Option<ArchiveSnapshot>,
}

/// Ordered collection of catalog items with translations and metadata
///
/// Insertion order is the default display order. The library has no internal
/// locking; callers serialize access through `&mut` borrows.
#[derive(Debug, Clone)]
pub struct Library {
    family: CatalogFamily,
    items: IndexMap<ItemId, CatalogItem>,
    overrides: OverrideTable,
    locales: BTreeSet<String>,
    metadata: LibraryMetadata,
    snapshots: Vec<ArchiveSnapshot>,
    next_id: u64,
}

impl Library {
    #[must_use]
    pub fn new(family: CatalogFamily) -> Self {
        Self {
            family,
            items: IndexMap::new(),
            overrides: OverrideTable::new(),
            locales: BTreeSet::new(),
            metadata: LibraryMetadata::default(),
            snapshots: Vec::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub fn family(&self) -> CatalogFamily {
        self.family
    }

    #[must_use]
    pub fn metadata(&self) -> &LibraryMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut LibraryMetadata {
        &mut self.metadata
    }

    /// Append an item, returning its handle
    pub fn add_item(&mut self, item: CatalogItem) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.insert(id, item);
        id
    }

    /// Append several items in order
    pub fn add_items(&mut self, items: impl IntoIterator<Item = CatalogItem>) -> Vec<ItemId> {
        items.into_iter().map(|item| self.add_item(item)).collect()
    }

    /// Remove an item and its overrides, keeping the order of the others
    pub fn remove_item(&mut self, id: ItemId) -> Option<CatalogItem> {
        let removed = self.items.shift_remove(&id)?;
        self.overrides.remove_item(id);
        Some(removed)
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut CatalogItem> {
        self.items.get_mut(&id)
    }

    /// Items in library order
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &CatalogItem)> {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    /// Item handles in library order
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    /// 0-based position of an item in library order
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.get_index_of(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove all items and their overrides (locales and metadata are kept)
    pub fn clear(&mut self) {
        self.items.clear();
        self.overrides.clear();
    }

    /// Distinct categories, sorted
    #[must_use]
    pub fn categories(&self) -> BTreeSet<Category> {
        self.items.values().map(|item| item.category.clone()).collect()
    }

    // ==================== Locales ====================

    /// Supported non-default locales, sorted
    pub fn supported_locales(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    /// Add a supported locale; returns false if it was already supported
    pub fn add_locale(&mut self, locale: &str) -> Result<bool> {
        check_locale(locale)?;
        Ok(self.locales.insert(locale.to_string()))
    }

    /// Remove a supported locale and its overrides
    pub fn remove_locale(&mut self, locale: &str) -> bool {
        self.overrides.remove_locale(locale);
        self.locales.remove(locale)
    }

    #[must_use]
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Set a translated value of an item field
    ///
    /// A value equal to the default-locale value removes the override. The
    /// locale becomes supported.
    pub fn set_localized(
        &mut self,
        id: ItemId,
        locale: &str,
        field: LocalizedField,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        check_locale(locale)?;
        let item = self.items.get(&id).ok_or(Error::ItemNotFound(id.raw()))?;
        let value = value.into();
        self.locales.insert(locale.to_string());

        if default_value(item, field) == value {
            Ok(self.overrides.remove(id, locale, field))
        } else {
            Ok(self.overrides.set(id, locale, field, value))
        }
    }

    #[must_use]
    pub fn localized(&self, id: ItemId, locale: &str, field: LocalizedField) -> Option<&str> {
        self.overrides.get(id, locale, field)
    }

    pub fn remove_localized(
        &mut self,
        id: ItemId,
        locale: &str,
        field: LocalizedField,
    ) -> Option<String> {
        self.overrides.remove(id, locale, field)
    }

    /// Item name at `locale`, falling back to the default name
    #[must_use]
    pub fn localized_name(&self, id: ItemId, locale: &str) -> Option<&str> {
        let item = self.items.get(&id)?;
        Some(
            self.overrides
                .get(id, locale, LocalizedField::Name)
                .unwrap_or(item.name.as_str()),
        )
    }

    /// Category name at `locale`, falling back to the default category
    #[must_use]
    pub fn localized_category(&self, id: ItemId, locale: &str) -> Option<&str> {
        let item = self.items.get(&id)?;
        Some(
            self.overrides
                .get(id, locale, LocalizedField::Category)
                .unwrap_or(item.category.name()),
        )
    }

    // ==================== Read results ====================

    /// Apply catalog contents read from an archive
    ///
    /// Returns the handles of the added items, in archive order.
    pub fn apply(&mut self, contents: CatalogContents, mode: ReadMode) -> Vec<ItemId> {
        let CatalogContents {
            family,
            items,
            overrides,
            locales,
            metadata,
            snapshot,
        } = contents;

        if mode == ReadMode::Replace {
            self.items.clear();
            self.overrides.clear();
            self.locales.clear();
            self.snapshots.clear();
            self.metadata = metadata;
            self.family = family;
        }

        let ids = self.add_items(items);
        for localized in overrides {
            if let Some(&id) = ids.get(localized.position) {
                self.overrides
                    .set(id, &localized.locale, localized.field, localized.value);
            }
        }
        self.locales.extend(locales);
        self.snapshots.extend(snapshot);
        ids
    }
}

fn check_locale(locale: &str) -> Result<()> {
    if is_locale_tag(locale) {
        Ok(())
    } else {
        Err(Error::InvalidLocale(locale.to_string()))
    }
}

fn default_value(item: &CatalogItem, field: LocalizedField) -> &str {
    match field {
        LocalizedField::Name => &item.name,
        LocalizedField::Category => item.category.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::content::Content;

    fn texture(name: &str, category: &str) -> CatalogItem {
        CatalogItem::new(
            name,
            Category::new(category),
            Content::temporary_file(format!("/tmp/{name}.png")),
            100.0,
            100.0,
        )
    }

    fn contents(names: &[&str]) -> CatalogContents {
        CatalogContents {
            family: CatalogFamily::Textures,
            items: names.iter().map(|n| texture(n, "Wood")).collect(),
            overrides: vec![PositionalOverride {
                position: 0,
                locale: "fr".to_string(),
                field: LocalizedField::Name,
                value: format!("{} (fr)", names[0]),
            }],
            locales: BTreeSet::from(["fr".to_string()]),
            metadata: LibraryMetadata {
                name: Some("Archive".to_string()),
                ..LibraryMetadata::default()
            },
            snapshot: None,
        }
    }

    #[test]
    fn test_add_and_remove_keep_order() {
        let mut library = Library::new(CatalogFamily::Textures);
        let ids = library.add_items([texture("a", "x"), texture("b", "x"), texture("c", "x")]);
        library.set_localized(ids[1], "de", LocalizedField::Name, "B").unwrap();

        let removed = library.remove_item(ids[1]).unwrap();
        assert_eq!(removed.name, "b");
        let names: Vec<&str> = library.items().map(|(_, item)| item.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(library.overrides().is_empty());
        assert_eq!(library.position(ids[2]), Some(1));
    }

    #[test]
    fn test_set_localized_equal_to_default_is_not_stored() {
        let mut library = Library::new(CatalogFamily::Textures);
        let id = library.add_item(texture("Oak", "Wood"));
        library.set_localized(id, "fr", LocalizedField::Name, "Ch\u{ea}ne").unwrap();
        assert_eq!(library.localized_name(id, "fr"), Some("Ch\u{ea}ne"));

        library.set_localized(id, "fr", LocalizedField::Name, "Oak").unwrap();
        assert_eq!(library.localized(id, "fr", LocalizedField::Name), None);
        assert_eq!(library.localized_name(id, "fr"), Some("Oak"));
        assert_eq!(library.supported_locales().collect::<Vec<_>>(), vec!["fr"]);
    }

    #[test]
    fn test_default_locale_is_rejected() {
        let mut library = Library::new(CatalogFamily::Textures);
        let id = library.add_item(texture("Oak", "Wood"));
        assert!(matches!(
            library.set_localized(id, "", LocalizedField::Name, "x"),
            Err(Error::InvalidLocale(_))
        ));
        assert!(library.add_locale("french").is_err());
    }

    #[test]
    fn test_apply_replace() {
        let mut library = Library::new(CatalogFamily::Textures);
        library.add_items([texture("old1", "x"), texture("old2", "x")]);
        library.add_locale("de").unwrap();

        let ids = library.apply(contents(&["n1", "n2", "n3"]), ReadMode::Replace);
        assert_eq!(library.len(), 3);
        assert_eq!(library.metadata().name.as_deref(), Some("Archive"));
        assert_eq!(library.supported_locales().collect::<Vec<_>>(), vec!["fr"]);
        assert_eq!(library.localized_name(ids[0], "fr"), Some("n1 (fr)"));
    }

    #[test]
    fn test_apply_merge() {
        let mut library = Library::new(CatalogFamily::Textures);
        library.add_items([texture("old1", "x"), texture("old2", "x")]);
        library.metadata_mut().name = Some("Mine".to_string());
        library.add_locale("de").unwrap();

        let ids = library.apply(contents(&["n1", "n2", "n3"]), ReadMode::Merge);
        assert_eq!(library.len(), 5);
        assert_eq!(library.metadata().name.as_deref(), Some("Mine"));
        assert_eq!(
            library.supported_locales().collect::<Vec<_>>(),
            vec!["de", "fr"]
        );
        assert_eq!(library.position(ids[0]), Some(2));
        assert_eq!(library.localized_name(ids[0], "fr"), Some("n1 (fr)"));
    }

    #[test]
    fn test_categories_sorted() {
        let mut library = Library::new(CatalogFamily::Textures);
        library.add_items([texture("a", "Wood"), texture("b", "stone"), texture("c", "Wood")]);
        let names: Vec<String> = library
            .categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["stone", "Wood"]);
    }
}
