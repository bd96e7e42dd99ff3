//! Per-locale overrides of item fields

use super::family::keys;
use super::library::ItemId;
use std::collections::{BTreeMap, HashMap};

/// Item fields that can be translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocalizedField {
    Name,
    Category,
}

impl LocalizedField {
    pub const ALL: [LocalizedField; 2] = [LocalizedField::Name, LocalizedField::Category];

    /// Property key of the field
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            LocalizedField::Name => keys::NAME,
            LocalizedField::Category => keys::CATEGORY,
        }
    }
}

/// Sparse `(item, locale, field) -> value` table
///
/// The default locale has no entry here; its values are the item fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    locales: BTreeMap<String, HashMap<ItemId, BTreeMap<LocalizedField, String>>>,
}

impl OverrideTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an override, returning the previous value
    pub fn set(
        &mut self,
        item: ItemId,
        locale: &str,
        field: LocalizedField,
        value: impl Into<String>,
    ) -> Option<String> {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .entry(item)
            .or_default()
            .insert(field, value.into())
    }

    #[must_use]
    pub fn get(&self, item: ItemId, locale: &str, field: LocalizedField) -> Option<&str> {
        self.locales
            .get(locale)?
            .get(&item)?
            .get(&field)
            .map(String::as_str)
    }

    /// Overrides of one item at one locale
    #[must_use]
    pub fn item_overrides(
        &self,
        item: ItemId,
        locale: &str,
    ) -> Option<&BTreeMap<LocalizedField, String>> {
        self.locales.get(locale)?.get(&item)
    }

    pub fn remove(&mut self, item: ItemId, locale: &str, field: LocalizedField) -> Option<String> {
        let items = self.locales.get_mut(locale)?;
        let fields = items.get_mut(&item)?;
        let removed = fields.remove(&field);
        if fields.is_empty() {
            items.remove(&item);
        }
        if items.is_empty() {
            self.locales.remove(locale);
        }
        removed
    }

    /// Drop every override of an item
    pub fn remove_item(&mut self, item: ItemId) {
        for items in self.locales.values_mut() {
            items.remove(&item);
        }
        self.locales.retain(|_, items| !items.is_empty());
    }

    /// Drop every override of a locale
    pub fn remove_locale(&mut self, locale: &str) {
        self.locales.remove(locale);
    }

    /// Locales having at least one override, sorted
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    /// Total number of stored overrides
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales
            .values()
            .flat_map(HashMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    pub fn clear(&mut self) {
        self.locales.clear();
    }
}
