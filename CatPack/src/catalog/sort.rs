//! Sorting and filtering of library items for table display

use super::item::CatalogItem;
use super::library::{ItemId, Library};
use std::cmp::Ordering;
use std::str::FromStr;

/// Column used to order items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Category,
    Creator,
    Width,
    Height,
    Depth,
    Price,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "category" => Ok(SortKey::Category),
            "creator" => Ok(SortKey::Creator),
            "width" => Ok(SortKey::Width),
            "height" => Ok(SortKey::Height),
            "depth" => Ok(SortKey::Depth),
            "price" => Ok(SortKey::Price),
            _ => Err(format!(
                "Invalid sort key '{s}'. Valid values: id, name, category, creator, width, height, depth, price"
            )),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Present values first, then absent ones
fn compare_optional<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_number<T: PartialOrd>(a: T, b: T) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn compare_items(
    library: &Library,
    key: SortKey,
    locale: &str,
    (a_id, a): (ItemId, &CatalogItem),
    (b_id, b): (ItemId, &CatalogItem),
) -> Ordering {
    match key {
        SortKey::Id => compare_optional(a.id.as_deref(), b.id.as_deref(), compare_text),
        SortKey::Name => compare_text(
            library.localized_name(a_id, locale).unwrap_or(a.name.as_str()),
            library.localized_name(b_id, locale).unwrap_or(b.name.as_str()),
        ),
        SortKey::Category => compare_text(
            library
                .localized_category(a_id, locale)
                .unwrap_or(a.category.name()),
            library
                .localized_category(b_id, locale)
                .unwrap_or(b.category.name()),
        ),
        SortKey::Creator => {
            compare_optional(a.creator.as_deref(), b.creator.as_deref(), compare_text)
        }
        SortKey::Width => compare_number(a.width, b.width),
        SortKey::Height => compare_number(a.height, b.height),
        SortKey::Depth => compare_optional(a.depth, b.depth, compare_number),
        SortKey::Price => compare_optional(a.price, b.price, compare_number),
    }
}

/// Item handles ordered by `key`
///
/// Text compares case-insensitively and ties keep library order. Absent
/// values come last in ascending order and first in descending order.
#[must_use]
pub fn sorted_ids(library: &Library, key: SortKey, descending: bool, locale: &str) -> Vec<ItemId> {
    let mut entries: Vec<(ItemId, &CatalogItem)> = library.items().collect();
    entries.sort_by(|a, b| {
        let ordering = compare_items(library, key, locale, *a, *b);
        if descending { ordering.reverse() } else { ordering }
    });
    entries.into_iter().map(|(id, _)| id).collect()
}

/// Item handles whose texts contain `text`, case-insensitively, in library order
///
/// Name and category are matched at `locale` as well as in the default locale.
#[must_use]
pub fn filter_ids(library: &Library, text: &str, locale: &str) -> Vec<ItemId> {
    let needle = text.to_lowercase();
    library
        .items()
        .filter(|(id, item)| {
            let mut haystacks = vec![item.name.as_str(), item.category.name()];
            haystacks.extend(library.localized_name(*id, locale));
            haystacks.extend(library.localized_category(*id, locale));
            haystacks.extend(item.creator.as_deref());
            haystacks.extend(item.id.as_deref());
            haystacks.extend(item.tags.iter().map(String::as_str));
            haystacks
                .iter()
                .any(|haystack| haystack.to_lowercase().contains(&needle))
        })
        .map(|(id, _)| id)
        .collect()
}
