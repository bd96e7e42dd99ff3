//! Catalog items and categories

use super::content::Content;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

/// A named category, ordered case-insensitively by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Category {
    name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A texture or a piece of furniture
///
/// Texture libraries only store `id`, `name`, `category`, `content` (the
/// image), `width`, `height` and `creator`; the other fields belong to
/// furniture libraries.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: Option<String>,
    pub name: String,
    pub category: Category,
    pub creator: Option<String>,
    /// Texture image or furniture model
    pub content: Content,
    pub icon: Option<Content>,
    pub plan_icon: Option<Content>,
    pub width: f32,
    pub height: f32,
    pub depth: Option<f32>,
    pub elevation: Option<f32>,
    /// The model is a directory of files (model and side-car textures)
    pub multi_part_model: bool,
    pub movable: Option<bool>,
    pub door_or_window: Option<bool>,
    pub price: Option<f64>,
    pub value_added_tax_percentage: Option<f64>,
    pub currency: Option<String>,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub information: Option<String>,
    pub creation_date: Option<NaiveDate>,
    pub grade: Option<f32>,
}

impl CatalogItem {
    /// Create an item with its mandatory fields
    pub fn new(
        name: impl Into<String>,
        category: Category,
        content: Content,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            category,
            creator: None,
            content,
            icon: None,
            plan_icon: None,
            width,
            height,
            depth: None,
            elevation: None,
            multi_part_model: false,
            movable: None,
            door_or_window: None,
            price: None,
            value_added_tax_percentage: None,
            currency: None,
            tags: Vec::new(),
            description: None,
            information: None,
            creation_date: None,
            grade: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: Content) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Resources of this item: content, icon, plan icon
    pub fn contents(&self) -> impl Iterator<Item = &Content> {
        std::iter::once(&self.content)
            .chain(self.icon.as_ref())
            .chain(self.plan_icon.as_ref())
    }
}
