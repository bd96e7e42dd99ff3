//! Catalog families and their property keys

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Property key names, as written before the `#N` index
pub mod keys {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const CATEGORY: &str = "category";
    pub const CREATOR: &str = "creator";
    pub const IMAGE: &str = "image";
    pub const MODEL: &str = "model";
    pub const ICON: &str = "icon";
    pub const PLAN_ICON: &str = "planIcon";
    pub const WIDTH: &str = "width";
    pub const HEIGHT: &str = "height";
    pub const DEPTH: &str = "depth";
    pub const ELEVATION: &str = "elevation";
    pub const MULTI_PART_MODEL: &str = "multiPartModel";
    pub const MOVABLE: &str = "movable";
    pub const DOOR_OR_WINDOW: &str = "doorOrWindow";
    pub const PRICE: &str = "price";
    pub const VALUE_ADDED_TAX_PERCENTAGE: &str = "valueAddedTaxPercentage";
    pub const CURRENCY: &str = "currency";
    pub const TAGS: &str = "tags";
    pub const DESCRIPTION: &str = "description";
    pub const INFORMATION: &str = "information";
    pub const CREATION_DATE: &str = "creationDate";
    pub const GRADE: &str = "grade";

    // Un-indexed library metadata
    pub const VERSION: &str = "version";
    pub const LICENSE: &str = "license";
    pub const PROVIDER: &str = "provider";
}

const TEXTURE_KEYS: &[&str] = &[
    keys::ID,
    keys::NAME,
    keys::CATEGORY,
    keys::IMAGE,
    keys::WIDTH,
    keys::HEIGHT,
    keys::CREATOR,
];

const FURNITURE_KEYS: &[&str] = &[
    keys::ID,
    keys::NAME,
    keys::DESCRIPTION,
    keys::INFORMATION,
    keys::TAGS,
    keys::CREATION_DATE,
    keys::GRADE,
    keys::CATEGORY,
    keys::ICON,
    keys::PLAN_ICON,
    keys::MODEL,
    keys::MULTI_PART_MODEL,
    keys::WIDTH,
    keys::DEPTH,
    keys::HEIGHT,
    keys::ELEVATION,
    keys::MOVABLE,
    keys::DOOR_OR_WINDOW,
    keys::CREATOR,
    keys::PRICE,
    keys::VALUE_ADDED_TAX_PERCENTAGE,
    keys::CURRENCY,
];

/// Extensions of the model formats furniture items are imported from
pub const MODEL_EXTENSIONS: &[&str] = &["obj", "dae", "3ds", "glb", "gltf"];

/// Check whether `path` names a model file
#[must_use]
pub fn is_model_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MODEL_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

/// Flavor of catalog library
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFamily {
    #[default]
    Textures,
    Furniture,
}

impl CatalogFamily {
    /// Base name of the catalog `.properties` entries
    #[must_use]
    pub fn properties_base(self) -> &'static str {
        match self {
            CatalogFamily::Textures => "DefaultTexturesCatalog",
            CatalogFamily::Furniture => "DefaultFurnitureCatalog",
        }
    }

    /// Conventional archive extension (without dot)
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            CatalogFamily::Textures => "sh3t",
            CatalogFamily::Furniture => "sh3f",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            CatalogFamily::Textures => "Textures",
            CatalogFamily::Furniture => "Furniture",
        }
    }

    /// Key of the primary resource (`image` or `model`)
    #[must_use]
    pub fn content_key(self) -> &'static str {
        match self {
            CatalogFamily::Textures => keys::IMAGE,
            CatalogFamily::Furniture => keys::MODEL,
        }
    }

    /// Item keys in the order they are written
    #[must_use]
    pub fn item_keys(self) -> &'static [&'static str] {
        match self {
            CatalogFamily::Textures => TEXTURE_KEYS,
            CatalogFamily::Furniture => FURNITURE_KEYS,
        }
    }

    /// Keys whose absence at index N ends the item sequence
    #[must_use]
    pub fn mandatory_keys(self) -> &'static [&'static str] {
        match self {
            CatalogFamily::Textures => &[
                keys::NAME,
                keys::CATEGORY,
                keys::IMAGE,
                keys::WIDTH,
                keys::HEIGHT,
            ],
            CatalogFamily::Furniture => &[
                keys::NAME,
                keys::CATEGORY,
                keys::ICON,
                keys::MODEL,
                keys::WIDTH,
                keys::DEPTH,
                keys::HEIGHT,
            ],
        }
    }

    /// Check whether this family reads and writes `key`
    #[must_use]
    pub fn supports_key(self, key: &str) -> bool {
        self.item_keys().contains(&key)
    }

    /// Guess the family from an archive extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "sh3t" => Some(CatalogFamily::Textures),
            "sh3f" => Some(CatalogFamily::Furniture),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for CatalogFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "textures" | "texture" | "sh3t" => Ok(CatalogFamily::Textures),
            "furniture" | "sh3f" => Ok(CatalogFamily::Furniture),
            _ => Err(format!(
                "Invalid family '{s}'. Valid values: textures, furniture"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_keys_are_written() {
        for family in [CatalogFamily::Textures, CatalogFamily::Furniture] {
            for key in family.mandatory_keys() {
                assert!(family.supports_key(key), "{family}: {key}");
            }
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            CatalogFamily::from_path("lib/Woods.SH3T"),
            Some(CatalogFamily::Textures)
        );
        assert_eq!(
            CatalogFamily::from_path("chairs.sh3f"),
            Some(CatalogFamily::Furniture)
        );
        assert_eq!(CatalogFamily::from_path("chairs.zip"), None);
    }

    #[test]
    fn test_is_model_file() {
        assert!(is_model_file(Path::new("/m/chair.OBJ")));
        assert!(is_model_file(Path::new("sofa.gltf")));
        assert!(!is_model_file(Path::new("/m/wood.jpg")));
        assert!(!is_model_file(Path::new("/m/obj")));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Furniture".parse(), Ok(CatalogFamily::Furniture));
        assert!("chairs".parse::<CatalogFamily>().is_err());
    }
}
