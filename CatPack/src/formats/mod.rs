//! Text formats used inside catalog archives
//!
//! - `properties` - ISO-8859-1 `.properties` catalogs and locale overlays
//! - `locale` - locale tags, overlay entry names and the available-locale table

pub mod locale;
pub mod properties;

// Re-export main types
pub use locale::{available_locales, locale_suffix, properties_entry_name};
pub use properties::{Properties, PropertiesWriter, escape_value, parse_properties};
