//! Reading catalog archives

use super::cancel::CancelToken;
use super::options::{RecorderOptions, RemoteBase};
use super::progress::{ProgressCallback, RecordPhase, RecordProgress};
use crate::catalog::content::open_archive;
use crate::catalog::family::keys;
use crate::catalog::{
    ArchiveSnapshot, CatalogContents, CatalogFamily, CatalogItem, Category, Content, ContentSource,
    LibraryMetadata, LocalizedField, PositionalOverride, UrlContent,
};
use crate::error::{Error, Result};
use crate::formats::locale::{locale_suffix, properties_entry_name};
use crate::formats::properties::{Properties, parse_properties_bytes};
use chrono::NaiveDate;
use percent_encoding::percent_decode_str;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;
use zip::ZipArchive;

/// Read a catalog archive without touching any library
///
/// # Errors
///
/// Every failure is reported as [`Error::InvalidCatalog`], except a
/// cancellation which is reported as [`Error::Interrupted`].
pub fn read_catalog(
    path: &Path,
    options: &RecorderOptions,
    cancel: &CancelToken,
    progress: ProgressCallback,
) -> Result<CatalogContents> {
    read_archive(path, options, cancel, progress).map_err(|err| match err {
        Error::Interrupted | Error::InvalidCatalog { .. } => err,
        other => Error::InvalidCatalog {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })
}

fn read_archive(
    path: &Path,
    options: &RecorderOptions,
    cancel: &CancelToken,
    progress: ProgressCallback,
) -> Result<CatalogContents> {
    // Resources keep pointing at a private copy, so the library file itself
    // may be overwritten while they are still referenced.
    let snapshot = ArchiveSnapshot::create(path)?;
    let mut archive = open_archive(snapshot.path())?;
    let entry_names: Vec<String> = archive.file_names().map(str::to_string).collect();
    let family = detect_family(path, &entry_names)?;
    let base = family.properties_base();

    let default_catalog = read_properties(&mut archive, &properties_entry_name(base, ""))?;
    let parser = ItemParser {
        archive: path,
        bundle: snapshot.path(),
        family,
        properties: &default_catalog,
        options,
    };

    let mut items = Vec::new();
    for index in 1.. {
        if !parser.has_mandatory_keys(index) {
            break;
        }
        cancel.check()?;
        let item = parser.parse_item(index)?;
        progress(&RecordProgress::with_file(
            RecordPhase::ReadingCatalog,
            index,
            0,
            item.name.clone(),
        ));
        items.push(item);
    }
    let metadata = parse_metadata(&default_catalog);

    let locales: BTreeSet<String> = entry_names
        .iter()
        .filter_map(|name| locale_suffix(name, base))
        .filter(|suffix| !suffix.is_empty())
        .map(str::to_string)
        .collect();

    let mut overrides = Vec::new();
    for (i, locale) in locales.iter().enumerate() {
        cancel.check()?;
        progress(&RecordProgress::with_file(
            RecordPhase::ReadingLocales,
            i + 1,
            locales.len(),
            locale.clone(),
        ));
        let overlay = read_properties(&mut archive, &properties_entry_name(base, locale))?;
        overrides.extend(overlay_overrides(&overlay, locale, &items));
    }

    tracing::debug!(
        "Read {} items and {} translations from {}",
        items.len(),
        overrides.len(),
        path.display()
    );

    Ok(CatalogContents {
        family,
        items,
        overrides,
        locales,
        metadata,
        snapshot: Some(snapshot),
    })
}

/// Family whose default catalog is present, trying the extension's first
fn detect_family(path: &Path, entry_names: &[String]) -> Result<CatalogFamily> {
    let hint = CatalogFamily::from_path(path).unwrap_or_default();
    let candidates = [hint, CatalogFamily::Textures, CatalogFamily::Furniture];
    candidates
        .into_iter()
        .find(|family| {
            let name = properties_entry_name(family.properties_base(), "");
            entry_names.iter().any(|entry| *entry == name)
        })
        .ok_or_else(|| Error::InvalidCatalog {
            path: path.to_path_buf(),
            message: format!(
                "missing {}",
                properties_entry_name(hint.properties_base(), "")
            ),
        })
}

fn read_properties(
    archive: &mut ZipArchive<BufReader<File>>,
    entry_name: &str,
) -> Result<Properties> {
    let mut entry = archive.by_name(entry_name)?;
    let mut data = Vec::new();
    entry.read_to_end(&mut data)?;
    parse_properties_bytes(&data)
}

fn parse_metadata(properties: &Properties) -> LibraryMetadata {
    let text = |key: &str| properties.get(key).map(str::to_string);
    LibraryMetadata {
        id: text(keys::ID),
        name: text(keys::NAME),
        description: text(keys::DESCRIPTION),
        version: text(keys::VERSION),
        license: text(keys::LICENSE),
        provider: text(keys::PROVIDER),
    }
}

/// Translated values of an overlay, bound to items by position
fn overlay_overrides(
    overlay: &Properties,
    locale: &str,
    items: &[CatalogItem],
) -> Vec<PositionalOverride> {
    let mut overrides = Vec::new();
    for (position, item) in items.iter().enumerate() {
        for field in LocalizedField::ALL {
            let Some(value) = overlay.get_indexed(field.key(), position + 1) else {
                continue;
            };
            let default = match field {
                LocalizedField::Name => item.name.as_str(),
                LocalizedField::Category => item.category.name(),
            };
            if value != default {
                overrides.push(PositionalOverride {
                    position,
                    locale: locale.to_string(),
                    field,
                    value: value.to_string(),
                });
            }
        }
    }
    overrides
}

struct ItemParser<'a> {
    archive: &'a Path,
    /// Archive the `/entry` resources are read from
    bundle: &'a Path,
    family: CatalogFamily,
    properties: &'a Properties,
    options: &'a RecorderOptions,
}

impl ItemParser<'_> {
    fn has_mandatory_keys(&self, index: usize) -> bool {
        self.family
            .mandatory_keys()
            .iter()
            .all(|key| self.properties.contains_indexed(key, index))
    }

    fn invalid(&self, message: String) -> Error {
        Error::InvalidCatalog {
            path: self.archive.to_path_buf(),
            message,
        }
    }

    fn text(&self, key: &str, index: usize) -> Option<String> {
        if self.family.supports_key(key) {
            self.properties.get_indexed(key, index).map(str::to_string)
        } else {
            None
        }
    }

    fn parsed<T: FromStr>(&self, key: &str, index: usize, kind: &str) -> Result<Option<T>> {
        match self.text(key, index) {
            None => Ok(None),
            Some(value) => value.trim().parse().map(Some).map_err(|_| {
                self.invalid(format!("{key}#{index}: '{value}' is not a valid {kind}"))
            }),
        }
    }

    fn number<T: FromStr>(&self, key: &str, index: usize) -> Result<Option<T>> {
        self.parsed(key, index, "number")
    }

    fn boolean(&self, key: &str, index: usize) -> Result<Option<bool>> {
        match self.text(key, index) {
            None => Ok(None),
            Some(value) => match value.trim().to_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(self.invalid(format!("{key}#{index}: '{value}' is not a boolean"))),
            },
        }
    }

    fn date(&self, key: &str, index: usize) -> Result<Option<NaiveDate>> {
        match self.text(key, index) {
            None => Ok(None),
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|_| self.invalid(format!("{key}#{index}: '{value}' is not a date"))),
        }
    }

    fn content(&self, key: &str, index: usize) -> Option<Content> {
        self.text(key, index)
            .map(|value| resolve_content(&value, self.archive, self.bundle, self.options))
    }

    fn required<T>(&self, value: Option<T>, key: &str, index: usize) -> Result<T> {
        value.ok_or_else(|| self.invalid(format!("missing {key}#{index}")))
    }

    fn parse_item(&self, index: usize) -> Result<CatalogItem> {
        let name = self.required(self.text(keys::NAME, index), keys::NAME, index)?;
        let category = self.required(self.text(keys::CATEGORY, index), keys::CATEGORY, index)?;
        let content_key = self.family.content_key();
        let content = self.required(self.content(content_key, index), content_key, index)?;
        let width = self.required(self.number(keys::WIDTH, index)?, keys::WIDTH, index)?;
        let height = self.required(self.number(keys::HEIGHT, index)?, keys::HEIGHT, index)?;

        let mut item = CatalogItem::new(name, Category::new(category), content, width, height);
        item.id = self.text(keys::ID, index);
        item.creator = self.text(keys::CREATOR, index);
        item.icon = self.content(keys::ICON, index);
        item.plan_icon = self.content(keys::PLAN_ICON, index);
        item.depth = self.number(keys::DEPTH, index)?;
        item.elevation = self.number(keys::ELEVATION, index)?;
        item.multi_part_model = self.boolean(keys::MULTI_PART_MODEL, index)?.unwrap_or(false);
        item.movable = self.boolean(keys::MOVABLE, index)?;
        item.door_or_window = self.boolean(keys::DOOR_OR_WINDOW, index)?;
        item.price = self.number(keys::PRICE, index)?;
        item.value_added_tax_percentage = self.number(keys::VALUE_ADDED_TAX_PERCENTAGE, index)?;
        item.currency = self.text(keys::CURRENCY, index);
        item.tags = self
            .text(keys::TAGS, index)
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        item.description = self.text(keys::DESCRIPTION, index);
        item.information = self.text(keys::INFORMATION, index);
        item.creation_date = self.date(keys::CREATION_DATE, index)?;
        item.grade = self.number(keys::GRADE, index)?;
        Ok(item)
    }
}

/// Turn a catalog resource value into a content reference
///
/// - `/entry` is an entry of `bundle`, the archive itself or a copy of it
/// - `jar:` and absolute URLs stay URLs; those under the remote base are
///   mirrored in the resources directory
/// - anything else is a path relative to the resources directory, or to the
///   directory of the archive
#[must_use]
pub fn resolve_content(
    value: &str,
    archive: &Path,
    bundle: &Path,
    options: &RecorderOptions,
) -> Content {
    if let Some(entry) = value.strip_prefix('/') {
        return Content::Resource(ContentSource::archive_entry(bundle, entry));
    }

    if let (Some(base), Some(local)) = (options.remote_base(), options.local_directory()) {
        let published = match base {
            RemoteBase::Absolute(base) => value
                .strip_prefix("jar:")
                .unwrap_or(value)
                .strip_prefix(base),
            RemoteBase::Relative(base) => value.strip_prefix(base),
        };
        if let Some(rest) = published {
            return Content::Url(UrlContent::with_local(value, local_mirror(local, rest)));
        }
    }

    if value.starts_with("jar:") || Url::parse(value).is_ok() {
        return Content::from_url(value);
    }

    let directory = options
        .local_directory()
        .map(Path::to_path_buf)
        .or_else(|| archive.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    Content::Url(UrlContent::with_local(value, local_mirror(&directory, value)))
}

/// Local source of a path written relative to `directory`
fn local_mirror(directory: &Path, relative: &str) -> ContentSource {
    match relative.split_once("!/") {
        Some((archive, entry)) => ContentSource::archive_entry(
            directory.join(archive),
            percent_decode_str(entry).decode_utf8_lossy().into_owned(),
        ),
        None => ContentSource::File(local_path(directory, relative)),
    }
}

fn local_path(directory: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .fold(directory.to_path_buf(), |path, segment| path.join(segment))
}
