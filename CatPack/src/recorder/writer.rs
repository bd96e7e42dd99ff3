//! Writing catalog archives
//!
//! The archive is assembled in a temporary file next to the destination and
//! moved over it only once complete, so a failed or interrupted write leaves
//! the destination untouched.

use super::cancel::CancelToken;
use super::entries::{
    ContentRole, EntryNames, content_property, proposed_name, resolve_entry_name,
};
use super::options::RecorderOptions;
use super::progress::{ProgressCallback, RecordPhase, RecordProgress};
use crate::catalog::content::open_archive;
use crate::catalog::family::{is_model_file, keys};
use crate::catalog::{CatalogItem, Content, ContentSource, Library, LocalizedField};
use crate::error::{Error, Result};
use crate::formats::locale::properties_entry_name;
use crate::formats::properties::PropertiesWriter;
use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, IntoInnerError, Read, Seek, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

/// Packaging more files than this from one model directory is logged
const LARGE_MODEL_DIRECTORY: usize = 500;

/// Entry name and catalog value chosen for one distinct content
#[derive(Debug, Clone)]
struct ResolvedContent {
    /// `None` when the content keeps its URL and is not packaged
    entry: Option<String>,
    property: String,
}

/// Write a library to `destination`
///
/// # Errors
///
/// Returns [`Error::Interrupted`] when `cancel` is triggered, and
/// [`Error::WriteFailed`] wrapping the cause for any other failure.
pub fn write_catalog(
    library: &Library,
    destination: &Path,
    options: &RecorderOptions,
    cancel: &CancelToken,
    progress: ProgressCallback,
) -> Result<()> {
    match write_archive(library, destination, options, cancel, progress) {
        Ok(()) => Ok(()),
        Err(Error::Interrupted) => Err(Error::Interrupted),
        Err(err) => Err(Error::WriteFailed {
            path: destination.to_path_buf(),
            source: Box::new(err),
        }),
    }
}

fn file_options() -> FileOptions<'static, ()> {
    FileOptions::<()>::default().compression_method(CompressionMethod::Deflated)
}

fn write_archive(
    library: &Library,
    destination: &Path,
    options: &RecorderOptions,
    cancel: &CancelToken,
    progress: ProgressCallback,
) -> Result<()> {
    options.validate()?;
    let base = library.family().properties_base();
    let locales: Vec<&str> = library.supported_locales().collect();

    let mut names = EntryNames::new();
    names.insert(&properties_entry_name(base, ""));
    for locale in &locales {
        names.insert(&properties_entry_name(base, locale));
    }
    let contents = resolve_contents(library, options, &mut names, cancel, progress)?;
    check_mandatory_keys(library, destination, &contents)?;

    let directory = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let temp = NamedTempFile::new_in(directory)?;
    let mut zip = ZipWriter::new(BufWriter::new(temp));

    let catalogs = locales.len() + 1;
    progress(&RecordProgress::new(RecordPhase::WritingCatalog, 1, catalogs));
    let entry_name = properties_entry_name(base, "");
    zip.start_file(entry_name.as_str(), file_options())?;
    write_default_catalog(&mut zip, &entry_name, library, &contents)?;

    for (i, locale) in locales.iter().enumerate() {
        cancel.check()?;
        progress(&RecordProgress::with_file(
            RecordPhase::WritingCatalog,
            i + 2,
            catalogs,
            *locale,
        ));
        let entry_name = properties_entry_name(base, locale);
        zip.start_file(entry_name.as_str(), file_options())?;
        write_locale_catalog(&mut zip, &entry_name, library, locale)?;
    }

    package_resources(&mut zip, &contents, options, cancel, progress)?;

    let temp = zip
        .finish()?
        .into_inner()
        .map_err(IntoInnerError::into_error)?;
    temp.as_file().sync_all()?;
    temp.persist(destination).map_err(|err| err.error)?;

    progress(&RecordProgress::new(RecordPhase::Complete, 1, 1));
    tracing::info!(
        "Wrote {} items and {} locales to {}",
        library.len(),
        locales.len(),
        destination.display()
    );
    Ok(())
}

fn item_contents(item: &CatalogItem) -> impl Iterator<Item = (ContentRole, &Content)> {
    std::iter::once((ContentRole::Primary, &item.content))
        .chain(item.icon.iter().map(|icon| (ContentRole::Icon, icon)))
        .chain(item.plan_icon.iter().map(|icon| (ContentRole::PlanIcon, icon)))
}

/// Name every distinct content, in item order
fn resolve_contents(
    library: &Library,
    options: &RecorderOptions,
    names: &mut EntryNames,
    cancel: &CancelToken,
    progress: ProgressCallback,
) -> Result<IndexMap<Content, ResolvedContent>> {
    let keep_external_unchanged = options.keep_external_unchanged();
    let remote_base = options.remote_base();
    let mut resolved: IndexMap<Content, ResolvedContent> = IndexMap::new();

    for (position, (_, item)) in library.items().enumerate() {
        cancel.check()?;
        progress(&RecordProgress::with_file(
            RecordPhase::ResolvingContents,
            position + 1,
            library.len(),
            item.name.as_str(),
        ));
        for (role, content) in item_contents(item) {
            if resolved.contains_key(content) {
                continue;
            }
            let proposed = proposed_name(
                item,
                content,
                role,
                options.match_content_name_to_item_name,
            );
            let entry = resolve_entry_name(content, &proposed, keep_external_unchanged, names)?;
            let property = match (&entry, content) {
                (Some(entry), _) => content_property(entry, options.offline, remote_base),
                (None, Content::Url(url)) => url.url().to_string(),
                (None, _) => {
                    return Err(Error::UnsupportedContent {
                        content: content.to_string(),
                    });
                }
            };
            tracing::debug!("{content} -> {property}");
            resolved.insert(content.clone(), ResolvedContent { entry, property });
        }
    }
    Ok(resolved)
}

/// Reject items that would be missing a value the reader requires
fn check_mandatory_keys(
    library: &Library,
    destination: &Path,
    contents: &IndexMap<Content, ResolvedContent>,
) -> Result<()> {
    let family = library.family();
    for (position, (_, item)) in library.items().enumerate() {
        let missing = family
            .mandatory_keys()
            .iter()
            .find(|key| item_value(item, key, contents).is_none());
        if let Some(key) = missing {
            return Err(Error::InvalidCatalog {
                path: destination.to_path_buf(),
                message: format!("item {} '{}' has no {key}", position + 1, item.name),
            });
        }
    }
    Ok(())
}

fn write_header<W: Write>(writer: &mut PropertiesWriter<W>, entry_name: &str) -> Result<()> {
    writer.write_comment("")?;
    writer.write_comment(&format!(
        "{entry_name} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    ))?;
    writer.write_comment(&format!("Generated by CatPack {}", crate::VERSION))?;
    writer.write_comment("")
}

fn format_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(tags.join(","))
    }
}

/// Catalog value of `key` for an item
fn item_value(
    item: &CatalogItem,
    key: &str,
    contents: &IndexMap<Content, ResolvedContent>,
) -> Option<String> {
    let property = |content: &Content| contents.get(content).map(|r| r.property.clone());
    match key {
        keys::ID => item.id.clone(),
        keys::NAME => Some(item.name.clone()),
        keys::CATEGORY => Some(item.category.name().to_string()),
        keys::CREATOR => item.creator.clone(),
        keys::IMAGE | keys::MODEL => property(&item.content),
        keys::ICON => item.icon.as_ref().and_then(property),
        keys::PLAN_ICON => item.plan_icon.as_ref().and_then(property),
        keys::WIDTH => Some(item.width.to_string()),
        keys::HEIGHT => Some(item.height.to_string()),
        keys::DEPTH => item.depth.map(|v| v.to_string()),
        keys::ELEVATION => item.elevation.map(|v| v.to_string()),
        keys::MULTI_PART_MODEL => item.multi_part_model.then(|| "true".to_string()),
        keys::MOVABLE => item.movable.map(|v| v.to_string()),
        keys::DOOR_OR_WINDOW => item.door_or_window.map(|v| v.to_string()),
        keys::PRICE => item.price.map(|v| v.to_string()),
        keys::VALUE_ADDED_TAX_PERCENTAGE => item.value_added_tax_percentage.map(|v| v.to_string()),
        keys::CURRENCY => item.currency.clone(),
        keys::TAGS => format_tags(&item.tags),
        keys::DESCRIPTION => item.description.clone(),
        keys::INFORMATION => item.information.clone(),
        keys::CREATION_DATE => item
            .creation_date
            .map(|date| date.format("%Y-%m-%d").to_string()),
        keys::GRADE => item.grade.map(|v| v.to_string()),
        _ => None,
    }
}

fn write_default_catalog<W: Write>(
    out: W,
    entry_name: &str,
    library: &Library,
    contents: &IndexMap<Content, ResolvedContent>,
) -> Result<()> {
    let family = library.family();
    let mut writer = PropertiesWriter::new(out);
    write_header(&mut writer, entry_name)?;

    let metadata = library.metadata();
    writer.write_property(keys::ID, metadata.id.as_deref())?;
    writer.write_property(keys::NAME, metadata.name.as_deref())?;
    writer.write_property(keys::DESCRIPTION, metadata.description.as_deref())?;
    writer.write_property(keys::VERSION, metadata.version.as_deref())?;
    writer.write_property(keys::LICENSE, metadata.license.as_deref())?;
    writer.write_property(keys::PROVIDER, metadata.provider.as_deref())?;

    for (position, (_, item)) in library.items().enumerate() {
        writer.blank_line()?;
        for key in family.item_keys() {
            let value = item_value(item, key, contents);
            writer.write_indexed(key, position + 1, value.as_deref())?;
        }
    }
    writer.flush()
}

fn write_locale_catalog<W: Write>(
    out: W,
    entry_name: &str,
    library: &Library,
    locale: &str,
) -> Result<()> {
    let mut writer = PropertiesWriter::new(out);
    write_header(&mut writer, entry_name)?;

    for (position, (id, _)) in library.items().enumerate() {
        let Some(fields) = library.overrides().item_overrides(id, locale) else {
            continue;
        };
        writer.blank_line()?;
        for field in LocalizedField::ALL {
            writer.write_indexed(
                field.key(),
                position + 1,
                fields.get(&field).map(String::as_str),
            )?;
        }
    }
    writer.flush()
}

fn package_resources<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    contents: &IndexMap<Content, ResolvedContent>,
    options: &RecorderOptions,
    cancel: &CancelToken,
    progress: ProgressCallback,
) -> Result<()> {
    let packaged: Vec<(&Content, &str)> = contents
        .iter()
        .filter_map(|(content, resolved)| resolved.entry.as_deref().map(|entry| (content, entry)))
        .collect();

    for (i, (content, entry)) in packaged.iter().enumerate() {
        cancel.check()?;
        progress(&RecordProgress::with_file(
            RecordPhase::CopyingResources,
            i + 1,
            packaged.len(),
            *entry,
        ));
        match (options.local_directory(), entry.split_once('/')) {
            (None, None) => {
                zip.start_file(*entry, file_options())?;
                zip.write_all(&content.read_bytes()?)?;
            }
            (None, Some((directory, _))) => {
                copy_multi_part(zip, &format!("{directory}/"), content, cancel)?;
            }
            (Some(local), None) => export_file(local, entry, content)?,
            (Some(local), Some((directory, _))) => {
                export_multi_part(local, directory, content, cancel)?;
            }
        }
    }
    Ok(())
}

/// Copy a resource to `<local>/<entry>` unless that file already exists
fn export_file(local: &Path, entry: &str, content: &Content) -> Result<()> {
    let target = local.join(entry);
    if target.exists() {
        tracing::debug!("Keeping existing {}", target.display());
        return Ok(());
    }
    fs::create_dir_all(local)?;
    let mut temp = NamedTempFile::new_in(local)?;
    temp.write_all(&content.read_bytes()?)?;
    temp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

/// Bundle a multi-part resource as `<local>/<directory>.zip` unless it exists
fn export_multi_part(
    local: &Path,
    directory: &str,
    content: &Content,
    cancel: &CancelToken,
) -> Result<()> {
    let target = local.join(format!("{directory}.zip"));
    if target.exists() {
        tracing::debug!("Keeping existing {}", target.display());
        return Ok(());
    }
    fs::create_dir_all(local)?;
    let mut zip = ZipWriter::new(BufWriter::new(NamedTempFile::new_in(local)?));
    copy_multi_part(&mut zip, "", content, cancel)?;
    let temp = zip
        .finish()?
        .into_inner()
        .map_err(IntoInnerError::into_error)?;
    temp.persist(&target).map_err(|err| err.error)?;
    Ok(())
}

/// Copy every file stored with a multi-part resource under `prefix`
///
/// The files are those of the resource's directory; a `jar:` URL brings
/// its whole container, downloaded when there is no local copy.
fn copy_multi_part<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    prefix: &str,
    content: &Content,
    cancel: &CancelToken,
) -> Result<()> {
    let source = content.source();
    match (source, content) {
        (Some(ContentSource::ArchiveEntry { archive, .. }), _) => {
            let root = match content {
                Content::Url(url) if url.jar_entry().is_some() => "",
                _ => source
                    .and_then(ContentSource::entry_directory)
                    .unwrap_or_default(),
            };
            copy_archive_entries(zip, prefix, &mut open_archive(archive)?, root, cancel)
        }
        (Some(ContentSource::File(path)), _) => copy_model_directory(zip, prefix, path, cancel),
        (None, Content::Url(url)) if url.jar_entry().is_some() && url.is_downloadable() => {
            let mut input = ZipArchive::new(Cursor::new(url.download_container()?))?;
            copy_archive_entries(zip, prefix, &mut input, "", cancel)
        }
        (None, _) => Err(Error::UnsupportedContent {
            content: content.to_string(),
        }),
    }
}

/// Copy the files of `input` under `root` to `prefix`, in name order
fn copy_archive_entries<W: Write + Seek, R: Read + Seek>(
    zip: &mut ZipWriter<W>,
    prefix: &str,
    input: &mut ZipArchive<R>,
    root: &str,
    cancel: &CancelToken,
) -> Result<()> {
    let mut entries: Vec<String> = input
        .file_names()
        .filter(|name| name.starts_with(root) && !name.ends_with('/'))
        .map(str::to_string)
        .collect();
    entries.sort();
    for name in entries {
        cancel.check()?;
        let mut file = input.by_name(&name)?;
        zip.start_file(format!("{prefix}{}", &name[root.len()..]), file_options())?;
        io::copy(&mut file, zip)?;
    }
    Ok(())
}

/// Copy a model file with the files stored around it
///
/// The whole directory tree is copied when the model is the only one in its
/// directory. Next to other models, only the model file itself is copied.
fn copy_model_directory<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    prefix: &str,
    model: &Path,
    cancel: &CancelToken,
) -> Result<()> {
    let directory = model
        .parent()
        .ok_or_else(|| Error::InvalidPath(model.display().to_string()))?;

    if has_other_models(directory, model)? {
        tracing::warn!(
            "{} shares its directory with other models, packaging the model file alone",
            model.display()
        );
        let name = model
            .file_name()
            .ok_or_else(|| Error::InvalidPath(model.display().to_string()))?;
        cancel.check()?;
        zip.start_file(format!("{prefix}{}", name.to_string_lossy()), file_options())?;
        io::copy(&mut File::open(model)?, zip)?;
        return Ok(());
    }

    let mut copied = 0usize;
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        cancel.check()?;
        let relative = entry
            .path()
            .strip_prefix(directory)
            .map_err(|_| Error::InvalidPath(entry.path().display().to_string()))?;
        let name = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        zip.start_file(format!("{prefix}{name}"), file_options())?;
        io::copy(&mut File::open(entry.path())?, zip)?;
        copied += 1;
    }
    if copied > LARGE_MODEL_DIRECTORY {
        tracing::warn!(
            "Packaged {copied} files from {} with {}",
            directory.display(),
            model.display()
        );
    }
    Ok(())
}

fn has_other_models(directory: &Path, model: &Path) -> Result<bool> {
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path != model && path.is_file() && is_model_file(&path) {
            return Ok(true);
        }
    }
    Ok(false)
}
