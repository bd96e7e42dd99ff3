//! Entry names of packaged resources and the property values pointing at them

use super::options::RemoteBase;
use crate::catalog::{CatalogItem, Content, ContentSource};
use crate::error::{Error, Result};
use percent_encoding::percent_decode_str;
use std::collections::HashSet;
use url::form_urlencoded;

/// Entry names claimed during one write, compared case-insensitively
#[derive(Debug, Clone, Default)]
pub struct EntryNames {
    lowercase: HashSet<String>,
}

impl EntryNames {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lowercase.contains(&name.to_lowercase())
    }

    /// Claim a name; returns false if it was already claimed
    pub fn insert(&mut self, name: &str) -> bool {
        self.lowercase.insert(name.to_lowercase())
    }

    /// Check whether any claimed name lies under `directory/`
    #[must_use]
    pub fn contains_directory(&self, directory: &str) -> bool {
        let prefix = format!("{}/", directory.to_lowercase());
        self.lowercase.iter().any(|name| name.starts_with(&prefix))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lowercase.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lowercase.is_empty()
    }
}

/// Choose the entry name of a resource and claim it
///
/// Returns `None` when the content keeps its URL in the written catalog:
/// URL contents when `keep_external_unchanged` is set, and `jar:` URLs whose
/// container is not a `.zip` file.
///
/// # Errors
///
/// Returns [`Error::UnsupportedContent`] for a URL content that must be
/// packaged but has neither a local copy of its bytes nor an HTTP URL to
/// download them from.
pub fn resolve_entry_name(
    content: &Content,
    proposed: &str,
    keep_external_unchanged: bool,
    names: &mut EntryNames,
) -> Result<Option<String>> {
    let proposed = match content {
        Content::Temporary(_) | Content::Resource(_) => proposed.to_string(),
        Content::Url(url) => {
            if keep_external_unchanged {
                return Ok(None);
            }
            let jar_stem = match url.jar_entry() {
                Some((outer, inner)) => {
                    let outer_name = outer.rsplit('/').next().map(decode).unwrap_or_default();
                    let Some(stem) = strip_zip_extension(&outer_name) else {
                        return Ok(None);
                    };
                    Some(format!("{stem}/{}", decode(inner)))
                }
                None => None,
            };
            if url.local().is_none() && !url.is_downloadable() {
                return Err(Error::UnsupportedContent {
                    content: content.to_string(),
                });
            }
            if let Some(name) = jar_stem {
                name
            } else {
                match url.file_name() {
                    Some(name) => name,
                    None => return Ok(None),
                }
            }
        }
    };
    Ok(Some(claim(&proposed, names)))
}

fn claim(proposed: &str, names: &mut EntryNames) -> String {
    let name = match proposed.split_once('/') {
        Some((directory, file)) if !directory.is_empty() && !file.is_empty() => {
            format!("{}/{file}", unique_directory(directory, names))
        }
        _ => unique_file_name(proposed, names),
    };
    names.insert(&name);
    name
}

fn unique_file_name(name: &str, names: &EntryNames) -> String {
    if !names.contains(name) {
        return name.to_string();
    }
    let (stem, extension) = split_extension(name);
    let mut suffix = 2u32;
    loop {
        let candidate = format!("{stem}{suffix}{extension}");
        if !names.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn unique_directory(directory: &str, names: &EntryNames) -> String {
    if !names.contains_directory(directory) {
        return directory.to_string();
    }
    let mut suffix = 2u32;
    loop {
        let candidate = format!("{directory}{suffix}");
        if !names.contains_directory(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Split `name.ext` into `("name", ".ext")`
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(i) if i > 0 => name.split_at(i),
        _ => (name, ""),
    }
}

fn strip_zip_extension(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(4)?;
    if name.is_char_boundary(split) && name[split..].eq_ignore_ascii_case(".zip") {
        Some(&name[..split])
    } else {
        None
    }
}

fn decode(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// Percent-encode a file segment of a multi-file entry
///
/// Form encoding with spaces as `%20`; `/` is kept literal.
#[must_use]
pub fn encode_file_segment(file: &str) -> String {
    form_urlencoded::byte_serialize(file.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace("%2F", "/")
}

/// Property value referencing the entry `entry`
///
/// Offline, or without a remote base, this is the archive path `/entry`.
/// Otherwise single-file entries are appended to the base and multi-file
/// entries `dir/file` point into `<base>dir.zip`.
#[must_use]
pub fn content_property(entry: &str, offline: bool, remote_base: Option<RemoteBase<'_>>) -> String {
    let base = match remote_base {
        Some(base) if !offline => base,
        _ => return format!("/{entry}"),
    };
    match entry.split_once('/') {
        None => format!("{}{entry}", base.as_str()),
        Some((directory, file)) => {
            let file = encode_file_segment(file);
            match base {
                RemoteBase::Absolute(base) => format!("jar:{base}{directory}.zip!/{file}"),
                RemoteBase::Relative(base) => format!("{base}{directory}.zip!/{file}"),
            }
        }
    }
}

/// Which resource of an item is being named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRole {
    /// Texture image or furniture model
    Primary,
    Icon,
    PlanIcon,
}

impl ContentRole {
    fn suffix(self) -> &'static str {
        match self {
            ContentRole::Primary => "",
            ContentRole::Icon => "_icon",
            ContentRole::PlanIcon => "_planIcon",
        }
    }
}

/// Replace characters that file systems reject with `_`
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if sanitized.is_empty() {
        "resource".to_string()
    } else {
        sanitized
    }
}

/// Entry name proposed for a resource before collisions are resolved
///
/// Multi-part models are proposed as `directory/model file` so that the
/// files next to the model are packaged with it.
#[must_use]
pub fn proposed_name(
    item: &CatalogItem,
    content: &Content,
    role: ContentRole,
    match_item_name: bool,
) -> String {
    let file_name = content
        .file_name()
        .unwrap_or_else(|| "resource".to_string());
    let multi_part = role == ContentRole::Primary && item.multi_part_model;

    if match_item_name {
        let base = sanitize_file_name(&item.name);
        if multi_part {
            format!("{base}/{file_name}")
        } else {
            let (_, extension) = split_extension(&file_name);
            format!("{base}{}{extension}", role.suffix())
        }
    } else if multi_part {
        let directory = content
            .source()
            .and_then(ContentSource::directory_name)
            .map_or_else(|| split_extension(&file_name).0.to_string(), str::to_string);
        format!("{directory}/{file_name}")
    } else {
        file_name
    }
}
