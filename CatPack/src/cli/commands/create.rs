//! CLI command building a library from a directory of files

use std::path::{Path, PathBuf};
use std::time::Instant;

use walkdir::WalkDir;

use crate::catalog::family::MODEL_EXTENSIONS;
use crate::catalog::{CatalogFamily, CatalogItem, Category, Content, Library};
use crate::cli::CliContext;
use crate::cli::progress::{CUBE, DISK, PICTURE, print_done, print_step, recorder_bar, report};
use crate::recorder::LibraryRecorder;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Item settings applied to every imported file
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub family: CatalogFamily,
    pub category: Option<String>,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub creator: Option<String>,
    pub name: Option<String>,
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().replace('_', " "))
        .unwrap_or_default()
}

/// Icon of a model: the `.png` file with the same stem
fn find_icon(model: &Path) -> Option<PathBuf> {
    let icon = model.with_extension("png");
    icon.is_file().then_some(icon)
}

/// Items for the importable files under `source`, in path order
pub fn collect_items(source: &Path, options: &CreateOptions) -> Vec<CatalogItem> {
    let mut files: Vec<PathBuf> = WalkDir::new(source)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let extensions = match options.family {
        CatalogFamily::Textures => IMAGE_EXTENSIONS,
        CatalogFamily::Furniture => MODEL_EXTENSIONS,
    };

    let mut items = Vec::new();
    for path in files.iter().filter(|p| has_extension(p, extensions)) {
        let category = options.category.clone().unwrap_or_else(|| {
            path.parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let mut item = CatalogItem::new(
            file_stem(path),
            Category::new(category),
            Content::temporary_file(path),
            options.width,
            options.height,
        );
        item.creator.clone_from(&options.creator);

        if options.family == CatalogFamily::Furniture {
            let Some(icon) = find_icon(path) else {
                tracing::warn!("Skipping {}: no icon next to the model", path.display());
                continue;
            };
            item = item
                .with_icon(Content::temporary_file(icon))
                .with_depth(options.depth);
        }
        items.push(item);
    }
    items
}

pub fn execute(
    source: &Path,
    destination: &Path,
    options: &CreateOptions,
    context: &CliContext,
) -> anyhow::Result<()> {
    if !source.is_dir() {
        anyhow::bail!("Source is not a directory: {}", source.display());
    }
    let started = Instant::now();

    let emoji = match options.family {
        CatalogFamily::Textures => PICTURE,
        CatalogFamily::Furniture => CUBE,
    };
    print_step(1, 2, emoji, &format!("Scanning {}", source.display()));
    let items = collect_items(source, options);
    if items.is_empty() {
        anyhow::bail!("No importable files found in {}", source.display());
    }

    let mut library = Library::new(options.family);
    library.metadata_mut().name.clone_from(&options.name);
    library.add_items(items);

    print_step(
        2,
        2,
        DISK,
        &format!("Writing {} items to {}", library.len(), destination.display()),
    );
    let recorder = LibraryRecorder::new(context.preferences.recorder_options());
    let pb = recorder_bar(context.quiet);
    recorder.write_with_progress(&library, destination, &|progress| {
        report(pb.as_ref(), progress);
    })?;

    print_done(started.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn options(family: CatalogFamily) -> CreateOptions {
        CreateOptions {
            family,
            category: None,
            width: 80.0,
            height: 40.0,
            depth: 60.0,
            creator: Some("Studio".to_string()),
            name: None,
        }
    }

    #[test]
    fn test_collect_textures() {
        let dir = tempfile::tempdir().unwrap();
        let woods = dir.path().join("Woods");
        fs::create_dir(&woods).unwrap();
        fs::write(woods.join("light_oak.jpg"), b"jpg").unwrap();
        fs::write(woods.join("notes.txt"), b"txt").unwrap();

        let items = collect_items(dir.path(), &options(CatalogFamily::Textures));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "light oak");
        assert_eq!(items[0].category.name(), "Woods");
        assert_eq!(items[0].creator.as_deref(), Some("Studio"));
    }

    #[test]
    fn test_collect_furniture_requires_icon() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chair.obj"), b"o").unwrap();
        fs::write(dir.path().join("chair.png"), b"p").unwrap();
        fs::write(dir.path().join("table.obj"), b"o").unwrap();

        let items = collect_items(dir.path(), &options(CatalogFamily::Furniture));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "chair");
        assert_eq!(items[0].depth, Some(60.0));
        assert!(items[0].icon.is_some());
    }
}
