//! CLI command for listing library items

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{SortKey, filter_ids, sorted_ids};
use crate::cli::CliContext;
use crate::recorder::LibraryRecorder;

fn format_dimension(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.1}"))
}

pub fn execute(
    path: &Path,
    sort: SortKey,
    descending: bool,
    filter: Option<&str>,
    locale: Option<&str>,
    context: &CliContext,
) -> anyhow::Result<()> {
    let recorder = LibraryRecorder::new(context.preferences.recorder_options());
    let library = super::load_library(&recorder, path, context.preferences.default_family)?;
    let locale = locale.unwrap_or_default();

    let mut ids = sorted_ids(&library, sort, descending, locale);
    if let Some(text) = filter {
        let kept: HashSet<_> = filter_ids(&library, text, locale).into_iter().collect();
        ids.retain(|id| kept.contains(id));
    }

    println!(
        "{:<32} {:<20} {:>8} {:>8} {:>8}  {}",
        "Name", "Category", "Width", "Height", "Depth", "Creator"
    );
    for id in &ids {
        let Some(item) = library.item(*id) else {
            continue;
        };
        println!(
            "{:<32} {:<20} {:>8} {:>8} {:>8}  {}",
            library.localized_name(*id, locale).unwrap_or_default(),
            library.localized_category(*id, locale).unwrap_or_default(),
            format_dimension(Some(item.width)),
            format_dimension(Some(item.height)),
            format_dimension(item.depth),
            item.creator.as_deref().unwrap_or("")
        );
    }
    println!();
    println!("{} of {} items", ids.len(), library.len());

    Ok(())
}
