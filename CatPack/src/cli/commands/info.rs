//! CLI command showing library information

use std::path::Path;

use crate::cli::CliContext;
use crate::recorder::LibraryRecorder;

pub fn execute(path: &Path, context: &CliContext) -> anyhow::Result<()> {
    let recorder = LibraryRecorder::new(context.preferences.recorder_options());
    let library = super::load_library(&recorder, path, context.preferences.default_family)?;
    let metadata = library.metadata();

    println!("Library Information: {}", path.display());
    println!();
    println!("Family: {}", library.family());
    let fields = [
        ("Id", &metadata.id),
        ("Name", &metadata.name),
        ("Description", &metadata.description),
        ("Version", &metadata.version),
        ("License", &metadata.license),
        ("Provider", &metadata.provider),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{label}: {value}");
        }
    }
    println!();

    println!("Items: {}", library.len());
    println!("Categories: {}", library.categories().len());
    let locales: Vec<&str> = library.supported_locales().collect();
    if locales.is_empty() {
        println!("Locales: (none)");
    } else {
        println!("Locales: {}", locales.join(", "));
        println!("Translations: {}", library.overrides().len());
    }

    Ok(())
}
