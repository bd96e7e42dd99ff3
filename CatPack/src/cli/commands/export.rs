//! CLI command saving a library with other packaging options

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::cli::CliContext;
use crate::cli::progress::{LOOKING_GLASS, PACKAGE, print_done, print_step, recorder_bar, report};
use crate::recorder::{LibraryRecorder, RecorderOptions};

/// Packaging flags given on the command line
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub offline: bool,
    pub resources_dir: Option<PathBuf>,
    pub remote_base: Option<String>,
    pub match_names: bool,
}

impl ExportOptions {
    /// Apply the flags over the preferences
    fn recorder_options(&self, context: &CliContext) -> RecorderOptions {
        let mut options = context.preferences.recorder_options();
        if self.offline {
            options.offline = true;
        }
        if self.match_names {
            options.match_content_name_to_item_name = true;
        }
        if let Some(dir) = &self.resources_dir {
            options.resources_local_directory = Some(dir.clone());
        }
        if let Some(base) = &self.remote_base {
            options.resources_remote_url_base = Some(base.clone());
        }
        options
    }
}

pub fn execute(
    source: &Path,
    destination: &Path,
    export: &ExportOptions,
    context: &CliContext,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let options = export.recorder_options(context);
    options.validate()?;

    // Read with the preferences the library was saved with
    let reader = LibraryRecorder::new(context.preferences.recorder_options());
    print_step(1, 2, LOOKING_GLASS, &format!("Reading {}", source.display()));
    let library = super::load_library(&reader, source, context.preferences.default_family)?;

    print_step(
        2,
        2,
        PACKAGE,
        &format!("Writing {} items to {}", library.len(), destination.display()),
    );
    let pb = recorder_bar(context.quiet);
    LibraryRecorder::new(options).write_with_progress(&library, destination, &|progress| {
        report(pb.as_ref(), progress);
    })?;

    print_done(started.elapsed());
    Ok(())
}
