//! CLI command merging libraries

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::catalog::ReadMode;
use crate::cli::CliContext;
use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_step, recorder_bar, report};
use crate::recorder::LibraryRecorder;

pub fn execute(destination: &Path, libraries: &[PathBuf], context: &CliContext) -> anyhow::Result<()> {
    let Some((first, others)) = libraries.split_first() else {
        anyhow::bail!("no library to merge");
    };
    let started = Instant::now();
    let recorder = LibraryRecorder::new(context.preferences.recorder_options());
    let steps = libraries.len() + 1;

    print_step(1, steps, LOOKING_GLASS, &format!("Reading {}", first.display()));
    let mut library = super::load_library(&recorder, first, context.preferences.default_family)?;

    for (i, path) in others.iter().enumerate() {
        print_step(i + 2, steps, LOOKING_GLASS, &format!("Merging {}", path.display()));
        let pb = recorder_bar(context.quiet);
        recorder.read_into(&mut library, path, ReadMode::Merge, &|progress| {
            report(pb.as_ref(), progress);
        })?;
    }

    print_step(
        steps,
        steps,
        DISK,
        &format!("Writing {} items to {}", library.len(), destination.display()),
    );
    let pb = recorder_bar(context.quiet);
    recorder.write_with_progress(&library, destination, &|progress| {
        report(pb.as_ref(), progress);
    })?;

    print_done(started.elapsed());
    Ok(())
}
