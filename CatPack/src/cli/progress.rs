//! CLI progress display utilities
//!
//! Step indicators with emojis, and a progress bar fed by recorder updates.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::recorder::{RecordPhase, RecordProgress};

/// Magnifying glass - for reading operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - for packaging resources
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
/// Picture - for texture imports
pub static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "");
/// Cube - for furniture imports
pub static CUBE: Emoji<'_, '_> = Emoji("📐 ", "");

/// Print a step indicator: `[1/3] 📦 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar style for determinate progress
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")
        .expect("valid template")
}

/// Progress bar for recorder updates, or none when `quiet`
#[must_use]
pub fn recorder_bar(quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let pb = ProgressBar::new(0);
    pb.set_style(bar_style());
    Some(pb)
}

/// Show a recorder update on `pb`
pub fn report(pb: Option<&ProgressBar>, progress: &RecordProgress) {
    let Some(pb) = pb else {
        return;
    };
    if progress.phase == RecordPhase::Complete {
        pb.finish_and_clear();
        return;
    }
    pb.set_length(progress.total.max(progress.current) as u64);
    pb.set_position(progress.current as u64);
    match &progress.current_file {
        Some(name) => pb.set_message(format!("{} {name}", progress.phase.as_str())),
        None => pb.set_message(progress.phase.as_str()),
    }
}
