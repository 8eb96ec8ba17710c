//! CLI progress display utilities

use std::time::Duration;

use console::{Emoji, style};
use indicatif::HumanDuration;

use crate::converter::{ConvertPhase, ConvertProgress};

/// Magnifying glass - for reading operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Document - for parsing the text form
pub static DOCUMENT: Emoji<'_, '_> = Emoji("📄 ", "");
/// Gear - for conversion
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
/// Floppy disk - for writing operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/3] 🔍 Message...`
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

/// Emoji shown for a conversion phase
#[must_use]
pub fn phase_emoji(phase: ConvertPhase) -> Emoji<'static, 'static> {
    match phase {
        ConvertPhase::ReadingSource => LOOKING_GLASS,
        ConvertPhase::Parsing => DOCUMENT,
        ConvertPhase::Converting => GEAR,
        ConvertPhase::WritingOutput => DISK,
        ConvertPhase::Complete => SPARKLE,
    }
}

/// Print a conversion progress update as a step line.
///
/// The final `Complete` update is left to [`print_done`].
pub fn print_progress(progress: &ConvertProgress) {
    if progress.phase == ConvertPhase::Complete {
        return;
    }
    let msg = progress
        .message
        .as_deref()
        .unwrap_or(progress.phase.as_str());
    print_step(progress.current, progress.total, phase_emoji(progress.phase), msg);
}
