//! CLI output: status lines, warnings, progress, and the final summary.
//!
//! All user-facing text funnels through here so the rest of the crate stays
//! silent. Status and results go to stdout; warnings go to stderr through
//! the single [`warn`] channel (there is no ambient warning system —
//! anything worth flagging is a `warn` call). Progress is one unit per
//! page, not per row: pages are the expensive step, rows are not.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Single diagnostics channel for non-fatal warnings.
pub fn warn(message: &str) {
    eprintln!("warning: {message}");
}

/// Status line for a pipeline step.
pub fn status(message: &str) {
    println!("{message}");
}

/// Progress bar over the page batch: one tick per completed page.
pub fn page_progress(total_pages: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_pages);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pages ({percent}%)")
            .expect("progress template is valid")
            .progress_chars("#>-"),
    );
    bar
}

/// Final listing of produced files, one line per page.
pub fn print_summary(produced: &[(usize, std::path::PathBuf)]) {
    match produced {
        [(_, path)] => println!("Done! Image saved to {}", path.display()),
        pages => {
            println!("Done! {} images saved:", pages.len());
            for (number, path) in pages {
                println!("    {number:>4} {}", path.display());
            }
        }
    }
}

/// Status line announcing which input table a run is reading.
pub fn announce_input(path: &Path) {
    println!("Loading {}...", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn page_progress_has_expected_length() {
        let bar = page_progress(18);
        assert_eq!(bar.length(), Some(18));
        assert_eq!(bar.position(), 0);
    }

    #[test]
    fn summary_handles_single_and_multiple_pages() {
        // Shape-only checks: print_summary writes to stdout, so just make
        // sure both arms accept their input.
        print_summary(&[(1, PathBuf::from("result.png"))]);
        print_summary(&[
            (1, PathBuf::from("r_1.png")),
            (2, PathBuf::from("r_2.png")),
        ]);
    }
}
