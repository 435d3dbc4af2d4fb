//! Progress bar for yearly runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Creates the per-year progress bar, or a hidden bar when `visible` is false.
///
/// Workers call `inc(1)` as each year finishes, whatever the outcome.
pub(crate) fn year_progress(visible: bool, total_years: usize, label: &str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(total_years as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len} years ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    bar.set_message(label.to_string());
    bar
}
