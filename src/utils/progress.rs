//! Progress reporting for batch file processing, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Bar style for row-by-row batch passes
const ROW_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a progress bar over a known number of rows
#[must_use]
pub fn row_progress_bar(rows: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(rows);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(ROW_TEMPLATE)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Finish a progress bar with a completion message
pub fn finish(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(message.to_string());
}
