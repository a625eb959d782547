//! Terminal progress helpers, built on `indicatif`.

use crate::client::upload::UploadStatus;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Braille dots.
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Animated spinner for a request in flight. Finish it with
/// [`finish_success`] or [`finish_error`].
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(style("{spinner:.cyan} {msg}").tick_chars(TICK_CHARS));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn finish_success(pb: &ProgressBar, msg: &str) {
    pb.set_style(style("  {msg}"));
    pb.finish_with_message(format!("✓ {}", msg));
}

pub fn finish_error(pb: &ProgressBar, msg: &str) {
    pb.set_style(style("  {msg}"));
    pb.finish_with_message(format!("✗ {}", msg));
}

/// 0..=100 bar following an upload.
pub fn upload_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:30.cyan/blue} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏ "),
    );
    pb
}

pub fn show_upload_status(pb: &ProgressBar, status: &UploadStatus) {
    match status {
        UploadStatus::Idle => {}
        UploadStatus::Processing { progress, status } => {
            pb.set_position(u64::from(*progress));
            pb.set_message(status.clone());
        }
        UploadStatus::Complete => finish_success(pb, "Uploaded"),
        UploadStatus::Failed(msg) => finish_error(pb, msg),
    }
}
