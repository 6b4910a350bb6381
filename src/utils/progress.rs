//! Progress bar and spinner utilities

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a standard progress bar with consistent styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos:>7}/{len:7} ({eta})")
            .unwrap()
            .progress_chars("━━─"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a spinner with consistent styling
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar_tracks_completed_jobs() {
        let pb = create_progress_bar(100, "Pre-parsing MSAs");
        assert_eq!(pb.length(), Some(100));
        pb.inc(10);
        pb.inc(1);
        assert_eq!(pb.position(), 11);
        pb.finish();
        assert!(pb.is_finished());
    }

    #[test]
    fn test_spinner_has_no_length() {
        let spinner = create_spinner("Listing...");
        assert_eq!(spinner.length(), None);
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }
}
