//! Progress logging.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Logs how many pages have been analyzed so far, and the rate.
pub fn log_progress(start_time: Instant, completed: &AtomicUsize, total: usize) {
    let completed = completed.load(Ordering::SeqCst);
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Analyzed {}/{} pages in {:.2} seconds (~{:.2} pages/sec)",
        completed, total, elapsed_secs, rate
    );
}
