//! Processing statistics tracking.
//!
//! Thread-safe counters for errors, warnings and informational events seen
//! while analyzing a batch of pages.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// One atomic counter per variant of `K`, all created up front.
struct Counters<K> {
    counts: HashMap<K, AtomicUsize>,
}

impl<K> Counters<K>
where
    K: IntoEnumIterator + Eq + Hash + Copy + std::fmt::Debug,
{
    fn new() -> Self {
        Self {
            counts: K::iter().map(|key| (key, AtomicUsize::new(0))).collect(),
        }
    }

    fn increment(&self, key: K) {
        match self.counts.get(&key) {
            Some(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            None => log::error!(
                "Counter for {:?} missing from stats map; ProcessingStats was not built with new()",
                key
            ),
        }
    }

    fn get(&self, key: K) -> usize {
        self.counts
            .get(&key)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    fn total(&self) -> usize {
        K::iter().map(|key| self.get(key)).sum()
    }
}

/// Thread-safe processing statistics tracker.
///
/// Shared across analysis tasks behind an `Arc`. Every variant of
/// [`ErrorType`], [`WarningType`] and [`InfoType`] starts at zero.
pub struct ProcessingStats {
    errors: Counters<ErrorType>,
    warnings: Counters<WarningType>,
    info: Counters<InfoType>,
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStats {
    pub fn new() -> Self {
        ProcessingStats {
            errors: Counters::new(),
            warnings: Counters::new(),
            info: Counters::new(),
        }
    }

    pub fn increment_error(&self, error: ErrorType) {
        self.errors.increment(error);
    }

    pub fn increment_warning(&self, warning: WarningType) {
        self.warnings.increment(warning);
    }

    pub fn increment_info(&self, info_type: InfoType) {
        self.info.increment(info_type);
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors.get(error)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings.get(warning)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info.get(info_type)
    }

    /// Total error count across all error types.
    pub fn total_errors(&self) -> usize {
        self.errors.total()
    }

    /// Total warning count across all warning types.
    pub fn total_warnings(&self) -> usize {
        self.warnings.total()
    }

    /// Total info count across all info types.
    pub fn total_info(&self) -> usize {
        self.info.total()
    }
}
