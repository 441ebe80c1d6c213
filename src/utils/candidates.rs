//! Ordered first-match selection.
//!
//! Several checks try a fixed list of fallbacks and keep the first one that
//! yields something (main content container, description fallback, canonical
//! URL for keyword placement). The order of the list is part of the scoring
//! contract, so it lives in one place.

/// A labelled probe evaluated lazily by [`first_match`].
pub type Candidate<'a, T> = (&'static str, &'a dyn Fn() -> Option<T>);

/// Evaluates candidates in order and returns the first hit with its label.
///
/// Probes after the first hit are never evaluated.
pub fn first_match<T>(candidates: &[Candidate<'_, T>]) -> Option<(&'static str, T)> {
    candidates
        .iter()
        .find_map(|(label, probe)| probe().map(|value| (*label, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_first_match_returns_first_hit() {
        let none = || None::<u32>;
        let two = || Some(2);
        let three = || Some(3);
        let candidates: [Candidate<'_, u32>; 3] =
            [("none", &none), ("two", &two), ("three", &three)];
        let result = first_match(&candidates);
        assert_eq!(result, Some(("two", 2)));
    }

    #[test]
    fn test_first_match_stops_after_hit() {
        let calls = Cell::new(0);
        let hit = || {
            calls.set(calls.get() + 1);
            Some("hit")
        };
        let later = || {
            calls.set(calls.get() + 10);
            Some("later")
        };
        let candidates: [Candidate<'_, &str>; 2] = [("a", &hit), ("b", &later)];
        assert_eq!(first_match(&candidates), Some(("a", "hit")));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_first_match_empty() {
        assert_eq!(first_match::<u8>(&[]), None);
    }
}
