//! Value types produced and consumed by the Mian-Chowla engine.
//!
//! Everything here is plain data: the engine owns the mutable state, these
//! types are what crosses the API boundary.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{SequenceError, SequenceResult};

// =============================================================================
// EXTENSION
// =============================================================================

/// The outcome of extending the sequence by one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Zero-based index of the new term.
    pub index: usize,

    /// The accepted term.
    pub term: u64,

    /// Differences the new term makes with every earlier term.
    ///
    /// This is the per-term fingerprint used for reverse lookup.
    pub differences: BTreeSet<u64>,
}

impl Extension {
    /// Returns true if this term introduced the difference `d`.
    pub fn introduces(&self, d: u64) -> bool {
        self.differences.contains(&d)
    }
}

// =============================================================================
// WITNESS
// =============================================================================

/// A pair of terms realizing a difference: `larger - smaller == difference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub difference: u64,
    pub larger: u64,
    pub smaller: u64,
}

impl Witness {
    /// Builds the witness for difference `d` realized by the term `larger`.
    ///
    /// Returns `None` if `larger` cannot realize `d` (it would need a
    /// non-positive smaller term).
    pub fn new(difference: u64, larger: u64) -> Option<Self> {
        let smaller = larger.checked_sub(difference).filter(|s| *s > 0)?;
        Some(Self {
            difference,
            larger,
            smaller,
        })
    }
}

// =============================================================================
// SEARCH OPTIONS
// =============================================================================

/// Shared flag that stops an in-progress candidate search.
///
/// Clones share the same underlying flag, so one handle can be given to the
/// engine and another kept by whoever decides to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clears a previous cancellation request.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Returns true once `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Guards for the unbounded candidate search.
///
/// The default imposes no limit at all, which is the classic behavior: the
/// search always terminates eventually, but nothing bounds how long it takes.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum number of candidates examined while producing a single term.
    pub max_candidates: Option<u64>,

    /// External cancellation signal, polled once per candidate.
    pub cancel: Option<CancelFlag>,
}

impl SearchOptions {
    /// Creates options with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set the per-term candidate cap.
    pub fn with_max_candidates(mut self, max_candidates: u64) -> Self {
        self.max_candidates = Some(max_candidates);
        self
    }

    /// Builder: Set the cancellation flag.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Checks the guards before examining candidate number `examined`
    /// (zero-based) while searching for term `index`.
    pub(crate) fn check(&self, index: usize, examined: u64) -> SequenceResult<()> {
        if let Some(cancel) = &self.cancel {
            if cancel.is_cancelled() {
                return Err(SequenceError::cancelled(index));
            }
        }
        match self.max_candidates {
            Some(max) if examined >= max => Err(SequenceError::search_exhausted(index, examined)),
            _ => Ok(()),
        }
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// A serializable copy of the engine's state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    /// Terms generated so far, in order.
    pub terms: Vec<u64>,

    /// Every pairwise difference among those terms.
    pub differences: BTreeSet<u64>,
}

impl Snapshot {
    /// Returns the number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term has been generated.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Serializes to a JSON string.
    pub fn to_json(&self) -> SequenceResult<String> {
        serde_json::to_string(self).map_err(|e| SequenceError::serialization(e.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_witness_new() {
        let w = Witness::new(3, 4).unwrap();
        assert_eq!(w.smaller, 1);
        assert_eq!(w.larger, 4);

        // 4 - 4 = 0 is not a term
        assert!(Witness::new(4, 4).is_none());
        assert!(Witness::new(5, 4).is_none());
    }

    #[test]
    fn test_cancel_flag_shared_between_clones() {
        let flag = CancelFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_cancelled());

        handle.cancel();
        assert!(flag.is_cancelled());

        flag.reset();
        assert!(!handle.is_cancelled());
    }

    #[test]
    fn test_search_options_check() {
        let opts = SearchOptions::new();
        assert!(opts.check(0, u64::MAX).is_ok());

        let opts = SearchOptions::new().with_max_candidates(2);
        assert!(opts.check(5, 1).is_ok());
        assert!(matches!(
            opts.check(5, 2),
            Err(SequenceError::SearchExhausted { index: 5, candidates: 2 })
        ));

        let flag = CancelFlag::new();
        let opts = SearchOptions::new().with_cancel_flag(flag.clone());
        assert!(opts.check(0, 0).is_ok());
        flag.cancel();
        assert!(matches!(opts.check(3, 0), Err(SequenceError::Cancelled { index: 3 })));
    }

    #[test]
    fn test_snapshot_json() {
        let snapshot = Snapshot {
            terms: vec![1, 2, 4],
            differences: [1, 2, 3].into_iter().collect(),
        };
        let json = snapshot.to_json().unwrap();
        assert_eq!(json, r#"{"terms":[1,2,4],"differences":[1,2,3]}"#);

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.len(), 3);
    }
}
