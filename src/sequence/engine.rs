//! Core `MianChowla` engine.
//!
//! Owns the generated terms and the set of every pairwise difference among
//! them. The sequence is extended lazily: queries by index generate whatever
//! terms are missing, and extension commits the new term and its differences
//! together so no half-updated state is ever observable.

use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use super::model::{Extension, SearchOptions, Snapshot, Witness};
use crate::error::{SequenceError, SequenceResult};

/// Incremental generator for the Mian-Chowla sequence `1, 2, 4, 8, 13, 21, ...`.
///
/// Every new term is the smallest integer above the previous one whose
/// differences with all earlier terms are new, so no difference is ever
/// realized by two distinct pairs (the Sidon / B2 property).
///
/// All index arguments are zero-based: `term(0)` is the first term.
///
/// # State
///
/// - `terms`: append-only, strictly increasing
/// - `differences`: cache of all pairwise differences, updated on each append
///
/// The engine is single-owner. Wrap it in a mutex if it must be shared.
#[derive(Debug, Clone, Default)]
pub struct MianChowla {
    terms: Vec<u64>,
    differences: BTreeSet<u64>,
    options: SearchOptions,
}

impl MianChowla {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an empty engine with an unbounded search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine whose searches are guarded by `options`.
    pub fn with_options(options: SearchOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the current search guards.
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replaces the search guards. Generated terms are kept.
    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    // =========================================================================
    // EXTENSION
    // =========================================================================

    /// Generates the next term.
    ///
    /// Candidates start just above the last term and are rejected while any
    /// of their differences with earlier terms is already recorded. If a
    /// search guard stops the search, nothing is committed.
    pub fn extend_by_one(&mut self) -> SequenceResult<Extension> {
        let index = self.terms.len();
        let mut candidate = match self.terms.last() {
            Some(&last) => last
                .checked_add(1)
                .ok_or_else(|| SequenceError::overflow(index))?,
            None => 1,
        };
        let mut rejected = 0u64;

        loop {
            if let Err(err) = self.options.check(index, rejected) {
                warn!(index, rejected, error = %err, "search interrupted");
                return Err(err);
            }

            if let Some(differences) = self.fingerprint(candidate) {
                self.differences.extend(differences.iter().copied());
                self.terms.push(candidate);
                trace!(index, term = candidate, rejected, "accepted term");
                return Ok(Extension {
                    index,
                    term: candidate,
                    differences,
                });
            }

            rejected += 1;
            candidate = candidate
                .checked_add(1)
                .ok_or_else(|| SequenceError::overflow(index))?;
        }
    }

    /// Extends the sequence until the term at `index` exists.
    pub fn ensure_extended_to(&mut self, index: usize) -> SequenceResult<()> {
        while self.terms.len() <= index {
            self.extend_by_one()?;
        }
        Ok(())
    }

    /// Differences `candidate` would introduce, or `None` if any collides.
    fn fingerprint(&self, candidate: u64) -> Option<BTreeSet<u64>> {
        let mut differences = BTreeSet::new();
        for &term in &self.terms {
            let d = candidate - term;
            if self.differences.contains(&d) {
                return None;
            }
            differences.insert(d);
        }
        Some(differences)
    }

    // =========================================================================
    // TERM QUERIES
    // =========================================================================

    /// Returns the term at `index`, generating terms as needed.
    pub fn term(&mut self, index: usize) -> SequenceResult<u64> {
        self.ensure_extended_to(index)?;
        Ok(self.terms[index])
    }

    /// Returns a copy of the terms at indices `0..=index`.
    pub fn terms_up_to(&mut self, index: usize) -> SequenceResult<Vec<u64>> {
        self.ensure_extended_to(index)?;
        Ok(self.terms[..=index].to_vec())
    }

    /// Returns the most recently generated term.
    pub fn last_term(&self) -> SequenceResult<u64> {
        self.terms.last().copied().ok_or(SequenceError::EmptySequence)
    }

    /// Returns a copy of every term generated so far.
    pub fn terms(&self) -> Vec<u64> {
        self.terms.clone()
    }

    /// Returns the number of terms generated so far.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term has been generated.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    // =========================================================================
    // DIFFERENCE QUERIES
    // =========================================================================

    /// Returns every difference discovered so far.
    ///
    /// This only covers the terms generated to date.
    pub fn differences(&self) -> BTreeSet<u64> {
        self.differences.clone()
    }

    /// Returns true if `d` is realized by the terms generated so far.
    pub fn contains_difference(&self, d: u64) -> bool {
        self.differences.contains(&d)
    }

    /// Returns the differences realized among the terms at indices `0..=index`.
    ///
    /// Recomputed from the terms rather than read from the cache, so this
    /// is expensive. Prefer `differences()` unless the set must stop at an
    /// earlier term.
    pub fn differences_up_to(&mut self, index: usize) -> SequenceResult<BTreeSet<u64>> {
        let mut output = BTreeSet::new();
        for i in 1..=index {
            output.extend(self.differences_for_term(i)?);
        }
        Ok(output)
    }

    /// Returns the differences between the term at `index` and every
    /// earlier term.
    pub fn differences_for_term(&mut self, index: usize) -> SequenceResult<BTreeSet<u64>> {
        self.ensure_extended_to(index)?;
        let term = self.terms[index];
        Ok(self.terms[..index].iter().map(|t| term - t).collect())
    }

    // =========================================================================
    // REVERSE LOOKUP
    // =========================================================================

    /// Finds the term `t` such that `t - d` is also a term.
    ///
    /// `max_terms` limits how many terms are considered; `None` (or
    /// `Some(0)`) means no limit. If `d` is already recorded, the existing
    /// terms are scanned in index order. Otherwise the sequence is extended
    /// until some new term introduces `d`.
    ///
    /// Returns `Ok(None)` when `d` is not realized within the limit. An
    /// unbounded lookup of a recorded difference with no witness fails with
    /// `MissingWitness`.
    pub fn find_difference(&mut self, d: u64, max_terms: Option<usize>) -> SequenceResult<Option<u64>> {
        let bound = max_terms.filter(|max| *max > 0);

        // Terms are distinct, so 0 is never a difference.
        if d == 0 {
            return Ok(None);
        }

        if self.differences.contains(&d) {
            let end = bound.map_or(self.terms.len(), |max| max.min(self.terms.len()));
            if let Some(index) = (1..end).find(|&i| self.realizes(i, d)) {
                debug!(d, index, term = self.terms[index], "difference already recorded");
                return Ok(Some(self.terms[index]));
            }

            if bound.is_none() {
                warn!(d, terms = self.terms.len(), "recorded difference has no witness");
                return Err(SequenceError::missing_witness(d));
            }
            debug!(d, scanned = end, "recorded difference lies beyond the scan bound");
            return Ok(None);
        }

        loop {
            if let Some(max) = bound {
                if self.terms.len() >= max {
                    debug!(d, max, "difference not found within bound");
                    return Ok(None);
                }
            }

            let extension = self.extend_by_one()?;
            if extension.introduces(d) {
                debug!(d, index = extension.index, term = extension.term, "difference introduced");
                return Ok(Some(extension.term));
            }
        }
    }

    /// Like `find_difference`, but returns both terms of the pair.
    pub fn find_witness(&mut self, d: u64, max_terms: Option<usize>) -> SequenceResult<Option<Witness>> {
        Ok(self
            .find_difference(d, max_terms)?
            .and_then(|larger| Witness::new(d, larger)))
    }

    /// True if the term at `index` minus `d` is an earlier term.
    ///
    /// Equivalent to testing membership in `differences_for_term(index)`;
    /// terms are sorted, so a binary search over the prefix suffices.
    fn realizes(&self, index: usize, d: u64) -> bool {
        match self.terms[index].checked_sub(d) {
            Some(smaller) => self.terms[..index].binary_search(&smaller).is_ok(),
            None => false,
        }
    }

    // =========================================================================
    // EXPORT
    // =========================================================================

    /// Returns a serializable copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            terms: self.terms.clone(),
            differences: self.differences.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
