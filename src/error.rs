//! Error types for the Mian-Chowla sequence engine.

use thiserror::Error;

/// Result type alias for sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Errors that can occur while generating or querying the sequence.
///
/// A difference that cannot be located within a bound is not an error;
/// lookups report that as `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A term-dependent query was made before any term exists.
    #[error("Sequence is empty: no term has been generated yet")]
    EmptySequence,

    /// A difference is recorded but no term realizing it could be found.
    /// This means the engine's bookkeeping is inconsistent.
    #[error("Difference {difference} is recorded but no term generating it exists")]
    MissingWitness { difference: u64 },

    /// The search for a term was cancelled through its cancel flag.
    #[error("Search for term {index} was cancelled")]
    Cancelled { index: usize },

    /// The search for a term examined its maximum number of candidates.
    #[error("Search for term {index} gave up after {candidates} candidates")]
    SearchExhausted { index: usize, candidates: u64 },

    /// The next candidate does not fit in a u64.
    #[error("Candidate for term {index} overflows u64")]
    Overflow { index: usize },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl SequenceError {
    /// Creates a MissingWitness error.
    pub fn missing_witness(difference: u64) -> Self {
        Self::MissingWitness { difference }
    }

    /// Creates a Cancelled error.
    pub fn cancelled(index: usize) -> Self {
        Self::Cancelled { index }
    }

    /// Creates a SearchExhausted error.
    pub fn search_exhausted(index: usize, candidates: u64) -> Self {
        Self::SearchExhausted { index, candidates }
    }

    /// Creates an Overflow error.
    pub fn overflow(index: usize) -> Self {
        Self::Overflow { index }
    }

    /// Creates a Serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true for errors raised by the search guards, which leave the
    /// engine untouched and can be retried.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::SearchExhausted { .. })
    }
}
