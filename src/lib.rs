//! MianChowla - incremental generator for the Mian-Chowla sequence.
//!
//! The Mian-Chowla sequence `1, 2, 4, 8, 13, 21, 31, ...` is the greedy Sidon
//! (B2) sequence: each term is the smallest integer above the previous one
//! whose differences with all earlier terms have not been seen before.
//!
//! - **Lazy extension**: terms are generated on demand by index
//! - **Difference index**: every pairwise difference is cached as terms are added
//! - **Reverse lookup**: find the pair of terms realizing a given difference
//!
//! # Example
//!
//! ```rust
//! use mianchowla::MianChowla;
//!
//! let mut mc = MianChowla::new();
//! assert_eq!(mc.terms_up_to(5).unwrap(), vec![1, 2, 4, 8, 13, 21]);
//!
//! // 5 = 13 - 8
//! assert_eq!(mc.find_difference(5, None).unwrap(), Some(13));
//!
//! // Not realized among the first 4 terms
//! let mut fresh = MianChowla::new();
//! assert_eq!(fresh.find_difference(5, Some(4)).unwrap(), None);
//! ```

pub mod error;

// Sequence module
pub mod sequence;

// Re-exports for convenience
pub use error::{SequenceError, SequenceResult};
pub use sequence::{CancelFlag, Extension, MianChowla, SearchOptions, Snapshot, Witness};

#[cfg(feature = "wasm")]
pub use sequence::JsMianChowla;
