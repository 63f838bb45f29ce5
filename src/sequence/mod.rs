//! Sequence module.
//!
//! Provides the incremental Mian-Chowla engine and the value types it returns.

pub mod model;
pub mod engine;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-exports for convenience
pub use model::{CancelFlag, Extension, SearchOptions, Snapshot, Witness};
pub use engine::MianChowla;

#[cfg(feature = "wasm")]
pub use wasm::JsMianChowla;
