//! # Snapshot Testing Support
//!
//! Utilities for testing the scanners via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts a [`ParsedDoc`](crate::parsing::ParsedDoc) to a stable,
//!   serializable `Snap` for `insta` snapshot testing
//! - **`invariants`**: Runtime checks for scanner correctness (spans in bounds,
//!   content spans inside their block, inline nodes tiling the body)
//!
//! Snapshots assert block kinds, ids, spans and content previews, so the
//! fixture files under `tests/fixtures/` double as the syntax reference.

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
