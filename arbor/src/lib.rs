//! Arbor property-based testing library.
//!
//! This is the main entry point for the Arbor library, re-exporting the
//! generation-and-shrinking core: composable arbitraries, lazy shrinkable
//! values, weighted choice, and shrink-tree inspection utilities.

pub use arbor_core::*;
