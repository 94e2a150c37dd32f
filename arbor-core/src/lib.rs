//! Core functionality for Arbor property-based testing.
//!
//! This crate provides the generation-and-shrinking engine: composable
//! arbitraries, lazy shrinkable values, and the shrink-tree utilities used
//! to inspect and test shrinking behavior.

pub mod arbitrary;
pub mod choice;
pub mod error;
pub mod random;
pub mod shrinkable;
pub mod tree;

// Re-export the main types
pub use arbitrary::*;
pub use choice::*;
pub use error::*;
pub use random::*;
pub use shrinkable::*;
pub use tree::*;
