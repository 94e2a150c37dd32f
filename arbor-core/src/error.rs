//! Error types for Arbor generation.

use thiserror::Error;

/// Main error type for constructing arbitraries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArborError {
    /// A weighted choice was constructed over zero arbitraries.
    #[error("weighted choice `{label}` expects at least one arbitrary")]
    EmptyChoice { label: String },

    /// A weighted choice entry carried a zero weight.
    #[error("weighted choice `{label}` requires strictly positive weights")]
    InvalidWeight { label: String },
}

/// Result type for Arbor operations.
pub type Result<T> = std::result::Result<T, ArborError>;
