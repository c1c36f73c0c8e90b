//! Error types for cap-tree construction and queries.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CapTreeError>;

/// Errors reported by the cap-tree engine.
#[derive(Debug, Error)]
pub enum CapTreeError {
    /// The input cannot be indexed or queried: an empty edge sequence, an
    /// empty geometry, non-finite coordinates, or a negative threshold.
    /// Fatal to the call.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The query-to-exterior stab arc is zero-length or antipodal, so the
    /// shorter great-circle path between its endpoints is undefined.
    /// Recoverable: retry the containment query with a different exterior
    /// point.
    #[error("degenerate stab line: {0}")]
    DegenerateStab(String),
}
