//! Error types for Marquee
//!
//! One enum covers the three failure classes the store distinguishes:
//! bad input, duplicate-identifier conflicts, and storage failures.
//! Ownership mismatches on update/delete are deliberately NOT errors;
//! those surface as `Ok(false)` so callers cannot tell "not found" from
//! "owned by someone else".

/// Errors surfaced by the comment store and activity reporter
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    /// Malformed or missing required input (e.g. an empty or non-hex
    /// comment identifier). Raised before any write is attempted.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// An insert collided with an existing document identifier.
    #[error("write conflict: {0}")]
    WriteConflict(String),

    /// The storage collaborator failed (unreachable, timeout, driver
    /// error). Propagates fatally; retry policy belongs to the caller.
    #[error("database error: {0}")]
    Database(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, MarqueeError>;
