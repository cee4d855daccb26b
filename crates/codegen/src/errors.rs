//! The generation error taxonomy.

use thiserror::Error;

/// Errors raised during a generation run.
///
/// There is no retry path anywhere: generation is deterministic, so a
/// failure on one input fails identically on retry. The only recovery is
/// correcting the code model or configuration and re-running.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Malformed external configuration, reported before any generation
    /// work starts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A violated code-model invariant. Always a generator defect, never
    /// user-recoverable; the run aborts with no partial output.
    #[error("internal error: {0}")]
    Internal(String),

    /// Stuttering-prefix trimming collapsed two distinct names into one.
    /// Collisions are aggregated across the run and reported together,
    /// before any file is written.
    #[error("name collisions detected: {}", .0.join("; "))]
    NameCollision(Vec<String>),
}

pub type Result<T> = std::result::Result<T, CodegenError>;
