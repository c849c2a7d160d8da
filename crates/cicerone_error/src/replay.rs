//! Static replay error types.

/// Specific error conditions for static (public) replay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ReplayErrorKind {
    /// A recorded path references node ids absent from the current diagram
    #[display("Recorded path references stale nodes: {}", _0)]
    StaleNodes(String),
    /// There is nothing to replay: no recorded path and no playable fallback
    #[display("Nothing to replay: no recorded sub-slides")]
    EmptyRecordedPath,
}

/// Error type for static replay operations.
///
/// # Examples
///
/// ```
/// use cicerone_error::{ReplayError, ReplayErrorKind};
///
/// let err = ReplayError::new(ReplayErrorKind::StaleNodes("db-primary".to_string()));
/// assert!(format!("{}", err).contains("stale nodes"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Replay Error: {} at line {} in {}", kind, line, file)]
pub struct ReplayError {
    /// The specific error condition
    pub kind: ReplayErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ReplayError {
    /// Create a new ReplayError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ReplayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
