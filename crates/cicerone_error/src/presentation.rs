//! Presentation error types.

/// Specific error conditions for presentation assembly and playback entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PresentationErrorKind {
    /// Presentation references scenario ids that no longer exist
    #[display("Presentation references missing scenarios: {}", _0)]
    MissingScenarios(String),
    /// A step's order field collides with another step in the same scenario
    #[display("Scenario '{}' has duplicate step order {}", scenario, order)]
    DuplicateStepOrder {
        /// Scenario id
        scenario: String,
        /// Colliding order value
        order: u32,
    },
    /// A step designates a sub-slide node id outside its own node set
    #[display("Step '{}' designates sub-slide node '{}' outside its node set", step, node)]
    UnknownSubSlideNode {
        /// Step id
        step: String,
        /// Offending node id
        node: String,
    },
    /// Branch target labels do not pair up with target node ids
    #[display("Step '{}' declares {} branch targets but {} labels", step, targets, labels)]
    MismatchedBranchLabels {
        /// Step id
        step: String,
        /// Number of target node ids
        targets: usize,
        /// Number of labels
        labels: usize,
    },
    /// A recorded path already exists and cannot be overwritten
    #[display("Presentation '{}' already has a frozen recorded path", _0)]
    RecordedPathFrozen(String),
    /// Note key could not be parsed from its composite form
    #[display("Malformed note key: {}", _0)]
    MalformedNoteKey(String),
}

/// Error type for presentation operations.
///
/// # Examples
///
/// ```
/// use cicerone_error::{PresentationError, PresentationErrorKind};
///
/// let err = PresentationError::new(PresentationErrorKind::MissingScenarios(
///     "auth-flow".to_string(),
/// ));
/// assert!(format!("{}", err).contains("missing scenarios"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Presentation Error: {} at line {} in {}", kind, line, file)]
pub struct PresentationError {
    /// The specific error condition
    pub kind: PresentationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PresentationError {
    /// Create a new PresentationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PresentationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
