//! Top-level error wrapper types.

use crate::{JsonError, PresentationError, ReplayError};

/// This is the foundation error enum. Every fallible operation in the
/// workspace funnels into one of these variants.
///
/// # Examples
///
/// ```
/// use cicerone_error::{CiceroneError, JsonError};
///
/// let json_err = JsonError::new("trailing characters", "presentation");
/// let err: CiceroneError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CiceroneErrorKind {
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Presentation assembly or playback-entry error
    #[from(PresentationError)]
    Presentation(PresentationError),
    /// Static replay error
    #[from(ReplayError)]
    Replay(ReplayError),
}

/// Cicerone error with kind discrimination.
///
/// # Examples
///
/// ```
/// use cicerone_error::{CiceroneResult, PresentationError, PresentationErrorKind};
///
/// fn might_fail() -> CiceroneResult<()> {
///     Err(PresentationError::new(PresentationErrorKind::MissingScenarios(
///         "payments".to_string(),
///     )))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Cicerone Error: {}", _0)]
pub struct CiceroneError(Box<CiceroneErrorKind>);

impl CiceroneError {
    /// Create a new error from a kind.
    pub fn new(kind: CiceroneErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CiceroneErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to CiceroneErrorKind
impl<T> From<T> for CiceroneError
where
    T: Into<CiceroneErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Cicerone operations.
///
/// # Examples
///
/// ```
/// use cicerone_error::{CiceroneResult, JsonError};
///
/// fn parse_path() -> CiceroneResult<String> {
///     Err(JsonError::new("expected value", "recorded path"))?
/// }
/// ```
pub type CiceroneResult<T> = std::result::Result<T, CiceroneError>;
