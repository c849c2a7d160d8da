//! JSON error types.

/// JSON (de)serialization error, tagged with the payload being handled and
/// the source location of the failed call.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} for {} at line {} in {}", message, payload, line, file)]
pub struct JsonError {
    /// The underlying serde message
    pub message: String,
    /// What was being (de)serialized, e.g. "presentation"
    pub payload: &'static str,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for the given payload at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use cicerone_error::JsonError;
    ///
    /// let err = JsonError::new("unexpected end of input", "recorded path");
    /// assert!(format!("{}", err).contains("recorded path"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>, payload: &'static str) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            payload,
            line: location.line(),
            file: location.file(),
        }
    }
}
