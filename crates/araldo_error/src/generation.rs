//! Text generation error types.

/// Kinds of generation errors.
///
/// The retry executor treats every generation failure uniformly; the kinds
/// exist for logging and diagnostics, not for retry classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// HTTP transport failure
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Generation API returned a non-success status
    #[display("Generation API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body or error description.
        message: String,
    },
    /// Failed to parse the API response
    #[display("Failed to parse generation response: {}", _0)]
    Parse(String),
    /// The API returned no choices
    #[display("Generation response contained no choices")]
    EmptyResponse,
    /// A per-attempt deadline expired before the call completed
    #[display("Generation attempt exceeded its deadline")]
    DeadlineExceeded,
}

/// Generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<tokio::time::error::Elapsed> for GenerationError {
    #[track_caller]
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::new(GenerationErrorKind::DeadlineExceeded)
    }
}
