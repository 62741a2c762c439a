//! Topic rotation error types.

/// Kinds of rotation errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RotationErrorKind {
    /// The topic catalog contains no topics
    #[display("Topic catalog is empty")]
    EmptyCatalog,
    /// No topic was available even after resetting usage history
    #[display("No topic available after resetting usage history")]
    Exhausted,
}

/// Rotation error with location tracking.
///
/// `Exhausted` is unreachable with a validated non-empty catalog; it exists
/// so the selection loop is bounded instead of recursing.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rotation Error: {} at line {} in {}", kind, line, file)]
pub struct RotationError {
    /// The kind of error that occurred
    pub kind: RotationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RotationError {
    /// Create a new rotation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RotationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
