//! Usage store error types.

/// Kinds of usage store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoreErrorKind {
    /// Failed to read the store file
    #[display("Failed to read store file: {}", _0)]
    FileRead(String),
    /// Failed to write the store file
    #[display("Failed to write store file: {}", _0)]
    FileWrite(String),
    /// Failed to serialize the usage map
    #[display("Failed to serialize usage map: {}", _0)]
    Serialize(String),
    /// Failed to deserialize the usage map
    #[display("Failed to deserialize usage map: {}", _0)]
    Deserialize(String),
}

/// Usage store error with location tracking.
///
/// Store errors are never fatal to a posting cycle: the topic selector
/// degrades a failed load to an empty map and treats a failed save as
/// best-effort.
///
/// # Examples
///
/// ```
/// use araldo_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::FileRead("permission denied".to_string()));
/// assert!(format!("{}", err).contains("read"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
