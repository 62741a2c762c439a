//! Delivery sink error types.

/// Kinds of delivery errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DeliveryErrorKind {
    /// Sink configuration invalid
    #[display("Invalid sink configuration: {}", _0)]
    InvalidConfiguration(String),
    /// Post content failed sink validation
    #[display("Content validation failed: {}", _0)]
    ValidationFailed(String),
    /// HTTP transport failure
    #[display("HTTP request failed: {}", _0)]
    Http(String),
    /// Delivery API rejected the request
    #[display("Delivery API error (status {}): {}", status, description)]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error description returned by the API.
        description: String,
    },
    /// Failed to parse the API response
    #[display("Failed to parse delivery response: {}", _0)]
    Parse(String),
}

/// Delivery error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Delivery Error: {} at line {} in {}", kind, line, file)]
pub struct DeliveryError {
    /// The kind of error that occurred
    pub kind: DeliveryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DeliveryError {
    /// Create a new delivery error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DeliveryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
