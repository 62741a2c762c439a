//! Configuration error types.

use std::path::PathBuf;

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// File I/O error.
    #[display("File I/O error: {} ({})", path.display(), message)]
    FileIo {
        /// Path that caused the error.
        path: PathBuf,
        /// Error message.
        message: String,
    },
    /// TOML parsing error.
    #[display("TOML parsing error: {}", _0)]
    TomlParse(String),
    /// Configuration violates a precondition.
    #[display("Configuration invalid: {}", _0)]
    Invalid(String),
    /// A required environment variable is missing.
    #[display("Missing environment variable: {}", _0)]
    MissingEnv(String),
}

/// Configuration error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Config Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    /// The kind of error that occurred
    pub kind: ConfigErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(e: toml::de::Error) -> Self {
        Self::new(ConfigErrorKind::TomlParse(e.to_string()))
    }
}
