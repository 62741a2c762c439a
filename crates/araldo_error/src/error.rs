//! Top-level error wrapper types.

use crate::{ConfigError, DeliveryError, GenerationError, RotationError, StoreError};

/// This is the foundation error enum. Each araldo crate contributes a
/// variant for its error domain.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AraldoErrorKind {
    /// Usage store error
    #[from(StoreError)]
    Store(StoreError),
    /// Topic rotation error
    #[from(RotationError)]
    Rotation(RotationError),
    /// Text generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Delivery sink error
    #[from(DeliveryError)]
    Delivery(DeliveryError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Araldo error with kind discrimination.
///
/// # Examples
///
/// ```
/// use araldo_error::{AraldoResult, ConfigError, ConfigErrorKind};
///
/// fn might_fail() -> AraldoResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Invalid(
///         "missing field".to_string(),
///     )))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Araldo Error: {}", _0)]
pub struct AraldoError(Box<AraldoErrorKind>);

impl AraldoError {
    /// Create a new error from a kind.
    pub fn new(kind: AraldoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AraldoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AraldoErrorKind
impl<T> From<T> for AraldoError
where
    T: Into<AraldoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for araldo operations.
pub type AraldoResult<T> = std::result::Result<T, AraldoError>;
