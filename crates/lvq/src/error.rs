//! Error types for the LVQ engine.

use std::fmt;

/// Errors that can occur during LVQ operations.
#[derive(Debug)]
pub enum LvqError {
    /// A vector's dimension did not match the codebook's dimension.
    Shape {
        expected: usize,
        actual: usize,
        context: &'static str,
    },
    /// A prototype or class index was out of the valid range.
    IndexOutOfRange { index: usize, bound: usize },
    /// A non-finite component, negative label, or out-of-range label.
    Value(String),
    /// A persistence blob was rejected (bad magic, version, or truncation).
    Format {
        message: String,
        expected: Option<String>,
        actual: Option<String>,
    },
    /// Underlying read/write failure during store/load.
    Io(std::io::Error),
}

impl fmt::Display for LvqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape {
                expected,
                actual,
                context,
            } => write!(
                f,
                "shape error in {}: expected dimension {}, got {}",
                context, expected, actual
            ),
            Self::IndexOutOfRange { index, bound } => {
                write!(f, "index {} out of range (bound {})", index, bound)
            }
            Self::Value(msg) => write!(f, "value error: {}", msg),
            Self::Format {
                message,
                expected,
                actual,
            } => {
                write!(f, "format error: {}", message)?;
                if let Some(e) = expected {
                    write!(f, " (expected: {})", e)?;
                }
                if let Some(a) = actual {
                    write!(f, " (actual: {})", a)?;
                }
                Ok(())
            }
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for LvqError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LvqError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Result type for LVQ operations.
pub type LvqResult<T> = Result<T, LvqError>;
