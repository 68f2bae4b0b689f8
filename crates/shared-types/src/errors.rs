//! # Error Types
//!
//! Errors shared across crates: value parsing and call-argument decoding.

use thiserror::Error;

/// Errors raised while parsing value objects from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the target type.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Byte length of the target type.
        expected: usize,
        /// Byte length decoded.
        actual: usize,
    },
}

/// Errors raised while reading positional call arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// Fewer arguments were supplied than the operation needs.
    #[error("missing argument at position {index}")]
    Missing {
        /// Position of the missing argument.
        index: usize,
    },

    /// The argument at `index` has the wrong type.
    #[error("argument {index}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Position of the argument.
        index: usize,
        /// Type the operation expects.
        expected: &'static str,
        /// Type supplied.
        actual: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_error_display() {
        let err = ArgError::TypeMismatch {
            index: 1,
            expected: "address",
            actual: "bool",
        };
        assert_eq!(err.to_string(), "argument 1: expected address, got bool");
        assert_eq!(
            ArgError::Missing { index: 0 }.to_string(),
            "missing argument at position 0"
        );
    }
}
