//! Encoding error types.

use miette::Diagnostic;
use thiserror::Error;

use crate::scheme::Scheme;

/// Errors produced while decoding or encoding a bit string.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum EncodingError {
    /// Input text or bit string does not have the required shape.
    #[error("malformed input: {message}")]
    #[diagnostic(code(encoding::malformed_input))]
    MalformedInput {
        /// What was wrong with the input.
        message: String,
    },

    /// The value cannot be held by the target scheme at the requested width.
    #[error("{value} is not representable as {scheme} in {width} bits")]
    #[diagnostic(
        code(encoding::unrepresentable),
        help("use a wider bit width or a signed scheme")
    )]
    Unrepresentable {
        /// The offending value, rendered as text.
        value: String,
        /// Target scheme.
        scheme: Scheme,
        /// Target width in bits.
        width: usize,
    },

    /// The bit pattern decodes to a special value with no numeric result.
    #[error("{pattern} encodes NaN, which has no numeric value")]
    #[diagnostic(code(encoding::special_value))]
    SpecialValue {
        /// The bit pattern that was decoded.
        pattern: String,
    },

    /// Storage for the output bit string could not be reserved.
    #[error("could not allocate storage for {bits} bits")]
    #[diagnostic(code(encoding::resource_exhausted))]
    ResourceExhausted {
        /// Number of bits requested.
        bits: usize,
    },

    /// Integer encoder width out of range.
    #[error("invalid width {width}: must be between {min} and {max}")]
    #[diagnostic(code(encoding::invalid_width))]
    InvalidWidth {
        /// Requested width.
        width: usize,
        /// Smallest accepted width.
        min: usize,
        /// Largest accepted width.
        max: usize,
    },

    /// Floating point layout out of the supported range.
    #[error("invalid float layout: {exponent_bits} exponent bits, {mantissa_bits} mantissa bits")]
    #[diagnostic(
        code(encoding::invalid_layout),
        help("exponent bits must be 2..=11 and mantissa bits 1..=52")
    )]
    InvalidLayout {
        /// Requested exponent width.
        exponent_bits: u32,
        /// Requested mantissa width.
        mantissa_bits: u32,
    },
}

impl EncodingError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        EncodingError::MalformedInput {
            message: message.into(),
        }
    }

    pub(crate) fn unrepresentable(value: impl ToString, scheme: Scheme, width: usize) -> Self {
        EncodingError::Unrepresentable {
            value: value.to_string(),
            scheme,
            width,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrepresentable_message() {
        let err = EncodingError::unrepresentable(256, Scheme::Unsigned, 8);
        assert_eq!(
            err.to_string(),
            "256 is not representable as unsigned in 8 bits"
        );
    }

    #[test]
    fn test_diagnostic_code() {
        let err = EncodingError::malformed("empty");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("encoding::malformed_input"));
    }
}
