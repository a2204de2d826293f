//! Bit-level codecs, one module per representation scheme.
//!
//! Every scheme exposes a `decode_*` function taking a [`BitString`] and an
//! `encode_*` function producing one:
//!
//! | Scheme | Decoder | Encoder |
//! |--------|---------|---------|
//! | Unsigned | [`decode_unsigned`] | [`encode_unsigned`] |
//! | Signed magnitude | [`decode_signed_magnitude`] | [`encode_signed_magnitude`] |
//! | One's complement | [`decode_ones_complement`] | [`encode_ones_complement`] |
//! | Two's complement | [`decode_twos_complement`] | [`encode_twos_complement`] |
//! | IEEE-754 | [`decode_ieee754`] | [`encode_ieee754`] |
//!
//! Integer decoders take the width from the string itself. Integer encoders
//! take an explicit width and fail rather than wrap when the value does not
//! fit.

mod ieee754;
mod ones_complement;
pub mod rounding;
mod signed_magnitude;
mod twos_complement;
mod unsigned;

pub use ieee754::{decode_ieee754, encode_ieee754};
pub use ones_complement::{decode_ones_complement, encode_ones_complement};
pub use rounding::GuardBits;
pub use signed_magnitude::{decode_signed_magnitude, encode_signed_magnitude};
pub use twos_complement::{decode_twos_complement, encode_twos_complement};
pub use unsigned::{decode_unsigned, encode_unsigned};

use crate::bits::BitString;
use crate::error::EncodingError;
use crate::scheme::Scheme;
use crate::Result;

/// Widest integer string the engine accepts, in bits.
pub const MAX_INTEGER_WIDTH: usize = 64;

/// Decode `bits` under an integer scheme.
///
/// # Errors
/// `MalformedInput` if `scheme` is [`Scheme::Ieee754`]; otherwise whatever
/// the scheme's decoder reports.
pub fn decode_integer(scheme: Scheme, bits: &BitString) -> Result<i64> {
    match scheme {
        Scheme::Unsigned => decode_unsigned(bits),
        Scheme::SignedMagnitude => decode_signed_magnitude(bits),
        Scheme::OnesComplement => decode_ones_complement(bits),
        Scheme::TwosComplement => decode_twos_complement(bits),
        Scheme::Ieee754 => Err(EncodingError::malformed(
            "IEEE-754 bit strings decode to floating point values",
        )),
    }
}

/// Encode `value` in `width` bits under an integer scheme.
pub fn encode_integer(scheme: Scheme, value: i64, width: usize) -> Result<BitString> {
    match scheme {
        Scheme::Unsigned => encode_unsigned(value, width),
        Scheme::SignedMagnitude => encode_signed_magnitude(value, width),
        Scheme::OnesComplement => encode_ones_complement(value, width),
        Scheme::TwosComplement => encode_twos_complement(value, width),
        Scheme::Ieee754 => Err(EncodingError::malformed(
            "IEEE-754 encoding needs a float layout, not an integer width",
        )),
    }
}

/// Width of a string handed to an integer decoder.
pub(crate) fn decode_width(bits: &BitString) -> Result<usize> {
    match bits.len() {
        0 => Err(EncodingError::malformed("bit string is empty")),
        width if width > MAX_INTEGER_WIDTH => Err(EncodingError::malformed(format!(
            "{width} bits exceeds the {MAX_INTEGER_WIDTH}-bit integer limit"
        ))),
        width => Ok(width),
    }
}

pub(crate) fn check_encode_width(width: usize) -> Result<()> {
    if (1..=MAX_INTEGER_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(EncodingError::InvalidWidth {
            width,
            min: 1,
            max: MAX_INTEGER_WIDTH,
        })
    }
}

/// 2^exp as a u128, for range checks that must not overflow at 64 bits.
pub(crate) fn pow2(exp: usize) -> u128 {
    1u128 << exp
}

/// Standard binary encoding by subtracting descending powers of two.
///
/// The caller guarantees `value < 2^width`.
pub(crate) fn greedy_bits(value: u64, width: usize) -> Result<BitString> {
    let mut remainder = value;
    BitString::from_fn(width, |i| {
        let power = 1u64 << (width - 1 - i);
        if power <= remainder {
            remainder -= power;
            true
        } else {
            false
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_decode() {
        let bits: BitString = "11111011".parse().unwrap();
        assert_eq!(decode_integer(Scheme::Unsigned, &bits).unwrap(), 251);
        assert_eq!(decode_integer(Scheme::SignedMagnitude, &bits).unwrap(), -123);
        assert_eq!(decode_integer(Scheme::OnesComplement, &bits).unwrap(), -4);
        assert_eq!(decode_integer(Scheme::TwosComplement, &bits).unwrap(), -5);
        assert!(decode_integer(Scheme::Ieee754, &bits).is_err());
    }

    #[test]
    fn test_dispatch_encode() {
        assert_eq!(
            encode_integer(Scheme::TwosComplement, -5, 8).unwrap().to_string(),
            "11111011"
        );
        assert_eq!(
            encode_integer(Scheme::OnesComplement, -5, 8).unwrap().to_string(),
            "11111010"
        );
        assert_eq!(
            encode_integer(Scheme::SignedMagnitude, -5, 8).unwrap().to_string(),
            "10000101"
        );
        assert!(encode_integer(Scheme::Ieee754, 1, 32).is_err());
    }

    #[test]
    fn test_roundtrip_all_integer_schemes() {
        // Every representable value at a few widths survives encode -> decode.
        for scheme in [
            Scheme::Unsigned,
            Scheme::SignedMagnitude,
            Scheme::OnesComplement,
            Scheme::TwosComplement,
        ] {
            for width in [1usize, 2, 5, 8] {
                let (min, max): (i64, i64) = match scheme {
                    Scheme::Unsigned => (0, (1 << width) - 1),
                    Scheme::TwosComplement => (-(1 << (width - 1)), (1 << (width - 1)) - 1),
                    _ => (-((1 << (width - 1)) - 1), (1 << (width - 1)) - 1),
                };
                for value in min..=max {
                    let bits = encode_integer(scheme, value, width).unwrap();
                    assert_eq!(bits.len(), width);
                    assert_eq!(
                        decode_integer(scheme, &bits).unwrap(),
                        value,
                        "{scheme} width {width} value {value}"
                    );
                }
                assert!(encode_integer(scheme, max + 1, width).is_err());
                assert!(encode_integer(scheme, min - 1, width).is_err());
            }
        }
    }

    #[test]
    fn test_encode_width_limits() {
        assert!(matches!(
            encode_integer(Scheme::Unsigned, 0, 0),
            Err(EncodingError::InvalidWidth { width: 0, .. })
        ));
        assert!(matches!(
            encode_integer(Scheme::TwosComplement, 0, 65),
            Err(EncodingError::InvalidWidth { width: 65, .. })
        ));
    }

    #[test]
    fn test_decode_width_limits() {
        let wide = BitString::zeros(65).unwrap();
        assert!(matches!(
            decode_integer(Scheme::Unsigned, &wide),
            Err(EncodingError::MalformedInput { .. })
        ));
        let empty = BitString::zeros(0).unwrap();
        assert!(decode_integer(Scheme::TwosComplement, &empty).is_err());
    }

    #[test]
    fn test_greedy_bits() {
        assert_eq!(greedy_bits(5, 4).unwrap().to_string(), "0101");
        assert_eq!(greedy_bits(u64::MAX, 64).unwrap().count_ones(), 64);
    }
}
