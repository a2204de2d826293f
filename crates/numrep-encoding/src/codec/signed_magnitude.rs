//! Signed-magnitude integers: a sign bit followed by the magnitude.

use std::iter;

use super::{check_encode_width, decode_width, greedy_bits, pow2};
use crate::bits::BitString;
use crate::error::EncodingError;
use crate::scheme::Scheme;
use crate::Result;

/// Decode a signed-magnitude string. Bit 0 is the sign (1 = negative).
///
/// Both `0…0` and `10…0` decode to zero.
pub fn decode_signed_magnitude(bits: &BitString) -> Result<i64> {
    let width = decode_width(bits)?;
    // At most 63 magnitude bits, so the cast cannot overflow.
    let magnitude = bits.field(1..width) as i64;
    Ok(if bits[0] { -magnitude } else { magnitude })
}

/// Encode `value` as a sign bit plus `width - 1` magnitude bits.
///
/// # Errors
/// `InvalidWidth` outside 1..=64; `Unrepresentable` if
/// `|value| >= 2^(width-1)`.
pub fn encode_signed_magnitude(value: i64, width: usize) -> Result<BitString> {
    check_encode_width(width)?;
    let magnitude = value.unsigned_abs();
    if u128::from(magnitude) >= pow2(width - 1) {
        return Err(EncodingError::unrepresentable(
            value,
            Scheme::SignedMagnitude,
            width,
        ));
    }
    let tail = greedy_bits(magnitude, width - 1)?;
    BitString::from_bits(iter::once(value < 0).chain(tail.iter()))
}
