//! One's-complement integers.
//!
//! A negative value is the bitwise inverse of its magnitude. The pattern of
//! all ones is "negative zero"; it decodes to `0` since `i64` has no signed
//! zero.

use super::{check_encode_width, decode_width, greedy_bits, pow2};
use crate::bits::BitString;
use crate::error::EncodingError;
use crate::scheme::Scheme;
use crate::Result;

/// Decode a one's-complement string.
pub fn decode_ones_complement(bits: &BitString) -> Result<i64> {
    let width = decode_width(bits)?;
    if !bits[0] {
        return Ok(bits.field(1..width) as i64);
    }

    let inverted = bits.inverted()?;
    let magnitude = inverted.field(1..width) as i64;
    if magnitude == 0 {
        tracing::debug!("one's complement negative zero {bits} decoded as 0");
    }
    Ok(-magnitude)
}

/// Encode `value` as a `width`-bit one's-complement string.
///
/// # Errors
/// `InvalidWidth` outside 1..=64; `Unrepresentable` if
/// `|value| >= 2^(width-1)`.
pub fn encode_ones_complement(value: i64, width: usize) -> Result<BitString> {
    check_encode_width(width)?;
    let magnitude = value.unsigned_abs();
    if u128::from(magnitude) >= pow2(width - 1) {
        return Err(EncodingError::unrepresentable(
            value,
            Scheme::OnesComplement,
            width,
        ));
    }
    let bits = greedy_bits(magnitude, width)?;
    if value < 0 {
        bits.inverted()
    } else {
        Ok(bits)
    }
}
