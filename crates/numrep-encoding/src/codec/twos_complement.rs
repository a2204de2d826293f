//! Two's-complement integers.

use super::{check_encode_width, decode_width, greedy_bits, pow2};
use crate::bits::BitString;
use crate::error::EncodingError;
use crate::scheme::Scheme;
use crate::Result;

/// Decode a two's-complement string: the unsigned value, minus 2^width when
/// the leading bit is set.
pub fn decode_twos_complement(bits: &BitString) -> Result<i64> {
    let width = decode_width(bits)?;
    let unsigned = bits.field(0..width);
    if !bits[0] {
        return Ok(unsigned as i64);
    }
    // In range for every width up to 64: the result is >= -2^(width-1).
    Ok((i128::from(unsigned) - pow2(width) as i128) as i64)
}

/// Encode `value` in `width` bits of two's complement.
///
/// # Errors
/// `InvalidWidth` outside 1..=64; `Unrepresentable` outside
/// `-2^(width-1) ..= 2^(width-1) - 1`.
pub fn encode_twos_complement(value: i64, width: usize) -> Result<BitString> {
    check_encode_width(width)?;
    let half = pow2(width - 1) as i128;
    let wide = i128::from(value);
    if wide < -half || wide >= half {
        return Err(EncodingError::unrepresentable(
            value,
            Scheme::TwosComplement,
            width,
        ));
    }
    let pattern = if value >= 0 {
        value as u64
    } else {
        (pow2(width) as i128 + wide) as u64
    };
    greedy_bits(pattern, width)
}
