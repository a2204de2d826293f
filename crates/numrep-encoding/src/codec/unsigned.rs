//! Unsigned binary integers.

use super::{check_encode_width, decode_width, greedy_bits, pow2};
use crate::bits::BitString;
use crate::error::EncodingError;
use crate::scheme::Scheme;
use crate::Result;

/// Decode an unsigned bit string: Σ bit[i] · 2^(width-1-i).
///
/// # Errors
/// `MalformedInput` for an empty or over-wide string; `Unrepresentable` for a
/// 64-bit pattern above `i64::MAX`.
pub fn decode_unsigned(bits: &BitString) -> Result<i64> {
    let width = decode_width(bits)?;
    let sum = bits
        .iter()
        .enumerate()
        .filter(|&(_, bit)| bit)
        .fold(0u64, |sum, (i, _)| sum + (1u64 << (width - 1 - i)));
    i64::try_from(sum).map_err(|_| EncodingError::unrepresentable(sum, Scheme::Unsigned, width))
}

/// Encode `value` as an unsigned binary string of exactly `width` bits.
///
/// # Errors
/// `InvalidWidth` outside 1..=64; `Unrepresentable` if `value < 0` or
/// `value >= 2^width`.
pub fn encode_unsigned(value: i64, width: usize) -> Result<BitString> {
    check_encode_width(width)?;
    if value < 0 || value as u128 >= pow2(width) {
        return Err(EncodingError::unrepresentable(value, Scheme::Unsigned, width));
    }
    greedy_bits(value as u64, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn test_decode_unsigned() {
        assert_eq!(decode_unsigned(&bits("0")).unwrap(), 0);
        assert_eq!(decode_unsigned(&bits("1")).unwrap(), 1);
        assert_eq!(decode_unsigned(&bits("1010")).unwrap(), 10);
        assert_eq!(decode_unsigned(&bits("11111111")).unwrap(), 255);
    }

    #[test]
    fn test_decode_unsigned_leading_zeros() {
        assert_eq!(decode_unsigned(&bits("00000101")).unwrap(), 5);
    }

    #[test]
    fn test_decode_unsigned_64_bit_overflow() {
        let max = BitString::from_fn(64, |_| true).unwrap();
        assert!(matches!(
            decode_unsigned(&max),
            Err(EncodingError::Unrepresentable { .. })
        ));
        let below = BitString::from_fn(64, |i| i != 0).unwrap();
        assert_eq!(decode_unsigned(&below).unwrap(), i64::MAX);
    }

    #[test]
    fn test_encode_unsigned_boundary() {
        // 255 is the largest 8-bit unsigned value; 256 needs a ninth bit.
        assert_eq!(encode_unsigned(255, 8).unwrap().to_string(), "11111111");
        assert!(matches!(
            encode_unsigned(256, 8),
            Err(EncodingError::Unrepresentable { width: 8, .. })
        ));
    }

    #[test]
    fn test_encode_unsigned_rejects_negative() {
        assert!(matches!(
            encode_unsigned(-1, 8),
            Err(EncodingError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_encode_unsigned_pads_to_width() {
        assert_eq!(encode_unsigned(5, 8).unwrap().to_string(), "00000101");
        assert_eq!(encode_unsigned(0, 3).unwrap().to_string(), "000");
    }

    #[test]
    fn test_encode_unsigned_full_width() {
        let encoded = encode_unsigned(i64::MAX, 64).unwrap();
        assert_eq!(encoded.len(), 64);
        assert!(!encoded.bit(0));
        assert_eq!(encoded.count_ones(), 63);
        assert_eq!(encode_unsigned(i64::MAX, 63).unwrap().count_ones(), 63);
        assert!(encode_unsigned(i64::MAX, 62).is_err());
    }
}
