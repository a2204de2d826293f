//! Fixed-width binary digit strings.
//!
//! A [`BitString`] is the unit every decoder consumes and every encoder
//! produces: an ordered run of binary digits, most significant first. The
//! width is the length of the string; there is no separate width field.
//!
//! Strings are built in one pass from an index function
//! ([`BitString::from_fn`]) so encoders never allocate and then patch.

use std::fmt;
use std::ops::{Index, Range};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;
use crate::Result;

/// An ordered sequence of binary digits, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Build a string of `width` bits where bit `i` is `f(i)`.
    ///
    /// # Errors
    /// Returns `EncodingError::ResourceExhausted` if storage for `width`
    /// bits cannot be reserved.
    pub fn from_fn(width: usize, f: impl FnMut(usize) -> bool) -> Result<Self> {
        let mut bits = Vec::new();
        bits.try_reserve_exact(width)
            .map_err(|_| EncodingError::ResourceExhausted { bits: width })?;
        bits.extend((0..width).map(f));
        Ok(Self { bits })
    }

    /// Build a string from an iterator of bits.
    pub fn from_bits(iter: impl IntoIterator<Item = bool>) -> Result<Self> {
        let iter = iter.into_iter();
        let mut bits = Vec::new();
        let hint = iter.size_hint().0;
        bits.try_reserve_exact(hint)
            .map_err(|_| EncodingError::ResourceExhausted { bits: hint })?;
        bits.extend(iter);
        Ok(Self { bits })
    }

    /// `width` zero bits.
    pub fn zeros(width: usize) -> Result<Self> {
        Self::from_fn(width, |_| false)
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at position `i` (0 is the most significant).
    pub fn bit(&self, i: usize) -> bool {
        self.bits[i]
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = bool> + ExactSizeIterator + '_ {
        self.bits.iter().copied()
    }

    /// Unsigned value of the bits in `range`, read MSB first.
    ///
    /// The range must be at most 64 bits wide.
    pub fn field(&self, range: Range<usize>) -> u64 {
        debug_assert!(range.len() <= 64);
        self.bits[range]
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    /// A new string with every bit flipped.
    pub fn inverted(&self) -> Result<Self> {
        Self::from_fn(self.len(), |i| !self.bits[i])
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }
}

/// Bit `i` (MSB first) of the low `width` bits of `value`.
pub(crate) fn uint_bit(value: u64, width: u32, i: usize) -> bool {
    (value >> (width as usize - 1 - i)) & 1 == 1
}

impl Index<usize> for BitString {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        &self.bits[index]
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitString {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(EncodingError::malformed("bit string is empty"));
        }
        if let Some((pos, ch)) = s.char_indices().find(|&(_, c)| c != '0' && c != '1') {
            return Err(EncodingError::malformed(format!(
                "invalid character '{ch}' at position {pos}: only '0' and '1' are allowed"
            )));
        }
        Self::from_bits(s.bytes().map(|b| b == b'1'))
    }
}

impl TryFrom<String> for BitString {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl TryFrom<&str> for BitString {
    type Error = EncodingError;

    fn try_from(value: &str) -> Result<Self> {
        value.parse()
    }
}

impl From<BitString> for String {
    fn from(value: BitString) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let bits: BitString = "0101".parse().unwrap();
        assert_eq!(bits.len(), 4);
        assert!(!bits.bit(0));
        assert!(bits[1]);
        assert_eq!(bits.to_string(), "0101");
    }

    #[test]
    fn test_parse_rejects_non_binary() {
        let err = "0121".parse::<BitString>().unwrap_err();
        assert!(matches!(err, EncodingError::MalformedInput { .. }));
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!("".parse::<BitString>().is_err());
        assert!("   ".parse::<BitString>().is_err());
    }

    #[test]
    fn test_from_fn() {
        let bits = BitString::from_fn(6, |i| i % 2 == 0).unwrap();
        assert_eq!(bits.to_string(), "101010");
    }

    #[test]
    fn test_field() {
        let bits: BitString = "1011000001".parse().unwrap();
        assert_eq!(bits.field(0..4), 0b1011);
        assert_eq!(bits.field(4..10), 0b000001);
        assert_eq!(bits.field(4..9), 0);
    }

    #[test]
    fn test_inverted() {
        let bits: BitString = "1100".parse().unwrap();
        assert_eq!(bits.inverted().unwrap().to_string(), "0011");
        assert_eq!(bits.count_ones(), 2);
    }

    #[test]
    fn test_uint_bit() {
        let bits: Vec<bool> = (0..4).map(|i| uint_bit(0b0110, 4, i)).collect();
        assert_eq!(bits, vec![false, true, true, false]);
    }

    #[test]
    fn test_serde_as_string() {
        let bits: BitString = "1001".parse().unwrap();
        assert_eq!(serde_json::to_string(&bits).unwrap(), "\"1001\"");
        let back: BitString = serde_json::from_str("\"1001\"").unwrap();
        assert_eq!(back, bits);
        assert!(serde_json::from_str::<BitString>("\"10x1\"").is_err());
    }
}
