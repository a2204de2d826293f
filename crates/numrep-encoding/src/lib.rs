//! Binary number representation engine.
//!
//! Interprets fixed-width bit strings under a representation scheme and
//! produces bit strings from numeric values:
//!
//! - **Integer schemes**: unsigned, signed magnitude, one's complement and
//!   two's complement, for widths 1 through 64
//! - **IEEE-754**: any layout from 1+2+1 up to binary64, with round-up,
//!   round-down and round-to-nearest-even using guard/round/sticky bits
//!
//! # Example
//!
//! ```
//! use numrep_encoding::{codec, BitString, FloatLayout, RoundingMode};
//!
//! let bits: BitString = "11111011".parse().unwrap();
//! assert_eq!(codec::decode_twos_complement(&bits).unwrap(), -5);
//!
//! let single = codec::encode_ieee754(1.5, FloatLayout::SINGLE, RoundingMode::RoundToEven).unwrap();
//! assert_eq!(single.to_string(), "00111111110000000000000000000000");
//! ```

pub mod bits;
pub mod codec;
pub mod convert;
pub mod error;
pub mod numeric;
pub mod scheme;

pub use bits::BitString;
pub use convert::{convert, decode, encode, Conversion, EncodeOptions, DEFAULT_WIDTH};
pub use error::EncodingError;
pub use numeric::Numeric;
pub use scheme::{FloatLayout, NumberSystem, RoundingMode, Scheme};

/// Result type for encoding operations.
pub type Result<T> = std::result::Result<T, EncodingError>;
