//! Representation schemes, rounding policy and IEEE-754 layouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EncodingError;

/// How a bit string maps to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    /// Plain base-2 magnitude, no sign.
    Unsigned,
    /// Sign bit followed by the magnitude.
    SignedMagnitude,
    /// Negative values are the bitwise inverse of their magnitude.
    OnesComplement,
    /// Negative values are stored as 2^width + value.
    TwosComplement,
    /// IEEE-754 binary floating point with a configurable layout.
    Ieee754,
}

impl Scheme {
    /// All schemes, in menu order.
    pub const ALL: [Scheme; 5] = [
        Scheme::Unsigned,
        Scheme::SignedMagnitude,
        Scheme::OnesComplement,
        Scheme::TwosComplement,
        Scheme::Ieee754,
    ];

    /// Canonical short name.
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Unsigned => "unsigned",
            Scheme::SignedMagnitude => "signed-magnitude",
            Scheme::OnesComplement => "ones-complement",
            Scheme::TwosComplement => "twos-complement",
            Scheme::Ieee754 => "ieee754",
        }
    }

    /// Human-readable label used in menus.
    pub fn label(self) -> &'static str {
        match self {
            Scheme::Unsigned => "Unsigned binary",
            Scheme::SignedMagnitude => "Signed magnitude",
            Scheme::OnesComplement => "One's complement",
            Scheme::TwosComplement => "Two's complement",
            Scheme::Ieee754 => "IEEE-754 floating point",
        }
    }

    /// Whether this scheme decodes to an integer.
    pub fn is_integer(self) -> bool {
        !matches!(self, Scheme::Ieee754)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unsigned" | "u" | "uint" => Ok(Scheme::Unsigned),
            "signed-magnitude" | "sign-magnitude" | "sm" | "magnitude" => {
                Ok(Scheme::SignedMagnitude)
            }
            "ones-complement" | "ones" | "1c" | "1s" => Ok(Scheme::OnesComplement),
            "twos-complement" | "twos" | "2c" | "2s" => Ok(Scheme::TwosComplement),
            "ieee754" | "ieee-754" | "ieee" | "float" | "fp" => Ok(Scheme::Ieee754),
            other => Err(EncodingError::malformed(format!("unknown scheme '{other}'"))),
        }
    }
}

/// Which side a value lands on when it has more precision than the mantissa.
///
/// `RoundUp` and `RoundDown` act on the magnitude: up moves away from zero,
/// down truncates toward zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    #[serde(alias = "up")]
    RoundUp,
    #[serde(alias = "down")]
    RoundDown,
    #[default]
    #[serde(alias = "even")]
    RoundToEven,
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RoundingMode::RoundUp => "round-up",
            RoundingMode::RoundDown => "round-down",
            RoundingMode::RoundToEven => "round-to-even",
        })
    }
}

impl FromStr for RoundingMode {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "round-up" | "roundup" => Ok(RoundingMode::RoundUp),
            "down" | "round-down" | "rounddown" | "truncate" => Ok(RoundingMode::RoundDown),
            "even" | "round-to-even" | "roundtoeven" | "nearest" => Ok(RoundingMode::RoundToEven),
            other => Err(EncodingError::malformed(format!(
                "unknown rounding mode '{other}'"
            ))),
        }
    }
}

/// Bit layout of an IEEE-754 binary format.
///
/// ```text
/// [ sign (1b) | exponent (E bits) | mantissa (M bits) ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FloatLayout {
    exponent_bits: u32,
    mantissa_bits: u32,
}

impl FloatLayout {
    /// binary16.
    pub const HALF: FloatLayout = FloatLayout {
        exponent_bits: 5,
        mantissa_bits: 10,
    };

    /// binary32.
    pub const SINGLE: FloatLayout = FloatLayout {
        exponent_bits: 8,
        mantissa_bits: 23,
    };

    /// binary64.
    pub const DOUBLE: FloatLayout = FloatLayout {
        exponent_bits: 11,
        mantissa_bits: 52,
    };

    pub const MAX_EXPONENT_BITS: u32 = 11;
    pub const MAX_MANTISSA_BITS: u32 = 52;

    /// Create a layout, rejecting widths a double cannot carry.
    pub fn new(exponent_bits: u32, mantissa_bits: u32) -> Result<Self, EncodingError> {
        if !(2..=Self::MAX_EXPONENT_BITS).contains(&exponent_bits)
            || !(1..=Self::MAX_MANTISSA_BITS).contains(&mantissa_bits)
        {
            return Err(EncodingError::InvalidLayout {
                exponent_bits,
                mantissa_bits,
            });
        }
        Ok(Self {
            exponent_bits,
            mantissa_bits,
        })
    }

    pub fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    pub fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    /// Sign + exponent + mantissa.
    pub fn total_bits(&self) -> usize {
        1 + self.exponent_bits as usize + self.mantissa_bits as usize
    }

    /// Exponent bias: 2^(E-1) - 1.
    pub fn bias(&self) -> i32 {
        (1 << (self.exponent_bits - 1)) - 1
    }

    /// The all-ones exponent field reserved for infinity and NaN.
    pub fn exponent_all_ones(&self) -> u64 {
        (1u64 << self.exponent_bits) - 1
    }

    /// Unbiased exponent of the smallest normal number, 1 - bias.
    pub fn min_normal_exponent(&self) -> i32 {
        1 - self.bias()
    }
}

impl Default for FloatLayout {
    fn default() -> Self {
        Self::SINGLE
    }
}

impl fmt::Display for FloatLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1+{}+{}", self.exponent_bits, self.mantissa_bits)
    }
}

/// The dispatcher's "input system" / "output system".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NumberSystem {
    /// Decimal text.
    Decimal,
    /// A bit string under the given scheme.
    Binary(Scheme),
}

impl NumberSystem {
    /// All systems, in menu order.
    pub const ALL: [NumberSystem; 6] = [
        NumberSystem::Decimal,
        NumberSystem::Binary(Scheme::Unsigned),
        NumberSystem::Binary(Scheme::SignedMagnitude),
        NumberSystem::Binary(Scheme::OnesComplement),
        NumberSystem::Binary(Scheme::TwosComplement),
        NumberSystem::Binary(Scheme::Ieee754),
    ];

    pub fn label(self) -> &'static str {
        match self {
            NumberSystem::Decimal => "Decimal",
            NumberSystem::Binary(scheme) => scheme.label(),
        }
    }

    pub fn scheme(self) -> Option<Scheme> {
        match self {
            NumberSystem::Decimal => None,
            NumberSystem::Binary(scheme) => Some(scheme),
        }
    }
}

impl fmt::Display for NumberSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberSystem::Decimal => f.write_str("decimal"),
            NumberSystem::Binary(scheme) => fmt::Display::fmt(scheme, f),
        }
    }
}

impl FromStr for NumberSystem {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decimal" | "dec" | "d" => Ok(NumberSystem::Decimal),
            other => other.parse().map(NumberSystem::Binary),
        }
    }
}

impl TryFrom<String> for NumberSystem {
    type Error = EncodingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NumberSystem> for String {
    fn from(value: NumberSystem) -> Self {
        value.to_string()
    }
}
