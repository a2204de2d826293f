//! The tagged numeric value passed between decode and encode stages.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EncodingError;
use crate::Result;

/// A decoded number: integer schemes produce `Integer`, IEEE-754 and
/// fractional decimal text produce `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Numeric {
    Integer(i64),
    Float(#[serde(with = "float_text")] f64),
}

/// JSON has no infinity or NaN, so those travel as `"inf"`, `"-inf"` and
/// `"NaN"`. Finite values stay numbers.
mod float_text {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_sign_negative() {
            serializer.serialize_str("-inf")
        } else {
            serializer.serialize_str("inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        match Repr::deserialize(de)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => text
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("'{text}' is not a float"))),
        }
    }
}

impl Numeric {
    /// Parse decimal text.
    ///
    /// Integer literals that fit in an `i64` are kept exact as `Integer`;
    /// everything else (fractions, exponents, `inf`, `nan`, huge integers)
    /// becomes `Float`.
    pub fn parse_decimal(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EncodingError::malformed("decimal input is empty"));
        }

        if let Ok(decimal) = text.parse::<Decimal>() {
            if decimal.scale() == 0 {
                if let Some(value) = decimal.to_i64() {
                    return Ok(Numeric::Integer(value));
                }
            }
        }

        text.parse::<f64>()
            .map(Numeric::Float)
            .map_err(|_| EncodingError::malformed(format!("'{text}' is not a decimal number")))
    }

    /// Widen to `f64`. Integers beyond 2^53 round to the nearest double.
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Integer(value) => value as f64,
            Numeric::Float(value) => value,
        }
    }

    /// Narrow to `i64`. Floats must be finite, integral and in range.
    pub fn to_i64(self) -> Option<i64> {
        match self {
            Numeric::Integer(value) => Some(value),
            Numeric::Float(value) => {
                // 2^63 is exactly representable; anything at or above it overflows.
                let limit = 9_223_372_036_854_775_808.0_f64;
                if value.is_finite() && value.fract() == 0.0 && value >= -limit && value < limit {
                    Some(value as i64)
                } else {
                    None
                }
            }
        }
    }
}

impl From<i64> for Numeric {
    fn from(value: i64) -> Self {
        Numeric::Integer(value)
    }
}

impl From<f64> for Numeric {
    fn from(value: f64) -> Self {
        Numeric::Float(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Numeric::Integer(value) => write!(f, "{value}"),
            Numeric::Float(value) => {
                let magnitude = value.abs();
                if value.is_finite() && magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
                    write!(f, "{value:e}")
                } else {
                    write!(f, "{value}")
                }
            }
        }
    }
}
