//! Scheme-tagged decode/encode and the text-to-text conversion pipeline.
//!
//! ```text
//! input text ──parse──▶ BitString ──decode──▶ Numeric ──encode──▶ BitString
//!            └──────── decimal text ─────────▶ Numeric ──format──▶ decimal text
//! ```

use serde::Serialize;

use crate::bits::BitString;
use crate::codec::{decode_ieee754, decode_integer, encode_ieee754, encode_integer};
use crate::error::EncodingError;
use crate::numeric::Numeric;
use crate::scheme::{FloatLayout, NumberSystem, RoundingMode, Scheme};
use crate::Result;

/// Integer width used when none is given.
pub const DEFAULT_WIDTH: usize = 8;

/// Target parameters for an encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeOptions {
    /// Bit width for integer schemes.
    pub width: usize,
    /// Layout for IEEE-754, also used when decoding IEEE-754 input.
    pub layout: FloatLayout,
    /// Rounding applied by the IEEE-754 encoder.
    pub rounding: RoundingMode,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            layout: FloatLayout::SINGLE,
            rounding: RoundingMode::RoundToEven,
        }
    }
}

impl EncodeOptions {
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_layout(mut self, layout: FloatLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }
}

/// Decode `bits` under `scheme`. Integer schemes yield [`Numeric::Integer`],
/// IEEE-754 yields [`Numeric::Float`] using `layout`.
pub fn decode(scheme: Scheme, bits: &BitString, layout: FloatLayout) -> Result<Numeric> {
    let value = match scheme {
        Scheme::Ieee754 => Numeric::Float(decode_ieee754(bits, layout)?),
        integer => Numeric::Integer(decode_integer(integer, bits)?),
    };
    tracing::debug!(%scheme, width = bits.len(), %bits, %value, "decoded");
    Ok(value)
}

/// Encode `value` under `scheme`.
///
/// Integer schemes narrow a `Float` operand first and fail with
/// `Unrepresentable` if it is not a whole number in `i64` range. IEEE-754
/// widens an `Integer` operand to `f64` first; beyond 2^53 that widening
/// already rounds to the nearest double, ties to even, before `rounding`
/// applies.
pub fn encode(scheme: Scheme, value: Numeric, options: &EncodeOptions) -> Result<BitString> {
    let bits = match scheme {
        Scheme::Ieee754 => encode_ieee754(value.as_f64(), options.layout, options.rounding)?,
        integer => {
            let narrowed = value
                .to_i64()
                .ok_or_else(|| EncodingError::unrepresentable(value, integer, options.width))?;
            encode_integer(integer, narrowed, options.width)?
        }
    };
    tracing::debug!(%scheme, width = bits.len(), %value, %bits, "encoded");
    Ok(bits)
}

/// The record of one conversion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub input: String,
    pub from: NumberSystem,
    pub to: NumberSystem,
    pub value: Numeric,
    pub output: String,
}

/// Convert `input` written in `from` into the `to` system.
///
/// # Errors
/// `MalformedInput` if `input` is not valid in `from`, plus anything the
/// decoder or encoder reports.
///
/// # Example
///
/// ```
/// use numrep_encoding::{convert, EncodeOptions, NumberSystem, Scheme};
///
/// let conversion = convert(
///     "-5",
///     NumberSystem::Decimal,
///     NumberSystem::Binary(Scheme::TwosComplement),
///     &EncodeOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(conversion.output, "11111011");
/// ```
pub fn convert(
    input: &str,
    from: NumberSystem,
    to: NumberSystem,
    options: &EncodeOptions,
) -> Result<Conversion> {
    let input = input.trim();
    let value = match from {
        NumberSystem::Decimal => Numeric::parse_decimal(input)?,
        NumberSystem::Binary(scheme) => decode(scheme, &input.parse::<BitString>()?, options.layout)?,
    };

    let output = match to {
        NumberSystem::Decimal => value.to_string(),
        NumberSystem::Binary(scheme) => encode(scheme, value, options)?.to_string(),
    };

    tracing::debug!(input, %from, %to, output = %output, "converted");
    Ok(Conversion {
        input: input.to_string(),
        from,
        to,
        value,
        output,
    })
}
