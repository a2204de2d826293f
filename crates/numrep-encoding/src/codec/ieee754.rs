//! IEEE-754 binary floating point with a parametric layout.
//!
//! ```text
//! [ S | exponent field (E bits) | mantissa (M bits) ]
//! ```
//!
//! | Exponent field | Mantissa | Meaning |
//! |----------------|----------|---------|
//! | all ones | zero | ±infinity |
//! | all ones | nonzero | NaN |
//! | zero | any | denormal: 0.mantissa × 2^(1-bias) |
//! | otherwise | any | normal: 1.mantissa × 2^(field-bias) |
//!
//! Values are carried as `f64`, so the widest supported layout is binary64.

use super::rounding::{round_mantissa, GuardBits, EXTRA_BITS};
use crate::bits::{uint_bit, BitString};
use crate::error::EncodingError;
use crate::scheme::{FloatLayout, RoundingMode};
use crate::Result;

/// 2^exp, exact for `-1022..=1023`.
fn exact_pow2(exp: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&exp));
    f64::from_bits(((exp + 1023) as u64) << 52)
}

/// `x · 2^exp` in power-of-two steps, so no intermediate overflows.
fn scale_by_pow2(mut x: f64, mut exp: i32) -> f64 {
    while exp > 1023 {
        x *= exact_pow2(1023);
        exp -= 1023;
    }
    while exp < -1022 {
        x *= exact_pow2(-1022);
        exp += 1022;
    }
    x * exact_pow2(exp)
}

/// Decode an IEEE-754 bit string laid out as `layout`.
///
/// # Errors
/// `MalformedInput` if the string is not exactly `layout.total_bits()` long;
/// `SpecialValue` for a NaN pattern.
pub fn decode_ieee754(bits: &BitString, layout: FloatLayout) -> Result<f64> {
    let total = layout.total_bits();
    if bits.len() != total {
        return Err(EncodingError::malformed(format!(
            "IEEE-754 {layout} needs exactly {total} bits, got {}",
            bits.len()
        )));
    }

    let exponent_bits = layout.exponent_bits() as usize;
    let mantissa_bits = layout.mantissa_bits() as i32;
    let negative = bits[0];
    let exponent = bits.field(1..1 + exponent_bits);
    let mantissa = bits.field(1 + exponent_bits..total);
    // Σ bit · 2^-position, exact because the mantissa has at most 52 bits.
    let fraction = mantissa as f64 * exact_pow2(-mantissa_bits);

    if exponent == layout.exponent_all_ones() {
        if mantissa != 0 {
            return Err(EncodingError::SpecialValue {
                pattern: bits.to_string(),
            });
        }
        return Ok(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let (significand, unbiased) = if exponent == 0 {
        (fraction, layout.min_normal_exponent())
    } else {
        (1.0 + fraction, exponent as i32 - layout.bias())
    };
    let magnitude = scale_by_pow2(significand, unbiased);
    Ok(if negative { -magnitude } else { magnitude })
}

/// Encode `value` in `layout`, rounding extra precision with `mode`.
///
/// NaN encodes as a quiet NaN with sign 0, infinities and zeros keep their
/// sign, and anything at or beyond 2^(bias+1) after rounding becomes
/// infinity whatever the rounding mode. Rounding sees only the three bits
/// below the mantissa; anything smaller is truncated first.
pub fn encode_ieee754(value: f64, layout: FloatLayout, mode: RoundingMode) -> Result<BitString> {
    let all_ones = layout.exponent_all_ones();
    let mantissa_bits = layout.mantissa_bits();

    if value.is_nan() {
        return assemble(layout, false, all_ones, 1 << (mantissa_bits - 1));
    }
    if value.is_infinite() {
        return infinity(layout, value < 0.0);
    }
    if value == 0.0 {
        return assemble(layout, value.is_sign_negative(), 0, 0);
    }

    let negative = value < 0.0;
    let magnitude = value.abs();
    let precision = mantissa_bits as i32 + EXTRA_BITS as i32;
    let smallest_normal = scale_by_pow2(1.0, layout.min_normal_exponent());

    let (exponent_field, scaled) = if magnitude < smallest_normal {
        // Denormal: magnitude / 2^(1-bias) lies in [0, 1).
        (0, scale_by_pow2(magnitude, layout.bias() - 1 + precision))
    } else {
        let (normalized, exponent) = normalize(magnitude);
        let field = i64::from(exponent) + i64::from(layout.bias());
        if field >= all_ones as i64 {
            tracing::debug!("{value} overflows IEEE-754 {layout}; encoding infinity");
            return infinity(layout, negative);
        }
        (field as u64, scale_by_pow2(normalized - 1.0, precision))
    };

    let full = scaled.floor() as u64;
    let candidate = full >> EXTRA_BITS;
    let extra = GuardBits::from_remainder(full & ((1 << EXTRA_BITS) - 1));

    let mut mantissa = round_mantissa(candidate, extra, mode);
    let mut exponent_field = exponent_field;
    if mantissa >= 1 << mantissa_bits {
        // Rounding carried out of the mantissa.
        mantissa = 0;
        exponent_field += 1;
        if exponent_field >= all_ones {
            tracing::debug!("{value} rounds past the largest IEEE-754 {layout}; encoding infinity");
            return infinity(layout, negative);
        }
    }

    assemble(layout, negative, exponent_field, mantissa)
}

/// Scale `magnitude` into [1, 2) by repeated halving or doubling.
fn normalize(magnitude: f64) -> (f64, i32) {
    let mut normalized = magnitude;
    let mut exponent = 0;
    while normalized >= 2.0 {
        normalized /= 2.0;
        exponent += 1;
    }
    while normalized < 1.0 {
        normalized *= 2.0;
        exponent -= 1;
    }
    (normalized, exponent)
}

fn infinity(layout: FloatLayout, negative: bool) -> Result<BitString> {
    assemble(layout, negative, layout.exponent_all_ones(), 0)
}

fn assemble(layout: FloatLayout, negative: bool, exponent: u64, mantissa: u64) -> Result<BitString> {
    let exponent_bits = layout.exponent_bits();
    let mantissa_start = 1 + exponent_bits as usize;
    BitString::from_fn(layout.total_bits(), |i| match i {
        0 => negative,
        i if i < mantissa_start => uint_bit(exponent, exponent_bits, i - 1),
        i => uint_bit(mantissa, layout.mantissa_bits(), i - mantissa_start),
    })
}
