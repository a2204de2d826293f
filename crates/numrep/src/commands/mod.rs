//! CLI command implementations.

pub mod config;
pub mod convert;
pub mod interactive;

use clap::Args;
use numrep_encoding::RoundingMode;

use crate::config::Config;

/// Encoding flags shared by every command; they override the loaded
/// configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct EncodingArgs {
    /// Integer output width in bits (1-64)
    #[arg(short, long, value_name = "BITS")]
    pub width: Option<usize>,

    /// IEEE-754 exponent field width
    #[arg(long, value_name = "BITS")]
    pub exponent_bits: Option<u32>,

    /// IEEE-754 mantissa field width
    #[arg(long, value_name = "BITS")]
    pub mantissa_bits: Option<u32>,

    /// IEEE-754 rounding mode (up, down, even)
    #[arg(short, long, value_name = "MODE")]
    pub rounding: Option<RoundingMode>,
}

impl EncodingArgs {
    /// Apply the flags that were given on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.integer.default_width = width;
        }
        if let Some(bits) = self.exponent_bits {
            config.float.exponent_bits = bits;
        }
        if let Some(bits) = self.mantissa_bits {
            config.float.mantissa_bits = bits;
        }
        if let Some(mode) = self.rounding {
            config.float.rounding = mode;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_overrides_only_given_flags() {
        let mut config = Config::default();
        let args = EncodingArgs {
            width: Some(16),
            rounding: Some(RoundingMode::RoundUp),
            ..Default::default()
        };
        args.apply(&mut config);
        assert_eq!(config.integer.default_width, 16);
        assert_eq!(config.float.rounding, RoundingMode::RoundUp);
        assert_eq!(config.float.exponent_bits, 8);
        assert_eq!(config.float.mantissa_bits, 23);
    }
}
