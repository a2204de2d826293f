//! Guard/round/sticky rounding of a truncated mantissa.
//!
//! Encoders scale the significand so that three bits land beyond the target
//! mantissa width, then floor:
//!
//! ```text
//! [ mantissa candidate (M bits) | guard | round | sticky ]
//! ```
//!
//! Only these three bits take part in rounding; anything the floor dropped
//! below them is ignored.

use crate::scheme::RoundingMode;

/// Number of bits kept beyond the mantissa for rounding.
pub const EXTRA_BITS: u32 = 3;

/// The three bits beyond the mantissa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuardBits {
    pub guard: bool,
    pub round: bool,
    pub sticky: bool,
}

impl GuardBits {
    /// Split the low three bits of `remainder`.
    pub fn from_remainder(remainder: u64) -> Self {
        Self {
            guard: remainder & 0b100 != 0,
            round: remainder & 0b010 != 0,
            sticky: remainder & 0b001 != 0,
        }
    }

    /// Any extra precision at all.
    pub fn any(self) -> bool {
        self.guard || self.round || self.sticky
    }

    /// Exactly halfway between two representable mantissas.
    pub fn is_tie(self) -> bool {
        self.guard && !self.round && !self.sticky
    }
}

/// Whether `candidate` must be incremented under `mode`.
pub fn should_increment(candidate: u64, extra: GuardBits, mode: RoundingMode) -> bool {
    match mode {
        RoundingMode::RoundUp => extra.any(),
        RoundingMode::RoundDown => false,
        // Ties go to the even neighbour.
        RoundingMode::RoundToEven if extra.is_tie() => candidate & 1 == 1,
        RoundingMode::RoundToEven => extra.guard,
    }
}

/// Apply `mode` to `candidate`. The result may equal 2^M; the caller
/// carries that into the exponent.
pub fn round_mantissa(candidate: u64, extra: GuardBits, mode: RoundingMode) -> u64 {
    let increment = should_increment(candidate, extra, mode);
    tracing::trace!(
        candidate,
        guard = extra.guard,
        round = extra.round,
        sticky = extra.sticky,
        %mode,
        increment,
        "rounding mantissa"
    );
    candidate + u64::from(increment)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXACT: GuardBits = GuardBits {
        guard: false,
        round: false,
        sticky: false,
    };

    #[test]
    fn test_from_remainder() {
        let bits = GuardBits::from_remainder(0b101);
        assert!(bits.guard && !bits.round && bits.sticky);
        assert!(!bits.is_tie());
        assert!(GuardBits::from_remainder(0b100).is_tie());
        assert_eq!(GuardBits::from_remainder(0), EXACT);
    }

    #[test]
    fn test_exact_never_increments() {
        for mode in [
            RoundingMode::RoundUp,
            RoundingMode::RoundDown,
            RoundingMode::RoundToEven,
        ] {
            assert_eq!(round_mantissa(7, EXACT, mode), 7);
        }
    }

    #[test]
    fn test_round_up_on_any_extra_bit() {
        let sticky_only = GuardBits::from_remainder(0b001);
        assert_eq!(round_mantissa(4, sticky_only, RoundingMode::RoundUp), 5);
    }

    #[test]
    fn test_round_down_truncates() {
        let all = GuardBits::from_remainder(0b111);
        assert_eq!(round_mantissa(4, all, RoundingMode::RoundDown), 4);
    }

    #[test]
    fn test_round_to_even_below_half() {
        let below = GuardBits::from_remainder(0b011);
        assert_eq!(round_mantissa(5, below, RoundingMode::RoundToEven), 5);
    }

    #[test]
    fn test_round_to_even_above_half() {
        let above = GuardBits::from_remainder(0b110);
        assert_eq!(round_mantissa(4, above, RoundingMode::RoundToEven), 5);
        let above_sticky = GuardBits::from_remainder(0b101);
        assert_eq!(round_mantissa(4, above_sticky, RoundingMode::RoundToEven), 5);
    }

    #[test]
    fn test_round_to_even_ties() {
        let tie = GuardBits::from_remainder(0b100);
        // Even candidate stays, odd candidate moves up to the next even.
        assert_eq!(round_mantissa(4, tie, RoundingMode::RoundToEven), 4);
        assert_eq!(round_mantissa(5, tie, RoundingMode::RoundToEven), 6);
    }
}
