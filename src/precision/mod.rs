//! This module contains the bit-level utilities that decide whether a value
//! computed at reduced precision is good enough to stand in for its
//! double-precision counterpart.
//!
//! # Working Width
//!
//! All analysis values are held as [`f64`] regardless of the tier they
//! represent. Reduced tiers are modelled by clearing the low-order mantissa
//! bits of a double rather than by computing in a narrower physical type, so
//! the analysis never compounds rounding error of its own on top of the error
//! it is measuring.

pub mod bits;
pub mod eval;

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use self::{
    bits::{clear_low_bits, equal_within_tier, representable_in_single, truncate_to_tier},
    eval::{eval_binary, eval_math, BinaryOperator, MathFunction},
};
use crate::constant::{
    DOUBLE_MANTISSA_LENGTH,
    TIER_19_BITS,
    TIER_27_BITS,
    TIER_DOUBLE_BITS,
    TIER_FLOAT_BITS,
};

/// A mantissa width at which the analysis tries to reproduce a result.
///
/// # Search Order
///
/// The variants are declared in the order in which the engine tries them, and
/// both iteration and pruning in the engine follow this declaration order
/// rather than the numeric width. Note that this order is _not_ monotonic in
/// width: [`Tier::Bits19`] is narrower than [`Tier::Float`] which precedes it.
/// The derived [`Ord`] is the search order.
#[derive(
    Copy, Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    /// 23 mantissa bits, the width of an IEEE-754 float. This is the minimal
    /// tier.
    Float,

    /// 19 mantissa bits.
    Bits19,

    /// 27 mantissa bits.
    Bits27,

    /// 52 mantissa bits, the width of an IEEE-754 double.
    Double,
}

impl Tier {
    /// All tiers in search order.
    pub const SEARCH_ORDER: [Tier; 4] = [Tier::Float, Tier::Bits19, Tier::Bits27, Tier::Double];

    /// The tier at which a value is assumed to be free to compute.
    pub const MINIMAL: Tier = Tier::Float;

    /// Gets the number of mantissa bits retained at this tier.
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Tier::Float => TIER_FLOAT_BITS,
            Tier::Bits19 => TIER_19_BITS,
            Tier::Bits27 => TIER_27_BITS,
            Tier::Double => TIER_DOUBLE_BITS,
        }
    }

    /// Gets the number of low-order mantissa bits of a double that are
    /// discarded at this tier.
    #[must_use]
    pub fn discarded_bits(self) -> u32 {
        DOUBLE_MANTISSA_LENGTH - self.bits()
    }

    /// Gets the position of this tier in the search order.
    #[must_use]
    pub fn position(self) -> usize {
        self as usize
    }

    /// Checks if this is the minimal tier.
    #[must_use]
    pub fn is_minimal(self) -> bool {
        self == Self::MINIMAL
    }

    /// Checks if this is the full double-precision tier.
    #[must_use]
    pub fn is_full(self) -> bool {
        self == Tier::Double
    }
}

/// Displays the tier as its mantissa width.
impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod test {
    use crate::precision::Tier;

    #[test]
    fn search_order_is_declaration_order_not_width() {
        let widths: Vec<u32> = Tier::SEARCH_ORDER.iter().map(|t| t.bits()).collect();
        assert_eq!(widths, vec![23, 19, 27, 52]);
        assert!(Tier::Float < Tier::Bits19);
        assert!(Tier::Bits19.bits() < Tier::Float.bits());
    }

    #[test]
    fn positions_follow_search_order() {
        for (i, tier) in Tier::SEARCH_ORDER.iter().enumerate() {
            assert_eq!(tier.position(), i);
        }
    }

    #[test]
    fn discards_the_difference_from_a_double_mantissa() {
        assert_eq!(Tier::Float.discarded_bits(), 29);
        assert_eq!(Tier::Double.discarded_bits(), 0);
    }
}
