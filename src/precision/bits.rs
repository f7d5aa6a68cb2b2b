//! This module contains the operations that work directly on the bit pattern
//! of an IEEE-754 double.
//!
//! The bit pattern is always obtained through [`f64::to_bits`] and
//! [`f64::from_bits`], so none of these operations rely on reinterpreting
//! memory.

use crate::{
    constant::{DOUBLE_EXPONENT_LENGTH, DOUBLE_MANTISSA_LENGTH},
    precision::Tier,
};

/// Replaces the `count` lowest-order bits of `value` with zeroes.
///
/// NaN and infinite values are returned unchanged, as is `value` when `count`
/// covers the whole 64-bit pattern.
#[must_use]
pub fn clear_low_bits(value: f64, count: u32) -> f64 {
    if value.is_nan() || value.is_infinite() {
        return value;
    }

    match u64::MAX.checked_shl(count) {
        Some(mask) => f64::from_bits(value.to_bits() & mask),
        None => value,
    }
}

/// Truncates the mantissa of `value` to the width retained at `tier`.
#[must_use]
pub fn truncate_to_tier(value: f64, tier: Tier) -> f64 {
    clear_low_bits(value, tier.discarded_bits())
}

/// Checks whether `left` and `right` are equal within the precision given by
/// `tier`.
///
/// Two NaNs are always equal, as are two infinities (of either sign). The
/// relation is symmetric, so a NaN or an infinity is never equal to a finite
/// value, whichever side it appears on. At the full tier the comparison is exact. At every other tier only the mantissas
/// are compared: each is aligned to one bit beyond the width of `tier`, and the
/// two are considered equal if they differ by at most one unit, tolerating the
/// divergence in the last bit that rounding at that width can introduce.
#[must_use]
pub fn equal_within_tier(left: f64, right: f64, tier: Tier) -> bool {
    if left.is_nan() || right.is_nan() {
        return left.is_nan() && right.is_nan();
    }
    if left.is_infinite() || right.is_infinite() {
        return left.is_infinite() && right.is_infinite();
    }
    if tier.is_full() {
        return left == right;
    }

    let shift = DOUBLE_MANTISSA_LENGTH - tier.bits() - 1;
    aligned_mantissa(left, shift).abs_diff(aligned_mantissa(right, shift)) <= 1
}

/// Checks whether `value` survives a round trip through single precision
/// unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Narrowing is the point of the check
pub fn representable_in_single(value: f64) -> bool {
    value == f64::from(value as f32)
}

/// Extracts the mantissa bits of `value` and shifts them right by `shift`.
fn aligned_mantissa(value: f64, shift: u32) -> u64 {
    let strip = DOUBLE_EXPONENT_LENGTH + 1;
    (value.to_bits() << strip >> strip) >> shift
}
