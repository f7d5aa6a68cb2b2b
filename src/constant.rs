//! This module contains constants that are needed throughout the codebase.

/// The number of bits used to store the exponent of an IEEE-754 double.
pub const DOUBLE_EXPONENT_LENGTH: u32 = 11;

/// The number of explicitly-stored mantissa bits of an IEEE-754 double.
pub const DOUBLE_MANTISSA_LENGTH: u32 = 52;

/// The mantissa width of the single-precision tier, matching an IEEE-754
/// float.
pub const TIER_FLOAT_BITS: u32 = 23;

/// The mantissa width of the narrow intermediate tier.
pub const TIER_19_BITS: u32 = 19;

/// The mantissa width of the wide intermediate tier.
pub const TIER_27_BITS: u32 = 27;

/// The mantissa width of the full double-precision tier.
pub const TIER_DOUBLE_BITS: u32 = DOUBLE_MANTISSA_LENGTH;

/// The number of bytes of raw storage behind every shadow value.
///
/// Values whose kind is wider than this (the x87 extended float) only keep
/// their low-order bytes.
pub const RAW_VALUE_BYTES: usize = 8;

/// The width of a pointer in the monitored program in bytes.
pub const POINTER_SIZE_BYTES: usize = 8;

/// The in-memory width of an x87 extended-precision float in bytes.
pub const EXTENDED_FLOAT_SIZE_BYTES: usize = 10;

/// The number of records making up the trace of a binary arithmetic
/// instruction: the result and its two operands.
pub const BINARY_RECORD_COUNT: usize = 3;

/// The number of records making up the trace of a math library call: the
/// result and its single argument.
pub const CALL_RECORD_COUNT: usize = 2;

/// The default upper bound on the number of nodes the blame graph may grow to
/// before construction is aborted.
pub const DEFAULT_MAXIMUM_GRAPH_NODES: usize = 1_000_000;

/// Whether the engine checks by default that result values are already
/// truncated to the tier being analysed.
pub const DEFAULT_CHECK_RESULT_TRUNCATION: bool = true;

/// Whether the engine computes by default if operators, rather than just their
/// operands, need higher precision.
pub const DEFAULT_OPERATOR_CHECK: bool = true;
