//! This module contains a concrete trace record that can be serialized, and
//! that can be built from the shadow values observed at each precision tier.

use serde::{Deserialize, Serialize};

use crate::{
    error::memory::{Error, Result},
    precision::Tier,
    shadow::ShadowValue,
    trace::{Instruction, TraceRecord},
};

/// The value of a record at each precision tier, stored in search order.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TierValues([f64; 4]);

impl TierValues {
    /// Constructs the tier values from `values` given in search order.
    #[must_use]
    pub fn new(values: [f64; 4]) -> Self {
        Self(values)
    }

    /// Constructs tier values that are `value` at every tier.
    #[must_use]
    pub fn uniform(value: f64) -> Self {
        Self([value; 4])
    }

    /// Gets the value at `tier`.
    #[must_use]
    pub fn get(&self, tier: Tier) -> f64 {
        self.0[tier.position()]
    }

    /// Sets the value at `tier` to `value`.
    pub fn set(&mut self, tier: Tier, value: f64) {
        self.0[tier.position()] = value;
    }
}

impl From<[f64; 4]> for TierValues {
    fn from(value: [f64; 4]) -> Self {
        Self::new(value)
    }
}

/// A serializable record of one value of a dynamic instruction instance.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowObject {
    dpc:         u64,
    pc:          u64,
    file_id:     u64,
    instruction: Instruction,
    values:      TierValues,
}

impl ShadowObject {
    #[must_use]
    pub fn new(
        dpc: u64,
        pc: u64,
        file_id: u64,
        instruction: Instruction,
        values: impl Into<TierValues>,
    ) -> Self {
        let values = values.into();
        Self {
            dpc,
            pc,
            file_id,
            instruction,
            values,
        }
    }

    /// Constructs a record from the shadow values that the monitored program
    /// held at each tier, given in search order.
    ///
    /// Floating-point shadows contribute their widened value, and integer
    /// shadows their sign-extended value.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if any of the `shadows` is not a scalar number.
    pub fn from_shadow_values(
        dpc: u64,
        pc: u64,
        file_id: u64,
        instruction: Instruction,
        shadows: [&ShadowValue; 4],
    ) -> Result<Self> {
        let mut values = TierValues::default();
        for (tier, shadow) in Tier::SEARCH_ORDER.into_iter().zip(shadows) {
            values.set(tier, numeric_value(shadow)?);
        }

        Ok(Self::new(dpc, pc, file_id, instruction, values))
    }

    /// Gets the values of the record at every tier.
    #[must_use]
    pub fn values(&self) -> &TierValues {
        &self.values
    }
}

impl TraceRecord for ShadowObject {
    fn dpc(&self) -> u64 {
        self.dpc
    }

    fn pc(&self) -> u64 {
        self.pc
    }

    fn file_id(&self) -> u64 {
        self.file_id
    }

    fn value(&self, tier: Tier) -> f64 {
        self.values.get(tier)
    }

    fn instruction(&self) -> Instruction {
        self.instruction.clone()
    }
}

/// Gets the numeric value held by `shadow`.
#[allow(clippy::cast_precision_loss)] // Integers are analysed as doubles
fn numeric_value(shadow: &ShadowValue) -> Result<f64> {
    let kind = shadow.kind();
    if kind.is_float() {
        Ok(shadow.flp_value())
    } else if kind.is_integer() {
        Ok(shadow.int_value() as f64)
    } else {
        Err(Error::UnsupportedReadKind { kind })
    }
}
