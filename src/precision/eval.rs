//! This module contains the fixed set of floating-point operations that the
//! analysis knows how to re-evaluate, along with evaluators for them that are
//! generic over the floating-point width.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::precision::{Error, Result};

/// A floating-point binary arithmetic operator.
#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Gets the name of the operator as it appears in a trace.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "fadd",
            Self::Subtract => "fsub",
            Self::Multiply => "fmul",
            Self::Divide => "fdiv",
        }
    }

    /// Evaluates the operator on `left` and `right` in double precision.
    #[must_use]
    pub fn eval_wide(self, left: f64, right: f64) -> f64 {
        eval_binary(left, right, self)
    }

    /// Evaluates the operator as a single-precision instruction would, with
    /// both operands and the result rounded to single precision.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Narrowing is the point
    pub fn eval_narrow(self, left: f64, right: f64) -> f64 {
        f64::from(eval_binary(left as f32, right as f32, self))
    }
}

impl FromStr for BinaryOperator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fadd" => Ok(Self::Add),
            "fsub" => Ok(Self::Subtract),
            "fmul" => Ok(Self::Multiply),
            "fdiv" => Ok(Self::Divide),
            _ => Err(Error::UnsupportedOperator(s.into())),
        }
    }
}

impl TryFrom<String> for BinaryOperator {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<BinaryOperator> for String {
    fn from(value: BinaryOperator) -> Self {
        value.name().into()
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A unary function from the C math library.
#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum MathFunction {
    Sin,
    Acos,
    Sqrt,
    Fabs,
    Cos,
    Log,
    Floor,
}

impl MathFunction {
    /// Gets the name of the function as it appears in a trace.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Acos => "acos",
            Self::Sqrt => "sqrt",
            Self::Fabs => "fabs",
            Self::Cos => "cos",
            Self::Log => "log",
            Self::Floor => "floor",
        }
    }

    /// Evaluates the function on `value` in double precision.
    #[must_use]
    pub fn eval_wide(self, value: f64) -> f64 {
        eval_math(value, self)
    }
}

impl FromStr for MathFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sin" => Ok(Self::Sin),
            "acos" => Ok(Self::Acos),
            "sqrt" => Ok(Self::Sqrt),
            "fabs" => Ok(Self::Fabs),
            "cos" => Ok(Self::Cos),
            "log" => Ok(Self::Log),
            "floor" => Ok(Self::Floor),
            _ => Err(Error::UnsupportedFunction(s.into())),
        }
    }
}

impl TryFrom<String> for MathFunction {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MathFunction> for String {
    fn from(value: MathFunction) -> Self {
        value.name().into()
    }
}

impl Display for MathFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Performs the floating-point binary operator `op` on `left` and `right` in
/// the width of `T`.
pub fn eval_binary<T: Float>(left: T, right: T, op: BinaryOperator) -> T {
    match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => left / right,
    }
}

/// Evaluates the math library function `function` on `value` in the width of
/// `T`.
pub fn eval_math<T: Float>(value: T, function: MathFunction) -> T {
    match function {
        MathFunction::Sin => value.sin(),
        MathFunction::Acos => value.acos(),
        MathFunction::Sqrt => value.sqrt(),
        MathFunction::Fabs => value.abs(),
        MathFunction::Cos => value.cos(),
        MathFunction::Log => value.ln(),
        MathFunction::Floor => value.floor(),
    }
}
