//! Interpolation method tags for term-structure queries.

use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Interpolation scheme applied between curve knots.
///
/// Numeric encoding: 1 = Linear, 2 = FlatForward, 3 = LinearForward. All
/// schemes extrapolate flat (using the boundary knot rate) outside the knot
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum InterpolationMethod {
    /// Linear interpolation on zero rates.
    Linear,
    /// Piecewise-constant instantaneous forward rates, equivalent to
    /// log-linear interpolation of discount factors.
    FlatForward,
    /// Piecewise-linear instantaneous forward rates, realised as linear
    /// interpolation of the continuously-compounded zero yield.
    LinearForward,
}

impl From<InterpolationMethod> for u32 {
    fn from(method: InterpolationMethod) -> Self {
        match method {
            InterpolationMethod::Linear => 1,
            InterpolationMethod::FlatForward => 2,
            InterpolationMethod::LinearForward => 3,
        }
    }
}

impl TryFrom<u32> for InterpolationMethod {
    type Error = PricingError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Linear),
            2 => Ok(Self::FlatForward),
            3 => Ok(Self::LinearForward),
            other => Err(PricingError::InvalidInput(format!(
                "unrecognized interpolation method code {other} (expected 1, 2 or 3)"
            ))),
        }
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::FlatForward => "Flat Forward",
            Self::LinearForward => "Linear Forward",
        };
        write!(f, "{name}")
    }
}
