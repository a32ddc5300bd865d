//! Compounding bases and rate/discount-factor conversions.

use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Compounding basis fixing how a rate maps to a discount factor.
///
/// The numeric encoding is periods per year, with 0 for continuous
/// compounding: 0, 1, 2, 4, 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CompoundingBasis {
    Continuous,
    Annual,
    SemiAnnual,
    Quarterly,
    Monthly,
}

impl CompoundingBasis {
    /// Compounding periods per year, `None` for continuous.
    pub fn periods_per_year(self) -> Option<u32> {
        match self {
            Self::Continuous => None,
            Self::Annual => Some(1),
            Self::SemiAnnual => Some(2),
            Self::Quarterly => Some(4),
            Self::Monthly => Some(12),
        }
    }

    /// Converts a rate at year fraction `t` into a discount factor.
    ///
    /// A non-positive `t` yields a discount factor of exactly 1.
    pub fn discount_factor(self, rate: f64, t: f64) -> Result<f64, PricingError> {
        if !rate.is_finite() {
            return Err(PricingError::InvalidInput(format!(
                "rate must be finite, got {rate}"
            )));
        }
        if t <= 0.0 {
            return Ok(1.0);
        }

        let df = match self.periods_per_year() {
            None => (-rate * t).exp(),
            Some(m) => {
                let m = f64::from(m);
                let growth = 1.0 + rate / m;
                if growth <= 0.0 {
                    return Err(PricingError::NumericalError(format!(
                        "rate {rate} is below the compounding floor for {m} periods per year"
                    )));
                }
                growth.powf(-m * t)
            }
        };

        if df.is_finite() && df > 0.0 {
            Ok(df)
        } else {
            Err(PricingError::NumericalError(format!(
                "discount factor for rate {rate} at t = {t} is not positive finite"
            )))
        }
    }

    /// Converts a discount factor at year fraction `t` back into a rate.
    pub fn implied_rate(self, discount_factor: f64, t: f64) -> Result<f64, PricingError> {
        if !(discount_factor.is_finite() && discount_factor > 0.0) {
            return Err(PricingError::NumericalError(format!(
                "discount factor must be positive finite, got {discount_factor}"
            )));
        }
        if t <= 0.0 {
            return Err(PricingError::OutOfRange(
                "year fraction must be positive to imply a rate".into(),
            ));
        }

        let rate = match self.periods_per_year() {
            None => -discount_factor.ln() / t,
            Some(m) => {
                let m = f64::from(m);
                m * (discount_factor.powf(-1.0 / (m * t)) - 1.0)
            }
        };

        if rate.is_finite() {
            Ok(rate)
        } else {
            Err(PricingError::NumericalError(format!(
                "implied rate from discount factor {discount_factor} at t = {t} is not finite"
            )))
        }
    }

    /// Continuously-compounded equivalent of a rate in this basis.
    pub fn continuous_equivalent(self, rate: f64) -> Result<f64, PricingError> {
        match self.periods_per_year() {
            None => Ok(rate),
            Some(m) => {
                let m = f64::from(m);
                let growth = 1.0 + rate / m;
                if growth <= 0.0 {
                    return Err(PricingError::NumericalError(format!(
                        "rate {rate} is below the compounding floor for {m} periods per year"
                    )));
                }
                Ok(m * growth.ln())
            }
        }
    }
}

impl From<CompoundingBasis> for u32 {
    fn from(basis: CompoundingBasis) -> Self {
        basis.periods_per_year().unwrap_or(0)
    }
}

impl TryFrom<u32> for CompoundingBasis {
    type Error = PricingError;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Continuous),
            1 => Ok(Self::Annual),
            2 => Ok(Self::SemiAnnual),
            4 => Ok(Self::Quarterly),
            12 => Ok(Self::Monthly),
            other => Err(PricingError::InvalidInput(format!(
                "unrecognized compounding basis code {other} (expected 0, 1, 2, 4 or 12)"
            ))),
        }
    }
}

impl std::fmt::Display for CompoundingBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Continuous => "Continuous",
            Self::Annual => "Annual",
            Self::SemiAnnual => "Semi-Annual",
            Self::Quarterly => "Quarterly",
            Self::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const ALL: [CompoundingBasis; 5] = [
        CompoundingBasis::Continuous,
        CompoundingBasis::Annual,
        CompoundingBasis::SemiAnnual,
        CompoundingBasis::Quarterly,
        CompoundingBasis::Monthly,
    ];

    #[test]
    fn continuous_discount_factor() {
        let df = CompoundingBasis::Continuous.discount_factor(0.05, 1.0).unwrap();
        assert_relative_eq!(df, (-0.05_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn annual_discount_factor() {
        let df = CompoundingBasis::Annual.discount_factor(0.05, 2.0).unwrap();
        assert_relative_eq!(df, 1.05_f64.powf(-2.0), epsilon = 1e-15);
    }

    #[test]
    fn rate_round_trip_all_bases() {
        for basis in ALL {
            let df = basis.discount_factor(0.043, 3.7).unwrap();
            let rate = basis.implied_rate(df, 3.7).unwrap();
            assert_relative_eq!(rate, 0.043, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_time_is_unity() {
        for basis in ALL {
            assert_eq!(basis.discount_factor(0.05, 0.0).unwrap(), 1.0);
            assert_eq!(basis.discount_factor(0.05, -1.0).unwrap(), 1.0);
        }
    }

    #[test]
    fn implied_rate_rejects_degenerate_inputs() {
        assert!(CompoundingBasis::Annual.implied_rate(0.9, 0.0).is_err());
        assert!(CompoundingBasis::Annual.implied_rate(0.0, 1.0).is_err());
        assert!(CompoundingBasis::Annual.implied_rate(-0.5, 1.0).is_err());
    }

    #[test]
    fn continuous_equivalent_matches_discounting() {
        for basis in ALL {
            let z = basis.continuous_equivalent(0.05).unwrap();
            let df_basis = basis.discount_factor(0.05, 2.5).unwrap();
            let df_cont = CompoundingBasis::Continuous.discount_factor(z, 2.5).unwrap();
            assert_relative_eq!(df_basis, df_cont, epsilon = 1e-12);
        }
    }

    #[test]
    fn numeric_codes_round_trip() {
        for basis in ALL {
            let code = u32::from(basis);
            assert_eq!(CompoundingBasis::try_from(code).unwrap(), basis);
        }
        assert!(CompoundingBasis::try_from(3).is_err());
        assert!(CompoundingBasis::try_from(7).is_err());
    }
}
