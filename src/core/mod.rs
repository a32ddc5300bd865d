//! Library-wide error taxonomy.
//!
//! Every fallible operation in the crate reports a [`PricingError`]; nothing
//! is swallowed or silently clamped. The adapter layer that fronts this
//! library maps the variants onto its own status codes.

/// Typed failures surfaced at the operation boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Input validation error (bad curve nodes, bad contract terms, bad enum
    /// codes).
    InvalidInput(String),
    /// Date or year fraction outside the usable range of an operation.
    OutOfRange(String),
    /// Numerical issue: solver failed to bracket or converge, or an
    /// integration produced a non-finite value.
    NumericalError(String),
    /// Inputs that are individually valid but mutually contradictory, such
    /// as a valuation date before a curve's anchor.
    Inconsistent(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::OutOfRange(msg) => write!(f, "out of range: {msg}"),
            Self::NumericalError(msg) => write!(f, "numerical error: {msg}"),
            Self::Inconsistent(msg) => write!(f, "inconsistent inputs: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        let cases = [
            (PricingError::InvalidInput("x".into()), "invalid input: x"),
            (PricingError::OutOfRange("x".into()), "out of range: x"),
            (PricingError::NumericalError("x".into()), "numerical error: x"),
            (PricingError::Inconsistent("x".into()), "inconsistent inputs: x"),
        ];
        for (err, expected) in cases {
            assert_eq!(err.to_string(), expected);
        }
    }
}
