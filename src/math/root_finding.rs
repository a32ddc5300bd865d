//! Bracketed one-dimensional root finding.
//!
//! The solver is a safeguarded Brent iteration: inverse quadratic
//! interpolation or secant steps where they are trustworthy, bisection
//! otherwise. Objective functions are fallible so that curve evaluation
//! errors propagate out of the solve instead of being masked.

use crate::core::PricingError;

/// Convergence controls for [`find_root_brent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// Absolute tolerance on the objective value.
    pub tolerance: f64,
    /// Absolute tolerance on the bracket width.
    pub x_tolerance: f64,
    /// Iteration cap before the solve is declared non-convergent.
    pub max_iterations: usize,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0e-12,
            x_tolerance: 1.0e-14,
            max_iterations: 200,
        }
    }
}

/// Grows `[lo, hi]` geometrically until the objective changes sign.
///
/// Returns the bracket endpoints together with their objective values, or a
/// numerical error when no sign change appears within `max_expansions`
/// doublings.
pub fn expand_bracket<F>(
    mut f: F,
    lo: f64,
    hi: f64,
    max_expansions: usize,
) -> Result<(f64, f64, f64, f64), PricingError>
where
    F: FnMut(f64) -> Result<f64, PricingError>,
{
    let f_lo = f(lo)?;
    let mut hi = hi;
    let mut f_hi = f(hi)?;

    let mut expansions = 0;
    while f_lo.signum() == f_hi.signum() && f_hi != 0.0 && expansions < max_expansions {
        hi *= 2.0;
        f_hi = f(hi)?;
        expansions += 1;
    }

    if f_lo.signum() == f_hi.signum() && f_lo != 0.0 && f_hi != 0.0 {
        return Err(PricingError::NumericalError(format!(
            "failed to bracket a root on [{lo}, {hi}]"
        )));
    }
    Ok((lo, hi, f_lo, f_hi))
}

/// Finds a root of `f` on a bracketing interval `[a, b]` using Brent's
/// method.
///
/// Requires `f(a)` and `f(b)` to have opposite signs (or one of them to be
/// an exact zero).
pub fn find_root_brent<F>(
    mut f: F,
    a: f64,
    b: f64,
    config: &RootConfig,
) -> Result<f64, PricingError>
where
    F: FnMut(f64) -> Result<f64, PricingError>,
{
    let mut a = a;
    let mut b = b;
    let mut fa = f(a)?;
    let mut fb = f(b)?;

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa * fb > 0.0 {
        return Err(PricingError::NumericalError(format!(
            "root is not bracketed: f({a}) = {fa}, f({b}) = {fb}"
        )));
    }

    // Keep |f(a)| >= |f(b)| so b is always the best estimate.
    if fa.abs() < fb.abs() {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..config.max_iterations {
        if fb.abs() < config.tolerance || (b - a).abs() < config.x_tolerance {
            return Ok(b);
        }

        let mut use_bisection = true;
        let mut s = 0.0;

        if (fa - fc).abs() > 1.0e-15 && (fb - fc).abs() > 1.0e-15 {
            // Inverse quadratic interpolation.
            let r = fb / fc;
            let p = fa / fc;
            let q = fa / fb;
            s = b
                - (q * (q - r) * (b - a) + (1.0 - r) * (b - c) * p)
                    / ((q - 1.0) * (r - 1.0) * (p - 1.0));

            let m = (a + b) / 2.0;
            if s > m.min(b) && s < m.max(b) && (s - b).abs() < e.abs() / 2.0 {
                use_bisection = false;
            }
        } else if (fb - fa).abs() > 1.0e-15 {
            // Secant step.
            s = b - fb * (b - a) / (fb - fa);

            let m = (a + b) / 2.0;
            if s > m.min(b) && s < m.max(b) && (s - b).abs() < e.abs() / 2.0 {
                use_bisection = false;
            }
        }

        if use_bisection {
            s = (a + b) / 2.0;
            e = b - a;
            d = e;
        } else {
            e = d;
            d = s - b;
        }

        c = b;
        fc = fb;

        let fs = f(s)?;
        if fa * fs < 0.0 {
            b = s;
            fb = fs;
        } else {
            a = s;
            fa = fs;
        }

        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }
    }

    Err(PricingError::NumericalError(format!(
        "root search did not converge within {} iterations (residual {})",
        config.max_iterations,
        fb.abs()
    )))
}
