//! Bracketed root finding by interval bisection.

use thiserror::Error;

/// Errors from the bisection search.
#[derive(Error, Debug)]
pub enum RootError {
    #[error("invalid bracket [{lo}, {hi}]")]
    InvalidBracket { lo: f64, hi: f64 },
    #[error("no sign change over bracket [{lo}, {hi}]")]
    NoSignChange { lo: f64, hi: f64 },
    #[error("function value is not finite at x = {0}")]
    NonFiniteValue(f64),
    #[error("failed to converge after {0} iterations")]
    NoConvergence(usize),
}

/// Find a root of `f` inside the bracket [lo, hi] by bisection.
///
/// Requires `f(lo)` and `f(hi)` to have opposite signs; halves the bracket
/// until it is narrower than `tolerance` or `max_iterations` is exhausted.
/// The returned root always lies inside the initial bracket.
///
/// # Arguments
/// * `f` - Function to solve; must be continuous over the bracket
/// * `lo`, `hi` - Bracket endpoints, `lo < hi`
/// * `tolerance` - Convergence width on x
/// * `max_iterations` - Iteration bound before giving up
pub fn bisect<F>(
    f: F,
    lo: f64,
    hi: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<f64, RootError>
where
    F: Fn(f64) -> f64,
{
    if !(lo < hi) || !lo.is_finite() || !hi.is_finite() {
        return Err(RootError::InvalidBracket { lo, hi });
    }

    let f_lo = f(lo);
    let f_hi = f(hi);
    if !f_lo.is_finite() {
        return Err(RootError::NonFiniteValue(lo));
    }
    if !f_hi.is_finite() {
        return Err(RootError::NonFiniteValue(hi));
    }
    if f_lo == 0.0 {
        return Ok(lo);
    }
    if f_hi == 0.0 {
        return Ok(hi);
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(RootError::NoSignChange { lo, hi });
    }

    let (mut lo, mut hi, mut f_lo) = (lo, hi, f_lo);
    let mut iteration = 0;
    while iteration < max_iterations && (hi - lo) > tolerance {
        let mid = 0.5 * (lo + hi);
        let f_mid = f(mid);
        if !f_mid.is_finite() {
            return Err(RootError::NonFiniteValue(mid));
        }
        if f_mid == 0.0 {
            return Ok(mid);
        }

        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
        iteration += 1;
    }

    if (hi - lo) > tolerance {
        return Err(RootError::NoConvergence(max_iterations));
    }

    Ok(0.5 * (lo + hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn finds_linear_root() {
        let root = bisect(|x| 2.0 * x - 3.0, 0.0, 10.0, 1e-12, 100).unwrap();
        assert_relative_eq!(root, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn finds_cubic_root() {
        let root = bisect(|x| x * x * x - 8.0, 0.0, 5.0, 1e-12, 100).unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn root_stays_inside_bracket() {
        let (lo, hi) = (1.0, 4.0);
        let root = bisect(|x| x - 2.5, lo, hi, 1e-10, 100).unwrap();
        assert!(root >= lo && root <= hi);
    }

    #[test]
    fn exact_endpoint_root_returned() {
        let root = bisect(|x| x - 1.0, 1.0, 2.0, 1e-10, 100).unwrap();
        assert_eq!(root, 1.0);
    }

    #[test]
    fn reports_missing_sign_change() {
        assert!(matches!(
            bisect(|x| x * x + 1.0, -1.0, 1.0, 1e-10, 100),
            Err(RootError::NoSignChange { .. })
        ));
    }

    #[test]
    fn rejects_inverted_bracket() {
        assert!(matches!(
            bisect(|x| x, 2.0, 1.0, 1e-10, 100),
            Err(RootError::InvalidBracket { .. })
        ));
    }

    #[test]
    fn reports_non_finite_values() {
        assert!(matches!(
            bisect(|_| f64::NAN, 0.0, 1.0, 1e-10, 100),
            Err(RootError::NonFiniteValue(_))
        ));
    }

    #[test]
    fn gives_up_when_iterations_run_out() {
        // Two iterations cannot shrink [0, 1] below 1e-9.
        assert!(matches!(
            bisect(|x| x - 0.3, 0.0, 1.0, 1e-9, 2),
            Err(RootError::NoConvergence(2))
        ));
    }
}
