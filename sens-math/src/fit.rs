//! Ordinary least squares line fitting.

use thiserror::Error;

/// Errors from line fitting.
#[derive(Error, Debug)]
pub enum FitError {
    #[error("x and y must have the same length ({x} vs {y})")]
    MismatchedLengths { x: usize, y: usize },
    #[error("need at least 2 samples, got {0}")]
    InsufficientData(usize),
    #[error("x values carry no variance; slope is undefined")]
    NoVariance,
}

/// A fitted line y = slope * x + intercept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit y = slope * x + intercept by ordinary least squares.
///
/// Uses the centered normal equations: slope = Σ(dx·dy) / Σ(dx²) about the
/// sample means. Fails with `FitError::NoVariance` when every x is
/// identical, since the slope is then undefined.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::MismatchedLengths {
            x: xs.len(),
            y: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(FitError::InsufficientData(xs.len()));
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx == 0.0 {
        return Err(FitError::NoVariance);
    }

    let slope = sxy / sxx;
    Ok(LinearFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn recovers_exact_line() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let fit = linear_fit(&xs, &ys).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn averages_symmetric_scatter() {
        // Residuals +e/-e at matching abscissas cancel in the normal equations.
        let xs = vec![0.0, 0.0, 2.0, 2.0];
        let ys = vec![1.0, -1.0, 5.0, 3.0];
        let fit = linear_fit(&xs, &ys).unwrap();
        assert_relative_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_relative_eq!(fit.intercept, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluate_uses_fitted_coefficients() {
        let fit = LinearFit {
            slope: 3.0,
            intercept: -1.0,
        };
        assert_relative_eq!(fit.evaluate(2.0), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_x_is_degenerate() {
        assert!(matches!(
            linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(FitError::NoVariance)
        ));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        assert!(matches!(
            linear_fit(&[1.0, 2.0], &[1.0]),
            Err(FitError::MismatchedLengths { x: 2, y: 1 })
        ));
    }

    #[test]
    fn single_sample_rejected() {
        assert!(matches!(
            linear_fit(&[1.0], &[1.0]),
            Err(FitError::InsufficientData(1))
        ));
    }
}
