//! Windowed dispersion statistics over sample sequences.

use thiserror::Error;

/// Errors from windowed statistics.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("window size must be positive, got {0}")]
    InvalidWindow(usize),
}

/// Population standard deviation of each consecutive fixed-size window.
///
/// Partitions `data` into non-overlapping chunks of `window` samples and
/// returns one dispersion value per chunk, in chunk order. The final chunk
/// may be shorter when the sequence length is not a multiple of `window`;
/// callers that require exact partitioning must check divisibility first.
///
/// The estimate divides by the chunk length, not length - 1, so a window of
/// identical values has dispersion exactly zero.
///
/// # Arguments
/// * `data` - Ordered sample sequence
/// * `window` - Number of samples per window
///
/// # Returns
/// One standard deviation per window, or `StatsError::InvalidWindow` when
/// `window` is zero.
pub fn windowed_std(data: &[f64], window: usize) -> Result<Vec<f64>, StatsError> {
    if window == 0 {
        return Err(StatsError::InvalidWindow(window));
    }

    Ok(data.chunks(window).map(population_std).collect())
}

/// Population standard deviation of a single window.
fn population_std(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn one_value_per_window() {
        let data: Vec<f64> = (0..27).map(|i| i as f64).collect();
        let stds = windowed_std(&data, 9).unwrap();
        assert_eq!(stds.len(), 3);
        assert!(stds.iter().all(|&s| s >= 0.0));
    }

    #[test]
    fn zero_residuals_give_zero_dispersion() {
        let data = vec![0.0; 18];
        let stds = windowed_std(&data, 9).unwrap();
        assert_eq!(stds, vec![0.0, 0.0]);
    }

    #[test]
    fn matches_hand_computed_value() {
        // Window [1, 2, 3]: mean 2, variance (1 + 0 + 1) / 3
        let stds = windowed_std(&[1.0, 2.0, 3.0], 3).unwrap();
        assert_relative_eq!(stds[0], (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn constant_offset_does_not_change_dispersion() {
        let base = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let shifted: Vec<f64> = base.iter().map(|v| v + 100.0).collect();
        let a = windowed_std(&base, 3).unwrap();
        let b = windowed_std(&shifted, 3).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn short_final_window_is_still_estimated() {
        let data = vec![1.0, 3.0, 1.0, 3.0, 7.0];
        let stds = windowed_std(&data, 2).unwrap();
        assert_eq!(stds.len(), 3);
        assert_relative_eq!(stds[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            windowed_std(&[1.0, 2.0], 0),
            Err(StatsError::InvalidWindow(0))
        ));
    }

    #[test]
    fn empty_input_yields_no_windows() {
        assert!(windowed_std(&[], 9).unwrap().is_empty());
    }
}
