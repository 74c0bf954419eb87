//! SNR-vs-flux sample construction from windowed noise statistics.

use sens_math::stats::{windowed_std, StatsError};

/// One modeled SNR sample: a window's representative no-background flux and
/// the ratio of that flux to the window's residual dispersion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnrSample {
    pub flux_ujy: f64,
    pub snr: f64,
}

/// Build the per-window (flux, SNR) samples for one (source, channel) group.
///
/// For each measurement the expected no-background flux is
/// `(factor / base_factor) × baseline`; the residual against the observed
/// photometry is accumulated into windows of `window` samples, and each
/// window's dispersion becomes the noise estimate at that window's first
/// expected-flux value.
///
/// A window of identical residuals has zero dispersion and yields a
/// non-finite SNR, which is passed through for the solver to reject.
///
/// Callers guarantee `factors` and `phot_ujy` have equal length divisible by
/// `window`; the driver rejects indivisible groups before this point.
pub fn build_snr_curve(
    factors: &[f64],
    phot_ujy: &[f64],
    baseline_ujy: f64,
    base_factor: f64,
    window: usize,
) -> Result<Vec<SnrSample>, StatsError> {
    debug_assert_eq!(factors.len(), phot_ujy.len());

    let expected: Vec<f64> = factors
        .iter()
        .map(|factor| factor / base_factor * baseline_ujy)
        .collect();
    let residuals: Vec<f64> = phot_ujy
        .iter()
        .zip(expected.iter())
        .map(|(phot, exp)| phot - exp)
        .collect();

    let dispersions = windowed_std(&residuals, window)?;

    Ok(expected
        .iter()
        .step_by(window)
        .zip(dispersions)
        .map(|(&flux_ujy, sigma)| SnrSample {
            flux_ujy,
            snr: flux_ujy / sigma,
        })
        .collect())
}
