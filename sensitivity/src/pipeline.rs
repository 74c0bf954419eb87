//! Per-source/channel driver: grouping, short-circuits, and solver dispatch.
//!
//! Groups measurement rows by source name (first-seen input order) and
//! channel (fixed set 1-4), runs the SNR curve builder and threshold solver
//! per group, and assembles one result row per source. Every group-level
//! failure is caught here and recorded as an unresolved channel; only a
//! misconfigured window size aborts the run.
//!
//! Groups share no mutable state, so the per-source work fans out over a
//! rayon worker pool; the collected result vector preserves source order.

use crate::catalog::PhotometryRow;
use crate::config::{RunConfig, N_CHANNELS, SNR_TARGET};
use crate::plot;
use crate::snr::build_snr_curve;
use crate::solver::flux_at_target;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Fatal pipeline configuration errors.
///
/// Group-level data problems never surface here; they become unresolved
/// channels in the output.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("window size must be positive")]
    InvalidWindow,
}

/// Sensitivity limits for one source, channels 1-4 in order.
///
/// `None` is the uniform unresolved marker: missing channel data, partial
/// windows, and solver failures all land here.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSensitivity {
    pub name: String,
    pub limits_ujy: [Option<f64>; N_CHANNELS],
}

/// Estimate the 5-sigma sensitivity limit for every source and channel.
///
/// Returns one row per distinct source name, in first-seen input order.
/// When `plot_dir` is set, one diagnostic chart is rendered per resolved
/// (source, channel) group; plot failures are warnings, not run failures.
pub fn estimate_sensitivities(
    rows: &[PhotometryRow],
    config: &RunConfig,
    plot_dir: Option<&Path>,
) -> Result<Vec<SourceSensitivity>, PipelineError> {
    if config.window_size == 0 {
        return Err(PipelineError::InvalidWindow);
    }

    let mut names: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in rows {
        if seen.insert(row.name.as_str()) {
            names.push(row.name.as_str());
        }
    }

    // (factors, photometry) per (source, channel), input order preserved
    let mut groups: HashMap<(&str, u8), (Vec<f64>, Vec<f64>)> = HashMap::new();
    for row in rows {
        let group = groups.entry((row.name.as_str(), row.channel)).or_default();
        group.0.push(row.scale_factor);
        group.1.push(row.phot_ujy);
    }

    Ok(names
        .par_iter()
        .map(|&name| SourceSensitivity {
            name: name.to_string(),
            limits_ujy: std::array::from_fn(|i| {
                let channel = (i + 1) as u8;
                estimate_channel(
                    name,
                    channel,
                    groups.get(&(name, channel)),
                    config,
                    plot_dir,
                )
            }),
        })
        .collect())
}

/// Estimate one (source, channel) group, downgrading every group-level
/// failure to `None`.
fn estimate_channel(
    name: &str,
    channel: u8,
    group: Option<&(Vec<f64>, Vec<f64>)>,
    config: &RunConfig,
    plot_dir: Option<&Path>,
) -> Option<f64> {
    let Some((factors, phot)) = group else {
        debug!("{name} ch{channel}: no measurements");
        return None;
    };

    if factors.len() % config.window_size != 0 {
        warn!(
            "{name} ch{channel}: {} samples not divisible by window size {}",
            factors.len(),
            config.window_size
        );
        return None;
    }

    let baseline_ujy = config.baseline_for(channel)?;

    let samples = match build_snr_curve(
        factors,
        phot,
        baseline_ujy,
        config.base_factor,
        config.window_size,
    ) {
        Ok(samples) => samples,
        Err(err) => {
            warn!("{name} ch{channel}: {err}");
            return None;
        }
    };

    match flux_at_target(&samples, SNR_TARGET, config.strategy) {
        Ok(estimate) => {
            if estimate.extrapolated {
                warn!(
                    "{name} ch{channel}: extrapolated flux at SNR={SNR_TARGET} = {:.4} µJy",
                    estimate.flux_ujy
                );
            } else {
                info!(
                    "{name} ch{channel}: flux at SNR={SNR_TARGET} = {:.4} µJy",
                    estimate.flux_ujy
                );
            }

            if let Some(dir) = plot_dir {
                if let Err(err) = plot::render_group_plot(
                    dir,
                    name,
                    channel,
                    &samples,
                    &estimate,
                    SNR_TARGET,
                    config.strategy,
                ) {
                    warn!("{name} ch{channel}: diagnostic plot failed: {err}");
                }
            }

            Some(estimate.flux_ujy)
        }
        Err(err) => {
            warn!("{name} ch{channel}: {err}");
            None
        }
    }
}
