//! 5-sigma sensitivity-limit estimation for multi-channel aperture photometry.
//!
//! Takes a table of per-aperture photometry measurements tagged by source
//! name and detector channel, models each (source, channel) group's
//! SNR-vs-flux response from windowed noise statistics, and reports the flux
//! at which the modeled curve crosses SNR = 5.
//!
//! The flow per group: the per-sample expected no-background flux is derived
//! from the channel baseline and the sample's scale factor; residuals against
//! it are reduced to one dispersion per 9-sample window; each window then
//! contributes one (flux, SNR) sample, and the threshold solver inverts the
//! modeled curve at the target. Groups that cannot be modeled (no data,
//! partial windows, degenerate fits, failed root searches) come out as an
//! explicit unresolved marker, never as a run failure.
//!
//! Two deployment configurations are supported (see [`config::RunConfig`]):
//! cubic-spline interpolation with a bracketed root search, and linear
//! regression extrapolated to the target.

pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod plot;
pub mod snr;
pub mod solver;

pub use catalog::{
    read_photometry_table, write_sensitivity_table, PhotometryRow, TableError,
};
pub use config::{RunConfig, N_CHANNELS, SNR_TARGET, WINDOW_SIZE};
pub use pipeline::{estimate_sensitivities, PipelineError, SourceSensitivity};
pub use snr::{build_snr_curve, SnrSample};
pub use solver::{flux_at_target, SolveError, Strategy, ThresholdEstimate};
