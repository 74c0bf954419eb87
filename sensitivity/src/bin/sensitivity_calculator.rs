//! 5-sigma sensitivity-limit calculator for multi-channel aperture photometry.
//!
//! Reads a whitespace-delimited photometry table (`.coldat`), estimates the
//! flux at which each source/channel crosses SNR = 5, and writes one
//! tab-delimited result row per source. Unresolved channels (no data,
//! partial windows, solver failures) are reported as `nan`.
//!
//! Two deployment presets are available via `--config`: cubic-spline
//! interpolation with a bracketed root search (default), and
//! linear-regression extrapolation.

use clap::{Parser, ValueEnum};
use sensitivity::{
    estimate_sensitivities, read_photometry_table, write_sensitivity_table,
    RunConfig,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Sensitivity Calculator",
    about = "Estimates the flux at which each source/channel crosses SNR = 5",
    long_about = None
)]
struct Args {
    /// Photometry table with per-aperture measurements
    #[arg(short, long, default_value = "result.coldat")]
    input: PathBuf,

    /// Output table of per-source sensitivity limits
    #[arg(short, long, default_value = "snr5_result.coldat")]
    output: PathBuf,

    /// Deployment configuration preset
    #[arg(long, value_enum, default_value_t = ConfigPreset::SplineSearch)]
    config: ConfigPreset,

    /// Render one diagnostic plot per resolved source/channel
    #[arg(long)]
    plot: bool,

    /// Directory for diagnostic plots
    #[arg(long, default_value = "plots")]
    plot_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ConfigPreset {
    /// Cubic interpolation with a bracketed root search
    SplineSearch,
    /// Linear-regression extrapolation
    LinearFit,
}

impl ConfigPreset {
    fn to_config(self) -> RunConfig {
        match self {
            ConfigPreset::SplineSearch => RunConfig::SPLINE_SEARCH,
            ConfigPreset::LinearFit => RunConfig::LINEAR_FIT,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let config = args.config.to_config();

    let rows = read_photometry_table(&args.input)?;
    let plot_dir = args.plot.then_some(args.plot_dir.as_path());
    let results = estimate_sensitivities(&rows, &config, plot_dir)?;
    write_sensitivity_table(&args.output, &results)?;

    println!("Sensitivity Limits (flux at SNR = 5)");
    println!("====================================");
    println!();
    println!(
        "{:<20} {:>14} {:>14} {:>14} {:>14}",
        "Source", "ch1 (µJy)", "ch2 (µJy)", "ch3 (µJy)", "ch4 (µJy)"
    );
    println!("{:-<78}", "");
    for result in &results {
        let cells: Vec<String> = result
            .limits_ujy
            .iter()
            .map(|limit| match limit {
                Some(value) => format!("{value:.6}"),
                None => "nan".to_string(),
            })
            .collect();
        println!(
            "{:<20} {:>14} {:>14} {:>14} {:>14}",
            result.name, cells[0], cells[1], cells[2], cells[3]
        );
    }
    println!();
    println!(
        "Processed {} measurements across {} sources",
        rows.len(),
        results.len()
    );
    println!("Sensitivity table written to {}", args.output.display());
    if args.plot {
        println!("Diagnostic plots written to {}", args.plot_dir.display());
    }

    Ok(())
}
