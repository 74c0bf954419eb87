//! Diagnostic plot rendering for resolved groups.
//!
//! One PNG per resolved (source, channel) pair: the SNR samples, the modeled
//! curve the solver inverted, and guide lines at the target SNR and the
//! solved crossing. Purely observational; nothing feeds back into the
//! computation.

use crate::snr::SnrSample;
use crate::solver::{model_curve, Strategy, ThresholdEstimate, MODEL_CURVE_POINTS};
use plotters::prelude::*;
use std::path::Path;

/// Render the diagnostic chart for one resolved group into `dir`.
///
/// The curve extends to 1.1× the crossing when it lies beyond the observed
/// flux range, so an extrapolated estimate is always visible on the chart.
pub fn render_group_plot(
    dir: &Path,
    source: &str,
    channel: u8,
    samples: &[SnrSample],
    estimate: &ThresholdEstimate,
    target: f64,
    strategy: Strategy,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{source}_ch{channel}.png"));

    let flux_min = samples
        .iter()
        .map(|s| s.flux_ujy)
        .fold(f64::INFINITY, f64::min);
    let flux_max = samples
        .iter()
        .map(|s| s.flux_ujy)
        .fold(f64::NEG_INFINITY, f64::max);
    let x_max = flux_max.max(estimate.flux_ujy * 1.1);
    let curve = model_curve(samples, strategy, x_max, MODEL_CURVE_POINTS)?;

    let (y_min, y_max) = value_range(
        samples
            .iter()
            .map(|s| s.snr)
            .chain(curve.iter().map(|p| p.1))
            .chain(std::iter::once(target)),
    );

    let root = BitMapBackend::new(&path, (900, 675)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{source} channel {channel}"),
            ("sans-serif", 28).into_font().color(&BLACK),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(flux_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Flux (µJy)")
        .y_desc("SNR")
        .axis_desc_style(("sans-serif", 18))
        .label_style(("sans-serif", 14))
        .draw()?;

    chart
        .draw_series(LineSeries::new(curve.iter().copied(), BLACK.stroke_width(2)))?
        .label("Model")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.stroke_width(2)));

    chart
        .draw_series(
            samples
                .iter()
                .map(|s| Circle::new((s.flux_ujy, s.snr), 4, BLUE.filled())),
        )?
        .label("SNR samples")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    // Guide lines at the target SNR and the solved crossing
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(flux_min, target), (x_max, target)],
            RED.stroke_width(2),
        )))?
        .label(format!("SNR = {target}"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(estimate.flux_ujy, y_min), (estimate.flux_ujy, y_max)],
            GREEN.stroke_width(2),
        )))?
        .label(format!("Flux @ SNR={target} = {:.2}", estimate.flux_ujy))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Finite min/max of the plotted values with a 5% margin.
fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !(lo < hi) {
        return (lo - 1.0, lo + 1.0);
    }
    let margin = 0.05 * (hi - lo);
    (lo - margin, hi + margin)
}
