//! Two-panel distribution figure: density histogram against the fitted
//! Weibull model, and the quantile plot with the deviation onset marked.

use std::path::Path;

use plotters::prelude::*;
use wat_algo::DeviationReport;
use wat_core::{WatError, WatResult, WeibullParams};

use crate::style::{density_histogram, render_err, CAPTION_FONT, TWO_PANEL};

const HIST_BINS: usize = 60;
const PDF_POINTS: usize = 400;

/// Render the distribution figure to `path`.
///
/// Left panel: a 60-bin density histogram of the cleaned wind speeds with
/// the fitted Weibull PDF drawn over it. Right panel: the quantile plot,
/// with points at or beyond the deviation onset highlighted and the onset
/// quantile marked by a vertical line.
pub fn render_distribution(
    path: &Path,
    speeds: &[f64],
    params: &WeibullParams,
    report: &DeviationReport,
) -> WatResult<()> {
    if speeds.is_empty() || report.empirical.is_empty() {
        return Err(WatError::Validation(
            "distribution figure needs non-empty samples".into(),
        ));
    }

    let root = BitMapBackend::new(path, TWO_PANEL).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((1, 2));

    draw_histogram_panel(&panels[0], speeds, params)?;
    draw_quantile_panel(&panels[1], report)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_histogram_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    speeds: &[f64],
    params: &WeibullParams,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let max_speed = speeds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (bin_width, density) = density_histogram(speeds, HIST_BINS);

    let pdf_curve: Vec<(f64, f64)> = (0..=PDF_POINTS)
        .map(|i| {
            let v = i as f64 * max_speed / PDF_POINTS as f64;
            (v, params.pdf(v))
        })
        .collect();

    let y_max = density
        .iter()
        .chain(pdf_curve.iter().map(|(_, p)| p))
        .cloned()
        .fold(0.0f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Wind speed distribution", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_speed, 0.0..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("wind speed (m/s)")
        .y_desc("density")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(density.iter().enumerate().map(|(i, &d)| {
            Rectangle::new(
                [(i as f64 * bin_width, 0.0), ((i + 1) as f64 * bin_width, d)],
                BLUE.mix(0.35).filled(),
            )
        }))
        .map_err(render_err)?
        .label("measured")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], BLUE.mix(0.35).filled()));

    chart
        .draw_series(LineSeries::new(pdf_curve, RED.stroke_width(2)))
        .map_err(render_err)?
        .label(format!("Weibull(k={:.3}, c={:.3})", params.shape, params.scale))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

fn draw_quantile_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    report: &DeviationReport,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let t_max = report
        .theoretical
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let e_max = report
        .empirical
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption("Quantile plot", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..t_max * 1.05, 0.0..e_max * 1.05)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("theoretical quantile (m/s)")
        .y_desc("empirical quantile (m/s)")
        .draw()
        .map_err(render_err)?;

    let onset_index = report.onset.map(|o| o.index).unwrap_or(usize::MAX);

    chart
        .draw_series(
            report
                .theoretical
                .iter()
                .zip(&report.empirical)
                .take(onset_index)
                .map(|(&t, &e)| Circle::new((t, e), 3, BLUE.filled())),
        )
        .map_err(render_err)?
        .label("following the model")
        .legend(|(x, y)| Circle::new((x + 7, y), 3, BLUE.filled()));

    if let Some(onset) = report.onset {
        chart
            .draw_series(
                report
                    .theoretical
                    .iter()
                    .zip(&report.empirical)
                    .skip(onset.index)
                    .map(|(&t, &e)| Circle::new((t, e), 3, RED.filled())),
            )
            .map_err(render_err)?
            .label("beyond the onset")
            .legend(|(x, y)| Circle::new((x + 7, y), 3, RED.filled()));

        let onset_t = report.theoretical[onset.index];
        chart
            .draw_series(LineSeries::new(
                vec![(onset_t, 0.0), (onset_t, e_max * 1.05)],
                BLACK.stroke_width(1),
            ))
            .map_err(render_err)?;
    }

    // Fitted quantile line over the theoretical range
    chart
        .draw_series(LineSeries::new(
            vec![
                (0.0, report.intercept),
                (t_max * 1.05, report.slope * t_max * 1.05 + report.intercept),
            ],
            GREEN.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("quantile fit")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], GREEN.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wat_algo::{detect_deviation, DeviationConfig};
    use tempfile::TempDir;

    #[test]
    fn writes_a_png() {
        let params = WeibullParams::new(1.8, 11.0).unwrap();
        let speeds: Vec<f64> = (0..300)
            .map(|i| params.quantile((i as f64 + 0.5) / 300.0))
            .collect();
        let report =
            detect_deviation(&speeds, &params, &DeviationConfig::default()).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("distribution.png");
        render_distribution(&path, &speeds, &params, &report).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn onset_marker_does_not_break_rendering() {
        let params = WeibullParams::new(1.8, 11.0).unwrap();
        let mut speeds: Vec<f64> = (0..300)
            .map(|i| params.quantile((i as f64 + 0.5) / 300.0))
            .collect();
        for (offset, v) in speeds[260..].iter_mut().enumerate() {
            *v += 0.5 * (offset + 1) as f64;
        }
        let report =
            detect_deviation(&speeds, &params, &DeviationConfig::default()).unwrap();
        assert!(report.onset.is_some());

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("distribution.png");
        render_distribution(&path, &speeds, &params, &report).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rejects_empty_samples() {
        let params = WeibullParams::new(1.8, 11.0).unwrap();
        let speeds: Vec<f64> = (0..50)
            .map(|i| params.quantile((i as f64 + 0.5) / 50.0))
            .collect();
        let report =
            detect_deviation(&speeds, &params, &DeviationConfig::default()).unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("distribution.png");
        assert!(render_distribution(&path, &[], &params, &report).is_err());
    }
}
