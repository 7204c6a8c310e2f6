//! Two-panel power-curve figure: raw samples with the binned curve and the
//! usable zone shaded, and the power derivative with the zone boundaries.

use std::path::Path;

use plotters::prelude::*;
use wat_algo::{BinnedPowerCurve, UsableZone};
use wat_core::{WatError, WatResult};

use crate::style::{render_err, CAPTION_FONT, TWO_PANEL};

/// Render the power-curve figure to `path`.
pub fn render_power_curve(
    path: &Path,
    raw_samples: &[(f64, f64)],
    curve: &BinnedPowerCurve,
    derivative: &[f64],
    zone: &UsableZone,
) -> WatResult<()> {
    if curve.speeds.is_empty() || curve.speeds.len() != derivative.len() {
        return Err(WatError::Validation(
            "power-curve figure needs a binned curve with an aligned derivative".into(),
        ));
    }

    let root = BitMapBackend::new(path, TWO_PANEL).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((1, 2));

    draw_curve_panel(&panels[0], raw_samples, curve, zone)?;
    draw_derivative_panel(&panels[1], curve, derivative, zone)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_curve_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    raw_samples: &[(f64, f64)],
    curve: &BinnedPowerCurve,
    zone: &UsableZone,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let x_max = *curve.speeds.last().expect("non-empty curve");
    let y_max = raw_samples
        .iter()
        .map(|(_, p)| *p)
        .chain(curve.power_mw.iter().cloned())
        .fold(0.0f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Power curve", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("wind speed (m/s)")
        .y_desc("power (MW)")
        .draw()
        .map_err(render_err)?;

    // Zone band behind everything else
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(zone.start_speed, 0.0), (zone.end_speed, y_max)],
            GREEN.mix(0.15).filled(),
        )))
        .map_err(render_err)?
        .label(format!(
            "usable zone {:.1}-{:.1} m/s",
            zone.start_speed, zone.end_speed
        ))
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], GREEN.mix(0.3).filled()));

    chart
        .draw_series(
            raw_samples
                .iter()
                .map(|&(v, p)| Circle::new((v, p), 2, BLUE.mix(0.5).filled())),
        )
        .map_err(render_err)?
        .label("raw samples")
        .legend(|(x, y)| Circle::new((x + 7, y), 2, BLUE.filled()));

    chart
        .draw_series(LineSeries::new(
            curve
                .speeds
                .iter()
                .zip(&curve.power_mw)
                .map(|(&v, &p)| (v, p)),
            RED.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("bin average")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

fn draw_derivative_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    curve: &BinnedPowerCurve,
    derivative: &[f64],
    zone: &UsableZone,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let x_max = *curve.speeds.last().expect("non-empty curve");
    let y_min = derivative.iter().cloned().fold(0.0f64, f64::min) * 1.1;
    let y_max = derivative.iter().cloned().fold(0.0f64, f64::max) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Power derivative", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, y_min..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("wind speed (m/s)")
        .y_desc("dP/dv (MW per m/s)")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            curve
                .speeds
                .iter()
                .zip(derivative)
                .map(|(&v, &d)| (v, d)),
            BLUE.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("derivative")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 15, y)], BLUE.stroke_width(2)));

    // Zone boundaries
    for boundary in [zone.start_speed, zone.end_speed] {
        chart
            .draw_series(LineSeries::new(
                vec![(boundary, y_min), (boundary, y_max)],
                BLACK.stroke_width(1),
            ))
            .map_err(render_err)?;
    }

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
    use tempfile::TempDir;
    use wat_algo::{bin_power_curve, detect_usable_zone, power_derivative, PowerCurveConfig, ZoneConfig};

    fn synthetic_samples() -> Vec<(f64, f64)> {
        let mut samples = Vec::new();
        let mut v = 0.0;
        while v <= 25.4 {
            let p = if v < 3.0 {
                0.0
            } else if v < 12.0 {
                2.0 * (v - 3.0) / 9.0
            } else if v <= 20.0 {
                2.0
            } else {
                0.0
            };
            samples.push((v, p));
            v += 0.1;
        }
        samples
    }

    #[test]
    fn writes_a_png() {
        let samples = synthetic_samples();
        let config = PowerCurveConfig::default();
        let curve = bin_power_curve(&samples, &config).unwrap();
        let deriv = power_derivative(&curve, &config);
        let zone = detect_usable_zone(&curve, &deriv, &ZoneConfig::default()).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power_curve.png");
        render_power_curve(&path, &samples, &curve, &deriv, &zone).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn rejects_misaligned_derivative() {
        let samples = synthetic_samples();
        let config = PowerCurveConfig::default();
        let curve = bin_power_curve(&samples, &config).unwrap();
        let deriv = power_derivative(&curve, &config);
        let zone = detect_usable_zone(&curve, &deriv, &ZoneConfig::default()).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("power_curve.png");
        assert!(render_power_curve(&path, &samples, &curve, &deriv[..10], &zone).is_err());
    }
}
