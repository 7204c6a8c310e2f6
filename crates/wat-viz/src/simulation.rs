//! Four-panel simulation dashboard: simulated speed histogram against the
//! model PDF, the turbine power law with simulated operating points, the
//! opening weeks of the hourly power series, and the power histogram with
//! the mean marked.

use std::path::Path;

use plotters::prelude::*;
use wat_algo::{SimulationConfig, SimulationRun};
use wat_core::{WatError, WatResult};

use crate::style::{density_histogram, render_err, CAPTION_FONT, FOUR_PANEL};

const HIST_BINS: usize = 60;
const SERIES_DAYS: usize = 30;
const SCATTER_STRIDE: usize = 100;

/// Render the simulation dashboard to `path`.
pub fn render_simulation(
    path: &Path,
    run: &SimulationRun,
    config: &SimulationConfig,
) -> WatResult<()> {
    if run.speeds.is_empty() || run.speeds.len() != run.power_mw.len() {
        return Err(WatError::Validation(
            "simulation figure needs aligned non-empty series".into(),
        ));
    }

    let root = BitMapBackend::new(path, FOUR_PANEL).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;
    let panels = root.split_evenly((2, 2));

    draw_speed_histogram(&panels[0], run, config)?;
    draw_power_law(&panels[1], run, config)?;
    draw_power_series(&panels[2], run)?;
    draw_power_histogram(&panels[3], run)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn draw_speed_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    run: &SimulationRun,
    config: &SimulationConfig,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let max_speed = run.summary.max_speed;
    let (bin_width, density) = density_histogram(&run.speeds, HIST_BINS);

    let pdf: Vec<(f64, f64)> = (0..=400)
        .map(|i| {
            let v = i as f64 * max_speed / 400.0;
            (v, config.weibull.pdf(v))
        })
        .collect();
    let y_max = density
        .iter()
        .chain(pdf.iter().map(|(_, p)| p))
        .cloned()
        .fold(0.0f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Simulated wind speeds", CAPTION_FONT)
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
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(pdf, RED.stroke_width(2)))
        .map_err(render_err)?;
    Ok(())
}

fn draw_power_law<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    run: &SimulationRun,
    config: &SimulationConfig,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let max_speed = run.summary.max_speed;
    let y_max = run.summary.max_power_mw * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Turbine power law", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_speed, 0.0..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("wind speed (m/s)")
        .y_desc("power (MW)")
        .draw()
        .map_err(render_err)?;

    let curve: Vec<(f64, f64)> = (0..=400)
        .map(|i| {
            let v = i as f64 * max_speed / 400.0;
            (v, config.turbine.power_megawatts(v))
        })
        .collect();
    chart
        .draw_series(LineSeries::new(curve, RED.stroke_width(2)))
        .map_err(render_err)?;

    // Every 100th simulated hour as an operating point
    chart
        .draw_series(
            run.speeds
                .iter()
                .zip(&run.power_mw)
                .step_by(SCATTER_STRIDE)
                .map(|(&v, &p)| Circle::new((v, p), 3, BLUE.filled())),
        )
        .map_err(render_err)?;
    Ok(())
}

fn draw_power_series<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    run: &SimulationRun,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let hours = run.power_mw.len().min(SERIES_DAYS * 24);
    let y_max = run.power_mw[..hours]
        .iter()
        .cloned()
        .fold(0.0f64, f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption("Hourly power, first 30 days", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..hours as f64 / 24.0, 0.0..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("day")
        .y_desc("power (MW)")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            run.power_mw[..hours]
                .iter()
                .enumerate()
                .map(|(h, &p)| (h as f64 / 24.0, p)),
            BLUE.stroke_width(1),
        ))
        .map_err(render_err)?;
    Ok(())
}

fn draw_power_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    run: &SimulationRun,
) -> WatResult<()>
where
    DB::ErrorType: 'static,
{
    let (bin_width, density) = density_histogram(&run.power_mw, HIST_BINS);
    let y_max = density.iter().cloned().fold(0.0f64, f64::max) * 1.1;
    let x_max = run.summary.max_power_mw;

    let mut chart = ChartBuilder::on(area)
        .caption("Instantaneous power", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("power (MW)")
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
        .map_err(render_err)?;

    let mean = run.summary.mean_power_mw;
    chart
        .draw_series(LineSeries::new(
            vec![(mean, 0.0), (mean, y_max)],
            RED.stroke_width(2),
        ))
        .map_err(render_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wat_algo::run_simulation;

    #[test]
    fn writes_a_png() {
        let config = SimulationConfig {
            hours: 24 * 40,
            ..Default::default()
        };
        let run = run_simulation(&config).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("simulation.png");
        render_simulation(&path, &run, &config).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }

    #[test]
    fn short_run_renders_partial_series() {
        // Fewer hours than the 30-day window
        let config = SimulationConfig {
            hours: 100,
            ..Default::default()
        };
        let run = run_simulation(&config).unwrap();

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("simulation.png");
        render_simulation(&path, &run, &config).unwrap();
        assert!(path.exists());
    }
}
