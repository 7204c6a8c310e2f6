use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tabwriter::TabWriter;
use tracing::info;
use wat_algo::{
    clean_speeds, detect_deviation, draw_speeds, fit_weibull, ks_test, DeviationConfig,
};
use wat_cli::FitArgs;
use wat_core::SampleStats;
use wat_io::{discover_measurement_files, load_wind_speeds, MeasurementFormat};
use wat_viz::render_distribution;

use super::report_diagnostics;

pub fn run(args: &FitArgs) -> Result<()> {
    let files = match &args.dir {
        Some(dir) => discover_measurement_files(dir)
            .with_context(|| format!("discovering measurement files in '{}'", dir.display()))?,
        None => {
            if args.files.is_empty() {
                bail!("give measurement files or --dir");
            }
            args.files.clone()
        }
    };
    info!("loading {} measurement file(s)", files.len());

    let format = MeasurementFormat {
        skip_rows: args.skip_rows,
        speed_column: args.speed_column,
    };
    let loaded = load_wind_speeds(&files, &format).context("loading measurements")?;
    report_diagnostics(&loaded.diagnostics);

    let speeds = clean_speeds(&loaded.speeds);
    let dropped = loaded.speeds.len() - speeds.len();
    if dropped > 0 {
        info!("dropped {dropped} non-positive or non-finite sample(s)");
    }
    if speeds.is_empty() {
        bail!("no usable wind speeds after cleaning");
    }

    let stats = SampleStats::from_samples(&speeds)?;
    let fit = fit_weibull(&speeds).context("fitting Weibull parameters")?;
    let ks = ks_test(&speeds, &fit.params).context("goodness-of-fit test")?;
    let deviation = detect_deviation(
        &speeds,
        &fit.params,
        &DeviationConfig {
            threshold_sigmas: args.threshold_sigmas,
            baseline_fraction: args.baseline_fraction,
        },
    )
    .context("quantile deviation detection")?;

    // Sanity draw: a synthetic sample from the fitted model should mirror
    // the measured statistics
    let synthetic = draw_speeds(&fit.params, args.sanity_draws, args.seed)?;
    let synthetic_stats = SampleStats::from_samples(&synthetic)?;

    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "QUANTITY\tVALUE")?;
    writeln!(tw, "samples\t{}", stats.count)?;
    writeln!(tw, "sample mean\t{:.2} m/s", stats.mean)?;
    writeln!(tw, "sample std dev\t{:.2} m/s", stats.std_dev)?;
    writeln!(tw, "sample range\t{:.2}-{:.2} m/s", stats.min, stats.max)?;
    writeln!(tw, "shape k\t{:.3}", fit.params.shape)?;
    writeln!(tw, "scale c\t{:.3} m/s", fit.params.scale)?;
    writeln!(tw, "model mean\t{:.2} m/s", fit.params.mean())?;
    writeln!(tw, "log-likelihood\t{:.1}", fit.log_likelihood)?;
    writeln!(tw, "iterations\t{}", fit.iterations)?;
    writeln!(tw, "KS statistic\t{:.4}", ks.statistic)?;
    writeln!(tw, "KS p-value\t{:.4}", ks.p_value)?;
    writeln!(
        tw,
        "sanity draw\t{} draw(s), seed {}",
        args.sanity_draws, args.seed
    )?;
    writeln!(tw, "sanity draw mean\t{:.2} m/s", synthetic_stats.mean)?;
    writeln!(tw, "sanity draw std dev\t{:.2} m/s", synthetic_stats.std_dev)?;
    writeln!(
        tw,
        "sanity draw range\t{:.2}-{:.2} m/s",
        synthetic_stats.min, synthetic_stats.max
    )?;
    match deviation.onset {
        Some(onset) => {
            writeln!(
                tw,
                "deviation onset\tquantile {:.2} at {:.2} m/s ({:.1}% of tail)",
                onset.quantile_fraction,
                onset.value,
                onset.tail_fraction * 100.0
            )?;
        }
        None => writeln!(tw, "deviation onset\tnone")?,
    }
    tw.flush()?;

    if let Some(plot) = &args.plot {
        render_distribution(plot, &speeds, &fit.params, &deviation)
            .with_context(|| format!("rendering '{}'", plot.display()))?;
        info!("wrote {}", plot.display());
    }

    Ok(())
}
