use std::io::{self, Write};

use anyhow::{Context, Result};
use tabwriter::TabWriter;
use tracing::info;
use wat_algo::{
    bin_power_curve, detect_usable_zone, power_derivative, PowerCurveConfig, ZoneConfig,
};
use wat_cli::ZonesArgs;
use wat_io::{load_power_samples, PowerCurveFormat};
use wat_viz::render_power_curve;

use super::report_diagnostics;

pub fn run(args: &ZonesArgs) -> Result<()> {
    let format = PowerCurveFormat {
        skip_rows: args.skip_rows,
        speed_column: args.speed_column,
        power_column: args.power_column,
        power_scale: args.power_scale,
    };
    let loaded = load_power_samples(&args.file, &format)
        .with_context(|| format!("loading power curve '{}'", args.file.display()))?;
    report_diagnostics(&loaded.diagnostics);
    info!("loaded {} raw sample(s)", loaded.samples.len());

    let curve_config = PowerCurveConfig {
        bin_width: args.bin_width,
        max_speed: args.max_speed,
    };
    let curve = bin_power_curve(&loaded.samples, &curve_config).context("binning power curve")?;
    let derivative = power_derivative(&curve, &curve_config);

    let zone_config = ZoneConfig {
        power_threshold_mw: args.power_threshold,
        flatten_fraction: args.flatten_fraction,
    };
    let zone =
        detect_usable_zone(&curve, &derivative, &zone_config).context("detecting usable zone")?;

    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "BIN\tSPEED (m/s)\tPOWER (MW)\tdP/dv\tZONE")?;
    for (i, ((&speed, &power), &deriv)) in curve
        .speeds
        .iter()
        .zip(&curve.power_mw)
        .zip(&derivative)
        .enumerate()
    {
        let marker = if i >= zone.start_bin && i < zone.end_bin {
            "*"
        } else {
            ""
        };
        writeln!(tw, "{i}\t{speed:.1}\t{power:.3}\t{deriv:.3}\t{marker}")?;
    }
    tw.flush()?;

    println!();
    println!(
        "Usable zone: {:.1}-{:.1} m/s ({} bins, start power > {} MW)",
        zone.start_speed, zone.end_speed, zone.bin_count, args.power_threshold
    );

    if let Some(plot) = &args.plot {
        render_power_curve(plot, &loaded.samples, &curve, &derivative, &zone)
            .with_context(|| format!("rendering '{}'", plot.display()))?;
        info!("wrote {}", plot.display());
    }

    Ok(())
}
