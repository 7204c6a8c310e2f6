use std::io::{self, Write};

use anyhow::{Context, Result};
use tabwriter::TabWriter;
use tracing::info;
use wat_algo::{run_simulation, SimulationConfig};
use wat_cli::SimulateArgs;
use wat_core::{TurbineParams, WeibullParams};
use wat_io::{write_simulation_report, SimulationReport};
use wat_viz::render_simulation;

pub fn run(args: &SimulateArgs) -> Result<()> {
    let config = SimulationConfig {
        weibull: WeibullParams {
            shape: args.shape,
            scale: args.scale,
        },
        turbine: TurbineParams {
            rotor_diameter_m: args.rotor_diameter,
            efficiency: args.efficiency,
            air_density: args.air_density,
        },
        hours: args.hours,
        seed: args.seed,
    };

    info!(
        "simulating case {}: {} hour(s), Weibull(k={:.3}, c={:.3}), seed {}",
        args.case, args.hours, args.shape, args.scale, args.seed
    );
    let run = run_simulation(&config).context("running simulation")?;
    let summary = &run.summary;

    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "QUANTITY\tVALUE")?;
    writeln!(tw, "case\t{}", args.case)?;
    writeln!(tw, "mean wind speed\t{:.2} m/s", summary.mean_speed)?;
    writeln!(tw, "max wind speed\t{:.2} m/s", summary.max_speed)?;
    writeln!(tw, "total energy\t{:.1} MWh", summary.total_energy_mwh)?;
    writeln!(tw, "mean power\t{:.3} MW", summary.mean_power_mw)?;
    writeln!(tw, "max power\t{:.3} MW", summary.max_power_mw)?;
    writeln!(tw, "load factor\t{:.1} %", summary.load_factor_pct)?;
    writeln!(tw, "mean daily energy\t{:.1} MWh/day", summary.daily_energy_mwh)?;
    tw.flush()?;

    let report = SimulationReport {
        case: args.case.clone(),
        shape: args.shape,
        scale: args.scale,
        rotor_diameter_m: args.rotor_diameter,
        efficiency: args.efficiency,
        air_density: args.air_density,
        hours: args.hours,
        seed: args.seed,
        mean_speed: summary.mean_speed,
        max_speed: summary.max_speed,
        total_energy_mwh: summary.total_energy_mwh,
        mean_power_mw: summary.mean_power_mw,
        max_power_mw: summary.max_power_mw,
        load_factor_pct: summary.load_factor_pct,
        daily_energy_mwh: summary.daily_energy_mwh,
    };
    let path = write_simulation_report(&args.report_dir, &report).context("writing report")?;
    info!("wrote {}", path.display());

    if let Some(plot) = &args.plot {
        render_simulation(plot, &run, &config)
            .with_context(|| format!("rendering '{}'", plot.display()))?;
        info!("wrote {}", plot.display());
    }

    Ok(())
}
