use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit a Weibull distribution to wind-speed measurements
    Fit(FitArgs),
    /// Bin a raw power curve and detect the usable zone
    Zones(ZonesArgs),
    /// Simulate a year of energy production
    Simulate(SimulateArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Measurement files to load
    pub files: Vec<PathBuf>,

    /// Load every .txt file from this directory instead
    #[arg(long, conflicts_with = "files")]
    pub dir: Option<PathBuf>,

    /// Header lines to skip in each file
    #[arg(long, default_value_t = 2)]
    pub skip_rows: usize,

    /// Zero-based wind-speed column
    #[arg(long, default_value_t = 3)]
    pub speed_column: usize,

    /// Residual threshold for the deviation onset, in baseline sigmas
    #[arg(long, default_value_t = 2.0)]
    pub threshold_sigmas: f64,

    /// Fraction of the quantile plot used as the residual baseline
    #[arg(long, default_value_t = 0.7)]
    pub baseline_fraction: f64,

    /// Synthetic draws for the sanity check of the fitted model
    #[arg(long, default_value_t = 365)]
    pub sanity_draws: usize,

    /// Seed for the sanity draw
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write the distribution figure to this PNG path
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ZonesArgs {
    /// Power-curve sample file
    pub file: PathBuf,

    /// Header lines to skip
    #[arg(long, default_value_t = 1)]
    pub skip_rows: usize,

    /// Zero-based wind-speed column
    #[arg(long, default_value_t = 0)]
    pub speed_column: usize,

    /// Zero-based power column
    #[arg(long, default_value_t = 2)]
    pub power_column: usize,

    /// Multiplier applied to raw power values (default: W to MW)
    #[arg(long, default_value_t = 1e-6)]
    pub power_scale: f64,

    /// Speed bin width in m/s
    #[arg(long, default_value_t = 0.5)]
    pub bin_width: f64,

    /// Center of the last speed bin in m/s
    #[arg(long, default_value_t = 25.5)]
    pub max_speed: f64,

    /// Power level that marks the start of the zone (MW)
    #[arg(long, default_value_t = 0.1)]
    pub power_threshold: f64,

    /// Fraction of the peak derivative that counts as flat
    #[arg(long, default_value_t = 0.05)]
    pub flatten_fraction: f64,

    /// Write the power-curve figure to this PNG path
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Study case label; keys the report filename
    #[arg(long, default_value = "01A")]
    pub case: String,

    /// Weibull shape parameter k
    #[arg(long, default_value_t = 1.810)]
    pub shape: f64,

    /// Weibull scale parameter c (m/s)
    #[arg(long, default_value_t = 10.961)]
    pub scale: f64,

    /// Rotor diameter (m)
    #[arg(long, default_value_t = 90.0)]
    pub rotor_diameter: f64,

    /// Overall turbine efficiency, in (0, 1]
    #[arg(long, default_value_t = 0.40)]
    pub efficiency: f64,

    /// Air density (kg/m^3)
    #[arg(long, default_value_t = 1.225)]
    pub air_density: f64,

    /// Simulated hours
    #[arg(long, default_value_t = 8760)]
    pub hours: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Directory the report file is written into
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,

    /// Write the simulation dashboard to this PNG path
    #[arg(long)]
    pub plot: Option<PathBuf>,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
