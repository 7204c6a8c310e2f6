//! # wat-algo: Wind Statistics & Simulation Algorithms
//!
//! The numeric pipelines of the toolkit, all operating on plain `f64`
//! slices produced by wat-io:
//!
//! - [`weibull`]: sample cleaning, maximum-likelihood Weibull fitting,
//!   and the one-sample Kolmogorov-Smirnov goodness-of-fit test
//! - [`deviation`]: quantile-plot knee detection, i.e. where the empirical
//!   distribution stops matching the fitted model
//! - [`power_curve`]: bin-averaging of raw power-curve samples and
//!   derivative-based usable-zone detection
//! - [`simulation`]: seeded annual energy production simulation from a
//!   fitted Weibull model and turbine parameters
//!
//! Every pipeline takes an explicit config struct with the heuristic
//! constants as fields; nothing reads module-level state. All functions are
//! deterministic for a given input (the simulator via its fixed seed).

pub mod deviation;
pub mod power_curve;
pub mod simulation;
pub mod weibull;

pub use deviation::{detect_deviation, DeviationConfig, DeviationOnset, DeviationReport};
pub use power_curve::{
    bin_power_curve, detect_usable_zone, power_derivative, BinnedPowerCurve, PowerCurveConfig,
    UsableZone, ZoneConfig,
};
pub use simulation::{draw_speeds, run_simulation, SimulationConfig, SimulationRun, SimulationSummary};
pub use weibull::{clean_speeds, fit_weibull, ks_test, KsTest, WeibullFit};
