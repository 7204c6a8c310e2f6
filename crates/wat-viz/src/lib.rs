//! Figure rendering for the wind analysis pipelines.
//!
//! Each pipeline gets one PNG: a two-panel distribution figure (density
//! histogram against the fitted model, quantile plot with the deviation
//! onset), a two-panel power-curve figure (raw samples with the binned
//! curve and usable zone, derivative with the zone boundaries) and a
//! four-panel simulation dashboard.
//!
//! Rendering is strictly optional downstream: every entry point takes an
//! output path and fails with a [`wat_core::WatError`] rather than
//! panicking when the backend cannot write.

pub mod distribution;
pub mod power_curve;
pub mod simulation;

mod style;

pub use distribution::render_distribution;
pub use power_curve::render_power_curve;
pub use simulation::render_simulation;
