//! # wat-io: Measurement File I/O
//!
//! Flat-file ingestion for the wind analysis pipelines and the persisted
//! simulation report.
//!
//! ## Design Philosophy
//!
//! **Error Recovery**: a measurement batch keeps going when a single file
//! fails to read or parse. Every skipped file and row is recorded in
//! [`LoadDiagnostics`] for user visibility rather than silently swallowed
//! or escalated into a panic.
//!
//! **Encoding tolerance**: station exports are Latin-1 with occasional
//! non-ASCII bytes in the headers. Files are decoded byte-for-byte into the
//! first 256 code points, so no input can abort a read on encoding grounds.
//!
//! ## Module Overview
//!
//! - [`diagnostics`]: fail-soft issue collection for a load batch
//! - [`measurements`]: fixed-column wind-speed measurement files
//! - [`power_curve`]: raw (speed, power) turbine sample files
//! - [`report`]: the persisted per-case simulation report
//!
//! ## Error Handling
//!
//! Fatal conditions (no input files, nothing parseable at all) surface as
//! [`wat_core::WatError`]; everything recoverable lands in diagnostics.

pub mod diagnostics;
pub mod measurements;
pub mod power_curve;
pub mod report;

pub use diagnostics::{LoadDiagnostics, LoadIssue, LoadStats, Severity};
pub use measurements::{
    discover_measurement_files, load_wind_speeds, LoadResult, MeasurementFormat,
};
pub use power_curve::{load_power_samples, PowerCurveFormat, PowerCurveSamples};
pub use report::{write_simulation_report, SimulationReport};
