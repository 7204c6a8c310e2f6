//! Persisted per-case simulation report.
//!
//! A small human-readable text file, one per study case, written next to
//! any rendered figures so a run leaves a durable record of its inputs and
//! aggregates.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use wat_core::{WatError, WatResult};

/// Everything the report file records about a simulation run.
///
/// Plain fields rather than the simulation's own types, so writing a
/// report needs nothing beyond this crate.
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Study case label, e.g. "01A"; keys the output filename.
    pub case: String,
    /// Weibull shape parameter k.
    pub shape: f64,
    /// Weibull scale parameter c (m/s).
    pub scale: f64,
    /// Rotor diameter (m).
    pub rotor_diameter_m: f64,
    /// Overall efficiency, in (0, 1].
    pub efficiency: f64,
    /// Air density (kg/m^3).
    pub air_density: f64,
    /// Simulated hours.
    pub hours: usize,
    /// RNG seed of the run.
    pub seed: u64,
    /// Mean simulated wind speed (m/s).
    pub mean_speed: f64,
    /// Maximum simulated wind speed (m/s).
    pub max_speed: f64,
    /// Total produced energy (MWh).
    pub total_energy_mwh: f64,
    /// Mean instantaneous power (MW).
    pub mean_power_mw: f64,
    /// Maximum instantaneous power (MW).
    pub max_power_mw: f64,
    /// Load factor in percent.
    pub load_factor_pct: f64,
    /// Mean energy per day (MWh/day).
    pub daily_energy_mwh: f64,
}

/// Write the report to `dir/simulation_report_<case>.txt`.
///
/// Overwrites any previous report for the same case and returns the path
/// written.
pub fn write_simulation_report(dir: &Path, report: &SimulationReport) -> WatResult<PathBuf> {
    if report.case.trim().is_empty() {
        return Err(WatError::Validation("report case label is empty".into()));
    }
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("simulation_report_{}.txt", report.case));

    let mut f = fs::File::create(&path)?;
    writeln!(f, "Annual energy simulation report - case {}", report.case)?;
    writeln!(f, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(f)?;
    writeln!(f, "Inputs")?;
    writeln!(f, "  Weibull shape k:        {:.3}", report.shape)?;
    writeln!(f, "  Weibull scale c:        {:.3} m/s", report.scale)?;
    writeln!(f, "  Rotor diameter:         {:.1} m", report.rotor_diameter_m)?;
    writeln!(f, "  Efficiency:             {:.2}", report.efficiency)?;
    writeln!(f, "  Air density:            {:.3} kg/m3", report.air_density)?;
    writeln!(f, "  Simulated hours:        {}", report.hours)?;
    writeln!(f, "  Seed:                   {}", report.seed)?;
    writeln!(f)?;
    writeln!(f, "Results")?;
    writeln!(f, "  Mean wind speed:        {:.2} m/s", report.mean_speed)?;
    writeln!(f, "  Max wind speed:         {:.2} m/s", report.max_speed)?;
    writeln!(f, "  Total energy:           {:.1} MWh", report.total_energy_mwh)?;
    writeln!(f, "  Mean power:             {:.3} MW", report.mean_power_mw)?;
    writeln!(f, "  Max power:              {:.3} MW", report.max_power_mw)?;
    writeln!(f, "  Load factor:            {:.1} %", report.load_factor_pct)?;
    writeln!(f, "  Mean daily energy:      {:.1} MWh/day", report.daily_energy_mwh)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_report() -> SimulationReport {
        SimulationReport {
            case: "01A".to_string(),
            shape: 1.810,
            scale: 10.961,
            rotor_diameter_m: 90.0,
            efficiency: 0.40,
            air_density: 1.225,
            hours: 8760,
            seed: 42,
            mean_speed: 9.74,
            max_speed: 34.2,
            total_energy_mwh: 15234.5,
            mean_power_mw: 1.739,
            max_power_mw: 62.5,
            load_factor_pct: 2.8,
            daily_energy_mwh: 41.7,
        }
    }

    #[test]
    fn writes_case_keyed_file() {
        let dir = TempDir::new().unwrap();
        let path = write_simulation_report(dir.path(), &sample_report()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "simulation_report_01A.txt"
        );
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("case 01A"));
        assert!(content.contains("Weibull shape k:        1.810"));
        assert!(content.contains("Total energy:           15234.5 MWh"));
        assert!(content.contains("Load factor:            2.8 %"));
    }

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("reports");
        let path = write_simulation_report(&nested, &sample_report()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn overwrites_previous_report() {
        let dir = TempDir::new().unwrap();
        let mut report = sample_report();
        write_simulation_report(dir.path(), &report).unwrap();
        report.total_energy_mwh = 9999.9;
        let path = write_simulation_report(dir.path(), &report).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("9999.9 MWh"));
        assert!(!content.contains("15234.5"));
    }

    #[test]
    fn rejects_empty_case_label() {
        let dir = TempDir::new().unwrap();
        let mut report = sample_report();
        report.case = "  ".to_string();
        assert!(write_simulation_report(dir.path(), &report).is_err());
    }
}
