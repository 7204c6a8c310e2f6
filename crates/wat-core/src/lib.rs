//! # wat-core: Wind Analysis Domain Model
//!
//! Fundamental data structures shared by the wat analysis pipelines.
//!
//! ## Core Data Structures
//!
//! - [`WeibullParams`] - A fitted two-parameter Weibull model (location
//!   fixed at 0), with closed-form pdf/cdf/quantile evaluation
//! - [`SampleStats`] - Summary statistics of a measurement sample set
//! - [`TurbineParams`] - Physical turbine parameters for the power model
//!   P = 0.5 · η · ρ · A · v³
//! - [`WatError`] / [`WatResult`] - Unified error handling
//!
//! ## Quick Start
//!
//! ```rust
//! use wat_core::{TurbineParams, WeibullParams};
//!
//! let model = WeibullParams::new(1.81, 10.96).unwrap();
//! assert!((model.cdf(model.quantile(0.5)) - 0.5).abs() < 1e-12);
//!
//! let turbine = TurbineParams::default();
//! assert!(turbine.power_watts(12.0) > turbine.power_watts(6.0));
//! ```
//!
//! ## Integration with the other crates
//!
//! wat-io produces the raw sample sets, wat-algo fits [`WeibullParams`]
//! and consumes [`TurbineParams`], wat-viz renders both.

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::{WatError, WatResult};

/// A fitted Weibull distribution over positive wind speeds.
///
/// The location parameter is fixed at 0, matching the standard wind-resource
/// convention: speeds are non-negative and the two remaining parameters are
/// the shape `k` (skew) and scale `c` (characteristic site speed, m/s).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeibullParams {
    /// Shape parameter k (> 0). Higher values mean more concentrated speeds.
    pub shape: f64,
    /// Scale parameter c in m/s (> 0). The characteristic speed of the site.
    pub scale: f64,
}

impl WeibullParams {
    /// Create a parameter set, validating both parameters.
    pub fn new(shape: f64, scale: f64) -> WatResult<Self> {
        let params = Self { shape, scale };
        params.validate()?;
        Ok(params)
    }

    /// Check that both parameters are finite and strictly positive.
    pub fn validate(&self) -> WatResult<()> {
        if !self.shape.is_finite() || self.shape <= 0.0 {
            return Err(WatError::Config(format!(
                "Weibull shape must be finite and > 0, got {}",
                self.shape
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(WatError::Config(format!(
                "Weibull scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }

    /// Probability density at `x`.
    ///
    /// f(x) = (k/c) · (x/c)^(k-1) · exp(-(x/c)^k) for x ≥ 0, else 0.
    pub fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            // Limit at the origin depends on the shape
            return match self.shape {
                k if k < 1.0 => f64::INFINITY,
                k if k == 1.0 => 1.0 / self.scale,
                _ => 0.0,
            };
        }
        let z = x / self.scale;
        (self.shape / self.scale) * z.powf(self.shape - 1.0) * (-z.powf(self.shape)).exp()
    }

    /// Cumulative distribution at `x`: F(x) = 1 - exp(-(x/c)^k).
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        1.0 - (-(x / self.scale).powf(self.shape)).exp()
    }

    /// Inverse CDF at probability `p` in [0, 1).
    ///
    /// Q(p) = c · (-ln(1-p))^(1/k).
    pub fn quantile(&self, p: f64) -> f64 {
        debug_assert!((0.0..1.0).contains(&p), "quantile probability out of range");
        self.scale * (-(1.0 - p).ln()).powf(1.0 / self.shape)
    }

    /// Distribution mean: c · Γ(1 + 1/k).
    pub fn mean(&self) -> f64 {
        self.scale * gamma(1.0 + 1.0 / self.shape)
    }
}

/// Gamma function via the Lanczos approximation (g = 7, n = 9).
///
/// Accurate to ~15 significant digits for positive arguments, which is all
/// the Weibull mean needs.
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection formula
        return std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma(1.0 - x));
    }

    let x = x - 1.0;
    let mut acc = COEFFS[0];
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        acc += c / (x + i as f64);
    }
    let t = x + G + 0.5;
    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * acc
}

/// Summary statistics of a sample set.
///
/// Uses the population (biased, ÷n) standard deviation throughout the
/// toolkit; the knee-detection threshold depends on this convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl SampleStats {
    /// Compute statistics from a non-empty slice of finite values.
    pub fn from_samples(samples: &[f64]) -> WatResult<Self> {
        if samples.is_empty() {
            return Err(WatError::Validation(
                "cannot compute statistics of an empty sample set".into(),
            ));
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / n;
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self {
            count: samples.len(),
            mean,
            std_dev: var.sqrt(),
            min,
            max,
        })
    }
}

/// Physical parameters of the simulated turbine.
///
/// An explicit parameter struct rather than module-level constants, so a
/// single process can run several parameter sets and tests can construct
/// them directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurbineParams {
    /// Rotor diameter in meters.
    pub rotor_diameter_m: f64,
    /// Overall efficiency η (aerodynamic + drivetrain), typical 0.35-0.45.
    pub efficiency: f64,
    /// Air density ρ in kg/m³.
    pub air_density: f64,
}

impl TurbineParams {
    /// Validate the physical parameters.
    pub fn validate(&self) -> WatResult<()> {
        if !self.rotor_diameter_m.is_finite() || self.rotor_diameter_m <= 0.0 {
            return Err(WatError::Config(format!(
                "rotor diameter must be > 0, got {}",
                self.rotor_diameter_m
            )));
        }
        if !self.efficiency.is_finite() || self.efficiency <= 0.0 || self.efficiency > 1.0 {
            return Err(WatError::Config(format!(
                "efficiency must be in (0, 1], got {}",
                self.efficiency
            )));
        }
        if !self.air_density.is_finite() || self.air_density <= 0.0 {
            return Err(WatError::Config(format!(
                "air density must be > 0, got {}",
                self.air_density
            )));
        }
        Ok(())
    }

    /// Rotor swept area A = π · (D/2)² in m².
    pub fn swept_area_m2(&self) -> f64 {
        let radius = self.rotor_diameter_m / 2.0;
        std::f64::consts::PI * radius * radius
    }

    /// Instantaneous power in watts at wind speed `v` (m/s):
    /// P = 0.5 · η · ρ · A · v³.
    pub fn power_watts(&self, v: f64) -> f64 {
        0.5 * self.efficiency * self.air_density * self.swept_area_m2() * v * v * v
    }

    /// Instantaneous power in megawatts at wind speed `v` (m/s).
    pub fn power_megawatts(&self, v: f64) -> f64 {
        self.power_watts(v) / 1.0e6
    }
}

impl Default for TurbineParams {
    /// The reference turbine: a 90 m rotor at η = 0.40 in sea-level air.
    fn default() -> Self {
        Self {
            rotor_diameter_m: 90.0,
            efficiency: 0.40,
            air_density: 1.225,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weibull_rejects_degenerate_params() {
        assert!(WeibullParams::new(0.0, 10.0).is_err());
        assert!(WeibullParams::new(-1.0, 10.0).is_err());
        assert!(WeibullParams::new(2.0, 0.0).is_err());
        assert!(WeibullParams::new(f64::NAN, 10.0).is_err());
        assert!(WeibullParams::new(2.0, f64::INFINITY).is_err());
        assert!(WeibullParams::new(1.81, 10.96).is_ok());
    }

    #[test]
    fn weibull_cdf_quantile_roundtrip() {
        let params = WeibullParams::new(1.81, 10.96).unwrap();
        for &p in &[0.01, 0.1, 0.5, 0.9, 0.99] {
            let x = params.quantile(p);
            assert!(
                (params.cdf(x) - p).abs() < 1e-12,
                "cdf(quantile({p})) = {}",
                params.cdf(x)
            );
        }
    }

    #[test]
    fn weibull_pdf_integrates_to_one() {
        let params = WeibullParams::new(2.0, 8.0).unwrap();
        let dx = 0.01;
        let integral: f64 = (0..10_000).map(|i| params.pdf(i as f64 * dx) * dx).sum();
        assert!((integral - 1.0).abs() < 1e-3, "integral = {integral}");
    }

    #[test]
    fn weibull_mean_matches_gamma_formula() {
        // For k = 1 the Weibull is exponential with mean = c
        let exponential = WeibullParams::new(1.0, 5.0).unwrap();
        assert!((exponential.mean() - 5.0).abs() < 1e-10);

        // For k = 2 (Rayleigh), mean = c·Γ(1.5) = c·√π/2
        let rayleigh = WeibullParams::new(2.0, 8.0).unwrap();
        let expected = 8.0 * std::f64::consts::PI.sqrt() / 2.0;
        assert!((rayleigh.mean() - expected).abs() < 1e-10);
    }

    #[test]
    fn sample_stats_basic() {
        let stats = SampleStats::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.count, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Population std dev: sqrt(32/8) = 2.0
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
    }

    #[test]
    fn sample_stats_empty_is_error() {
        assert!(SampleStats::from_samples(&[]).is_err());
    }

    #[test]
    fn turbine_swept_area() {
        let turbine = TurbineParams::default();
        // π · 45² ≈ 6361.7 m²
        assert!((turbine.swept_area_m2() - 6361.725_123_519_331).abs() < 1e-6);
    }

    #[test]
    fn turbine_power_is_cubic() {
        let turbine = TurbineParams::default();
        let p1 = turbine.power_watts(5.0);
        let p2 = turbine.power_watts(10.0);
        assert!((p2 / p1 - 8.0).abs() < 1e-9, "doubling speed gives 8x power");
    }

    #[test]
    fn turbine_validation() {
        let mut turbine = TurbineParams::default();
        assert!(turbine.validate().is_ok());
        turbine.efficiency = 1.5;
        assert!(turbine.validate().is_err());
        turbine.efficiency = 0.4;
        turbine.rotor_diameter_m = -90.0;
        assert!(turbine.validate().is_err());
    }

    #[test]
    fn params_serialize_roundtrip() {
        let params = WeibullParams::new(1.81, 10.96).unwrap();
        let json = serde_json::to_string(&params).unwrap();
        let back: WeibullParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
