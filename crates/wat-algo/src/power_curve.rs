//! Power-curve binning and usable-zone detection.
//!
//! Raw (wind speed, power) samples are averaged into fixed half-m/s speed
//! bins; the usable operating band of the turbine is then bracketed by an
//! absolute power threshold at the low end and a flattening of the power
//! derivative at the high end.

use serde::Serialize;
use wat_core::{WatError, WatResult};

/// Speed-binning grid.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerCurveConfig {
    /// Bin width in m/s. Samples within half a width of a bin center are
    /// averaged into that bin.
    pub bin_width: f64,
    /// Center of the last bin in m/s.
    pub max_speed: f64,
}

impl Default for PowerCurveConfig {
    /// Bins 0.0, 0.5, ..., 25.5 m/s.
    fn default() -> Self {
        Self {
            bin_width: 0.5,
            max_speed: 25.5,
        }
    }
}

impl PowerCurveConfig {
    /// Check the grid is usable.
    pub fn validate(&self) -> WatResult<()> {
        if !self.bin_width.is_finite() || self.bin_width <= 0.0 {
            return Err(WatError::Config(format!(
                "bin_width must be > 0, got {}",
                self.bin_width
            )));
        }
        if !self.max_speed.is_finite() || self.max_speed < self.bin_width {
            return Err(WatError::Config(format!(
                "max_speed must be at least one bin width, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }

    /// Bin centers 0, w, 2w, ..., max_speed.
    pub fn bin_speeds(&self) -> Vec<f64> {
        let count = (self.max_speed / self.bin_width).round() as usize + 1;
        (0..count).map(|i| i as f64 * self.bin_width).collect()
    }
}

/// Bin-averaged power curve.
#[derive(Debug, Clone, Serialize)]
pub struct BinnedPowerCurve {
    /// Bin center speeds in m/s.
    pub speeds: Vec<f64>,
    /// Mean power per bin in MW; bins with no samples hold exactly 0.
    pub power_mw: Vec<f64>,
}

/// Average raw (speed, power-MW) samples into the configured speed bins.
///
/// A sample belongs to bin center v when its speed is in
/// [v - w/2, v + w/2); a bin without samples gets power 0.
pub fn bin_power_curve(
    samples: &[(f64, f64)],
    config: &PowerCurveConfig,
) -> WatResult<BinnedPowerCurve> {
    config.validate()?;
    if samples.is_empty() {
        return Err(WatError::Validation(
            "power-curve binning needs at least one sample".into(),
        ));
    }

    let speeds = config.bin_speeds();
    let half = config.bin_width / 2.0;
    let power_mw = speeds
        .iter()
        .map(|&v| {
            let mut sum = 0.0;
            let mut count = 0usize;
            for &(speed, power) in samples {
                if speed >= v - half && speed < v + half {
                    sum += power;
                    count += 1;
                }
            }
            if count > 0 {
                sum / count as f64
            } else {
                0.0
            }
        })
        .collect();

    Ok(BinnedPowerCurve { speeds, power_mw })
}

/// First difference of the binned power over the bin width, padded by
/// repeating the final computed value so the result stays aligned with the
/// bins.
pub fn power_derivative(curve: &BinnedPowerCurve, config: &PowerCurveConfig) -> Vec<f64> {
    let n = curve.power_mw.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut deriv: Vec<f64> = curve
        .power_mw
        .windows(2)
        .map(|w| (w[1] - w[0]) / config.bin_width)
        .collect();
    let last = *deriv.last().expect("n >= 2 gives at least one difference");
    deriv.push(last);
    deriv
}

/// Usable-zone detection constants.
///
/// Empirical thresholds, carried as configuration rather than re-derived.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ZoneConfig {
    /// A bin is "producing" once its power exceeds this level (MW).
    pub power_threshold_mw: f64,
    /// The curve is "flat" once the derivative drops below this fraction of
    /// the maximum observed derivative.
    pub flatten_fraction: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            power_threshold_mw: 0.1,
            flatten_fraction: 0.05,
        }
    }
}

impl ZoneConfig {
    /// Check the constants are usable.
    pub fn validate(&self) -> WatResult<()> {
        if !self.power_threshold_mw.is_finite() || self.power_threshold_mw <= 0.0 {
            return Err(WatError::Config(format!(
                "power_threshold_mw must be > 0, got {}",
                self.power_threshold_mw
            )));
        }
        if !self.flatten_fraction.is_finite()
            || self.flatten_fraction <= 0.0
            || self.flatten_fraction >= 1.0
        {
            return Err(WatError::Config(format!(
                "flatten_fraction must be in (0, 1), got {}",
                self.flatten_fraction
            )));
        }
        Ok(())
    }
}

/// The detected operating band of the turbine.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UsableZone {
    /// First bin index inside the zone.
    pub start_bin: usize,
    /// One past the last bin index inside the zone (exclusive).
    pub end_bin: usize,
    /// Speed of the first bin inside the zone (m/s).
    pub start_speed: f64,
    /// Speed of the last bin inside the zone (m/s).
    pub end_speed: f64,
    /// Number of bins inside the zone.
    pub bin_count: usize,
}

/// Bracket the usable zone of a binned power curve.
///
/// Start: first bin whose power exceeds the absolute threshold. End
/// (exclusive): first later bin whose derivative falls below
/// `flatten_fraction` of the maximum derivative; if the curve never
/// flattens, the zone extends to the last bin.
///
/// # Errors
///
/// `Validation` when no bin reaches the power threshold (the curve has no
/// usable zone).
pub fn detect_usable_zone(
    curve: &BinnedPowerCurve,
    derivative: &[f64],
    config: &ZoneConfig,
) -> WatResult<UsableZone> {
    config.validate()?;
    if curve.power_mw.len() != derivative.len() {
        return Err(WatError::Validation(format!(
            "derivative length {} does not match bin count {}",
            derivative.len(),
            curve.power_mw.len()
        )));
    }

    let start_bin = curve
        .power_mw
        .iter()
        .position(|&p| p > config.power_threshold_mw)
        .ok_or_else(|| {
            WatError::Validation(format!(
                "no usable zone: no bin exceeds {} MW",
                config.power_threshold_mw
            ))
        })?;

    let max_deriv = derivative.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let flat_level = config.flatten_fraction * max_deriv;

    let end_bin = derivative
        .iter()
        .enumerate()
        .skip(start_bin + 1)
        .find(|&(_, &d)| d < flat_level)
        .map(|(i, _)| i)
        .unwrap_or(curve.power_mw.len());

    Ok(UsableZone {
        start_bin,
        end_bin,
        start_speed: curve.speeds[start_bin],
        end_speed: curve.speeds[end_bin - 1],
        bin_count: end_bin - start_bin,
    })
}
