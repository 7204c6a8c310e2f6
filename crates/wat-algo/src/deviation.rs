//! Quantile-plot deviation (knee) detection.
//!
//! Compares the sorted sample set against the theoretical quantiles of a
//! fitted Weibull model. A straight line is fitted through the quantile
//! pairs; the first point whose residual exceeds a threshold derived from
//! the lower portion of the plot marks where the empirical distribution
//! stops following the model.

use serde::Serialize;
use wat_core::{WatError, WatResult, WeibullParams};

/// Knee-detection tuning constants.
///
/// Empirical thresholds, carried as configuration rather than re-derived.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeviationConfig {
    /// Residual threshold as a multiple of the baseline standard deviation.
    pub threshold_sigmas: f64,
    /// Fraction of the (sorted) points used as the baseline. Restricting
    /// the baseline to the lower part keeps tail outliers from inflating
    /// their own threshold.
    pub baseline_fraction: f64,
}

impl Default for DeviationConfig {
    fn default() -> Self {
        Self {
            threshold_sigmas: 2.0,
            baseline_fraction: 0.7,
        }
    }
}

impl DeviationConfig {
    /// Check the constants are usable.
    pub fn validate(&self) -> WatResult<()> {
        if !self.threshold_sigmas.is_finite() || self.threshold_sigmas <= 0.0 {
            return Err(WatError::Config(format!(
                "threshold_sigmas must be > 0, got {}",
                self.threshold_sigmas
            )));
        }
        if !self.baseline_fraction.is_finite()
            || self.baseline_fraction <= 0.0
            || self.baseline_fraction > 1.0
        {
            return Err(WatError::Config(format!(
                "baseline_fraction must be in (0, 1], got {}",
                self.baseline_fraction
            )));
        }
        Ok(())
    }
}

/// The first point where the empirical distribution leaves the model.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeviationOnset {
    /// Index into the sorted sample set.
    pub index: usize,
    /// Quantile fraction of the onset (index / n).
    pub quantile_fraction: f64,
    /// Empirical value at the onset (m/s).
    pub value: f64,
    /// Fraction of the sample set at or beyond the onset.
    pub tail_fraction: f64,
}

/// Full quantile-deviation report.
#[derive(Debug, Clone, Serialize)]
pub struct DeviationReport {
    /// Theoretical quantiles at plotting positions (i + 0.5) / n.
    pub theoretical: Vec<f64>,
    /// Sorted empirical values.
    pub empirical: Vec<f64>,
    /// Slope of the fitted quantile line.
    pub slope: f64,
    /// Intercept of the fitted quantile line.
    pub intercept: f64,
    /// Absolute residual of each point from the fitted line.
    pub residuals: Vec<f64>,
    /// Residual relative to the theoretical quantile,
    /// |empirical - theoretical| / (theoretical + 1e-6).
    ///
    /// Carried for extended consumers; the printed summary does not use it.
    pub relative_deviation: Vec<f64>,
    /// Residual threshold actually applied.
    pub threshold: f64,
    /// First threshold exceedance, if any.
    pub onset: Option<DeviationOnset>,
}

/// Closed-form OLS line through (x, y): slope = cov(x,y)/var(x).
fn linear_fit(x: &[f64], y: &[f64]) -> WatResult<(f64, f64)> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        sxx += (xi - mean_x) * (xi - mean_x);
        sxy += (xi - mean_x) * (yi - mean_y);
    }
    if sxx < 1e-300 {
        return Err(WatError::Validation(
            "quantile regression: theoretical quantiles have zero variance".into(),
        ));
    }
    let slope = sxy / sxx;
    Ok((slope, mean_y - slope * mean_x))
}

/// Detect the deviation onset of `samples` against a fitted model.
///
/// Steps:
/// 1. sort ascending; theoretical quantile of index i is the inverse CDF at
///    (i + 0.5) / n
/// 2. OLS line of empirical value on theoretical quantile over all points
/// 3. residual = |empirical - line|
/// 4. threshold = `threshold_sigmas` x population-stddev of the residuals in
///    the lower `baseline_fraction` of points
/// 5. onset = first index whose residual exceeds the threshold
///
/// # Errors
///
/// `Validation` for fewer than 3 samples or non-finite values, `Config` for
/// bad tuning constants or parameters.
pub fn detect_deviation(
    samples: &[f64],
    params: &WeibullParams,
    config: &DeviationConfig,
) -> WatResult<DeviationReport> {
    config.validate()?;
    params.validate()?;

    let n = samples.len();
    if n < 3 {
        return Err(WatError::Validation(format!(
            "deviation detection needs at least 3 samples, got {n}"
        )));
    }
    if samples.iter().any(|v| !v.is_finite()) {
        return Err(WatError::Validation(
            "deviation detection requires finite samples".into(),
        ));
    }

    let mut empirical = samples.to_vec();
    empirical.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));

    let n_f = n as f64;
    let theoretical: Vec<f64> = (0..n)
        .map(|i| params.quantile((i as f64 + 0.5) / n_f))
        .collect();

    let (slope, intercept) = linear_fit(&theoretical, &empirical)?;

    let residuals: Vec<f64> = theoretical
        .iter()
        .zip(&empirical)
        .map(|(&t, &e)| (e - (slope * t + intercept)).abs())
        .collect();

    let relative_deviation: Vec<f64> = theoretical
        .iter()
        .zip(&empirical)
        .map(|(&t, &e)| (e - t).abs() / (t + 1e-6))
        .collect();

    // Baseline from the lower portion of the plot only
    let baseline_len = ((config.baseline_fraction * n_f).floor() as usize).max(1);
    let baseline = &residuals[..baseline_len.min(n)];
    let mean_r = baseline.iter().sum::<f64>() / baseline.len() as f64;
    let var_r =
        baseline.iter().map(|&r| (r - mean_r) * (r - mean_r)).sum::<f64>() / baseline.len() as f64;
    let threshold = config.threshold_sigmas * var_r.sqrt();

    let onset = residuals
        .iter()
        .position(|&r| r > threshold)
        .map(|index| DeviationOnset {
            index,
            quantile_fraction: index as f64 / n_f,
            value: empirical[index],
            tail_fraction: (n - index) as f64 / n_f,
        });

    Ok(DeviationReport {
        theoretical,
        empirical,
        slope,
        intercept,
        residuals,
        relative_deviation,
        threshold,
        onset,
    })
}
